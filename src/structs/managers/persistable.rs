use serde::Serialize;
use std::fs::{self, File};

use rmp_serde::Serializer;
use serde::de::DeserializeOwned;

use crate::errors::IoError;
use crate::utils::{create_directories_if_needed, file_exists};

/* Persist a manager as a MessagePack file between runs.
The path and the persist flag are runtime settings: they are not serialized and are restored with `attach` after loading. */
pub trait Persistable: Serialize + DeserializeOwned {
    const PATH: &'static str;

    fn new(path: Option<String>) -> Result<Self, IoError>
    where
        Self: Sized,
    {
        return Self::_new(path, true);
    }

    /* Nothing is read or written on disk */
    fn new_non_persistent() -> Self
    where
        Self: Sized,
    {
        return Self::default_new(Self::PATH.to_string(), false);
    }

    fn _new(path: Option<String>, persist: bool) -> Result<Self, IoError>
    where
        Self: Sized,
    {
        let path = path.unwrap_or(Self::PATH.to_string());
        if !persist || !file_exists(&path) {
            return Ok(Self::default_new(path, persist));
        }
        let file = File::open(&path).map_err(|e| IoError::new(&path, e.to_string()))?;
        let mut deserialized: Self =
            rmp_serde::from_read(file).map_err(|e| IoError::new(&path, e.to_string()))?;
        deserialized.attach(path, persist);
        Ok(deserialized)
    }

    fn save(&self) -> Result<(), IoError> {
        let path = self.get_path();
        create_directories_if_needed(path).map_err(|e| IoError::new(path, e.to_string()))?;
        let file = File::create(path).map_err(|e| IoError::new(path, e.to_string()))?;
        let mut writer = Serializer::new(file);
        self.serialize(&mut writer)
            .map_err(|e| IoError::new(path, e.to_string()))?;
        Ok(())
    }

    /* Remove the file and stop persisting, so that dropping the value doesn't write it again */
    fn delete(&mut self) -> Result<(), IoError> {
        let path = self.get_path().to_string();
        if file_exists(&path) {
            fs::remove_file(&path).map_err(|e| IoError::new(&path, e.to_string()))?;
        }
        self.attach(path, false);
        Ok(())
    }

    fn get_path(&self) -> &str;

    /* Empty value, for instance HashMap::new() */
    fn default_new(path: String, persist: bool) -> Self;

    fn attach(&mut self, path: String, persist: bool);

    /* Decide if it has to persist or not. This is used in the Drop implementations */
    fn is_persistent(&self) -> bool;
}
