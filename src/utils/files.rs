use std::{fs, io, path::Path};

pub fn file_exists(file_name: &str) -> bool {
    Path::new(file_name).is_file()
}

pub fn create_directories_if_needed(file_path: &str) -> io::Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
