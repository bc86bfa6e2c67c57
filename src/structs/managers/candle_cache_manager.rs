use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{Candle, CandleQuery};

use super::Persistable;

/* Candles already fetched from the historical service, by query.
Historical candles never change, so a re-run can reuse them instead of spending the request budget again.
Saved on drop when persistent. */
#[derive(Debug, Serialize, Deserialize)]
pub struct CandleCacheManager {
    candles: HashMap<String, Vec<Candle>>,
    #[serde(skip)]
    path: String,
    #[serde(skip)]
    persist: bool,
}

impl Persistable for CandleCacheManager {
    const PATH: &'static str = ".data/candles";

    fn default_new(path: String, persist: bool) -> Self {
        Self {
            candles: HashMap::new(),
            path,
            persist,
        }
    }

    fn get_path(&self) -> &str {
        return &self.path;
    }

    fn attach(&mut self, path: String, persist: bool) {
        self.path = path;
        self.persist = persist;
    }

    fn is_persistent(&self) -> bool {
        return self.persist;
    }
}

impl CandleCacheManager {
    pub fn get(&self, query: &CandleQuery) -> Option<&Vec<Candle>> {
        return self.candles.get(&query.cache_key());
    }

    pub fn insert(&mut self, query: &CandleQuery, candles: Vec<Candle>) {
        self.candles.insert(query.cache_key(), candles);
    }

    pub fn len(&self) -> usize {
        return self.candles.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.candles.is_empty();
    }
}

impl Drop for CandleCacheManager {
    fn drop(&mut self) {
        if self.persist {
            if let Err(error) = self.save() {
                warn!(%error, "candle cache not saved");
            }
        }
    }
}
