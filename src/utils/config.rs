use std::{env, time::Duration};

use crate::{api::API_COINBASE_ENDPOINT, errors::ParsingError};

/* Run settings, read from the environment (a .env file is loaded by main) */
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fills_path: String,
    pub transactions_path: String,
    pub coinbase_api_url: String,
    pub price_request_delay: Duration,
    // None disables the candle cache
    pub candle_cache_path: Option<String>,
}

impl Settings {
    pub const DEFAULT_FILLS_PATH: &'static str = "fills.csv";
    pub const DEFAULT_TRANSACTIONS_PATH: &'static str = "transactions.csv";
    pub const DEFAULT_CANDLE_CACHE_PATH: &'static str = ".data/candles";
    pub const DEFAULT_DELAY_MS: u64 = 1000;

    pub fn from_env() -> Result<Self, ParsingError> {
        return Self::from_lookup(|key| env::var(key).ok());
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ParsingError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let delay = match lookup("PRICE_REQUEST_DELAY_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ParsingError::InvalidSetting {
                    key: "PRICE_REQUEST_DELAY_MS",
                    value,
                })?,
            None => Self::DEFAULT_DELAY_MS,
        };

        let cache = get("CANDLE_CACHE_PATH", Self::DEFAULT_CANDLE_CACHE_PATH);

        return Ok(Settings {
            fills_path: get("FILLS_PATH", Self::DEFAULT_FILLS_PATH),
            transactions_path: get("TRANSACTIONS_PATH", Self::DEFAULT_TRANSACTIONS_PATH),
            coinbase_api_url: get("COINBASE_API_URL", API_COINBASE_ENDPOINT),
            price_request_delay: Duration::from_millis(delay),
            candle_cache_path: if cache.trim().is_empty() {
                None
            } else {
                Some(cache)
            },
        });
    }
}
