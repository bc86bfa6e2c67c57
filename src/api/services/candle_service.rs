/* Access to historical candles, used when the fills themselves don't tell the USD price of an asset */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Granularity {
    OneMinute,
    OneHour,
}

impl Granularity {
    pub fn seconds(&self) -> u32 {
        match self {
            Granularity::OneMinute => 60,
            Granularity::OneHour => 3600,
        }
    }
}

/* Aggregated prices of a time bucket starting at `time` */
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub low: Decimal,
    pub high: Decimal,
    pub open: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    pub fn midpoint(&self) -> Decimal {
        return (self.open + self.close) / dec!(2);
    }
}

#[derive(Hash, Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandleQuery {
    pub pair: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub granularity: Granularity,
}

impl CandleQuery {
    pub fn cache_key(&self) -> String {
        return format!(
            "{}|{}|{}|{}",
            self.pair,
            self.start.timestamp(),
            self.end.timestamp(),
            self.granularity.seconds()
        );
    }
}

/* The service answered, but not necessarily with a list of candles */
#[derive(PartialEq, Debug, Clone)]
pub enum CandleResponse {
    Candles(Vec<Candle>),
    Malformed(String),
}

#[async_trait]
pub trait CandleService: Send + Sync {
    async fn get_candles(&self, query: &CandleQuery) -> Result<CandleResponse, ApiError>;

    /* True when the answer is already known locally, so no request budget is spent on it */
    fn is_cached(&self, _query: &CandleQuery) -> bool {
        return false;
    }
}
