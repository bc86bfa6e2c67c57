use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/* USD price of an asset observed at a given time */
#[derive(Hash, Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub usd_price: Decimal,
}

impl PriceSample {
    pub fn new(timestamp: DateTime<Utc>, usd_price: Decimal) -> Self {
        PriceSample {
            timestamp,
            usd_price,
        }
    }
}
