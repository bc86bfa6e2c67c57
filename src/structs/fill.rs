use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{is_usd, TradingPair};

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(format!("unknown side '{s}'")),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/* One executed order as exported by the exchange.

`total` keeps the exchange sign: negative when it was spent (BUY), positive when it was received (SELL).
`price` is expressed in `total_unit`, it feeds the local USD price log when that unit is USD. */
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    pub trade_id: Option<String>,
    pub pair: TradingPair,
    pub side: Side,
    pub size: Decimal,
    pub size_unit: String,
    pub price: Decimal,
    pub total: Decimal,
    pub total_unit: String,
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
}

impl Fill {
    /* Amount of quote currency that changed hands, without the sign */
    pub fn total_amount(&self) -> Decimal {
        return self.total.abs();
    }

    pub fn is_usd_denominated(&self) -> bool {
        return is_usd(&self.total_unit);
    }
}
