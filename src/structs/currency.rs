use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/* Asset symbols are kept as the exchange writes them (BTC, ETH, USD...) */
pub type Asset = String;

pub const USD: &str = "USD";

pub fn is_usd(asset: &str) -> bool {
    return asset == USD;
}

/* Name of the market used to price an asset in USD on the historical service */
pub fn usd_pair(asset: &str) -> String {
    return format!("{asset}-{USD}");
}

/* A product as written by the exchange: BASE-QUOTE. Buying means receiving the base and giving the quote. */
#[derive(Hash, Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TradingPair {
    pub base: Asset,
    pub quote: Asset,
}

impl TradingPair {
    pub fn new(base: &str, quote: &str) -> Self {
        TradingPair {
            base: base.to_string(),
            quote: quote.to_string(),
        }
    }

    pub fn is_usd_quoted(&self) -> bool {
        return is_usd(&self.quote);
    }
}

impl FromStr for TradingPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('-') {
            Some((base, quote))
                if !base.is_empty() && !quote.is_empty() && !quote.contains('-') =>
            {
                Ok(TradingPair::new(base, quote))
            }
            _ => Err(format!("'{s}' is not a BASE-QUOTE product")),
        }
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}
