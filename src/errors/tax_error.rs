use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::structs::Asset;

/* Fatal errors of a tax run. Any of them stops the processing of the remaining fills. */
#[derive(Debug, Clone, PartialEq)]
pub enum TaxError {
    // The fills dispose of more than what was acquired on record
    InsufficientLots {
        asset: Asset,
        requested: Decimal,
        missing: Decimal,
    },
    // Neither the local price log nor any historical tier gave a price
    PriceUnavailable {
        asset: Asset,
        timestamp: DateTime<Utc>,
    },
    FillsOutOfOrder {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
    InvalidLotSize { asset: Asset, size: Decimal },
}

impl fmt::Display for TaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaxError::InsufficientLots {
                asset,
                requested,
                missing,
            } => write!(
                f,
                "Not enough {asset} lots to dispose of {requested} {asset}: {missing} {asset} missing from the acquisition history"
            ),
            TaxError::PriceUnavailable { asset, timestamp } => write!(
                f,
                "Could not find a USD price for {asset} at {}",
                timestamp.to_rfc3339()
            ),
            TaxError::FillsOutOfOrder {
                index,
                previous,
                current,
            } => write!(
                f,
                "Fill #{index} at {} comes before the previous fill at {}",
                current.to_rfc3339(),
                previous.to_rfc3339()
            ),
            TaxError::InvalidLotSize { asset, size } => {
                write!(f, "Cannot add a {asset} lot of size {size}")
            }
        }
    }
}

impl std::error::Error for TaxError {}
