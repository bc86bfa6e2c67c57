use std::collections::VecDeque;

use chrono::NaiveDate;
use hashbrown::HashMap;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    errors::TaxError,
    structs::{Asset, Lot},
};

/* The holdings of a run: for each asset, the lots still owned, oldest first.
Disposals always eat the oldest lots (FIFO). USD is never stored here. */
#[derive(Debug, Default, Clone)]
pub struct LotManager {
    holdings: HashMap<Asset, VecDeque<Lot>>,
}

impl LotManager {
    pub fn new() -> Self {
        return Self::default();
    }

    pub fn add_lot(
        &mut self,
        asset: &str,
        size: Decimal,
        usd_basis: Decimal,
        acquired: NaiveDate,
    ) -> Result<(), TaxError> {
        if size <= Decimal::ZERO {
            return Err(TaxError::InvalidLotSize {
                asset: asset.to_string(),
                size,
            });
        }
        debug!(asset, %size, %usd_basis, %acquired, "adding lot");
        self.holdings
            .entry(asset.to_string())
            .or_default()
            .push_back(Lot::new(asset, size, usd_basis, acquired));
        Ok(())
    }

    /* Remove `amount` of `asset` from the oldest lots and return what was removed, in FIFO order.
    A lot exactly the size of what is left to take is removed whole, it is never split into an empty lot.
    If the holdings run out first the error is returned and the lots already taken are lost:
    the history is inconsistent and the run has to stop anyway. */
    pub fn consume_lots(&mut self, asset: &str, amount: Decimal) -> Result<Vec<Lot>, TaxError> {
        let mut consumed = Vec::new();
        if amount <= Decimal::ZERO {
            return Ok(consumed);
        }

        let queue = self.holdings.entry(asset.to_string()).or_default();
        let mut remaining = amount;
        while remaining > Decimal::ZERO {
            let Some(head) = queue.front_mut() else {
                return Err(TaxError::InsufficientLots {
                    asset: asset.to_string(),
                    requested: amount,
                    missing: remaining,
                });
            };

            if head.size > remaining {
                consumed.push(head.split_off(remaining));
                break;
            }

            remaining -= head.size;
            if let Some(lot) = queue.pop_front() {
                consumed.push(lot);
            }
        }

        debug!(asset, %amount, lots = consumed.len(), "consumed lots");
        Ok(consumed)
    }

    pub fn total_size(&self, asset: &str) -> Decimal {
        return self
            .holdings
            .get(asset)
            .map(|lots| lots.iter().map(|lot| lot.size).sum())
            .unwrap_or(Decimal::ZERO);
    }

    pub fn lots(&self, asset: &str) -> Vec<&Lot> {
        return self
            .holdings
            .get(asset)
            .map(|lots| lots.iter().collect())
            .unwrap_or_default();
    }

    /* Assets that still have at least one lot, sorted for stable reporting */
    pub fn assets(&self) -> Vec<&Asset> {
        let mut assets: Vec<&Asset> = self
            .holdings
            .iter()
            .filter(|(_, lots)| !lots.is_empty())
            .map(|(asset, _)| asset)
            .collect();
        assets.sort();
        return assets;
    }
}
