use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    api::{CandleService, RateLimiter},
    errors::TaxError,
    functions::recognize_fill,
    structs::{Fill, LotManager, PriceManager, Transaction},
};

/* Runs the fills, in the given order, through one ledger and one price manager.
The transactions are kept in the order of the fills that produced them. On a fatal error the run stops,
and what was produced so far stays readable through `transactions` but is incomplete. */
pub struct FillProcessor {
    lots: LotManager,
    prices: PriceManager,
    transactions: Vec<Transaction>,
    processed: usize,
    last_timestamp: Option<DateTime<Utc>>,
}

impl FillProcessor {
    pub fn new(prices: PriceManager) -> Self {
        FillProcessor {
            lots: LotManager::new(),
            prices,
            transactions: Vec::new(),
            processed: 0,
            last_timestamp: None,
        }
    }

    pub async fn process(&mut self, fills: &[Fill]) -> Result<(), TaxError> {
        info!(fills = fills.len(), "processing fills");
        for fill in fills {
            if let Err(error) = self.process_fill(fill).await {
                warn!(
                    %error,
                    processed = self.processed,
                    transactions = self.transactions.len(),
                    "run stopped before the end of the fills"
                );
                return Err(error);
            }
        }
        info!(transactions = self.transactions.len(), "all fills processed");
        Ok(())
    }

    /* Fills must come in chronological order: FIFO is meaningless otherwise.
    They are refused, never sorted. */
    pub async fn process_fill(&mut self, fill: &Fill) -> Result<(), TaxError> {
        if let Some(previous) = self.last_timestamp {
            if fill.timestamp < previous {
                return Err(TaxError::FillsOutOfOrder {
                    index: self.processed,
                    previous,
                    current: fill.timestamp,
                });
            }
        }

        if let Some(tx) = recognize_fill(fill, &mut self.lots, &self.prices).await? {
            self.transactions.push(tx);
        }
        self.last_timestamp = Some(fill.timestamp);
        self.processed += 1;
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        return &self.transactions;
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        return self.transactions;
    }

    pub fn lots(&self) -> &LotManager {
        return &self.lots;
    }

    pub fn processed(&self) -> usize {
        return self.processed;
    }
}

/* A run stopped by a fatal error, with the transactions produced before it */
#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteRun {
    pub error: TaxError,
    pub processed: usize,
    pub transactions: Vec<Transaction>,
}

/* Whole run: build the local price logs from the fills, then process them */
pub async fn ingest_fills(
    fills: &[Fill],
    service: Box<dyn CandleService>,
    limiter: Box<dyn RateLimiter>,
) -> Result<Vec<Transaction>, IncompleteRun> {
    let prices = PriceManager::from_fills(fills, service, limiter);
    let mut processor = FillProcessor::new(prices);
    if let Err(error) = processor.process(fills).await {
        return Err(IncompleteRun {
            error,
            processed: processor.processed(),
            transactions: processor.transactions().to_vec(),
        });
    }

    let lots = processor.lots();
    for asset in lots.assets() {
        info!(asset = %asset, size = %lots.total_size(asset), "still held");
    }
    Ok(processor.into_transactions())
}
