use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::DateTime;
use rust_decimal::Decimal;

use crate::{
    api::{Candle, CandleQuery, CandleResponse, CandleService, RateLimiter},
    errors::ApiError,
    structs::{Fill, TradingPair},
};

/* Candle service answering from a script, and remembering what it was asked.
Once the script is exhausted every answer is an empty list of candles. */
#[derive(Clone)]
pub struct FakeCandleService {
    responses: Arc<Mutex<VecDeque<Result<CandleResponse, ApiError>>>>,
    queries: Arc<Mutex<Vec<CandleQuery>>>,
}

impl FakeCandleService {
    pub fn new(responses: Vec<Result<CandleResponse, ApiError>>) -> Self {
        FakeCandleService {
            responses: Arc::new(Mutex::new(responses.into())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn queries(&self) -> Arc<Mutex<Vec<CandleQuery>>> {
        return self.queries.clone();
    }

    pub fn recorded(&self) -> Vec<CandleQuery> {
        return self.queries.lock().unwrap().clone();
    }
}

#[async_trait]
impl CandleService for FakeCandleService {
    async fn get_candles(&self, query: &CandleQuery) -> Result<CandleResponse, ApiError> {
        self.queries.lock().unwrap().push(query.clone());
        return self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(CandleResponse::Candles(vec![])));
    }
}

#[derive(Clone)]
pub struct CountingLimiter {
    waits: Arc<AtomicUsize>,
}

impl CountingLimiter {
    pub fn new() -> Self {
        CountingLimiter {
            waits: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn count(&self) -> usize {
        return self.waits.load(Ordering::SeqCst);
    }
}

#[async_trait]
impl RateLimiter for CountingLimiter {
    async fn wait(&self) {
        self.waits.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn candle(time_secs: i64, open: Decimal, close: Decimal) -> Candle {
    Candle {
        time: DateTime::from_timestamp(time_secs, 0).unwrap(),
        low: open.min(close),
        high: open.max(close),
        open,
        close,
        volume: Decimal::ONE,
    }
}

/* Fill on `pair` ("BASE-QUOTE") with the units taken from the pair */
pub fn fill(
    pair: &str,
    side: &str,
    size: Decimal,
    price: Decimal,
    total: Decimal,
    ts_secs: i64,
) -> Fill {
    let pair: TradingPair = pair.parse().unwrap();
    let timestamp = DateTime::from_timestamp(ts_secs, 0).unwrap();
    Fill {
        trade_id: None,
        size_unit: pair.base.clone(),
        total_unit: pair.quote.clone(),
        pair,
        side: side.parse().unwrap(),
        size,
        price,
        total,
        timestamp,
        date: timestamp.date_naive(),
    }
}
