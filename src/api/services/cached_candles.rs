use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    api::{CandleQuery, CandleResponse, CandleService},
    errors::ApiError,
    structs::CandleCacheManager,
};

/* Answer from the candle cache when possible, otherwise ask the wrapped service and remember non-empty answers.
Empty and malformed answers are not cached: the data may show up later. */
pub struct CachedCandleService<S: CandleService> {
    inner: S,
    cache: Mutex<CandleCacheManager>,
}

impl<S: CandleService> CachedCandleService<S> {
    pub fn new(inner: S, cache: CandleCacheManager) -> Self {
        CachedCandleService {
            inner,
            cache: Mutex::new(cache),
        }
    }
}

#[async_trait]
impl<S: CandleService> CandleService for CachedCandleService<S> {
    fn is_cached(&self, query: &CandleQuery) -> bool {
        return self
            .cache
            .lock()
            .map(|cache| cache.get(query).is_some())
            .unwrap_or(false);
    }

    async fn get_candles(&self, query: &CandleQuery) -> Result<CandleResponse, ApiError> {
        let cached = {
            let cache = self
                .cache
                .lock()
                .map_err(|e| ApiError::CacheError(e.to_string()))?;
            cache.get(query).cloned()
        };
        if let Some(candles) = cached {
            debug!(pair = %query.pair, "candles served from cache");
            return Ok(CandleResponse::Candles(candles));
        }

        let response = self.inner.get_candles(query).await?;
        if let CandleResponse::Candles(candles) = &response {
            if !candles.is_empty() {
                match self.cache.lock() {
                    Ok(mut cache) => cache.insert(query, candles.clone()),
                    Err(e) => warn!(error = %e, "could not store candles in cache"),
                }
            }
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {

    use chrono::DateTime;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        api::{Candle, Granularity},
        structs::Persistable,
        structs::PriceManager,
        tests::fakes::{CountingLimiter, FakeCandleService},
    };

    fn query(start: i64) -> CandleQuery {
        CandleQuery {
            pair: "BTC-USD".to_string(),
            start: DateTime::from_timestamp(start, 0).unwrap(),
            end: DateTime::from_timestamp(start + 60, 0).unwrap(),
            granularity: Granularity::OneMinute,
        }
    }

    fn candle() -> Candle {
        Candle {
            time: DateTime::from_timestamp(60, 0).unwrap(),
            low: dec!(9),
            high: dec!(11),
            open: dec!(10),
            close: dec!(10),
            volume: dec!(1),
        }
    }

    #[tokio::test]
    async fn test_second_query_hits_cache() {
        let fake = FakeCandleService::new(vec![Ok(CandleResponse::Candles(vec![candle()]))]);
        let queries = fake.queries();
        let service = CachedCandleService::new(fake, CandleCacheManager::new_non_persistent());

        let first = service.get_candles(&query(0)).await.unwrap();
        let second = service.get_candles(&query(0)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(queries.lock().unwrap().len(), 1);
        assert!(service.is_cached(&query(0)));
        assert!(!service.is_cached(&query(60)));
    }

    #[tokio::test]
    async fn test_empty_answers_are_not_cached() {
        let fake = FakeCandleService::new(vec![
            Ok(CandleResponse::Candles(vec![])),
            Ok(CandleResponse::Malformed("{}".to_string())),
        ]);
        let queries = fake.queries();
        let service = CachedCandleService::new(fake, CandleCacheManager::new_non_persistent());

        service.get_candles(&query(0)).await.unwrap();
        service.get_candles(&query(0)).await.unwrap();
        service.get_candles(&query(0)).await.unwrap();

        assert_eq!(queries.lock().unwrap().len(), 3);
        assert!(!service.is_cached(&query(0)));
    }

    #[tokio::test]
    async fn test_cached_answers_skip_the_limiter() {
        let at = |seconds| DateTime::from_timestamp(seconds, 0).unwrap();
        let mut cache = CandleCacheManager::new_non_persistent();
        cache.insert(
            &CandleQuery {
                pair: "BTC-USD".to_string(),
                start: at(940),
                end: at(1000),
                granularity: Granularity::OneMinute,
            },
            vec![candle()],
        );
        let fake = FakeCandleService::new(vec![]);
        let queries = fake.queries();
        let limiter = CountingLimiter::new();
        let prices = PriceManager::new(
            Box::new(CachedCandleService::new(fake, cache)),
            Box::new(limiter.clone()),
        );

        assert_eq!(prices.lookup("BTC", at(1000)).await.unwrap(), dec!(10));
        assert_eq!(limiter.count(), 0);
        assert!(queries.lock().unwrap().is_empty());

        // Not cached: paced, then every tier reaches the wrapped service
        assert!(prices.lookup("BTC", at(5000)).await.is_err());
        assert_eq!(limiter.count(), 3);
        assert_eq!(queries.lock().unwrap().len(), 3);
    }
}
