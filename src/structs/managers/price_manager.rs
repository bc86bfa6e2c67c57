use chrono::{DateTime, Duration, Utc};
use hashbrown::HashMap;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    api::{Candle, CandleQuery, CandleResponse, CandleService, Granularity, RateLimiter},
    errors::TaxError,
    structs::{usd_pair, Asset, Fill, PriceSample},
};

/* A price observed in the fills is trusted if it is closer than this to the instant we price */
pub const LOCAL_PRICE_TOLERANCE_SECONDS: i64 = 30;

/* How a tier picks its price among the candles it got back */
#[derive(Debug, Clone, Copy, PartialEq)]
enum CandlePick {
    First,
    Nearest,
}

#[derive(Debug, Clone, Copy)]
struct Tier {
    before: i64,
    after: i64,
    granularity: Granularity,
    pick: CandlePick,
}

/* Each tier widens the window when the previous one came back empty.
1: the minute candle that contains the instant; 2: the nearest minute candle within 20 minutes;
3: the nearest hour candle within 12.5 hours. */
const TIERS: [Tier; 3] = [
    Tier {
        before: 60,
        after: 0,
        granularity: Granularity::OneMinute,
        pick: CandlePick::First,
    },
    Tier {
        before: 1200,
        after: 1200,
        granularity: Granularity::OneMinute,
        pick: CandlePick::Nearest,
    },
    Tier {
        before: 45000,
        after: 45000,
        granularity: Granularity::OneHour,
        pick: CandlePick::Nearest,
    },
];

/* Resolve the USD price of an asset at a past instant.

The USD fills of the run are the first source: they are recorded per asset, ordered by time.
When none of them is close enough, the historical service is queried with wider and wider windows. */
pub struct PriceManager {
    price_logs: HashMap<Asset, Vec<PriceSample>>,
    service: Box<dyn CandleService>,
    limiter: Box<dyn RateLimiter>,
}

impl PriceManager {
    pub fn new(service: Box<dyn CandleService>, limiter: Box<dyn RateLimiter>) -> Self {
        PriceManager {
            price_logs: HashMap::new(),
            service,
            limiter,
        }
    }

    /* Record the price of every fill paid or received in USD, for its base asset */
    pub fn from_fills(
        fills: &[Fill],
        service: Box<dyn CandleService>,
        limiter: Box<dyn RateLimiter>,
    ) -> Self {
        let mut manager = Self::new(service, limiter);
        for fill in fills.iter().filter(|fill| fill.is_usd_denominated()) {
            manager.record_sample(
                &fill.size_unit,
                PriceSample::new(fill.timestamp, fill.price),
            );
        }
        info!(
            assets = manager.price_logs.len(),
            "local price logs built from fills"
        );
        return manager;
    }

    /* Insert after any sample with the same timestamp so the log stays ordered */
    pub fn record_sample(&mut self, asset: &str, sample: PriceSample) {
        let log = self.price_logs.entry(asset.to_string()).or_default();
        let index = log.partition_point(|s| s.timestamp <= sample.timestamp);
        log.insert(index, sample);
    }

    pub fn samples(&self, asset: &str) -> &[PriceSample] {
        return self
            .price_logs
            .get(asset)
            .map(|log| log.as_slice())
            .unwrap_or(&[]);
    }

    /* Nearest local sample, whatever its distance. On equal distance the later sample wins. */
    pub fn closest_sample(&self, asset: &str, timestamp: DateTime<Utc>) -> Option<&PriceSample> {
        let log = self.samples(asset);
        let index = log.partition_point(|s| s.timestamp < timestamp);
        let before = index.checked_sub(1).and_then(|i| log.get(i));
        let after = log.get(index);
        match (before, after) {
            (Some(before), Some(after)) => {
                if distance(after.timestamp, timestamp) <= distance(before.timestamp, timestamp) {
                    Some(after)
                } else {
                    Some(before)
                }
            }
            (Some(sample), None) | (None, Some(sample)) => Some(sample),
            (None, None) => None,
        }
    }

    pub async fn lookup(&self, asset: &str, timestamp: DateTime<Utc>) -> Result<Decimal, TaxError> {
        match self.closest_sample(asset, timestamp) {
            Some(sample)
                if distance(sample.timestamp, timestamp)
                    < Duration::seconds(LOCAL_PRICE_TOLERANCE_SECONDS) =>
            {
                debug!(asset, price = %sample.usd_price, "local price found");
                return Ok(sample.usd_price);
            }
            Some(_) => info!(asset, %timestamp, "no local price close enough"),
            None => info!(asset, %timestamp, "no local price for asset"),
        }
        return self.historic_price(asset, timestamp).await;
    }

    /* Ask the historical service, one query per tier, until a tier gives a usable candle */
    pub async fn historic_price(
        &self,
        asset: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Decimal, TaxError> {
        let pair = usd_pair(asset);
        for (level, tier) in TIERS.iter().enumerate() {
            let query = CandleQuery {
                pair: pair.clone(),
                start: timestamp - Duration::seconds(tier.before),
                end: timestamp + Duration::seconds(tier.after),
                granularity: tier.granularity,
            };

            // The limiter only paces requests that really leave the process
            if !self.service.is_cached(&query) {
                self.limiter.wait().await;
            }
            let candles = match self.service.get_candles(&query).await {
                Ok(CandleResponse::Candles(candles)) => candles,
                Ok(CandleResponse::Malformed(raw)) => {
                    warn!(%pair, tier = level + 1, %raw, "malformed historical data");
                    continue;
                }
                Err(e) => {
                    warn!(%pair, tier = level + 1, error = %e, "historical data request failed");
                    continue;
                }
            };

            if let Some(candle) = pick_candle(&candles, tier.pick, timestamp) {
                let price = candle.midpoint();
                info!(%pair, tier = level + 1, %price, "historical price found");
                return Ok(price);
            }
            debug!(%pair, tier = level + 1, "no historical data in window");
        }

        Err(TaxError::PriceUnavailable {
            asset: asset.to_string(),
            timestamp,
        })
    }
}

fn distance(a: DateTime<Utc>, b: DateTime<Utc>) -> Duration {
    let delta = a - b;
    if delta < Duration::zero() {
        -delta
    } else {
        delta
    }
}

fn pick_candle(candles: &[Candle], pick: CandlePick, timestamp: DateTime<Utc>) -> Option<&Candle> {
    match pick {
        CandlePick::First => candles.first(),
        CandlePick::Nearest => candles
            .iter()
            .min_by_key(|candle| distance(candle.time, timestamp)),
    }
}
