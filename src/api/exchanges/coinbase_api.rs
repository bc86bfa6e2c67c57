use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::{
    api::{Candle, CandleQuery, CandleResponse, CandleService},
    errors::ApiError,
};

pub const API_COINBASE_ENDPOINT: &str = "https://api.exchange.coinbase.com";

/* Coinbase Exchange public market data. No authentication is needed for the candles. */
pub struct CoinbaseApi {
    client: Client,
    endpoint: String,
}

/* A candle as sent by Coinbase: [time, low, high, open, close, volume] */
type RawCandle = (i64, Decimal, Decimal, Decimal, Decimal, Decimal);

impl CoinbaseApi {
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("fifotaxes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::ApiCallError(e.to_string()))?;
        return Ok(CoinbaseApi {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        });
    }

    pub fn candles_url(&self, query: &CandleQuery) -> String {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair("start", &to_iso(&query.start))
            .append_pair("end", &to_iso(&query.end))
            .append_pair("granularity", &query.granularity.seconds().to_string())
            .finish();
        return [
            self.endpoint.as_str(),
            "/products/",
            query.pair.as_str(),
            "/candles?",
            &encoded,
        ]
        .concat();
    }
}

#[async_trait]
impl CandleService for CoinbaseApi {
    async fn get_candles(&self, query: &CandleQuery) -> Result<CandleResponse, ApiError> {
        let url = self.candles_url(query);
        debug!(%url, "requesting candles");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::ApiCallError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::ApiCallError(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        return parse_candles(&text);
    }
}

fn to_iso(time: &DateTime<Utc>) -> String {
    return time.to_rfc3339_opts(SecondsFormat::Secs, true);
}

/* Anything else than a list of 6-values arrays is reported as malformed, not as an error:
the caller decides whether another query can make up for it. */
pub fn parse_candles(text: &str) -> Result<CandleResponse, ApiError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ApiError::DeserializationError(e.to_string()))?;

    let Value::Array(entries) = value else {
        return Ok(CandleResponse::Malformed(text.to_string()));
    };

    let mut candles = Vec::with_capacity(entries.len());
    for entry in entries {
        let Ok((time, low, high, open, close, volume)) = serde_json::from_value::<RawCandle>(entry)
        else {
            return Ok(CandleResponse::Malformed(text.to_string()));
        };
        let Some(time) = DateTime::from_timestamp(time, 0) else {
            return Ok(CandleResponse::Malformed(text.to_string()));
        };
        candles.push(Candle {
            time,
            low,
            high,
            open,
            close,
            volume,
        });
    }
    return Ok(CandleResponse::Candles(candles));
}

#[cfg(test)]
mod tests {

    use rust_decimal_macros::dec;

    use super::*;
    use crate::api::Granularity;

    #[test]
    fn test_candles_url() {
        let api = CoinbaseApi::new("https://api.exchange.coinbase.com/").unwrap();
        let query = CandleQuery {
            pair: "BTC-USD".to_string(),
            start: DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
            end: DateTime::from_timestamp(1_600_000_060, 0).unwrap(),
            granularity: Granularity::OneMinute,
        };

        assert_eq!(
            api.candles_url(&query),
            "https://api.exchange.coinbase.com/products/BTC-USD/candles?start=2020-09-13T12%3A26%3A40Z&end=2020-09-13T12%3A27%3A40Z&granularity=60"
        );
    }

    #[test]
    fn test_deserialize_candles() {
        let json_data = r#"
        [
            [1600000020, 10300.5, 10320.25, 10310, 10315, 12.5],
            [1599999960, 10290, 10310, 10295.5, 10300.5, 3]
        ]
        "#;

        let response = parse_candles(json_data).unwrap();

        let CandleResponse::Candles(candles) = response else {
            panic!("expected candles");
        };
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time.timestamp(), 1600000020);
        assert_eq!(candles[0].open, dec!(10310));
        assert_eq!(candles[0].close, dec!(10315));
        assert_eq!(candles[0].midpoint(), dec!(10312.5));
        assert_eq!(candles[1].low, dec!(10290));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(parse_candles("[]").unwrap(), CandleResponse::Candles(vec![]));
    }

    #[test]
    fn test_error_message_is_malformed() {
        let json_data = r#"{"message": "Invalid start"}"#;
        assert!(matches!(
            parse_candles(json_data).unwrap(),
            CandleResponse::Malformed(_)
        ));
    }

    #[test]
    fn test_short_candle_is_malformed() {
        assert!(matches!(
            parse_candles("[[1600000020, 1, 2]]").unwrap(),
            CandleResponse::Malformed(_)
        ));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_candles("<html>"),
            Err(ApiError::DeserializationError(_))
        ));
    }
}
