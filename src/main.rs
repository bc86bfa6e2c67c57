pub mod api;
pub mod errors;
pub mod functions;
pub mod parsing;
pub mod structs;
pub mod utils;

#[cfg(test)]
mod tests;

use std::{error::Error, process::ExitCode};

use api::{CachedCandleService, CandleService, CoinbaseApi, FixedDelay};
use dotenv::dotenv;
use functions::{export_run, ingest_fills};
use parsing::read_fills;
use structs::{CandleCacheManager, Persistable};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use utils::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    let fills = read_fills(&settings.fills_path)?;
    info!(path = %settings.fills_path, fills = fills.len(), "fills loaded");

    let outcome = ingest_fills(
        &fills,
        candle_service(&settings)?,
        Box::new(FixedDelay::new(settings.price_request_delay)),
    )
    .await;
    export_run(outcome, &settings.transactions_path)?;
    Ok(())
}

fn candle_service(settings: &Settings) -> Result<Box<dyn CandleService>, Box<dyn Error>> {
    let api = CoinbaseApi::new(&settings.coinbase_api_url)?;
    match &settings.candle_cache_path {
        Some(path) => {
            let cache = CandleCacheManager::new(Some(path.clone()))?;
            info!(path = %path, cached = cache.len(), "candle cache loaded");
            Ok(Box::new(CachedCandleService::new(api, cache)))
        }
        None => Ok(Box::new(api)),
    }
}
