pub mod candle_service;
pub use candle_service::*;

pub mod rate_limiter;
pub use rate_limiter::*;

pub mod cached_candles;
pub use cached_candles::*;
