pub mod lot_manager;
pub use lot_manager::*;

pub mod price_manager;
pub use price_manager::*;

pub mod candle_cache_manager;
pub use candle_cache_manager::*;

pub mod persistable;
pub use persistable::*;
