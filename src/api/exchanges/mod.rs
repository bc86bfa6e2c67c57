pub mod coinbase_api;
pub use coinbase_api::*;
