pub mod exchanges;
pub use exchanges::*;

pub mod services;
pub use services::*;
