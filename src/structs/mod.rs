pub mod currency;
pub use currency::*;

pub mod lot;
pub use lot::*;

pub mod fill;
pub use fill::*;

pub mod transaction;
pub use transaction::*;

pub mod price;
pub use price::*;

pub mod managers;
pub use managers::*;
