pub mod files;
pub use files::*;

pub mod time;
pub use time::*;

pub mod money;
pub use money::*;

pub mod config;
pub use config::*;
