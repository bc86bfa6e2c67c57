pub mod disposal;
pub use disposal::*;

pub mod process_fills;
pub use process_fills::*;

pub mod summary;
pub use summary::*;

pub mod export;
pub use export::*;
