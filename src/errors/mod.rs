pub mod api;
pub use api::*;

pub mod parsing;
pub use parsing::*;

pub mod io_error;
pub use io_error::*;

pub mod tax_error;
pub use tax_error::*;

pub mod run_error;
pub use run_error::*;
