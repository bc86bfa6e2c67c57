pub mod fills;
pub use fills::*;

pub mod form_8949;
pub use form_8949::*;
