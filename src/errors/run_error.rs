use std::fmt;

use super::{ParsingError, TaxError};

/* Why a run did not end with a complete form */
#[derive(Debug, Clone)]
pub enum RunError {
    // Processing stopped, only an incomplete form may exist
    Tax(TaxError),
    // Every fill was processed but the form could not be written
    Export(ParsingError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunError::Tax(error) => write!(f, "Run stopped: {error}"),
            RunError::Export(error) => write!(f, "Form not written: {error}"),
        }
    }
}

impl std::error::Error for RunError {}
