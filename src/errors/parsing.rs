use std::fmt;

use super::IoError;

/* Errors raised while turning outside data (fills export, environment) into typed values */
#[derive(Debug, Clone)]
pub enum ParsingError {
    Io(IoError),
    Csv { line: Option<u64>, error: String },
    InvalidField {
        line: Option<u64>,
        field: &'static str,
        value: String,
    },
    InvalidSetting { key: &'static str, value: String },
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParsingError::Io(error) => error.fmt(f),
            ParsingError::Csv { line, error } => match line {
                Some(line) => write!(f, "CSV error at line {line}: {error}"),
                None => write!(f, "CSV error: {error}"),
            },
            ParsingError::InvalidField { line, field, value } => match line {
                Some(line) => write!(f, "Invalid value '{value}' for '{field}' at line {line}"),
                None => write!(f, "Invalid value '{value}' for '{field}'"),
            },
            ParsingError::InvalidSetting { key, value } => {
                write!(f, "Invalid value '{value}' for setting {key}")
            }
        }
    }
}

impl std::error::Error for ParsingError {}

impl From<IoError> for ParsingError {
    fn from(error: IoError) -> Self {
        ParsingError::Io(error)
    }
}
