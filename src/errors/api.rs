use std::fmt;

#[derive(Debug, Clone)]
pub enum ApiError {
    ApiCallError(String),
    HttpStatus { status: u16, body: String },
    DeserializationError(String),
    CacheError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::ApiCallError(error) => write!(f, "{}", *error),
            ApiError::HttpStatus { status, body } => {
                write!(f, "Historical price service answered {status}: {body}")
            }
            ApiError::DeserializationError(e) => {
                write!(f, "Error during serde deserialisation: {e} ")
            }
            ApiError::CacheError(e) => write!(f, "Candle cache failure: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}
