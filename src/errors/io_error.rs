use std::fmt;

#[derive(Debug, Clone)]
pub struct IoError {
    path: String,
    error: String,
}

impl IoError {
    pub fn new(path: &str, error: String) -> Self {
        return IoError {
            path: path.to_string(),
            error,
        };
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

impl std::error::Error for IoError {}
