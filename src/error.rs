// Error taxonomy for one lookup cycle. The end user only ever sees a generic
// message; the variants below are for logs and callers.

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    ConfigError(String),
    EmptyQuery,
    NotFound(String),
    TransportError(String),
    InvalidEntity(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::EmptyQuery => write!(f, "Empty query"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            AppError::InvalidEntity(msg) => write!(f, "Invalid entity: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Status errors (from `error_for_status`) are `NotFound`, body decode errors are
// `InvalidEntity`, everything else happened on the wire.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InvalidEntity(err.to_string())
        } else if err.status().is_some() {
            AppError::NotFound(err.to_string())
        } else {
            AppError::TransportError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidEntity(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
