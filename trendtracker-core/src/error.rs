use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Backend API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Failures talking to the TrendTracker backend.
///
/// Kept `Clone` so results can be carried inside UI messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{details}")]
    Network { details: String },

    #[error("API request failed with status {status}")]
    Http {
        status: u16,
        server_message: Option<String>,
    },

    #[error("Invalid API response: {details}")]
    Parse { details: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `error` field the backend put in the response body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Parse {
                details: error.to_string(),
            }
        } else {
            ApiError::Network {
                details: error.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Parse {
            details: error.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
