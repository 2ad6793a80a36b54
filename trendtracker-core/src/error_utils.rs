use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Api(e) => {
                error!("Backend API error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Api(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::InvalidInput { .. } => {
                "Invalid input provided. Please check your input and try again.".to_string()
            }
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Api(_) => "API".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl ErrorExt for ApiError {
    fn log_error(&self) -> &Self {
        error!("ApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ApiError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ApiError::Http {
                server_message: Some(message),
                ..
            } => message.clone(),
            ApiError::Http { status, .. } => {
                format!("The server answered with status {}.", status)
            }
            ApiError::Network { details } => {
                format!("Could not reach the TrendTracker server: {}", details)
            }
            ApiError::Parse { details } => {
                format!("The server sent a response that could not be read: {}", details)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ApiError::Network { .. } => "API_NETWORK".to_string(),
            ApiError::Http { .. } => "API_HTTP_STATUS".to_string(),
            ApiError::Parse { .. } => "API_PARSE".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}", reason)
            }
            ConfigError::Parse(_) => {
                "Configuration file could not be parsed. Please check the TOML syntax."
                    .to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

/// Logs errors raised outside the UI loop, tagged with where they happened.
pub struct ErrorReporter {
    context: &'static str,
}

impl ErrorReporter {
    pub fn new(context: &'static str) -> Self {
        Self { context }
    }

    pub fn report_error(&self, error: &CoreError) {
        error!("[{}] {} failed", error.error_code(), self.context);
        error.log_error();
        info!("User message: {}", error.user_friendly_message());
    }

    /// For errors the caller recovers from.
    pub fn report_warning(&self, error: &CoreError) {
        warn!(
            "[{}] {}: {}",
            error.error_code(),
            self.context,
            error.user_friendly_message()
        );
        error.log_warn();
    }
}
