use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl SplitError {
    pub fn validation(message: impl Into<String>) -> Self {
        SplitError::ValidationError {
            message: message.into(),
        }
    }

    /// Short hint shown next to the error by the CLI.
    pub fn recovery_suggestion(&self) -> String {
        match self {
            SplitError::IoError(_) => "Check that the order file exists and is readable".to_string(),
            SplitError::SerializationError(_) => {
                "Report this as a bug: the result could not be serialized".to_string()
            }
            SplitError::ConfigError { .. } => {
                "Check the order file is valid TOML with [settings] and [[participants]]".to_string()
            }
            SplitError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and try again", field)
            }
            SplitError::ValidationError { .. } => {
                "Adjust the participants or settings so the order is consistent".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
