use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Registration rejected with status {status}")]
    RegistrationRejected { status: u16, message: Option<String> },

    #[error("Registration failed: {message}")]
    RegistrationFailed { message: String },

    #[error("Action '{action}' is not available on the {screen} screen")]
    InvalidTransition { action: String, screen: String },

    #[error("A registration is already being submitted")]
    SubmissionInProgress,

    #[error("A pass export is already in progress")]
    ExportInProgress,

    #[error("Rendering failed: {message}")]
    RenderError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

impl PassError {
    pub fn render(message: impl Into<String>) -> Self {
        PassError::RenderError {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        PassError::StorageError {
            message: message.into(),
        }
    }

    /// Short message suitable for showing to the person using the CLI.
    pub fn user_friendly_message(&self) -> String {
        match self {
            PassError::ApiError(_)
            | PassError::RegistrationRejected { .. }
            | PassError::RegistrationFailed { .. } => {
                "There was an error generating your pass. Please try again.".to_string()
            }
            PassError::ValidationError { message } => message.clone(),
            PassError::ConfigError { .. } | PassError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            PassError::ExportInProgress => "Your pass is still being generated.".to_string(),
            PassError::SubmissionInProgress => {
                "Your registration is still being submitted.".to_string()
            }
            PassError::IoError(_)
            | PassError::ImageError(_)
            | PassError::RenderError { .. }
            | PassError::TaskError(_) => {
                "The pass could not be saved. Please try downloading it again.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<toml::de::Error> for PassError {
    fn from(err: toml::de::Error) -> Self {
        PassError::ConfigError {
            message: format!("TOML parsing error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PassError>;
