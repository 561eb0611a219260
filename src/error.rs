use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Sheet '{name}' not found in workbook")]
    SheetNotFound { name: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Geocoding transport error: {0}")]
    Transport(String),

    #[error("Geocoding credential rejected: {0}")]
    CredentialRejected(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Projection unavailable: {0}")]
    ProjectionUnavailable(String),
}

impl ProcessingError {
    /// Whether the batch can skip the current row and carry on.
    pub fn is_row_recoverable(&self) -> bool {
        matches!(
            self,
            ProcessingError::Transport(_)
                | ProcessingError::InvalidCoordinate(_)
                | ProcessingError::ProjectionUnavailable(_)
        )
    }
}

impl From<reqwest::Error> for ProcessingError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry the credential as a query parameter
        ProcessingError::Transport(err.without_url().to_string())
    }
}
