use thiserror::Error;

/// Error type for the ambient parts of the widget (configuration files).
///
/// Form input problems are reported through
/// [`ValidationError`](crate::form::ValidationError) instead and never reach
/// this type.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
