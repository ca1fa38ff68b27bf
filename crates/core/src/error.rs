/// Result alias that carries the custom [`StarfieldError`] type.
pub type Result<T> = std::result::Result<T, StarfieldError>;

/// Common error type for the core crate.
///
/// The simulation and rendering paths never produce one of these; only the
/// settings persistence and frame recording layers touch the filesystem.
#[derive(Debug, thiserror::Error)]
pub enum StarfieldError {
    /// Free-form message for host-level failures.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Settings could not be parsed or serialised.
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
}

impl StarfieldError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for StarfieldError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for StarfieldError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
