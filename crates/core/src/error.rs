/// Result alias that carries the custom [`FxError`] type.
pub type Result<T> = std::result::Result<T, FxError>;

/// Common error type for the decoration layer.
///
/// The failure taxonomy is deliberately narrow: a controller either finds
/// the browser capability it needs or it refuses to initialise, and DOM
/// mishaps are reported without ever reaching the page as a hard failure.
#[derive(Debug, thiserror::Error)]
pub enum FxError {
    #[error("{0}")]
    Message(String),
    /// A required browser capability (frame scheduling, intersection
    /// observation) is absent. The affected controller logs and stays off.
    #[error("missing browser capability: {0}")]
    Capability(&'static str),
    /// A DOM operation that should not fail did. Carries the stringified
    /// JavaScript error from the boundary.
    #[error("dom operation failed: {0}")]
    Dom(String),
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

impl FxError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Wraps a stringified JavaScript value from the DOM boundary.
    pub fn dom<T: Into<String>>(detail: T) -> Self {
        Self::Dom(detail.into())
    }
}

impl From<&str> for FxError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for FxError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
