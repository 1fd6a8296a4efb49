/// Convenience result alias used across scrollstage APIs.
pub type StageResult<T> = Result<T, StageError>;

/// Top-level error type returned by the crate's fallible boundaries.
///
/// The animation path itself never fails; errors only come from validating configuration and
/// scroll scripts, parsing JSON, and reading files.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// Invalid value or invariant violation in caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Animator configuration failed to load or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// JSON parse or encode failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    /// Build a [`StageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StageError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
