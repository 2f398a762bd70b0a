/// Convenience result type used across splashmock.
pub type MockResult<T> = Result<T, MockError>;

/// Top-level error taxonomy used by library APIs.
///
/// Only [`MockError::Parse`] is produced by manifest interpretation; every other
/// anomaly in a manifest (bad colors, bad sizes, missing fields) falls back silently.
#[derive(thiserror::Error, Debug)]
pub enum MockError {
    /// Manifest text is not a JSON object. Carries the parser's own message.
    #[error("{0}")]
    Parse(String),

    /// Invalid user-provided input (uploads, render options).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while turning a frame layout into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockError {
    /// Build a [`MockError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`MockError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MockError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Whether this error came from manifest parsing.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
