/// Convenience result type used across animpath.
pub type PathResult<T> = Result<T, PathError>;

/// Top-level error taxonomy used by path APIs.
#[derive(thiserror::Error, Debug)]
pub enum PathError {
    /// A path or configuration value broke a construction-time invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// The path document has the wrong shape (missing field, unknown kind, bad tag).
    #[error("structure error: {0}")]
    Structure(String),

    /// A control point does not match the declared payload shape.
    #[error("value error: {0}")]
    Value(String),

    /// A path document could not be read or written.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PathError {
    /// Build a [`PathError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PathError::Structure`] value.
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Build a [`PathError::Value`] value.
    pub fn value(msg: impl Into<String>) -> Self {
        Self::Value(msg.into())
    }

    /// Build a [`PathError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// `true` for errors raised while interpreting a path document.
    pub fn is_document_error(&self) -> bool {
        matches!(self, Self::Structure(_) | Self::Value(_) | Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
