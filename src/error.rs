use std::fmt;

/// A failure raised by a principal provider while looking up the current
/// security principal.
///
/// Lookup errors never escape the stamping API. The resolver logs them and
/// treats the provider as having no identity to offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    /// The kind of failure that occurred
    pub kind: LookupErrorKind,
    /// Human-readable message explaining the failure
    pub message: String,
}

impl LookupError {
    /// Creates a new lookup error.
    pub fn new(kind: LookupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a [`LookupErrorKind::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Unavailable, message)
    }

    /// Shorthand for a [`LookupErrorKind::Failed`] error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Failed, message)
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for LookupError {}

/// The kind of principal lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// The provider's backing store could not be read
    Unavailable,
    /// The provider failed for a reason of its own
    Failed,
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupErrorKind::Unavailable => write!(f, "Principal source unavailable"),
            LookupErrorKind::Failed => write!(f, "Principal lookup failed"),
        }
    }
}
