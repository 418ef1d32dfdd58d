//! Errors raised by wire-level reads and scalar parsing.

/// Wire read or scalar parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The cursor ran out of bytes.
    #[error("unexpected end of input at offset {offset} (needed {needed} more bytes)")]
    Truncated { offset: usize, needed: usize },

    /// The bytes are present but do not form a valid value.
    #[error("malformed input at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },

    /// A text form could not be parsed into a scalar.
    #[error("{0}")]
    Invalid(String),
}

impl WireError {
    /// Byte offset where the read failed, if this is a read error.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Truncated { offset, .. } | Self::Malformed { offset, .. } => Some(*offset),
            Self::Invalid(_) => None,
        }
    }
}
