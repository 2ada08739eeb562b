//! Error type for clock operations and codecs
//!
//! Every fallible operation in this crate returns [`ItcError`]. Failures are
//! raised before any tree is returned, so a caller never observes a partially
//! built id or event tree.

/// Result type for clock operations
pub type Result<T> = std::result::Result<T, ItcError>;

/// Unified error type for all clock operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItcError {
    /// An id leaf was given a value other than 0 or 1
    #[error("Invalid id leaf value {value}: must be 0 or 1")]
    InvalidIdLeaf {
        /// The rejected value
        value: u64,
    },

    /// Two ids claim the same part of the identity space
    #[error("Cannot sum overlapping ids {left} and {right}")]
    Overlap {
        /// Text form of the left operand
        left: String,
        /// Text form of the right operand
        right: String,
    },

    /// Inflation was requested on a stamp that owns no identity
    #[error("Cannot inflate an anonymous stamp")]
    AnonymousInflate,

    /// The id and event trees of a stamp do not fit together
    #[error("Malformed stamp {stamp}: no growth rule applies")]
    Malformed {
        /// Text form of the offending stamp
        stamp: String,
    },

    /// Inflation would push a count past `u64::MAX`
    #[error("Counter overflow: stamp {stamp} cannot record another event")]
    CounterOverflow {
        /// Text form of the exhausted stamp
        stamp: String,
    },

    /// Text input does not match the stamp grammar
    #[error("Parse error at byte {position}: {message}")]
    Parse {
        /// Byte offset where parsing failed
        position: usize,
        /// Error message describing the mismatch
        message: String,
    },

    /// Binary input could not be decoded
    #[error("Decode error: {message}")]
    Decode {
        /// Error message describing the decoding failure
        message: String,
    },

    /// Decoder input exceeded a configured bound
    #[error("Decode limit exceeded: {what} is larger than {limit}")]
    LimitExceeded {
        /// Which bound was hit
        what: &'static str,
        /// The configured bound
        limit: usize,
    },

    /// Configuration values are out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message describing the rejected setting
        message: String,
    },
}

impl ItcError {
    /// Create a parse error at the given byte offset
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create a binary decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check if error is due to invalid caller input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdLeaf { .. }
                | Self::Overlap { .. }
                | Self::AnonymousInflate
                | Self::CounterOverflow { .. }
                | Self::Parse { .. }
                | Self::Decode { .. }
                | Self::LimitExceeded { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Check if error indicates a corrupted tree built upstream
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
