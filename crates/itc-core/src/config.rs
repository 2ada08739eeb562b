//! Decoder configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{ItcError, Result};

/// Bounds applied while decoding untrusted text or binary input.
///
/// Decoding is recursive, so `max_depth` also bounds stack use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Deepest node nesting accepted in an id or event tree
    pub max_depth: usize,
    /// Largest accepted input, in bytes
    pub max_input_len: usize,
}

impl DecodeLimits {
    /// Default nesting bound
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    /// Default input size bound (64 KiB)
    pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

    /// Limits with no practical bound on input size
    pub fn unbounded_len(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_input_len: usize::MAX,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ItcError::InvalidConfig {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        if self.max_input_len == 0 {
            return Err(ItcError::InvalidConfig {
                message: "max_input_len must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_len(&self, len: usize) -> Result<()> {
        if len > self.max_input_len {
            return Err(ItcError::LimitExceeded {
                what: "input length",
                limit: self.max_input_len,
            });
        }
        Ok(())
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(ItcError::LimitExceeded {
                what: "nesting depth",
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
        }
    }
}
