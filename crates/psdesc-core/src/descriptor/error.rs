use thiserror::Error;

use super::model::FourCc;

/// Errors returned by descriptor decoding.
///
/// Every variant aborts the whole decode; no partial tree is returned.
///
/// # Examples
/// ```
/// use psdesc_core::{DescriptorError, FourCc};
///
/// let err = DescriptorError::UnknownTypeTag {
///     tag: FourCc(*b"zzzz"),
///     key: "Opct".to_string(),
///     offset: 12,
/// };
/// assert!(err.to_string().contains("unknown OSType tag 'zzzz'"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("stream truncated at offset {offset}: need {needed} bytes, {remaining} remaining")]
    StreamTruncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("unknown OSType tag '{tag}' in entity '{key}' at offset {offset}")]
    UnknownTypeTag {
        tag: FourCc,
        key: String,
        offset: usize,
    },
    #[error("nesting depth {depth} exceeds limit {limit} at offset {offset}")]
    RecursionLimitExceeded {
        depth: usize,
        limit: usize,
        offset: usize,
    },
    #[error("reading {needed} bytes at offset {offset} exceeds byte limit {limit}")]
    ByteLimitExceeded {
        offset: usize,
        needed: usize,
        limit: usize,
    },
    #[error("unsupported descriptor version {version} (expected 16)")]
    UnsupportedVersion { version: u32 },
}

impl DescriptorError {
    /// Approximate stream position of the failure, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DescriptorError::StreamTruncated { offset, .. }
            | DescriptorError::UnknownTypeTag { offset, .. }
            | DescriptorError::RecursionLimitExceeded { offset, .. }
            | DescriptorError::ByteLimitExceeded { offset, .. } => Some(*offset),
            DescriptorError::UnsupportedVersion { .. } => None,
        }
    }
}
