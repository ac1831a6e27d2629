use thiserror::Error;

use crate::subsystem::InitError;

/// Failure of a native allocate capability.
///
/// Always fatal to the construction that requested the handle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("no {kind} handles left")]
    Exhausted { kind: &'static str },

    #[error("{kind} allocator returned the null handle")]
    NullHandle { kind: &'static str },

    #[error("{kind} allocation rejected: {reason}")]
    Rejected { kind: &'static str, reason: String },

    #[error("device unavailable: {0}")]
    Device(#[from] InitError),
}
