use thiserror::Error;

use crate::handle::AllocationError;

/// Registry operation failure.
///
/// Lookup misses are recoverable; `Allocation` carries a fatal construction
/// failure up to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no {kind} named {name:?}")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} index {index} out of range ({len} entries)")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("no {kind} resources registered")]
    Empty { kind: &'static str },

    #[error("{kind} name {name:?} is already taken")]
    NameTaken { kind: &'static str, name: String },

    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

impl RegistryError {
    pub(crate) fn not_found(kind: &'static str, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_owned(),
        }
    }
}
