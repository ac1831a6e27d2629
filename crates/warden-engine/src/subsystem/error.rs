use thiserror::Error;

/// Subsystem initialization failure.
///
/// Cloned to every caller that triggered or waited on the failed setup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InitError {
    #[error("{subsystem} initialization failed: {reason}")]
    Failed {
        subsystem: &'static str,
        reason: String,
    },

    #[error("{subsystem} is already initialized")]
    AlreadyInitialized { subsystem: &'static str },
}
