use core::fmt;
use std::sync::OnceLock;

use super::InitError;

/// Write-once gate around a subsystem's state.
///
/// The setup routine runs at most once for the lifetime of the gate.
/// Concurrent first callers block until it completes, and its completion
/// happens-before every caller's observation of the result. A failed setup
/// is cached: later callers get the same [`InitError`] and the routine is
/// never retried.
///
/// Calling back into the same gate from inside its setup routine deadlocks.
pub struct InitGate<T> {
    name: &'static str,
    cell: OnceLock<Result<T, InitError>>,
}

impl<T> InitGate<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceLock::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the subsystem state, running `setup` if this is the first call.
    pub fn get_or_try_init<F>(&self, setup: F) -> Result<&T, InitError>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        self.cell
            .get_or_init(|| {
                log::debug!("initializing {}", self.name);
                match setup() {
                    Ok(state) => {
                        log::info!("{} initialized", self.name);
                        Ok(state)
                    }
                    Err(err) => {
                        log::error!("{} initialization failed: {err:#}", self.name);
                        Err(InitError::Failed {
                            subsystem: self.name,
                            reason: format!("{err:#}"),
                        })
                    }
                }
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Runs `setup` once; later calls are no-ops that report the first outcome.
    pub fn ensure_initialized<F>(&self, setup: F) -> Result<(), InitError>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        self.get_or_try_init(setup).map(|_| ())
    }

    /// Returns the state if setup already succeeded. Never runs setup.
    pub fn get(&self) -> Option<&T> {
        self.cell.get().and_then(|result| result.as_ref().ok())
    }

    /// Returns the cached failure, if setup ran and failed.
    pub fn failure(&self) -> Option<&InitError> {
        self.cell.get().and_then(|result| result.as_ref().err())
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }
}

impl<T> fmt::Debug for InitGate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.cell.get() {
            None => "pending",
            Some(Ok(_)) => "ready",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("InitGate")
            .field("name", &self.name)
            .field("state", &state)
            .finish()
    }
}
