use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::device;
use crate::logging::{init_logging, LoggingConfig};
use crate::store::{self, ResourceStore};

use super::InitError;

/// Brings the engine up: logging, then the device driver, then the global
/// resource store. Each step happens once per process; repeated calls
/// return the existing store and ignore `config`.
///
/// Intended usage is early in `main`.
pub fn bootstrap(config: &EngineConfig) -> Result<&'static Mutex<ResourceStore>, InitError> {
    init_logging(LoggingConfig::from(config));

    let driver = device::ensure(&config.device)?;
    log::debug!("bootstrap: {} driver active", driver.name());

    store::global_with(config)
}
