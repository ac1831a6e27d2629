//! Native allocation layer.
//!
//! This module is responsible for:
//! - the [`Driver`] capability interface the native backend implements
//! - installing exactly one process-wide driver
//! - routing built-in kinds' allocate/free calls to that driver
//!
//! When nothing was installed explicitly, the first allocation installs a
//! [`HeadlessDriver`].

mod driver;
mod headless;
mod init;

pub use driver::Driver;
pub use headless::{DriverStats, HeadlessDriver};
pub use init::DeviceConfig;

use anyhow::Context;

use crate::handle::{AllocationError, NativeKind, RawHandle};
use crate::subsystem::{InitError, InitGate};

static DEVICE: InitGate<Box<dyn Driver>> = InitGate::new("device");

/// Installs `driver` as the process-wide driver, running its setup once.
///
/// Fails with [`InitError::AlreadyInitialized`] if a driver is already
/// active (including the lazily installed headless one), or with the setup
/// failure.
pub fn install<D>(driver: D) -> Result<&'static dyn Driver, InitError>
where
    D: Driver + 'static,
{
    let mut installed = false;
    let active = DEVICE.get_or_try_init(|| {
        installed = true;
        activate(Box::new(driver))
    })?;

    if !installed {
        return Err(InitError::AlreadyInitialized {
            subsystem: DEVICE.name(),
        });
    }
    Ok(&**active)
}

/// Returns the active driver, installing a headless one configured from
/// `config` if none is active yet. `config` is ignored afterwards.
pub fn ensure(config: &DeviceConfig) -> Result<&'static dyn Driver, InitError> {
    DEVICE
        .get_or_try_init(|| activate(Box::new(HeadlessDriver::new(config))))
        .map(|driver| &**driver)
}

/// Returns the active driver, installing the default headless one if needed.
pub fn driver() -> Result<&'static dyn Driver, InitError> {
    ensure(&DeviceConfig::default())
}

/// Allocate capability shared by the built-in kinds.
pub fn allocate(kind: NativeKind) -> Result<RawHandle, AllocationError> {
    driver()?.allocate(kind)
}

/// Free capability shared by the built-in kinds.
pub fn free(kind: NativeKind, raw: RawHandle) {
    match DEVICE.get() {
        Some(driver) => driver.free(kind, raw),
        // Only reachable for handles the device never produced.
        None => log::warn!("dropping {kind} {raw}: no active device"),
    }
}

fn activate(driver: Box<dyn Driver>) -> anyhow::Result<Box<dyn Driver>> {
    driver
        .setup()
        .with_context(|| format!("{} driver setup failed", driver.name()))?;
    log::info!("using {} driver", driver.name());
    Ok(driver)
}
