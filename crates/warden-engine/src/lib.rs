//! Warden engine crate.
//!
//! Tracks ownership of opaque native handles (vertex arrays, buffers,
//! shader programs, textures, windows) and keeps them in named, per-kind
//! registries. Native allocation goes through a single process-wide
//! [`device::Driver`].

pub mod config;
pub mod device;
pub mod handle;
pub mod logging;
pub mod naming;
pub mod registry;
pub mod resources;
pub mod store;
pub mod subsystem;

#[cfg(test)]
pub(crate) mod testing;

pub use config::EngineConfig;
pub use handle::{Handle, RawHandle};
pub use registry::Registry;
pub use store::ResourceStore;
pub use subsystem::bootstrap;
