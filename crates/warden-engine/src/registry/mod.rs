//! Typed, name-keyed registries of owned resources.
//!
//! A [`Registry`] exclusively owns every value recorded in it. Values leave
//! the registry either by being dropped ([`Registry::remove`], teardown) or
//! by handing ownership back to the caller ([`Registry::retrieve`]).
//!
//! Registries are single-owner structures and are not `Sync`; cross-thread
//! access must go through external locking (see [`crate::store::global`]).

mod error;
mod proxy;
mod resource;

pub use error::RegistryError;
pub use proxy::Registry;
pub use resource::{Construct, Resource};
