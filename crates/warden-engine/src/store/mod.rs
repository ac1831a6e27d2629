//! Per-kind registries bundled into one store.
//!
//! [`ResourceStore`] is an ordinary value; [`global`] hands out the
//! process-wide instance behind a mutex.

mod global;
mod resource_store;

pub use global::{global, global_with};
pub use resource_store::{ResourceStore, StoreSummary};
