//! Exactly-once, process-wide initialization.
//!
//! Every stateful subsystem (device driver, resource store) sits behind an
//! [`InitGate`]. The first caller runs the setup routine; concurrent callers
//! wait for it; everybody observes the same outcome, including failure.

mod bootstrap;
mod error;
mod gate;

pub use bootstrap::bootstrap;
pub use error::InitError;
pub use gate::InitGate;
