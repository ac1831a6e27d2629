use serde::Deserialize;

/// Device layer configuration.
///
/// Keep this structure minimal. Add fields only when a concrete backend
/// requirement exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Maximum live handles per kind for the headless driver.
    ///
    /// `None` means unbounded.
    pub capacity: Option<usize>,
}
