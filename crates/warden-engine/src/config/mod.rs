//! Engine configuration.
//!
//! Everything has a default; a TOML file only needs the keys it changes:
//!
//! ```toml
//! log_filter = "warden_engine=debug"
//!
//! [device]
//! capacity = 4096
//!
//! [names]
//! meshes = "mesh-"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::device::DeviceConfig;
use crate::registry::Resource;
use crate::resources::{Buffer, Camera, Mesh, Shader, Texture, VertexArray, Window};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration consumed by [`bootstrap`](crate::subsystem::bootstrap).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `env_logger` filter; `RUST_LOG` applies when absent.
    pub log_filter: Option<String>,
    pub device: DeviceConfig,
    pub names: NamePrefixes,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Generated-name prefix per resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamePrefixes {
    pub vertex_arrays: String,
    pub buffers: String,
    pub cameras: String,
    pub meshes: String,
    pub shaders: String,
    pub textures: String,
    pub windows: String,
}

impl Default for NamePrefixes {
    fn default() -> Self {
        Self {
            vertex_arrays: VertexArray::DEFAULT_PREFIX.to_string(),
            buffers: Buffer::DEFAULT_PREFIX.to_string(),
            cameras: Camera::DEFAULT_PREFIX.to_string(),
            meshes: Mesh::DEFAULT_PREFIX.to_string(),
            shaders: Shader::DEFAULT_PREFIX.to_string(),
            textures: Texture::DEFAULT_PREFIX.to_string(),
            windows: Window::DEFAULT_PREFIX.to_string(),
        }
    }
}
