use core::fmt;

use crate::config::NamePrefixes;
use crate::registry::Registry;
use crate::resources::{Buffer, Camera, Mesh, Shader, Texture, VertexArray, Window};

/// One registry per built-in resource kind.
///
/// The set of kinds is fixed. Dropping the store releases every owned
/// handle, windows last.
pub struct ResourceStore {
    pub vertex_arrays: Registry<VertexArray>,
    pub buffers: Registry<Buffer>,
    pub cameras: Registry<Camera>,
    pub meshes: Registry<Mesh>,
    pub shaders: Registry<Shader>,
    pub textures: Registry<Texture>,
    pub windows: Registry<Window>,
}

impl ResourceStore {
    pub fn new(names: &NamePrefixes) -> Self {
        Self {
            vertex_arrays: Registry::with_prefix(names.vertex_arrays.as_str()),
            buffers: Registry::with_prefix(names.buffers.as_str()),
            cameras: Registry::with_prefix(names.cameras.as_str()),
            meshes: Registry::with_prefix(names.meshes.as_str()),
            shaders: Registry::with_prefix(names.shaders.as_str()),
            textures: Registry::with_prefix(names.textures.as_str()),
            windows: Registry::with_prefix(names.windows.as_str()),
        }
    }

    /// Entry counts per kind.
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            vertex_arrays: self.vertex_arrays.len(),
            buffers: self.buffers.len(),
            cameras: self.cameras.len(),
            meshes: self.meshes.len(),
            shaders: self.shaders.len(),
            textures: self.textures.len(),
            windows: self.windows.len(),
        }
    }

    /// Empties every registry. Meshes go before the vertex arrays and
    /// buffers they may borrow from; windows go last.
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.vertex_arrays.clear();
        self.buffers.clear();
        self.shaders.clear();
        self.textures.clear();
        self.cameras.clear();
        self.windows.clear();
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new(&NamePrefixes::default())
    }
}

impl Drop for ResourceStore {
    fn drop(&mut self) {
        let summary = self.summary();
        if summary.total() > 0 {
            log::debug!("tearing down resource store ({summary})");
        }
        self.clear();
    }
}

impl fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceStore").field(&self.summary()).finish()
    }
}

/// Entry counts reported by [`ResourceStore::summary`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StoreSummary {
    pub vertex_arrays: usize,
    pub buffers: usize,
    pub cameras: usize,
    pub meshes: usize,
    pub shaders: usize,
    pub textures: usize,
    pub windows: usize,
}

impl StoreSummary {
    pub fn total(&self) -> usize {
        self.vertex_arrays
            + self.buffers
            + self.cameras
            + self.meshes
            + self.shaders
            + self.textures
            + self.windows
    }
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertex arrays, {} buffers, {} cameras, {} meshes, {} shaders, {} textures, {} windows",
            self.vertex_arrays,
            self.buffers,
            self.cameras,
            self.meshes,
            self.shaders,
            self.textures,
            self.windows,
        )
    }
}
