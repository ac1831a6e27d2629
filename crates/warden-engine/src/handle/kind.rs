use core::fmt;

use super::{AllocationError, RawHandle};

/// Native resource kinds understood by a [`Driver`](crate::device::Driver).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NativeKind {
    VertexArray,
    Buffer,
    Texture,
    Program,
    Window,
}

impl NativeKind {
    pub const fn label(self) -> &'static str {
        match self {
            NativeKind::VertexArray => "vertex array",
            NativeKind::Buffer => "buffer",
            NativeKind::Texture => "texture",
            NativeKind::Program => "shader program",
            NativeKind::Window => "window",
        }
    }
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compile-time resource kind: a label plus its allocate/free capability pair.
///
/// Implementors are usually zero-sized marker types. The capabilities are
/// plain functions; [`Handle`](super::Handle) decides when they run.
pub trait Kind: 'static {
    /// Kind name used in logs and errors.
    const LABEL: &'static str;

    /// Prefix for generated names when handles of this kind are registered
    /// directly.
    const NAME_PREFIX: &'static str = "generated-";

    /// Allocates a fresh native handle.
    fn allocate() -> Result<RawHandle, AllocationError>;

    /// Frees a handle. Called at most once per owning wrapper.
    fn free(raw: RawHandle);
}
