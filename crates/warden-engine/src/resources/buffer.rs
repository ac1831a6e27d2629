use crate::handle::{AllocationError, Handle, Kind, RawHandle};
use crate::registry::{Construct, Resource};

use super::BufferKind;

/// Binding target of a buffer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (VBO).
    #[default]
    Vertex,
    /// Element indices (EBO).
    Index,
}

/// Buffer object wrapper, owning or non-owning.
///
/// Identity is the native handle; the target is metadata.
#[derive(Debug)]
pub struct Buffer {
    handle: Handle<BufferKind>,
    target: BufferTarget,
}

impl Buffer {
    /// Allocates a new buffer.
    pub fn new(target: BufferTarget) -> Result<Self, AllocationError> {
        Ok(Self {
            handle: Handle::fresh()?,
            target,
        })
    }

    /// Wraps an existing buffer. The null handle allocates a fresh, owned one.
    pub fn from_raw(raw: RawHandle, target: BufferTarget, owning: bool) -> Result<Self, AllocationError> {
        Ok(Self {
            handle: Handle::adopt(raw, owning)?,
            target,
        })
    }

    #[inline]
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    #[inline]
    pub fn handle(&self) -> &Handle<BufferKind> {
        &self.handle
    }

    #[inline]
    pub fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    #[inline]
    pub fn is_owning(&self) -> bool {
        self.handle.is_owning()
    }

    /// Moves ownership into the returned buffer; `self` stays as a
    /// non-owning view.
    pub fn transfer(&mut self) -> Self {
        Self {
            handle: self.handle.transfer(),
            target: self.target,
        }
    }

    /// Non-owning view of the same buffer.
    pub fn alias(&self) -> Self {
        Self {
            handle: self.handle.alias(),
            target: self.target,
        }
    }

    pub fn release(&mut self) {
        self.handle.release();
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Buffer {}

impl Resource for Buffer {
    const KIND: &'static str = BufferKind::LABEL;
    const DEFAULT_PREFIX: &'static str = BufferKind::NAME_PREFIX;

    fn is_wrapper_of(&self, raw: RawHandle) -> bool {
        self.handle.is_wrapper_of(raw)
    }

    fn same_identity(&self, other: &Self) -> bool {
        self == other
    }
}

impl Construct for Buffer {
    type Desc = BufferTarget;

    fn construct(target: BufferTarget) -> Result<Self, AllocationError> {
        Self::new(target)
    }
}
