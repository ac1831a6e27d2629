use bitflags::bitflags;

use crate::handle::{AllocationError, RawHandle};
use crate::registry::{Construct, Resource};

use super::{Buffer, BufferTarget, VertexArray};

bitflags! {
    /// Parts of a mesh the mesh itself is responsible for freeing.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct MeshOwnership: u8 {
        const VERTEX_ARRAY = 1 << 0;
        const VERTICES     = 1 << 1;
        const INDICES      = 1 << 2;
    }
}

impl Default for MeshOwnership {
    fn default() -> Self {
        Self::all()
    }
}

/// Indexed geometry: a vertex array, a vertex buffer, an index buffer and
/// the number of indices to draw.
///
/// Each part follows [`Handle`](crate::handle::Handle) ownership rules on its
/// own. Two meshes are the same mesh when all three parts wrap the same
/// native handles.
#[derive(Debug)]
pub struct Mesh {
    vertex_array: VertexArray,
    vertices: Buffer,
    indices: Buffer,
    index_count: u32,
}

impl Mesh {
    /// Allocates every part; the mesh owns all of them.
    pub fn new(index_count: u32) -> Result<Self, AllocationError> {
        Ok(Self {
            vertex_array: VertexArray::fresh()?,
            vertices: Buffer::new(BufferTarget::Vertex)?,
            indices: Buffer::new(BufferTarget::Index)?,
            index_count,
        })
    }

    /// Wraps existing native handles. Parts passed as null are allocated
    /// and always owned; the rest are owned only when flagged in `owns`.
    pub fn from_raw(
        vertex_array: RawHandle,
        vertices: RawHandle,
        indices: RawHandle,
        index_count: u32,
        owns: MeshOwnership,
    ) -> Result<Self, AllocationError> {
        Ok(Self {
            vertex_array: VertexArray::adopt(vertex_array, owns.contains(MeshOwnership::VERTEX_ARRAY))?,
            vertices: Buffer::from_raw(vertices, BufferTarget::Vertex, owns.contains(MeshOwnership::VERTICES))?,
            indices: Buffer::from_raw(indices, BufferTarget::Index, owns.contains(MeshOwnership::INDICES))?,
            index_count,
        })
    }

    /// Assembles a mesh from existing wrappers. Flagged parts take over the
    /// wrapper's ownership (the wrapper is left non-owning); the others are
    /// borrowed as non-owning views.
    pub fn from_parts(
        vertex_array: &mut VertexArray,
        vertices: &mut Buffer,
        indices: &mut Buffer,
        index_count: u32,
        owns: MeshOwnership,
    ) -> Self {
        let vertex_array = if owns.contains(MeshOwnership::VERTEX_ARRAY) {
            vertex_array.transfer()
        } else {
            vertex_array.alias()
        };
        let vertices = if owns.contains(MeshOwnership::VERTICES) {
            vertices.transfer()
        } else {
            vertices.alias()
        };
        let indices = if owns.contains(MeshOwnership::INDICES) {
            indices.transfer()
        } else {
            indices.alias()
        };

        Self {
            vertex_array,
            vertices,
            indices,
            index_count,
        }
    }

    #[inline]
    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    #[inline]
    pub fn vertices(&self) -> &Buffer {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &Buffer {
        &self.indices
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn set_index_count(&mut self, index_count: u32) {
        self.index_count = index_count;
    }

    /// Which parts this mesh currently owns.
    pub fn ownership(&self) -> MeshOwnership {
        let mut owns = MeshOwnership::empty();
        owns.set(MeshOwnership::VERTEX_ARRAY, self.vertex_array.is_owning());
        owns.set(MeshOwnership::VERTICES, self.vertices.is_owning());
        owns.set(MeshOwnership::INDICES, self.indices.is_owning());
        owns
    }

    /// Moves ownership of every part into the returned mesh.
    pub fn transfer(&mut self) -> Self {
        Self {
            vertex_array: self.vertex_array.transfer(),
            vertices: self.vertices.transfer(),
            indices: self.indices.transfer(),
            index_count: self.index_count,
        }
    }

    /// Frees every owned part.
    pub fn release(&mut self) {
        self.vertex_array.release();
        self.vertices.release();
        self.indices.release();
    }
}

impl PartialEq for Mesh {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_array == other.vertex_array
            && self.vertices == other.vertices
            && self.indices == other.indices
    }
}

impl Eq for Mesh {}

impl Resource for Mesh {
    const KIND: &'static str = "mesh";
    const DEFAULT_PREFIX: &'static str = "generated-mesh-";

    fn is_wrapper_of(&self, raw: RawHandle) -> bool {
        self.vertex_array.is_wrapper_of(raw)
            || self.vertices.is_wrapper_of(raw)
            || self.indices.is_wrapper_of(raw)
    }

    fn same_identity(&self, other: &Self) -> bool {
        self == other
    }
}

impl Construct for Mesh {
    /// Index count.
    type Desc = u32;

    fn construct(index_count: u32) -> Result<Self, AllocationError> {
        Self::new(index_count)
    }
}
