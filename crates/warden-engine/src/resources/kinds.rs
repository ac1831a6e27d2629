use crate::device;
use crate::handle::{AllocationError, Handle, Kind, NativeKind, RawHandle};

macro_rules! native_kinds {
    ($($(#[$meta:meta])* $name:ident => $native:ident, $prefix:literal;)*) => {$(
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq)]
        pub struct $name;

        impl Kind for $name {
            const LABEL: &'static str = NativeKind::$native.label();
            const NAME_PREFIX: &'static str = $prefix;

            fn allocate() -> Result<RawHandle, AllocationError> {
                device::allocate(NativeKind::$native)
            }

            fn free(raw: RawHandle) {
                device::free(NativeKind::$native, raw);
            }
        }
    )*};
}

native_kinds! {
    /// Vertex array object.
    VertexArrayKind => VertexArray, "generated-vao-";
    /// Vertex or index buffer object.
    BufferKind => Buffer, "generated-bo-";
    /// Texture object.
    TextureKind => Texture, "generated-texture-";
    /// Linked shader program.
    ProgramKind => Program, "generated-shader-";
    /// Native window.
    WindowKind => Window, "Generated Window ";
}

/// Owning or non-owning vertex array.
pub type VertexArray = Handle<VertexArrayKind>;

/// Owning or non-owning texture.
pub type Texture = Handle<TextureKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Resource;

    #[test]
    fn labels_follow_native_kinds() {
        assert_eq!(VertexArrayKind::LABEL, "vertex array");
        assert_eq!(<Texture as Resource>::KIND, "texture");
        assert_eq!(<VertexArray as Resource>::DEFAULT_PREFIX, "generated-vao-");
    }

    #[test]
    fn handles_round_trip_through_the_device() {
        let vao = VertexArray::fresh().unwrap();
        let raw = vao.raw();
        let driver = device::driver().unwrap();
        assert_eq!(driver.is_live(NativeKind::VertexArray, raw), Some(true));

        drop(vao);
        assert_eq!(driver.is_live(NativeKind::VertexArray, raw), Some(false));
    }
}
