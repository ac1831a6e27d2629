//! Built-in resource kinds.
//!
//! Every kind here allocates through the process-wide device driver (see
//! [`crate::device`]). Single-handle kinds are plain [`Handle`] aliases;
//! composite kinds own several handles and follow the same ownership rules
//! part by part.
//!
//! [`Handle`]: crate::handle::Handle

mod buffer;
mod camera;
mod kinds;
mod mesh;
mod shader;
mod window;

pub use buffer::{Buffer, BufferTarget};
pub use camera::{Camera, CameraDesc, CameraId};
pub use kinds::{BufferKind, ProgramKind, Texture, TextureKind, VertexArray, VertexArrayKind, WindowKind};
pub use mesh::{Mesh, MeshOwnership};
pub use shader::{Shader, ShaderSources};
pub use window::{Window, WindowSpec, WindowTraits};
