//! Owning wrappers around native handles.
//!
//! A [`Handle`] holds one raw handle of one [`Kind`] and frees it on drop when
//! it is the owner. Ownership moves with the value; it is never shared or
//! reference counted.

mod error;
mod kind;
mod owned;
mod raw;

pub use error::AllocationError;
pub use kind::{Kind, NativeKind};
pub use owned::Handle;
pub use raw::RawHandle;
