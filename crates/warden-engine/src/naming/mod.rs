//! Unique name generation for registered resources.

mod allocator;

pub use allocator::{NameAllocator, NameSet};
