use crate::handle::{AllocationError, Handle, Kind, RawHandle};

/// A value that can live in a [`Registry`](super::Registry).
pub trait Resource {
    /// Kind name used in logs and errors.
    const KIND: &'static str;

    /// Prefix the registry's name allocator uses unless configured otherwise.
    const DEFAULT_PREFIX: &'static str;

    /// Whether this value wraps the native handle `raw`.
    fn is_wrapper_of(&self, raw: RawHandle) -> bool;

    /// Identity comparison used by value lookup.
    fn same_identity(&self, other: &Self) -> bool;
}

/// Resources with a fresh-construction path.
pub trait Construct: Resource + Sized {
    /// Construction parameters.
    type Desc;

    /// Builds a new value, allocating whatever native handles it needs.
    fn construct(desc: Self::Desc) -> Result<Self, AllocationError>;
}

impl<K: Kind> Resource for Handle<K> {
    const KIND: &'static str = K::LABEL;
    const DEFAULT_PREFIX: &'static str = K::NAME_PREFIX;

    fn is_wrapper_of(&self, raw: RawHandle) -> bool {
        Handle::is_wrapper_of(self, raw)
    }

    fn same_identity(&self, other: &Self) -> bool {
        self == other
    }
}

impl<K: Kind> Construct for Handle<K> {
    type Desc = ();

    fn construct(_: ()) -> Result<Self, AllocationError> {
        Handle::fresh()
    }
}
