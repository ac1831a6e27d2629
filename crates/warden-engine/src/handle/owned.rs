use core::fmt;
use core::marker::PhantomData;
use core::mem;

use super::{AllocationError, Kind, RawHandle};

/// Owning or non-owning wrapper around one native handle of kind `K`.
///
/// Rules:
/// - an owning wrapper frees its handle exactly once (on [`release`] or drop)
/// - ownership moves with the value; [`transfer`] moves it out of a place
///   that stays alive and leaves that place non-owning
/// - adopting [`RawHandle::NULL`] allocates a fresh handle and always owns it
///
/// A constructed wrapper never holds the null handle.
///
/// [`release`]: Handle::release
/// [`transfer`]: Handle::transfer
pub struct Handle<K: Kind> {
    raw: RawHandle,
    owning: bool,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Handle<K> {
    /// Allocates a fresh handle. The result always owns it.
    pub fn fresh() -> Result<Self, AllocationError> {
        let raw = K::allocate()?;
        if raw.is_null() {
            return Err(AllocationError::NullHandle { kind: K::LABEL });
        }

        log::debug!("allocated {} {}", K::LABEL, raw);
        Ok(Self::wrap(raw, true))
    }

    /// Wraps an existing handle.
    ///
    /// Passing [`RawHandle::NULL`] means "allocate for me": a fresh handle is
    /// created and `owning` is ignored.
    pub fn adopt(raw: RawHandle, owning: bool) -> Result<Self, AllocationError> {
        if raw.is_null() {
            return Self::fresh();
        }

        log::debug!("adopted {} {} (owning: {})", K::LABEL, raw, owning);
        Ok(Self::wrap(raw, owning))
    }

    /// Returns a non-owning wrapper of the same handle.
    pub fn alias(&self) -> Self {
        Self::wrap(self.raw, false)
    }

    /// Moves ownership out of `self` into the returned wrapper.
    ///
    /// `self` keeps the raw value for comparisons but never frees it.
    pub fn transfer(&mut self) -> Self {
        let owning = mem::replace(&mut self.owning, false);
        log::debug!("transferred {} {} (owning: {})", K::LABEL, self.raw, owning);
        Self::wrap(self.raw, owning)
    }

    /// Frees the handle if this wrapper owns it. Further calls are no-ops.
    pub fn release(&mut self) {
        if !self.owning {
            return;
        }

        // Cleared before the free so it happens at most once.
        self.owning = false;
        log::debug!("freeing {} {}", K::LABEL, self.raw);
        K::free(self.raw);
    }

    /// Gives up ownership without freeing and returns the raw handle.
    pub fn into_raw(mut self) -> RawHandle {
        self.owning = false;
        self.raw
    }

    #[inline]
    pub fn raw(&self) -> RawHandle {
        self.raw
    }

    #[inline]
    pub fn is_owning(&self) -> bool {
        self.owning
    }

    #[inline]
    pub fn is_wrapper_of(&self, raw: RawHandle) -> bool {
        self.raw == raw
    }

    fn wrap(raw: RawHandle, owning: bool) -> Self {
        Self {
            raw,
            owning,
            _kind: PhantomData,
        }
    }
}

impl<K: Kind> Drop for Handle<K> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<K: Kind> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K: Kind> Eq for Handle<K> {}

impl<K: Kind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &K::LABEL)
            .field("raw", &self.raw)
            .field("owning", &self.owning)
            .finish()
    }
}
