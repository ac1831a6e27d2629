use core::fmt;

/// Opaque native resource identifier.
///
/// Zero is reserved as the "absent" sentinel ([`RawHandle::NULL`]).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RawHandle(u64);

impl RawHandle {
    pub const NULL: Self = Self(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for RawHandle {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

impl From<u64> for RawHandle {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
