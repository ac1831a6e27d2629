use crate::handle::{AllocationError, NativeKind, RawHandle};

/// Native allocate/free capability set.
///
/// The core treats implementations as black boxes: `allocate` produces a
/// handle, `free` consumes one. `free` does not need to be idempotent; the
/// owning wrappers guarantee it runs once per handle.
pub trait Driver: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// One-time backend setup. Runs under the device [`InitGate`] before the
    /// first allocation.
    ///
    /// [`InitGate`]: crate::subsystem::InitGate
    fn setup(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Allocates a handle of `kind`. Must never return [`RawHandle::NULL`] on
    /// success.
    fn allocate(&self, kind: NativeKind) -> Result<RawHandle, AllocationError>;

    /// Frees a handle previously returned by `allocate` (or adopted as owning).
    fn free(&self, kind: NativeKind, raw: RawHandle);

    /// Whether `raw` is currently allocated, for drivers that track it.
    fn is_live(&self, kind: NativeKind, raw: RawHandle) -> Option<bool> {
        let _ = (kind, raw);
        None
    }
}
