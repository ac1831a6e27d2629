//! Test doubles for native allocate/free capabilities.
//!
//! Raw values come from one process-wide counter so that tests running in
//! parallel never observe each other's handles.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::handle::{AllocationError, Kind, RawHandle};

static NEXT_RAW: AtomicU64 = AtomicU64::new(1);
static FREED: Mutex<Vec<RawHandle>> = Mutex::new(Vec::new());

/// Returns a raw handle that no capability allocated (an "external" handle).
pub(crate) fn external_raw() -> RawHandle {
    RawHandle::new(NEXT_RAW.fetch_add(1, Ordering::Relaxed))
}

/// Number of times `raw` reached a free capability.
pub(crate) fn free_count(raw: RawHandle) -> usize {
    FREED.lock().iter().filter(|&&freed| freed == raw).count()
}

/// Always succeeds; records every free.
#[derive(Debug)]
pub(crate) struct Probe;

impl Kind for Probe {
    const LABEL: &'static str = "probe";
    const NAME_PREFIX: &'static str = "-probe-";

    fn allocate() -> Result<RawHandle, AllocationError> {
        Ok(external_raw())
    }

    fn free(raw: RawHandle) {
        FREED.lock().push(raw);
    }
}

/// Always reports exhaustion.
#[derive(Debug)]
pub(crate) struct Exhausted;

impl Kind for Exhausted {
    const LABEL: &'static str = "exhausted";

    fn allocate() -> Result<RawHandle, AllocationError> {
        Err(AllocationError::Exhausted { kind: Self::LABEL })
    }

    fn free(raw: RawHandle) {
        FREED.lock().push(raw);
    }
}

/// Misbehaving allocator that hands out the sentinel.
#[derive(Debug)]
pub(crate) struct NullAllocator;

impl Kind for NullAllocator {
    const LABEL: &'static str = "null";

    fn allocate() -> Result<RawHandle, AllocationError> {
        Ok(RawHandle::NULL)
    }

    fn free(raw: RawHandle) {
        FREED.lock().push(raw);
    }
}
