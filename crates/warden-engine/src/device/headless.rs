use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::handle::{AllocationError, NativeKind, RawHandle};

use super::{DeviceConfig, Driver};

/// Allocation counters reported by [`HeadlessDriver::stats`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DriverStats {
    pub allocations: u64,
    pub frees: u64,
    /// Frees of handles that were not live (double frees, foreign handles).
    pub stray_frees: u64,
}

/// In-process driver handing out synthetic handles.
///
/// Handles are unique across all kinds and never zero. Live handles are
/// tracked per kind so that leaks, double frees and exhaustion are
/// observable without a native backend.
#[derive(Debug)]
pub struct HeadlessDriver {
    capacity: Option<usize>,
    next: AtomicU64,
    live: Mutex<HashMap<NativeKind, HashSet<RawHandle>>>,
    allocations: AtomicU64,
    frees: AtomicU64,
    stray_frees: AtomicU64,
}

impl HeadlessDriver {
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            capacity: config.capacity,
            next: AtomicU64::new(1),
            live: Mutex::new(HashMap::new()),
            allocations: AtomicU64::new(0),
            frees: AtomicU64::new(0),
            stray_frees: AtomicU64::new(0),
        }
    }

    /// Number of live handles of `kind`.
    pub fn live_count(&self, kind: NativeKind) -> usize {
        self.live.lock().get(&kind).map_or(0, HashSet::len)
    }

    pub fn stats(&self) -> DriverStats {
        DriverStats {
            allocations: self.allocations.load(Ordering::Relaxed),
            frees: self.frees.load(Ordering::Relaxed),
            stray_frees: self.stray_frees.load(Ordering::Relaxed),
        }
    }
}

impl Default for HeadlessDriver {
    fn default() -> Self {
        Self::new(&DeviceConfig::default())
    }
}

impl Driver for HeadlessDriver {
    fn name(&self) -> &str {
        "headless"
    }

    fn allocate(&self, kind: NativeKind) -> Result<RawHandle, AllocationError> {
        let mut live = self.live.lock();
        let handles = live.entry(kind).or_default();

        if self.capacity.is_some_and(|cap| handles.len() >= cap) {
            log::warn!("{kind} capacity exhausted ({} live)", handles.len());
            return Err(AllocationError::Exhausted { kind: kind.label() });
        }

        let raw = RawHandle::new(self.next.fetch_add(1, Ordering::Relaxed));
        handles.insert(raw);
        self.allocations.fetch_add(1, Ordering::Relaxed);
        Ok(raw)
    }

    fn free(&self, kind: NativeKind, raw: RawHandle) {
        let removed = self
            .live
            .lock()
            .get_mut(&kind)
            .is_some_and(|handles| handles.remove(&raw));

        if removed {
            self.frees.fetch_add(1, Ordering::Relaxed);
        } else {
            self.stray_frees.fetch_add(1, Ordering::Relaxed);
            log::warn!("free of unknown {kind} handle {raw}");
        }
    }

    fn is_live(&self, kind: NativeKind, raw: RawHandle) -> Option<bool> {
        let live = self.live.lock();
        Some(live.get(&kind).is_some_and(|handles| handles.contains(&raw)))
    }
}
