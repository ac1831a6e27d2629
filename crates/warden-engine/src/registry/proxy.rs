use core::cell::RefCell;
use core::fmt;

use indexmap::IndexMap;

use crate::handle::RawHandle;
use crate::naming::NameAllocator;

use super::{Construct, RegistryError, Resource};

/// Name-keyed collection of owned resources of one kind.
///
/// Entries keep insertion order; it defines ordinal access and the fallback
/// entry of [`recent`](Registry::recent). The registry also remembers the
/// name of the last touched entry. That cache is a name only and is cleared
/// or re-pointed whenever its entry is removed or renamed, so it never names
/// a missing key.
pub struct Registry<T: Resource> {
    entries: IndexMap<String, T>,
    names: NameAllocator,
    recently_used: RefCell<Option<String>>,
}

impl<T: Resource> Registry<T> {
    /// Creates an empty registry using the kind's default name prefix.
    pub fn new() -> Self {
        Self::with_prefix(T::DEFAULT_PREFIX)
    }

    /// Creates an empty registry generating names with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            entries: IndexMap::new(),
            names: NameAllocator::new(prefix),
            recently_used: RefCell::new(None),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Prefix used for generated names.
    pub fn prefix(&self) -> &str {
        self.names.prefix()
    }

    /// Number of names generated so far (monotonic).
    pub fn generated_count(&self) -> u64 {
        self.names.counter()
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut T)> {
        self.entries
            .iter_mut()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Name of the last touched entry, if any.
    pub fn recent_name(&self) -> Option<String> {
        self.recently_used.borrow().clone()
    }

    // ── lookup ────────────────────────────────────────────────────────────

    /// Looks up an entry by name and marks it recently used.
    pub fn get(&self, name: &str) -> Result<&T, RegistryError> {
        let Some(value) = self.entries.get(name) else {
            return Err(RegistryError::not_found(T::KIND, name));
        };
        self.touch(name);
        Ok(value)
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut T, RegistryError> {
        let Some(value) = self.entries.get_mut(name) else {
            return Err(RegistryError::not_found(T::KIND, name));
        };
        set_recent(self.recently_used.get_mut(), name);
        Ok(value)
    }

    /// Looks up an entry by insertion-order position and marks it recently
    /// used. Positions shift when earlier entries are removed.
    pub fn get_index(&self, index: usize) -> Result<&T, RegistryError> {
        let Some((name, value)) = self.entries.get_index(index) else {
            return Err(self.out_of_range(index));
        };
        self.touch(name);
        Ok(value)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Result<&mut T, RegistryError> {
        let len = self.entries.len();
        let Some((name, value)) = self.entries.get_index_mut(index) else {
            return Err(RegistryError::IndexOutOfRange {
                kind: T::KIND,
                index,
                len,
            });
        };
        set_recent(self.recently_used.get_mut(), name);
        Ok(value)
    }

    /// Reverse lookup by native handle. Linear scan.
    pub fn find_by_handle(&self, raw: RawHandle) -> Option<&str> {
        let (name, _) = self
            .entries
            .iter()
            .find(|(_, value)| value.is_wrapper_of(raw))?;
        self.touch(name);
        Some(name.as_str())
    }

    /// Reverse lookup by resource identity. Linear scan.
    pub fn find_by_value(&self, value: &T) -> Option<&str> {
        let (name, _) = self
            .entries
            .iter()
            .find(|(_, candidate)| candidate.same_identity(value))?;
        self.touch(name);
        Some(name.as_str())
    }

    /// Returns the last touched entry.
    ///
    /// If nothing was touched yet, the first entry is returned and cached.
    pub fn recent(&self) -> Result<&T, RegistryError> {
        let index = self.recent_index().unwrap_or(0);
        let Some((name, value)) = self.entries.get_index(index) else {
            return Err(RegistryError::Empty { kind: T::KIND });
        };
        self.touch(name);
        Ok(value)
    }

    pub fn recent_mut(&mut self) -> Result<&mut T, RegistryError> {
        let index = self.recent_index().unwrap_or(0);
        let Some((name, value)) = self.entries.get_index_mut(index) else {
            return Err(RegistryError::Empty { kind: T::KIND });
        };
        set_recent(self.recently_used.get_mut(), name);
        Ok(value)
    }

    // ── insertion ─────────────────────────────────────────────────────────

    /// Constructs a fresh value from `desc` and registers it.
    ///
    /// Returns the adopted name, which differs from `hint` when the hint is
    /// taken.
    pub fn emplace(&mut self, hint: &str, desc: T::Desc) -> Result<String, RegistryError>
    where
        T: Construct,
    {
        self.emplace_with(hint, || T::construct(desc))
    }

    /// Like [`emplace`](Registry::emplace) with a caller-supplied constructor.
    pub fn emplace_with<F, E>(&mut self, hint: &str, construct: F) -> Result<String, RegistryError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<RegistryError>,
    {
        let value = construct().map_err(Into::<RegistryError>::into)?;
        Ok(self.record(value, hint))
    }

    /// Takes ownership of an existing value and registers it.
    ///
    /// Returns the adopted name.
    pub fn record(&mut self, value: T, hint: &str) -> String {
        let name = self.names.next_name(&self.entries, hint);
        log::debug!("recording {} as {:?}", T::KIND, name);

        self.entries.insert(name.clone(), value);
        set_recent(self.recently_used.get_mut(), &name);
        name
    }

    // ── removal ───────────────────────────────────────────────────────────

    /// Drops the named entry, releasing whatever it owns.
    ///
    /// Returns `false` if there was no such entry.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(value) = self.entries.shift_remove(name) else {
            return false;
        };
        self.forget(name);

        log::debug!("removing {} {:?}", T::KIND, name);
        drop(value);
        true
    }

    /// Removes the named entry and hands its ownership to the caller.
    pub fn retrieve(&mut self, name: &str) -> Result<T, RegistryError> {
        let Some(value) = self.entries.shift_remove(name) else {
            return Err(RegistryError::not_found(T::KIND, name));
        };
        self.forget(name);

        log::debug!("retrieved {} {:?}", T::KIND, name);
        Ok(value)
    }

    /// Moves an entry to a new name, keeping its position.
    ///
    /// Returns `Ok(false)` without effect if `old` does not exist. Renaming
    /// onto a name held by another entry is rejected with
    /// [`RegistryError::NameTaken`].
    pub fn rename(&mut self, old: &str, new: &str) -> Result<bool, RegistryError> {
        let Some(index) = self.entries.get_index_of(old) else {
            return Ok(false);
        };
        if old == new {
            return Ok(true);
        }
        if self.entries.contains_key(new) {
            return Err(RegistryError::NameTaken {
                kind: T::KIND,
                name: new.to_owned(),
            });
        }

        let Some((_, value)) = self.entries.shift_remove_index(index) else {
            return Ok(false);
        };
        self.entries.shift_insert(index, new.to_owned(), value);

        let recent = self.recently_used.get_mut();
        if recent.as_deref() == Some(old) {
            *recent = Some(new.to_owned());
        }

        log::debug!("renamed {} {:?} to {:?}", T::KIND, old, new);
        Ok(true)
    }

    /// Drops every entry. The name counter is kept.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("clearing {} {} entries", self.entries.len(), T::KIND);
        }
        *self.recently_used.get_mut() = None;

        // Drain in insertion order so release order is deterministic.
        for (_, value) in self.entries.drain(..) {
            drop(value);
        }
    }

    fn touch(&self, name: &str) {
        set_recent(&mut self.recently_used.borrow_mut(), name);
    }

    fn forget(&mut self, name: &str) {
        let recent = self.recently_used.get_mut();
        if recent.as_deref() == Some(name) {
            *recent = None;
        }
    }

    fn recent_index(&self) -> Option<usize> {
        let recent = self.recently_used.borrow();
        let index = recent
            .as_deref()
            .and_then(|name| self.entries.get_index_of(name));
        index
    }

    fn out_of_range(&self, index: usize) -> RegistryError {
        RegistryError::IndexOutOfRange {
            kind: T::KIND,
            index,
            len: self.entries.len(),
        }
    }
}

fn set_recent(slot: &mut Option<String>, name: &str) {
    if slot.as_deref() != Some(name) {
        *slot = Some(name.to_owned());
    }
}

impl<T: Resource> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &T::KIND)
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .field("recently_used", &self.recently_used.borrow())
            .field("generated", &self.names.counter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::handle::{AllocationError, Handle};
    use crate::testing::{external_raw, free_count, Exhausted, Probe};

    type Probes = Registry<Handle<Probe>>;

    fn recent_is_live(registry: &Probes) -> bool {
        registry
            .recent_name()
            .map_or(true, |name| registry.contains(&name))
    }

    // ── emplace / record ──────────────────────────────────────────────────

    #[test]
    fn emplace_adopts_free_hint() {
        let mut probes = Probes::new();
        let name = probes.emplace("vao", ()).unwrap();
        assert_eq!(name, "vao");
        assert_eq!(probes.recent_name().as_deref(), Some("vao"));
        assert!(probes.get("vao").unwrap().is_owning());
    }

    #[test]
    fn emplace_generates_name_on_collision() {
        let mut probes = Probes::with_prefix("-gen-");
        probes.emplace("vao", ()).unwrap();
        let second = probes.emplace("vao", ()).unwrap();
        assert_eq!(second, "vao-gen-0");
        assert_eq!(probes.len(), 2);
    }

    #[test]
    fn emplace_failure_propagates_and_inserts_nothing() {
        let mut registry = Registry::<Handle<Exhausted>>::new();
        let err = registry.emplace("x", ()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Allocation(AllocationError::Exhausted { kind: "exhausted" })
        );
        assert!(registry.is_empty());
        assert_eq!(registry.recent_name(), None);
    }

    #[test]
    fn emplace_with_uses_custom_constructor() {
        let mut probes = Probes::new();
        let raw = external_raw();
        let name = probes
            .emplace_with("adopted", || Handle::<Probe>::adopt(raw, false))
            .unwrap();
        assert_eq!(probes.find_by_handle(raw), Some(name.as_str()));
    }

    #[test]
    fn record_takes_ownership() {
        let mut probes = Probes::new();
        let handle = Handle::<Probe>::fresh().unwrap();
        let raw = handle.raw();

        let name = probes.record(handle, "");
        assert_eq!(name, "");
        assert!(probes.get("").unwrap().is_owning());

        assert!(probes.remove(""));
        assert_eq!(free_count(raw), 1);
    }

    #[test]
    fn record_then_retrieve_round_trips_identity() {
        let mut probes = Probes::new();
        let handle = Handle::<Probe>::fresh().unwrap();
        let raw = handle.raw();

        let name = probes.record(handle, "");
        let back = probes.retrieve(&name).unwrap();
        assert!(back.is_wrapper_of(raw));
        assert!(back.is_owning());
        assert_eq!(free_count(raw), 0);
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[test]
    fn get_missing_is_not_found() {
        let probes = Probes::new();
        assert_eq!(
            probes.get("nope").unwrap_err(),
            RegistryError::NotFound { kind: "probe", name: "nope".into() }
        );
    }

    #[test]
    fn get_marks_recently_used() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();

        probes.get("a").unwrap();
        assert_eq!(probes.recent_name().as_deref(), Some("a"));
    }

    #[test]
    fn get_index_follows_insertion_order() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();

        let b = probes.get("b").unwrap().raw();
        assert_eq!(probes.get_index(1).unwrap().raw(), b);
        assert_eq!(
            probes.get_index(2).unwrap_err(),
            RegistryError::IndexOutOfRange { kind: "probe", index: 2, len: 2 }
        );
    }

    #[test]
    fn get_index_mut_marks_recently_used() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();

        probes.get_index_mut(0).unwrap();
        assert_eq!(probes.recent_name().as_deref(), Some("a"));
        assert!(probes.get_index_mut(5).is_err());
    }

    #[test]
    fn find_by_handle_hits_and_misses() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();
        let a = probes.get("a").unwrap().raw();
        probes.get("b").unwrap();

        assert_eq!(probes.find_by_handle(a), Some("a"));
        assert_eq!(probes.recent_name().as_deref(), Some("a"));
        assert_eq!(probes.find_by_handle(external_raw()), None);
    }

    #[test]
    fn find_by_value_uses_identity() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        let alias = probes.get("a").unwrap().alias();

        assert_eq!(probes.find_by_value(&alias), Some("a"));

        let stranger = Handle::<Probe>::fresh().unwrap();
        assert_eq!(probes.find_by_value(&stranger), None);
    }

    // ── recent ────────────────────────────────────────────────────────────

    #[test]
    fn recent_on_empty_fails() {
        let probes = Probes::new();
        assert_eq!(probes.recent().unwrap_err(), RegistryError::Empty { kind: "probe" });
    }

    #[test]
    fn recent_falls_back_to_first_entry() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();
        probes.remove("b");
        assert_eq!(probes.recent_name(), None);

        let a = probes.iter().next().unwrap().1.raw();
        assert!(probes.recent().unwrap().is_wrapper_of(a));
        assert_eq!(probes.recent_name().as_deref(), Some("a"));
    }

    #[test]
    fn recent_mut_returns_last_touched() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();
        let b = probes.get("b").unwrap().raw();

        assert!(probes.recent_mut().unwrap().is_wrapper_of(b));
    }

    // ── removal ───────────────────────────────────────────────────────────

    #[test]
    fn remove_releases_and_clears_recent() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        let raw = probes.get("a").unwrap().raw();

        assert!(probes.remove("a"));
        assert!(!probes.remove("a"));
        assert_eq!(free_count(raw), 1);
        assert_eq!(probes.recent_name(), None);
    }

    #[test]
    fn remove_keeps_unrelated_recent() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();

        probes.remove("a");
        assert_eq!(probes.recent_name().as_deref(), Some("b"));
    }

    #[test]
    fn retrieve_transfers_ownership_out() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        let raw = probes.get("a").unwrap().raw();

        let handle = probes.retrieve("a").unwrap();
        assert!(!probes.contains("a"));
        assert!(handle.is_wrapper_of(raw));
        assert_eq!(probes.recent_name(), None);
        assert_eq!(free_count(raw), 0);

        drop(handle);
        assert_eq!(free_count(raw), 1);
    }

    #[test]
    fn retrieve_missing_is_not_found() {
        let mut probes = Probes::new();
        assert!(matches!(
            probes.retrieve("a"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn clear_releases_everything_but_keeps_counter() {
        let mut probes = Probes::with_prefix("-");
        probes.emplace("a", ()).unwrap();
        probes.emplace("a", ()).unwrap();
        let raws: Vec<_> = probes.iter().map(|(_, h)| h.raw()).collect();

        probes.clear();
        assert!(probes.is_empty());
        assert_eq!(probes.recent_name(), None);
        assert!(raws.iter().all(|&raw| free_count(raw) == 1));

        probes.emplace("a", ()).unwrap();
        assert_eq!(probes.emplace("a", ()).unwrap(), "a-1");
    }

    // ── rename ────────────────────────────────────────────────────────────

    #[test]
    fn rename_missing_is_false() {
        let mut probes = Probes::new();
        assert_eq!(probes.rename("a", "b"), Ok(false));
    }

    #[test]
    fn rename_onto_taken_name_is_rejected() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();
        let a = probes.get("a").unwrap().raw();
        let b = probes.get("b").unwrap().raw();

        assert_eq!(
            probes.rename("a", "b"),
            Err(RegistryError::NameTaken { kind: "probe", name: "b".into() })
        );
        assert!(probes.get("a").unwrap().is_wrapper_of(a));
        assert!(probes.get("b").unwrap().is_wrapper_of(b));
        assert_eq!(free_count(b), 0);
    }

    #[test]
    fn rename_to_same_name_is_noop() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        assert_eq!(probes.rename("a", "a"), Ok(true));
        assert!(probes.contains("a"));
    }

    #[test]
    fn rename_keeps_position_and_repoints_recent() {
        let mut probes = Probes::new();
        probes.emplace("a", ()).unwrap();
        probes.emplace("b", ()).unwrap();
        probes.emplace("c", ()).unwrap();
        probes.get("b").unwrap();

        assert_eq!(probes.rename("b", "middle"), Ok(true));
        assert_eq!(probes.names().collect::<Vec<_>>(), ["a", "middle", "c"]);
        assert_eq!(probes.recent_name().as_deref(), Some("middle"));
    }

    #[test]
    fn emplace_find_rename_scenario() {
        let mut probes = Probes::new();
        assert_eq!(probes.emplace("vao", ()).unwrap(), "vao");
        let h = probes.get("vao").unwrap().raw();

        assert_eq!(probes.find_by_handle(h), Some("vao"));
        assert_eq!(probes.rename("vao", "primary"), Ok(true));
        assert!(matches!(probes.get("vao"), Err(RegistryError::NotFound { .. })));
        assert!(probes.get("primary").unwrap().is_wrapper_of(h));
        assert_eq!(free_count(h), 0);
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[derive(Debug, Clone)]
    enum Op {
        Emplace(&'static str),
        Record(&'static str),
        Remove(usize),
        Retrieve(usize),
        Rename(usize, &'static str),
        Get(usize),
        FindHandle(usize),
        Recent,
    }

    fn hint() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["", "a", "b", "vao"])
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            hint().prop_map(Op::Emplace),
            hint().prop_map(Op::Record),
            any::<usize>().prop_map(Op::Remove),
            any::<usize>().prop_map(Op::Retrieve),
            (any::<usize>(), hint()).prop_map(|(i, h)| Op::Rename(i, h)),
            any::<usize>().prop_map(Op::Get),
            any::<usize>().prop_map(Op::FindHandle),
            Just(Op::Recent),
        ]
    }

    fn pick(probes: &Probes, seed: usize) -> Option<String> {
        if probes.is_empty() {
            return None;
        }
        probes.names().nth(seed % probes.len()).map(str::to_owned)
    }

    proptest! {
        #[test]
        fn recent_never_dangles(ops in prop::collection::vec(op(), 1..60)) {
            let mut probes = Probes::new();

            for op in ops {
                match op {
                    Op::Emplace(hint) => {
                        probes.emplace(hint, ()).unwrap();
                    }
                    Op::Record(hint) => {
                        probes.record(Handle::fresh().unwrap(), hint);
                    }
                    Op::Remove(seed) => {
                        if let Some(name) = pick(&probes, seed) {
                            prop_assert!(probes.remove(&name));
                        }
                    }
                    Op::Retrieve(seed) => {
                        if let Some(name) = pick(&probes, seed) {
                            let handle = probes.retrieve(&name).unwrap();
                            prop_assert!(!probes.contains(&name));
                            prop_assert!(handle.is_owning());
                        }
                    }
                    Op::Rename(seed, new) => {
                        if let Some(old) = pick(&probes, seed) {
                            let before = probes.len();
                            let _ = probes.rename(&old, new);
                            prop_assert_eq!(probes.len(), before);
                        }
                    }
                    Op::Get(seed) => {
                        if let Some(name) = pick(&probes, seed) {
                            probes.get(&name).unwrap();
                        }
                    }
                    Op::FindHandle(seed) => {
                        if let Some(name) = pick(&probes, seed) {
                            let raw = probes.get(&name).unwrap().raw();
                            prop_assert_eq!(probes.find_by_handle(raw), Some(name.as_str()));
                        }
                    }
                    Op::Recent => {
                        prop_assert_eq!(probes.recent().is_ok(), !probes.is_empty());
                    }
                }

                prop_assert!(recent_is_live(&probes));
            }
        }

        #[test]
        fn every_entry_stays_the_single_owner(count in 1usize..20) {
            let mut probes = Probes::new();
            let mut raws = Vec::new();
            for _ in 0..count {
                let name = probes.emplace("x", ()).unwrap();
                raws.push(probes.get(&name).unwrap().raw());
            }

            drop(probes);
            for raw in raws {
                prop_assert_eq!(free_count(raw), 1);
            }
        }
    }
}
