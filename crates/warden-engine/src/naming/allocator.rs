use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;

use indexmap::IndexMap;

/// Anything that can answer "is this name taken?".
pub trait NameSet {
    fn contains_name(&self, name: &str) -> bool;
}

impl<S: BuildHasher> NameSet for HashSet<String, S> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl NameSet for BTreeSet<String> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<V, S: BuildHasher> NameSet for HashMap<String, V, S> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<V, S: BuildHasher> NameSet for IndexMap<String, V, S> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl NameSet for [&str] {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(&name)
    }
}

/// Per-kind name generator.
///
/// A hint that is still free is accepted as is. Otherwise candidates of the
/// form `hint + prefix + counter` are tried. The counter only ever grows, so a
/// generated name is never produced twice by the same allocator, even after
/// the resource that held it is gone.
#[derive(Debug, Clone)]
pub struct NameAllocator {
    prefix: String,
    counter: u64,
}

impl NameAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of candidates generated so far.
    #[inline]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Returns `hint` if it is free in `existing`, otherwise the first free
    /// generated candidate.
    pub fn next_name<S>(&mut self, existing: &S, hint: &str) -> String
    where
        S: NameSet + ?Sized,
    {
        if !existing.contains_name(hint) {
            log::debug!("name hint {hint:?} is available");
            return hint.to_owned();
        }

        loop {
            let candidate = format!("{hint}{}{}", self.prefix, self.counter);
            self.counter += 1;

            if !existing.contains_name(&candidate) {
                log::debug!("hint {hint:?} taken, generated {candidate:?}");
                return candidate;
            }
        }
    }
}
