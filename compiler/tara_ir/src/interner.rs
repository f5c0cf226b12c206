//! String interner: the single source of truth for [`Name`].
//!
//! Sharded so that interning from multiple parser/lexer threads (one per
//! file in a multi-file compilation, see spec.md §5) doesn't serialize on a
//! single lock. The shard for a string is chosen by hashing; within a shard,
//! a `RwLock<Shard>` guards a `FxHashMap<Box<str>, u32>` plus a `Vec<Box<str>>`
//! for the reverse lookup.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::name::Name;

struct Shard {
    map: FxHashMap<Box<str>, u32>,
    strings: Vec<Box<str>>,
}

impl Shard {
    fn new() -> Self {
        Shard {
            map: FxHashMap::default(),
            strings: Vec::new(),
        }
    }
}

const SHARD_BITS: u32 = 4;
const SHARD_COUNT: usize = 1 << SHARD_BITS;

/// Interns strings into [`Name`]s and hands back the original string for any
/// `Name` previously produced by this interner.
///
/// A handful of keywords and operator spellings used throughout the pipeline
/// (`fn`, `let`, `(`, `)`, ...) are pre-interned at construction so that
/// every `Interner` instance assigns them the same `Name`, letting callers
/// hardcode those names as constants (see [`Interner::KEYWORD_COUNT`] and the
/// `well_known` module).
pub struct Interner {
    shards: Vec<RwLock<Shard>>,
}

impl Interner {
    pub fn new() -> Self {
        let mut shards = Vec::with_capacity(SHARD_COUNT);
        for _ in 0..SHARD_COUNT {
            shards.push(RwLock::new(Shard::new()));
        }
        let interner = Interner { shards };
        crate::well_known::preintern(&interner);
        interner
    }

    fn shard_index(s: &str) -> u32 {
        use std::hash::{Hash, Hasher};
        let mut hasher = rustc_hash::FxHasher::default();
        s.hash(&mut hasher);
        (hasher.finish() as u32) & (SHARD_COUNT as u32 - 1)
    }

    /// Interns `s`, returning the same [`Name`] for equal strings.
    pub fn intern(&self, s: &str) -> Name {
        let shard_idx = Self::shard_index(s);
        {
            let shard = self.shards[shard_idx as usize].read();
            if let Some(&local) = shard.map.get(s) {
                return Name::from_parts(shard_idx, local);
            }
        }
        let mut shard = self.shards[shard_idx as usize].write();
        // Re-check: another thread may have interned `s` between the read
        // unlock above and this write lock acquisition.
        if let Some(&local) = shard.map.get(s) {
            return Name::from_parts(shard_idx, local);
        }
        let local = shard.strings.len() as u32;
        let boxed: Box<str> = s.into();
        shard.strings.push(boxed.clone());
        shard.map.insert(boxed, local);
        tracing::trace!(string = s, shard = shard_idx, local, "interned");
        Name::from_parts(shard_idx, local)
    }

    /// Resolves a previously-interned `Name` back to its string.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this `Interner` instance.
    pub fn resolve(&self, name: Name) -> std::sync::Arc<str> {
        let shard = self.shards[name.shard() as usize].read();
        let s = shard
            .strings
            .get(name.local() as usize)
            .unwrap_or_else(|| panic!("{name:?} not found in this interner"));
        std::sync::Arc::from(&**s)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_twice_yields_same_name() {
        let interner = Interner::new();
        let a = interner.intern("hello");
        let b = interner.intern("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn interning_distinct_strings_yields_distinct_names() {
        let interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let interner = Interner::new();
        let name = interner.intern("round_trip");
        assert_eq!(&*interner.resolve(name), "round_trip");
    }
}
