//! Keyed memoization
//!
//! Derived structures are recomputed only when their memo key changes. Keys
//! are plain hashes (see [`memo_key`]) or generation counters, so the check is
//! a single integer comparison instead of a deep equality walk.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Hash `value` into a memo key
pub fn memo_key<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Single-entry cache guarded by a key
#[derive(Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it if the key changed
    pub fn get_or_compute<F: FnOnce() -> V>(&mut self, key: K, compute: F) -> &V {
        if !self.is_cached(&key) {
            self.entry = None;
        }
        &self.entry.get_or_insert_with(|| (key, compute())).1
    }

    /// Drop the cached value
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_cached(&self, key: &K) -> bool {
        matches!(&self.entry, Some((cached, _)) if cached == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_recomputes_on_key_change() {
        let mut memo = Memo::new();
        let mut computed = 0;

        assert_eq!(
            *memo.get_or_compute(1u64, || {
                computed += 1;
                "a"
            }),
            "a"
        );
        memo.get_or_compute(1u64, || {
            computed += 1;
            "b"
        });
        assert_eq!(computed, 1);

        assert_eq!(
            *memo.get_or_compute(2u64, || {
                computed += 1;
                "c"
            }),
            "c"
        );
        assert_eq!(computed, 2);
        assert!(memo.is_cached(&2));

        memo.invalidate();
        assert!(!memo.is_cached(&2));
    }

    #[test]
    fn test_memo_key_is_stable() {
        assert_eq!(memo_key(&("bars", 3u32)), memo_key(&("bars", 3u32)));
        assert_ne!(memo_key(&("bars", 3u32)), memo_key(&("bars", 4u32)));
    }
}
