//! Derived indices maintained alongside the transaction stack
//!
//! - [`ValueCounts`]: value -> number of keys currently holding it.
//!   Entries are removed when their count reaches zero, so the map never
//!   grows beyond the number of distinct live values.
//! - [`FrameIndex`]: key -> ascending frame depths at which the key has a
//!   pending write. A key is present iff some open frame wrote it.

use hashbrown::HashMap;

/// Value -> count of keys whose current value equals it.
#[derive(Debug, Clone, Default)]
pub struct ValueCounts {
    counts: HashMap<String, usize>,
}

impl ValueCounts {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with room for `capacity` distinct values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { counts: HashMap::with_capacity(capacity) }
    }

    /// One more key now holds `value`.
    pub fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    /// One fewer key holds `value`. Drops the entry at zero.
    /// Decrementing a value with no entry is a no-op.
    pub fn decrement(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(value);
            }
        }
    }

    /// Number of keys holding `value` (0 if none).
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Number of distinct values with a non-zero count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no key holds any value.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Remove all entries, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Iterate over (value, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(v, c)| (v.as_str(), *c))
    }
}

/// Key -> frame depths holding a pending write for that key, oldest first.
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
    positions: HashMap<String, Vec<usize>>,
}

impl FrameIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { positions: HashMap::with_capacity(capacity) }
    }

    /// Record that `key` was written in the frame at `depth`.
    ///
    /// Repeated writes within the same frame are recorded once.
    pub fn record(&mut self, key: &str, depth: usize) {
        match self.positions.get_mut(key) {
            Some(list) => {
                if list.last() != Some(&depth) {
                    list.push(depth);
                }
            }
            None => {
                self.positions.insert(key.to_string(), vec![depth]);
            }
        }
    }

    /// Drop the innermost recorded depth for `key`.
    ///
    /// Returns the depth that is now innermost, or `None` if the key has no
    /// pending writes left (its entry is removed).
    pub fn pop(&mut self, key: &str) -> Option<usize> {
        let list = self.positions.get_mut(key)?;
        list.pop();
        let innermost = list.last().copied();
        if innermost.is_none() {
            self.positions.remove(key);
        }
        innermost
    }

    /// Depths at which `key` has pending writes, oldest first.
    pub fn positions(&self, key: &str) -> Option<&[usize]> {
        self.positions.get(key).map(Vec::as_slice)
    }

    /// Keys with at least one pending write.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    /// Iterate over (key, depths) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.positions.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of keys with pending writes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no key has a pending write.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Remove all entries, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_increment_decrement() {
        let mut counts = ValueCounts::new();
        counts.increment("10");
        counts.increment("10");
        counts.increment("20");
        assert_eq!(counts.count("10"), 2);
        assert_eq!(counts.count("20"), 1);
        assert_eq!(counts.len(), 2);

        counts.decrement("10");
        assert_eq!(counts.count("10"), 1);
    }

    #[test]
    fn test_counts_removed_at_zero() {
        let mut counts = ValueCounts::new();
        counts.increment("x");
        counts.decrement("x");
        assert_eq!(counts.count("x"), 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_counts_decrement_unknown_is_noop() {
        let mut counts = ValueCounts::new();
        counts.decrement("ghost");
        assert!(counts.is_empty());
        assert_eq!(counts.count("ghost"), 0);
    }

    #[test]
    fn test_frame_index_record_dedups_same_frame() {
        let mut index = FrameIndex::new();
        index.record("a", 0);
        index.record("a", 0);
        index.record("a", 2);
        index.record("a", 2);
        assert_eq!(index.positions("a"), Some(&[0, 2][..]));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_frame_index_pop() {
        let mut index = FrameIndex::new();
        index.record("a", 0);
        index.record("a", 1);

        assert_eq!(index.pop("a"), Some(0));
        assert_eq!(index.positions("a"), Some(&[0][..]));

        // Last depth gone: key removed entirely
        assert_eq!(index.pop("a"), None);
        assert_eq!(index.positions("a"), None);
        assert!(index.is_empty());
    }

    #[test]
    fn test_frame_index_pop_missing_key() {
        let mut index = FrameIndex::new();
        assert_eq!(index.pop("nope"), None);
    }

    #[test]
    fn test_frame_index_clear() {
        let mut index = FrameIndex::with_capacity(4);
        index.record("a", 0);
        index.record("b", 0);
        let mut keys: Vec<&str> = index.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
        index.clear();
        assert!(index.is_empty());
    }
}
