//! Point-in-time copy of the engine's internal structures
//!
//! A `Snapshot` is taken by [`Store::inspect`](crate::engine::Store::inspect)
//! for diagnostics and tests. It uses ordered maps so two snapshots compare
//! equal exactly when the engine states they were taken from match.
//! Nothing in the engine reads a snapshot back.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::{StoreError, StoreResult};
use crate::slot::Slot;

/// Owned, ordered copy of the committed store, the frames and the three
/// derived indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Committed key -> value
    pub committed: BTreeMap<String, String>,
    /// Open frames, oldest first
    pub frames: Vec<BTreeMap<String, Slot>>,
    /// Key -> depths of frames that wrote it
    pub frame_index: BTreeMap<String, Vec<usize>>,
    /// Key -> effective value
    pub current: BTreeMap<String, String>,
    /// Value -> number of keys holding it
    pub value_counts: BTreeMap<String, usize>,
}

impl Snapshot {
    /// Number of open transactions at capture time.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Recompute every derived index from `committed` and `frames` and
    /// check the captured ones against it.
    ///
    /// Returns the first mismatch found, checking the frame index, then
    /// the current-value cache, then the value counts.
    pub fn verify(&self) -> StoreResult<()> {
        let mut frame_index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (depth, frame) in self.frames.iter().enumerate() {
            for key in frame.keys() {
                frame_index.entry(key.clone()).or_default().push(depth);
            }
        }
        first_difference("frame", &frame_index, &self.frame_index)?;

        // Replaying frames oldest-first leaves the innermost write on top
        let mut current = self.committed.clone();
        for frame in &self.frames {
            for (key, slot) in frame {
                match slot {
                    Slot::Value(value) => {
                        current.insert(key.clone(), value.clone());
                    }
                    Slot::Unset => {
                        current.remove(key);
                    }
                }
            }
        }
        first_difference("current-value", &current, &self.current)?;

        let mut value_counts: BTreeMap<String, usize> = BTreeMap::new();
        for value in current.values() {
            *value_counts.entry(value.clone()).or_insert(0) += 1;
        }
        first_difference("value-count", &value_counts, &self.value_counts)
    }
}

fn first_difference<V: PartialEq + Debug>(
    index: &'static str,
    expected: &BTreeMap<String, V>,
    actual: &BTreeMap<String, V>,
) -> StoreResult<()> {
    let mismatch = expected.keys()
        .chain(actual.keys())
        .find(|key| expected.get(*key) != actual.get(*key));

    match mismatch {
        Some(key) => Err(StoreError::IndexMismatch {
            index,
            detail: format!(
                "{:?}: expected {:?}, found {:?}",
                key,
                expected.get(key),
                actual.get(key)
            ),
        }),
        None => Ok(()),
    }
}
