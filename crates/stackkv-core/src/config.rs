//! Configuration for the StackKV engine
//!
//! The engine is entirely in-memory, so the only tunables are initial
//! capacity hints for its hash maps. Presets cover the two common shapes:
//! short interactive sessions and bulk-loaded stores.

/// Upper bound accepted for any capacity hint
const MAX_CAPACITY_HINT: usize = 1 << 26;

/// Engine configuration with capacity presets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Initial capacity of the committed store and current-value cache
    pub key_capacity: usize,
    /// Initial capacity of the value-count index
    pub value_capacity: usize,
    /// Initial capacity of the transaction stack (frames)
    pub frame_capacity: usize,
}

impl Config {
    /// Interactive sessions and tests
    pub fn small() -> Self {
        Self {
            key_capacity: 64,
            value_capacity: 64,
            frame_capacity: 8,
        }
    }

    /// Bulk-loaded stores with millions of keys
    pub fn large() -> Self {
        Self {
            key_capacity: 1 << 20,
            value_capacity: 1 << 16,
            frame_capacity: 64,
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.key_capacity == 0 || self.key_capacity > MAX_CAPACITY_HINT {
            return Err(format!("key_capacity must be in [1, {}]", MAX_CAPACITY_HINT));
        }
        if self.value_capacity == 0 || self.value_capacity > MAX_CAPACITY_HINT {
            return Err(format!("value_capacity must be in [1, {}]", MAX_CAPACITY_HINT));
        }
        if self.frame_capacity == 0 || self.frame_capacity > MAX_CAPACITY_HINT {
            return Err(format!("frame_capacity must be in [1, {}]", MAX_CAPACITY_HINT));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self { Self::small() }
}
