//! Process-wide tuning knobs of the quadtree engine.
//!
//! Values are read whenever a [`crate::HashLifeEngine`] resets its memory,
//! i.e. at the start of every `advance`.

use std::sync::{Mutex, MutexGuard, OnceLock};

pub struct Config {
    arena_chunk_log2: u32,
    hashtable_cap_log2: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_chunk_log2: 16,
            hashtable_cap_log2: 12,
        }
    }
}

impl Config {
    pub const ARENA_CHUNK_LOG2_MIN: u32 = 4;
    pub const ARENA_CHUNK_LOG2_MAX: u32 = 24;
    pub const HASHTABLE_CAP_LOG2_MIN: u32 = 4;
    pub const HASHTABLE_CAP_LOG2_MAX: u32 = 28;

    fn get() -> MutexGuard<'static, Config> {
        static CONFIG: OnceLock<Mutex<Config>> = OnceLock::new();
        // the fields are plain integers, a poisoned lock still holds valid values
        CONFIG
            .get_or_init(|| Mutex::new(Config::default()))
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Nodes per arena chunk, log2.
    pub fn arena_chunk_log2() -> u32 {
        Self::get().arena_chunk_log2
    }

    /// Clamped to `4..=24`.
    pub fn set_arena_chunk_log2(chunk_log2: u32) {
        Self::get().arena_chunk_log2 =
            chunk_log2.clamp(Self::ARENA_CHUNK_LOG2_MIN, Self::ARENA_CHUNK_LOG2_MAX);
    }

    /// Initial number of buckets of the canonical table, log2.
    pub fn hashtable_cap_log2() -> u32 {
        Self::get().hashtable_cap_log2
    }

    /// Clamped to `4..=28`.
    pub fn set_hashtable_cap_log2(cap_log2: u32) {
        Self::get().hashtable_cap_log2 =
            cap_log2.clamp(Self::HASHTABLE_CAP_LOG2_MIN, Self::HASHTABLE_CAP_LOG2_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_arena_chunk_clamped() {
        // nothing else in the test suite changes this knob
        let before = Config::arena_chunk_log2();
        Config::set_arena_chunk_log2(0);
        assert_eq!(Config::arena_chunk_log2(), Config::ARENA_CHUNK_LOG2_MIN);
        Config::set_arena_chunk_log2(before);
        assert_eq!(Config::arena_chunk_log2(), before);
    }
}
