//! Seeded randomness for tier-0 and text values.
//!
//! Integer baselines and generated text are random by default and re-drawn on
//! every invocation. Pass a [`ValueRng`] built from a fixed [`Seed`] to make a
//! draw reproducible.
//!
//! # Example
//!
//! ```
//! use caminar::{Seed, ValueRng};
//!
//! let mut a = ValueRng::new(Seed::from_u64(7));
//! let mut b = ValueRng::new(Seed::from_u64(7));
//! assert_eq!(a.next_u64(), b.next_u64());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// Deterministic seed for reproducible value generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u64);

impl Seed {
    /// Create a seed from a u64 value
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Draw a seed from process entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        hasher.write_u128(nanos);
        Self(hasher.finish())
    }

    /// Get the raw seed value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Xorshift64 PRNG used by fields
#[derive(Debug, Clone)]
pub struct ValueRng {
    state: u64,
}

impl ValueRng {
    /// Create a generator from a seed
    #[must_use]
    pub const fn new(seed: Seed) -> Self {
        // xorshift never leaves zero
        let state = if seed.0 == 0 { 1 } else { seed.0 };
        Self { state }
    }

    /// Create a generator seeded from process entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(Seed::from_entropy())
    }

    /// Next raw value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in the inclusive range `[min, max]`
    ///
    /// Returns `min` when the range is empty.
    pub fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = max.abs_diff(min);
        if span == u64::MAX {
            return self.next_u64() as i64;
        }
        min.wrapping_add((self.next_u64() % (span + 1)) as i64)
    }

    /// Uniform length in `[min, max]`
    pub fn length(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        min + (self.next_u64() % ((max - min) as u64 + 1)) as usize
    }

    /// Random text of exactly `len` characters drawn from `chars`
    ///
    /// Returns an empty string when `chars` is empty.
    pub fn text(&mut self, len: usize, chars: &[char]) -> String {
        if chars.is_empty() {
            return String::new();
        }
        (0..len)
            .map(|_| chars[(self.next_u64() % chars.len() as u64) as usize])
            .collect()
    }
}
