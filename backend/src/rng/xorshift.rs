//! xorshift64* random number generator
//!
//! Small, fast and fully determined by its seed, which is what reproducible
//! benchmark inputs need. Same seed → same obligation lists.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use debt_settlement_core::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let party = rng.range(0, 8); // [0, 8)
/// assert!((0..8).contains(&party));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed would lock xorshift at zero forever, so it is mapped to 1.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Advance the state and return the next 64-bit value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Random value in `[min, max)`
    ///
    /// # Panics
    /// Panics if `min >= max`
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let span = max.abs_diff(min);
        min.wrapping_add((self.next() % span) as i64)
    }

    /// Random index in `[0, len)`
    ///
    /// # Panics
    /// Panics if `len == 0`
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "len must be positive");
        (self.next() % len as u64) as usize
    }

    /// Current state, usable as a seed to resume the same sequence
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
