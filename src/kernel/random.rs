//! Single injectable randomness source.
//!
//! Template alternative choice and dice rolls both draw from here, so tests can
//! make a whole turn deterministic without touching the algorithms.

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

pub trait RandomSource: Send + Sync {
    /// Uniform integer in `min..=max`.
    fn gen_range(&self, min: u32, max: u32) -> u32;

    /// Uniform index into a list of `len` elements. `len` must be non-zero.
    fn pick_index(&self, len: usize) -> usize {
        let last = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
        self.gen_range(0, last) as usize
    }
}

/// Process RNG (`rand::thread_rng`).
#[derive(Debug, Clone, Default)]
pub struct ThreadRandom;

impl ThreadRandom {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRandom {
    fn gen_range(&self, min: u32, max: u32) -> u32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Replays a fixed script of values, cycling when exhausted.
///
/// Each scripted value is clamped into the requested range, so a script of
/// dice faces can also drive `pick_index` (e.g. `0` always picks the first
/// alternative).
#[derive(Debug)]
pub struct ScriptedRandom {
    script: Vec<u32>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(script: Vec<u32>) -> Self {
        Self {
            script,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Always returns `value` (clamped).
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl RandomSource for ScriptedRandom {
    fn gen_range(&self, min: u32, max: u32) -> u32 {
        let n = self.cursor.fetch_add(1, Ordering::Relaxed);
        let raw = match self.script.len() {
            0 => min,
            len => self.script[n % len],
        };
        raw.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_bounds() {
        let rng = ThreadRandom::new();
        for _ in 0..200 {
            let v = rng.gen_range(1, 6);
            assert!((1..=6).contains(&v), "Value {} out of range", v);
        }
        for _ in 0..200 {
            assert!(rng.pick_index(3) < 3);
        }
        assert_eq!(rng.pick_index(1), 0);
    }

    #[test]
    fn scripted_random_replays_and_cycles() {
        let rng = ScriptedRandom::new(vec![2, 5]);
        assert_eq!(rng.gen_range(1, 6), 2);
        assert_eq!(rng.gen_range(1, 6), 5);
        assert_eq!(rng.gen_range(1, 6), 2);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn scripted_random_clamps_into_range() {
        let rng = ScriptedRandom::constant(9);
        assert_eq!(rng.gen_range(1, 6), 6);
        assert_eq!(rng.pick_index(2), 1);

        let empty = ScriptedRandom::new(Vec::new());
        assert_eq!(empty.gen_range(3, 4), 3);
    }
}
