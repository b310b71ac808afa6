//! Scripted randomness for deterministic tests.
//!
//! `ScriptedRng` replays a fixed list of values. Each draw consumes one value:
//!
//! - `roll(low, high)` returns the value clamped into `[low, high]`
//! - `chance(_)` returns `true` for any non-zero value
//! - `pick(len)` returns the value modulo `len`
//!
//! Once the script runs out, draws fall back to the lowest legal result
//! (`low`, `false`, `0`).

use std::collections::VecDeque;

use crate::core::ActionRng;

/// An `ActionRng` that replays predetermined values.
///
/// ```
/// use mob_engine::core::ActionRng;
/// use mob_engine::testing::ScriptedRng;
///
/// let mut rng = ScriptedRng::new([5, 1, 99]);
/// assert_eq!(rng.roll(5, 15), 5);
/// assert!(rng.chance(0.5));
/// assert_eq!(rng.roll(10, 30), 30);
/// assert!(rng.is_exhausted());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<i64>,
}

impl ScriptedRng {
    /// Create a scripted source from a sequence of values.
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Append values to the end of the script.
    pub fn extend(&mut self, values: impl IntoIterator<Item = i64>) {
        self.values.extend(values);
    }

    /// Number of values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// True once every value has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.values.is_empty()
    }
}

impl ActionRng for ScriptedRng {
    fn roll(&mut self, low: i64, high: i64) -> i64 {
        match self.values.pop_front() {
            Some(value) if low <= high => value.clamp(low, high),
            _ => low,
        }
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.values.pop_front().is_some_and(|value| value != 0)
    }

    fn pick(&mut self, len: usize) -> usize {
        match self.values.pop_front() {
            Some(value) if len > 0 => value.rem_euclid(len as i64) as usize,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut rng = ScriptedRng::new([6, 0, 2]);
        assert_eq!(rng.roll(5, 15), 6);
        assert!(!rng.chance(0.5));
        assert_eq!(rng.pick(3), 2);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_clamps_and_wraps() {
        let mut rng = ScriptedRng::new([100, -3, 7]);
        assert_eq!(rng.roll(5, 15), 15);
        assert_eq!(rng.roll(5, 15), 5);
        assert_eq!(rng.pick(4), 3);
    }

    #[test]
    fn test_exhausted_fallbacks() {
        let mut rng = ScriptedRng::default();
        assert_eq!(rng.roll(10, 100), 10);
        assert!(!rng.chance(1.0));
        assert_eq!(rng.pick(5), 0);
    }

    #[test]
    fn test_extend() {
        let mut rng = ScriptedRng::new([1]);
        rng.extend([2, 3]);
        assert_eq!(rng.remaining(), 3);
    }
}
