#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weighted categorical and ranged sampling for spawn selection.
//!
//! Distributions are validated eagerly when a ruleset is resolved; sampling
//! afterwards never fails for a validated distribution. The random source is
//! always supplied by the caller so replays with a seeded generator reproduce
//! the exact same sequence of draws.

use std::{fmt::Display, time::Duration};

use gravewatch_core::{SpawnDistribution, SpawnRange, ValidationError, WEIGHT_EPSILON};
use rand::Rng;

/// Validates and samples spawn distributions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedSelector {
    epsilon: f64,
}

impl Default for WeightedSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedSelector {
    /// Creates a selector using the shared weight tolerance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            epsilon: WEIGHT_EPSILON,
        }
    }

    /// Creates a selector with a custom weight-sum tolerance.
    #[must_use]
    pub const fn with_epsilon(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Tolerance applied to the weight sum.
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Checks that labels are unique and weights are finite, non-negative and
    /// sum to one.
    pub fn validate<L: Display + PartialEq>(
        &self,
        distribution: &SpawnDistribution<L>,
    ) -> Result<(), ValidationError> {
        if distribution.is_empty() {
            return Err(ValidationError::Empty);
        }

        let entries = distribution.entries();
        for (index, (label, weight)) in entries.iter().enumerate() {
            if entries[..index].iter().any(|(earlier, _)| earlier == label) {
                return Err(ValidationError::DuplicateLabel {
                    label: label.to_string(),
                });
            }
            if !weight.is_finite() {
                return Err(ValidationError::NonFinite {
                    label: label.to_string(),
                });
            }
            if *weight < 0.0 {
                return Err(ValidationError::NegativeWeight {
                    label: label.to_string(),
                    weight: *weight,
                });
            }
        }

        let sum = distribution.total_weight();
        if (sum - 1.0).abs() > self.epsilon {
            return Err(ValidationError::WeightSum {
                sum,
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }

    /// Checks that both bounds are finite and ordered.
    pub fn validate_range(&self, range: &SpawnRange) -> Result<(), ValidationError> {
        if !range.min().is_finite() {
            return Err(ValidationError::NonFinite {
                label: "min".to_owned(),
            });
        }
        if !range.max().is_finite() {
            return Err(ValidationError::NonFinite {
                label: "max".to_owned(),
            });
        }
        if range.min() > range.max() {
            return Err(ValidationError::InvertedRange {
                min: range.min(),
                max: range.max(),
            });
        }
        Ok(())
    }

    /// Maps a draw in `[0, 1)` onto the label whose cumulative interval
    /// `[previous, cumulative)` contains it.
    ///
    /// A draw landing exactly on a boundary belongs to the later label.
    /// Zero-weight labels own an empty interval and are never returned. Draws
    /// beyond the accumulated total, which rounding can produce, resolve to the
    /// last label with positive weight.
    #[must_use]
    pub fn pick_at<'d, L>(
        &self,
        distribution: &'d SpawnDistribution<L>,
        draw: f64,
    ) -> Option<&'d L> {
        let mut cumulative = 0.0;
        let mut last_positive = None;
        for (label, weight) in distribution.entries() {
            if *weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            last_positive = Some(label);
            if draw < cumulative {
                return Some(label);
            }
        }
        last_positive
    }

    /// Draws one label from a validated distribution.
    ///
    /// Returns `None` only when no label carries positive weight, which a
    /// validated distribution rules out.
    pub fn sample<'d, L, R>(
        &self,
        distribution: &'d SpawnDistribution<L>,
        rng: &mut R,
    ) -> Option<&'d L>
    where
        R: Rng + ?Sized,
    {
        let draw: f64 = rng.gen();
        self.pick_at(distribution, draw)
    }

    /// Draws uniformly over the closed interval `[min, max]`.
    pub fn sample_range<R>(&self, range: &SpawnRange, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        if range.min() < range.max() {
            rng.gen_range(range.min()..=range.max())
        } else {
            range.min()
        }
    }

    /// Draws a millisecond range and rounds it to a whole-millisecond duration.
    pub fn sample_duration<R>(&self, range: &SpawnRange, rng: &mut R) -> Duration
    where
        R: Rng + ?Sized,
    {
        let millis = self.sample_range(range, rng).round().max(0.0);
        Duration::from_millis(millis as u64)
    }
}
