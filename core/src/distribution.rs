use serde::{Deserialize, Serialize};

/// Tolerance accepted when checking that spawn weights sum to one.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Ordered `(label, weight)` pairs describing a categorical draw.
///
/// Declaration order is significant: sampling walks the entries in order and
/// assigns each label the half-open interval `[cumulative_prev, cumulative)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnDistribution<L> {
    entries: Vec<(L, f64)>,
}

impl<L> SpawnDistribution<L> {
    /// Creates a distribution from ordered entries without validating them.
    #[must_use]
    pub fn new(entries: Vec<(L, f64)>) -> Self {
        Self { entries }
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(L, f64)] {
        &self.entries
    }

    /// Iterator over the labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.entries.iter().map(|(label, _)| label)
    }

    /// Sum of every declared weight.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }

    /// Number of declared labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no labels are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: PartialEq> SpawnDistribution<L> {
    /// Weight declared for the label, if present.
    #[must_use]
    pub fn weight_of(&self, label: &L) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, weight)| *weight)
    }
}

/// Closed `[min, max]` interval sampled uniformly.
///
/// Used for randomized timer intervals and variable enemy speeds. A range with
/// `min == max` behaves as a fixed value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    min: f64,
    max: f64,
}

impl SpawnRange {
    /// Creates a range without validating its bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Creates a degenerate range holding a single value.
    #[must_use]
    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Reports whether both bounds coincide.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// Reports whether the value lies within the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_lookup_follows_declaration() {
        let distribution = SpawnDistribution::new(vec![("a", 0.25), ("b", 0.75)]);
        assert_eq!(distribution.weight_of(&"b"), Some(0.75));
        assert_eq!(distribution.weight_of(&"c"), None);
        assert_eq!(distribution.labels().copied().collect::<Vec<_>>(), ["a", "b"]);
        assert!((distribution.total_weight() - 1.0).abs() < WEIGHT_EPSILON);
    }

    #[test]
    fn fixed_range_contains_only_its_value() {
        let range = SpawnRange::fixed(400.0);
        assert!(range.is_fixed());
        assert!(range.contains(400.0));
        assert!(!range.contains(400.5));
    }
}
