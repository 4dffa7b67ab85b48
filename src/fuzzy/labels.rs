//! Label enumerations and the fixed-size maps keyed by them.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Serialize, Serializer};

use super::{CarAction, RelativeSpeed, RoadAngle};

/// A discrete fuzzy-set label with a stable, declared iteration order.
pub trait FuzzyLabel: Copy + Eq + fmt::Debug + 'static {
    /// Every label of the variable, in declared order.
    const ALL: &'static [Self];

    /// Human-readable set name used by the presentation layer.
    fn name(self) -> &'static str;

    /// Position of the label within [`Self::ALL`].
    fn index(self) -> usize;
}

/// Per-label values for one linguistic variable.
///
/// Backed by a fixed array so reading, writing and iterating never allocate.
/// Iteration follows the label's declared order.
#[derive(Clone, Copy, PartialEq)]
pub struct LabelMap<S, const N: usize> {
    values: [f64; N],
    marker: PhantomData<S>,
}

/// Membership degree of each road angle set.
pub type RoadAngleDegrees = LabelMap<RoadAngle, 3>;
/// Membership degree of each relative speed set.
pub type RelativeSpeedDegrees = LabelMap<RelativeSpeed, 3>;
/// Aggregated crisp speed delta of each car action.
pub type ActionOutputs = LabelMap<CarAction, 5>;

impl<S: FuzzyLabel, const N: usize> LabelMap<S, N> {
    /// Creates a map holding `0.0` for every label.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            values: [0.0; N],
            marker: PhantomData,
        }
    }

    /// Value stored for `label`.
    #[must_use]
    pub fn get(&self, label: S) -> f64 {
        self.values.get(label.index()).copied().unwrap_or_default()
    }

    /// Replaces the value stored for `label`.
    pub fn set(&mut self, label: S, value: f64) {
        if let Some(slot) = self.values.get_mut(label.index()) {
            *slot = value;
        }
    }

    /// Adds `value` to the running total stored for `label`.
    pub fn accumulate(&mut self, label: S, value: f64) {
        if let Some(slot) = self.values.get_mut(label.index()) {
            *slot += value;
        }
    }

    /// Sets every label back to `0.0`.
    pub fn reset(&mut self) {
        self.values = [0.0; N];
    }

    /// Iterates `(label, value)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (S, f64)> + '_ {
        S::ALL.iter().map(move |&label| (label, self.get(label)))
    }

    /// Sum of all values, added in declared order.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, value)| value).sum()
    }

    /// Flat mapping from set name to value.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzy_cruise::fuzzy::{RoadAngle, RoadAngleDegrees};
    ///
    /// let mut degrees = RoadAngleDegrees::zeroed();
    /// degrees.set(RoadAngle::Flat, 1.0);
    /// let named = degrees.to_named_map();
    /// assert_eq!(named.get("flat"), Some(&1.0));
    /// assert_eq!(named.get("uphill"), Some(&0.0));
    /// ```
    #[must_use]
    pub fn to_named_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().map(|(label, value)| (label.name(), value)).collect()
    }
}

impl<S: FuzzyLabel, const N: usize> Default for LabelMap<S, N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<S: FuzzyLabel, const N: usize> fmt::Debug for LabelMap<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<S: FuzzyLabel, const N: usize> Serialize for LabelMap<S, N> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter().map(|(label, value)| (label.name(), value)))
    }
}
