//! Input linguistic variables and their membership functions.

use std::fmt;
use std::marker::PhantomData;

use super::labels::{FuzzyLabel, LabelMap};
use crate::{
    RELATIVE_SPEED_LOWER_BOUND, RELATIVE_SPEED_UPPER_BOUND, ROAD_ANGLE_LOWER_BOUND,
    ROAD_ANGLE_UPPER_BOUND,
};

/// Fuzzy sets partitioning the road grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoadAngle {
    /// Road falls away ahead of the car.
    Downhill,
    /// Road is level.
    Flat,
    /// Road climbs ahead of the car.
    Uphill,
}

/// Fuzzy sets partitioning the difference between current and target speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelativeSpeed {
    /// Car is slower than its target.
    Under,
    /// Car is at its target.
    Matched,
    /// Car is faster than its target.
    Over,
}

/// Piecewise-linear shape of an input set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetShape {
    /// Full membership below the lower bound, ramping down to zero at `0`.
    LowerShoulder,
    /// Triangle peaking at `0` and reaching zero at either bound.
    Centre,
    /// Full membership above the upper bound, ramping down to zero at `0`.
    UpperShoulder,
}

/// An input label whose set has a [`SetShape`].
pub trait InputSet: FuzzyLabel {
    /// Shape of the set named by this label.
    fn shape(self) -> SetShape;
}

impl FuzzyLabel for RoadAngle {
    const ALL: &'static [Self] = &[Self::Downhill, Self::Flat, Self::Uphill];

    fn name(self) -> &'static str {
        match self {
            Self::Downhill => "downhill",
            Self::Flat => "flat",
            Self::Uphill => "uphill",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl InputSet for RoadAngle {
    fn shape(self) -> SetShape {
        match self {
            Self::Downhill => SetShape::LowerShoulder,
            Self::Flat => SetShape::Centre,
            Self::Uphill => SetShape::UpperShoulder,
        }
    }
}

impl FuzzyLabel for RelativeSpeed {
    const ALL: &'static [Self] = &[Self::Under, Self::Matched, Self::Over];

    fn name(self) -> &'static str {
        match self {
            Self::Under => "under",
            Self::Matched => "matched",
            Self::Over => "over",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl InputSet for RelativeSpeed {
    fn shape(self) -> SetShape {
        match self {
            Self::Under => SetShape::LowerShoulder,
            Self::Matched => SetShape::Centre,
            Self::Over => SetShape::UpperShoulder,
        }
    }
}

impl fmt::Display for RoadAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for RelativeSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Crisp domain bounds of an input variable.
///
/// `lower` is expected to be negative and `upper` positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    /// Value below which the lower shoulder is saturated.
    pub lower: f64,
    /// Value above which the upper shoulder is saturated.
    pub upper: f64,
}

impl InputBounds {
    /// Creates bounds spanning `lower..upper`.
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Degree of membership of `value` in a set of the given `shape`.
    ///
    /// Branches are tested in order and the first match wins, so the bounds
    /// themselves are not treated symmetrically: at `value == lower` the lower
    /// shoulder takes its ramp branch and reaches `1.0`, while the centre set
    /// uses strict inequalities and reports `0.0`. NaN falls through every
    /// branch and yields `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzy_cruise::fuzzy::{InputBounds, SetShape};
    ///
    /// let bounds = InputBounds::new(-15.0, 15.0);
    /// assert_eq!(bounds.membership(SetShape::Centre, 0.0), 1.0);
    /// assert_eq!(bounds.membership(SetShape::LowerShoulder, -7.5), 0.5);
    /// assert_eq!(bounds.membership(SetShape::UpperShoulder, 40.0), 1.0);
    /// ```
    #[must_use]
    pub fn membership(&self, shape: SetShape, value: f64) -> f64 {
        let Self { lower, upper } = *self;
        let degree = match shape {
            SetShape::LowerShoulder => {
                if value < lower {
                    1.0
                } else if value < 0.0 {
                    value / lower
                } else {
                    0.0
                }
            }
            SetShape::Centre => {
                if value > lower && value < upper {
                    (upper - value.abs()) / upper
                } else {
                    0.0
                }
            }
            SetShape::UpperShoulder => {
                if value > upper {
                    1.0
                } else if value > 0.0 {
                    value / upper
                } else {
                    0.0
                }
            }
        };
        degree.clamp(0.0, 1.0)
    }
}

/// A named input dimension partitioned into the sets labelled by `S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinguisticVariable<S> {
    name: &'static str,
    bounds: InputBounds,
    marker: PhantomData<S>,
}

impl<S: InputSet> LinguisticVariable<S> {
    /// Creates a variable called `name` over `bounds`.
    #[must_use]
    pub const fn new(name: &'static str, bounds: InputBounds) -> Self {
        Self {
            name,
            bounds,
            marker: PhantomData,
        }
    }

    /// Name of the variable.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Domain bounds of the variable.
    #[must_use]
    pub const fn bounds(&self) -> InputBounds {
        self.bounds
    }

    /// Degree of membership of `crisp` in the set labelled `label`.
    #[must_use]
    pub fn membership(&self, label: S, crisp: f64) -> f64 {
        self.bounds.membership(label.shape(), crisp)
    }

    /// Writes the membership of `crisp` in every set into `degrees`.
    ///
    /// Every slot is overwritten; nothing from a previous call survives.
    pub fn fuzzify<const N: usize>(&self, crisp: f64, degrees: &mut LabelMap<S, N>) {
        for &label in S::ALL {
            degrees.set(label, self.membership(label, crisp));
        }
    }
}

impl LinguisticVariable<RoadAngle> {
    /// The road grade variable, in degrees.
    #[must_use]
    pub const fn road_angle() -> Self {
        Self::new(
            "road angle",
            InputBounds::new(ROAD_ANGLE_LOWER_BOUND, ROAD_ANGLE_UPPER_BOUND),
        )
    }
}

impl LinguisticVariable<RelativeSpeed> {
    /// The relative speed variable, in speed units.
    #[must_use]
    pub const fn relative_speed() -> Self {
        Self::new(
            "relative speed",
            InputBounds::new(RELATIVE_SPEED_LOWER_BOUND, RELATIVE_SPEED_UPPER_BOUND),
        )
    }
}
