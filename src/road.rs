//! Road grade signal feeding the cruise controller.
//!
//! The controller only sees the [`RoadProfile`] trait, so tests can drive it
//! with fixed or scripted grades while the simulation uses [`HillyRoad`].

use std::f64::consts::TAU;

use crate::{ROAD_AMPLITUDE_DEGREES, ROAD_STEPS_PER_CYCLE};

/// Source of the road grade angle, in degrees, sampled once per tick.
#[cfg_attr(test, mockall::automock)]
pub trait RoadProfile {
    /// Returns the grade produced by the most recent [`advance`](Self::advance).
    fn current_angle(&self) -> f64;

    /// Moves the road one tick further along.
    fn advance(&mut self);
}

/// A road whose grade follows a sine wave as the car drives along it.
///
/// # Examples
///
/// ```
/// use fuzzy_cruise::road::{HillyRoad, RoadProfile};
///
/// let mut road = HillyRoad::new(20.0, 4);
/// road.advance();
/// assert!(road.current_angle().abs() < 1e-12);
/// road.advance();
/// assert!((road.current_angle() - 20.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HillyRoad {
    amplitude: f64,
    phase_step: f64,
    phase: f64,
    current_angle: f64,
}

impl HillyRoad {
    /// Creates a road peaking at `amplitude` degrees that repeats every
    /// `steps_per_cycle` ticks.
    ///
    /// A zero `steps_per_cycle` is treated as one step per cycle.
    #[must_use]
    pub fn new(amplitude: f64, steps_per_cycle: u32) -> Self {
        Self {
            amplitude,
            phase_step: TAU / f64::from(steps_per_cycle.max(1)),
            phase: 0.0,
            current_angle: 0.0,
        }
    }

    /// Phase, in radians, that the next [`RoadProfile::advance`] samples.
    #[must_use]
    pub const fn phase(&self) -> f64 {
        self.phase
    }
}

impl Default for HillyRoad {
    fn default() -> Self {
        Self::new(ROAD_AMPLITUDE_DEGREES, ROAD_STEPS_PER_CYCLE)
    }
}

impl RoadProfile for HillyRoad {
    fn current_angle(&self) -> f64 {
        self.current_angle
    }

    // Sample before stepping so the first tick sees a level road.
    fn advance(&mut self) {
        self.current_angle = self.phase.sin() * self.amplitude;
        self.phase += self.phase_step;
    }
}
