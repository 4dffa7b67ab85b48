//! Vehicle speed state mutated by the cruise controller.

use serde::Serialize;

use crate::{INITIAL_SPEED, TARGET_SPEED};

/// Current and target speed of the simulated car.
///
/// The car has no dynamics of its own: its speed only changes when the
/// controller applies a correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vehicle {
    current_speed: f64,
    target_speed: f64,
}

impl Vehicle {
    /// Creates a vehicle travelling at `current_speed` that aims for
    /// `target_speed`.
    #[must_use]
    pub const fn new(current_speed: f64, target_speed: f64) -> Self {
        Self {
            current_speed,
            target_speed,
        }
    }

    /// Speed the car is travelling at.
    #[must_use]
    pub const fn current_speed(&self) -> f64 {
        self.current_speed
    }

    /// Speed the cruise control holds. Fixed at construction.
    #[must_use]
    pub const fn target_speed(&self) -> f64 {
        self.target_speed
    }

    /// Signed difference between current and target speed.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzy_cruise::Vehicle;
    ///
    /// assert_eq!(Vehicle::new(80.0, 70.0).relative_speed(), 10.0);
    /// assert_eq!(Vehicle::new(60.0, 70.0).relative_speed(), -10.0);
    /// ```
    #[must_use]
    pub const fn relative_speed(&self) -> f64 {
        self.current_speed - self.target_speed
    }

    /// Adds `delta` to the current speed. No clamping is applied.
    pub const fn apply_delta(&mut self, delta: f64) {
        self.current_speed += delta;
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new(INITIAL_SPEED, TARGET_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn default_starts_below_target() {
        let vehicle = Vehicle::default();
        assert_eq!(vehicle.current_speed(), 60.0);
        assert_eq!(vehicle.target_speed(), 70.0);
        assert_eq!(vehicle.relative_speed(), -10.0);
    }

    #[rstest]
    #[case(-0.82, 79.18)]
    #[case(0.0, 80.0)]
    #[case(150.0, 230.0)]
    fn apply_delta_is_unclamped(#[case] delta: f64, #[case] expected: f64) {
        let mut vehicle = Vehicle::new(80.0, 70.0);
        vehicle.apply_delta(delta);
        assert_relative_eq!(vehicle.current_speed(), expected);
        assert_eq!(vehicle.target_speed(), 70.0);
    }

    #[rstest]
    fn speed_arithmetic_is_const() {
        const CORRECTED: Vehicle = {
            let mut vehicle = Vehicle::new(80.0, 70.0);
            vehicle.apply_delta(-0.5);
            vehicle
        };
        const GAP: f64 = CORRECTED.relative_speed();
        assert_relative_eq!(GAP, 9.5);
    }
}
