//! Per-tick orchestration of road, vehicle and inference engine.

use log::debug;

use crate::fuzzy::InferenceEngine;
use crate::road::RoadProfile;
use crate::vehicle::Vehicle;

/// Cruise control loop owning its inputs and the car it steers.
///
/// Each [`tick`](Self::tick) advances the road, runs the inference engine on
/// the new grade and the car's relative speed, and adds the resulting delta
/// to the car's speed.
///
/// # Examples
///
/// ```
/// use fuzzy_cruise::road::HillyRoad;
/// use fuzzy_cruise::{CruiseControl, InferenceEngine, Vehicle};
///
/// let mut control = CruiseControl::new(
///     HillyRoad::default(),
///     Vehicle::new(70.0, 70.0),
///     InferenceEngine::default(),
/// );
/// control.tick();
/// assert_eq!(control.vehicle().current_speed(), 70.0);
/// assert_eq!(control.ticks(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CruiseControl<R> {
    road: R,
    vehicle: Vehicle,
    engine: InferenceEngine,
    ticks: u64,
}

impl<R: RoadProfile> CruiseControl<R> {
    /// Assembles a control loop from its parts.
    #[must_use]
    pub const fn new(road: R, vehicle: Vehicle, engine: InferenceEngine) -> Self {
        Self {
            road,
            vehicle,
            engine,
            ticks: 0,
        }
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) {
        self.road.advance();
        let angle = self.road.current_angle();
        let relative_speed = self.vehicle.relative_speed();
        let delta = self.engine.infer(angle, relative_speed);
        self.vehicle.apply_delta(delta);
        self.ticks += 1;
        debug!(
            "tick {}: angle {angle:.2}, relative speed {relative_speed:.2}, delta {delta:+.4}, speed {:.2}",
            self.ticks,
            self.vehicle.current_speed()
        );
    }

    /// Road feeding the controller.
    #[must_use]
    pub const fn road(&self) -> &R {
        &self.road
    }

    /// Car being steered.
    #[must_use]
    pub const fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Inference engine with the working maps of the last tick.
    #[must_use]
    pub const fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}
