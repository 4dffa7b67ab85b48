//! Design-time constants shared by the controller, the road model and the
//! simulation driver.
//!
//! The fuzzy sets are fixed when the crate is built; nothing here is loaded at
//! runtime. Driver and vehicle defaults can be overridden through
//! [`crate::config::SimulationConfig`].

/// Road grade, in degrees, below which a road is fully downhill.
pub const ROAD_ANGLE_LOWER_BOUND: f64 = -15.0;
/// Road grade, in degrees, above which a road is fully uphill.
pub const ROAD_ANGLE_UPPER_BOUND: f64 = 15.0;

/// Speed deficit below which the car is fully under its target.
pub const RELATIVE_SPEED_LOWER_BOUND: f64 = -5.0;
/// Speed excess above which the car is fully over its target.
pub const RELATIVE_SPEED_UPPER_BOUND: f64 = 5.0;

/// Speed the car starts the simulation with.
pub const INITIAL_SPEED: f64 = 60.0;
/// Speed the cruise control tries to hold.
pub const TARGET_SPEED: f64 = 70.0;

/// Peak grade of the generated hilly road, in degrees.
pub const ROAD_AMPLITUDE_DEGREES: f64 = 20.0;
/// Number of ticks the hilly road takes to complete one full sine cycle.
pub const ROAD_STEPS_PER_CYCLE: u32 = 1000;

/// Wall-clock time between two simulation ticks.
pub const FRAME_INTERVAL_MS: u64 = 50;
/// Wall-clock time after which the periodic driver stops.
pub const RUN_DURATION_MS: u64 = 60_000;
