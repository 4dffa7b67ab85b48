//! Bevy plugin driving the cruise controller at a fixed rate.
//!
//! `CruisePlugin` owns the simulation state as a resource and advances it
//! once per app update. When the configured run length is reached it requests
//! [`AppExit::Success`], which stops the schedule runner.

use bevy::prelude::*;
use log::info;
use thiserror::Error;

use crate::config::{ConfigError, SimulationConfig};
use crate::controller::CruiseControl;
use crate::fuzzy::{InferenceEngine, RuleBase, RuleBaseError, CRUISE_RULES};
use crate::road::HillyRoad;
use crate::vehicle::Vehicle;

/// Failure to assemble a runnable simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The settings were unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The rule table failed its construction checks.
    #[error("invalid rule base: {0}")]
    Rules(#[from] RuleBaseError),
}

/// The cruise control loop running inside the app.
#[derive(Resource, Debug, Clone)]
pub struct CruiseState {
    control: CruiseControl<HillyRoad>,
}

impl CruiseState {
    /// Builds the road, car and engine described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Rules`] if the rule table does not validate.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let rules = RuleBase::try_new(CRUISE_RULES)?;
        let road = HillyRoad::new(config.road.amplitude_degrees, config.road.steps_per_cycle);
        let vehicle = Vehicle::new(config.initial_speed, config.target_speed);
        Ok(Self {
            control: CruiseControl::new(road, vehicle, InferenceEngine::new(rules)),
        })
    }

    /// Read-only view of the control loop.
    #[must_use]
    pub const fn control(&self) -> &CruiseControl<HillyRoad> {
        &self.control
    }

    /// Advances the control loop by one tick.
    pub fn tick(&mut self) {
        self.control.tick();
    }
}

/// Number of ticks after which the simulation stops.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimit {
    max_ticks: u64,
}

impl RunLimit {
    /// Stops after `max_ticks` ticks.
    #[must_use]
    pub const fn new(max_ticks: u64) -> Self {
        Self { max_ticks }
    }

    /// Tick budget of the run.
    #[must_use]
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Whether `ticks` completed ticks exhaust the budget.
    #[must_use]
    pub const fn is_reached(&self, ticks: u64) -> bool {
        ticks >= self.max_ticks
    }
}

/// Advances the controller once per update until the run limit is reached.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn cruise_tick_system(mut state: ResMut<CruiseState>, limit: Res<RunLimit>) {
    if limit.is_reached(state.control().ticks()) {
        return;
    }
    state.tick();
}

/// Requests app exit once the run limit is reached.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn run_limit_system(
    state: Res<CruiseState>,
    limit: Res<RunLimit>,
    mut exit: MessageWriter<AppExit>,
) {
    let ticks = state.control().ticks();
    if limit.is_reached(ticks) {
        info!(
            "run finished after {ticks} ticks at {:.1} (target {:.1})",
            state.control().vehicle().current_speed(),
            state.control().vehicle().target_speed()
        );
        exit.write(AppExit::Success);
    }
}

/// Bevy plugin installing the cruise controller and its stop condition.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use fuzzy_cruise::config::SimulationConfig;
/// use fuzzy_cruise::simulation::{CruisePlugin, CruiseState};
///
/// let plugin = CruisePlugin::new(SimulationConfig::default()).unwrap();
/// let mut app = App::new();
/// app.add_plugins(MinimalPlugins).add_plugins(plugin);
/// app.update();
/// assert_eq!(app.world().resource::<CruiseState>().control().ticks(), 1);
/// ```
#[derive(Debug)]
pub struct CruisePlugin {
    state: CruiseState,
    limit: RunLimit,
}

impl CruisePlugin {
    /// Validates `config` and builds the initial simulation state.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] when the settings or the rule table are
    /// invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let state = CruiseState::from_config(&config)?;
        Ok(Self {
            state,
            limit: RunLimit::new(config.max_ticks()),
        })
    }
}

impl Plugin for CruisePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.state.clone());
        app.insert_resource(self.limit);
        app.add_systems(Update, (cruise_tick_system, run_limit_system).chain());
    }
}
