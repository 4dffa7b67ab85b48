//! Layered runtime configuration for the simulation driver.
//!
//! Values are resolved in order from the built-in defaults, an optional TOML
//! file, and `CRUISE_`-prefixed environment variables. Nested keys use a
//! double underscore, e.g. `CRUISE_ROAD__AMPLITUDE_DEGREES=12.5`. Command-line
//! flags are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    FRAME_INTERVAL_MS, INITIAL_SPEED, ROAD_AMPLITUDE_DEGREES, ROAD_STEPS_PER_CYCLE,
    RUN_DURATION_MS, TARGET_SPEED,
};

/// Prefix of environment variables read by [`SimulationConfig::load`].
pub const ENV_PREFIX: &str = "CRUISE_";

/// How completed ticks are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable state dump after every tick.
    #[default]
    Text,
    /// One JSON object per tick.
    Json,
    /// No per-tick output.
    Quiet,
}

/// Shape of the generated road.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    /// Peak grade in degrees.
    pub amplitude_degrees: f64,
    /// Ticks per full hill cycle.
    pub steps_per_cycle: u32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            amplitude_degrees: ROAD_AMPLITUDE_DEGREES,
            steps_per_cycle: ROAD_STEPS_PER_CYCLE,
        }
    }
}

/// Settings for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Milliseconds between ticks.
    pub frame_interval_ms: u64,
    /// Milliseconds after which the run stops.
    pub run_duration_ms: u64,
    /// Speed the car starts at.
    pub initial_speed: f64,
    /// Speed the controller aims for.
    pub target_speed: f64,
    /// Road generator settings.
    pub road: RoadConfig,
    /// Presentation of each tick.
    pub output: OutputFormat,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: FRAME_INTERVAL_MS,
            run_duration_ms: RUN_DURATION_MS,
            initial_speed: INITIAL_SPEED,
            target_speed: TARGET_SPEED,
            road: RoadConfig::default(),
            output: OutputFormat::default(),
        }
    }
}

/// Errors produced while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong type.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    /// A value was well-formed but unusable.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl SimulationConfig {
    /// Loads defaults, then `path` if given, then the environment.
    ///
    /// The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be read or parsed,
    /// and [`ConfigError::Invalid`] when the merged values fail
    /// [`validate`](Self::validate).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = path {
            figment = figment.merge(Toml::file_exact(file));
        }
        Self::from_figment(&figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extracts and validates a configuration from an assembled figment.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a runnable simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if self.frame_interval_ms == 0 {
            return invalid("frame_interval_ms", "must be greater than zero");
        }
        if self.run_duration_ms < self.frame_interval_ms {
            return invalid("run_duration_ms", "must cover at least one frame");
        }
        if !self.initial_speed.is_finite() {
            return invalid("initial_speed", "must be finite");
        }
        if !self.target_speed.is_finite() {
            return invalid("target_speed", "must be finite");
        }
        if !self.road.amplitude_degrees.is_finite() {
            return invalid("road.amplitude_degrees", "must be finite");
        }
        if self.road.steps_per_cycle == 0 {
            return invalid("road.steps_per_cycle", "must be greater than zero");
        }
        Ok(())
    }

    /// Wall-clock time between ticks.
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Number of ticks that fit in the run duration, rounded down.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzy_cruise::config::SimulationConfig;
    ///
    /// assert_eq!(SimulationConfig::default().max_ticks(), 1200);
    /// ```
    #[must_use]
    pub fn max_ticks(&self) -> u64 {
        self.run_duration_ms
            .checked_div(self.frame_interval_ms)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    fn from_toml(toml: &str) -> Result<SimulationConfig, ConfigError> {
        let figment =
            Figment::from(Serialized::defaults(SimulationConfig::default())).merge(Toml::string(toml));
        SimulationConfig::from_figment(&figment)
    }

    #[rstest]
    fn defaults_match_constants() {
        let config = SimulationConfig::default();
        assert_eq!(config.frame_interval(), Duration::from_millis(50));
        assert_eq!(config.initial_speed, 60.0);
        assert_eq!(config.target_speed, 70.0);
        assert_eq!(config.output, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn toml_overrides_nested_values() {
        let config = from_toml(
            r#"
            initial_speed = 80.0
            output = "json"

            [road]
            amplitude_degrees = 5.0
            "#,
        )
        .expect("valid config");
        assert_eq!(config.initial_speed, 80.0);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.road.amplitude_degrees, 5.0);
        assert_eq!(config.road.steps_per_cycle, ROAD_STEPS_PER_CYCLE);
        assert_eq!(config.target_speed, TARGET_SPEED);
    }

    #[rstest]
    #[case("frame_interval_ms = 0", "frame_interval_ms")]
    #[case("run_duration_ms = 10", "run_duration_ms")]
    #[case("[road]\nsteps_per_cycle = 0", "road.steps_per_cycle")]
    fn rejects_unrunnable_values(#[case] toml: &str, #[case] expected_field: &str) {
        match from_toml(toml) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid {expected_field}, got {other:?}"),
        }
    }

    #[rstest]
    fn rejects_non_finite_speed() {
        let config = SimulationConfig {
            target_speed: f64::INFINITY,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "target_speed",
                ..
            })
        ));
    }

    #[rstest]
    fn wrong_type_is_a_load_error() {
        let err = from_toml("initial_speed = \"fast\"").expect_err("type mismatch");
        assert!(matches!(err, ConfigError::Load(_)));
        assert!(err.to_string().starts_with("failed to load configuration"));
    }

    #[rstest]
    fn missing_file_is_a_load_error() {
        let err = SimulationConfig::load(Some(Path::new("/nonexistent/cruise.toml")))
            .expect_err("file is missing");
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[rstest]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "cruise.toml",
                r#"
                initial_speed = 80.0
                target_speed = 75.0

                [road]
                amplitude_degrees = 5.0
                steps_per_cycle = 400
                "#,
            )?;
            jail.set_env("CRUISE_INITIAL_SPEED", "90.5");
            jail.set_env("CRUISE_ROAD__AMPLITUDE_DEGREES", "12.5");

            let config = SimulationConfig::load(Some(Path::new("cruise.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.initial_speed, 90.5);
            assert_eq!(config.road.amplitude_degrees, 12.5);
            assert_eq!(config.target_speed, 75.0);
            assert_eq!(config.road.steps_per_cycle, 400);
            Ok(())
        });
    }

    #[rstest]
    fn environment_alone_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("CRUISE_OUTPUT", "quiet");
            jail.set_env("CRUISE_FRAME_INTERVAL_MS", "100");

            let config = SimulationConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.output, OutputFormat::Quiet);
            assert_eq!(config.frame_interval_ms, 100);
            assert_eq!(config.max_ticks(), 600);
            Ok(())
        });
    }

    #[rstest]
    fn invalid_environment_value_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("CRUISE_ROAD__STEPS_PER_CYCLE", "0");
            match SimulationConfig::load(None) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "road.steps_per_cycle"),
                other => panic!("expected invalid steps, got {other:?}"),
            }
            Ok(())
        });
    }

    #[rstest]
    #[case(60_000, 50, 1200)]
    #[case(1_000, 300, 3)]
    #[case(50, 50, 1)]
    fn max_ticks_rounds_down(#[case] duration: u64, #[case] interval: u64, #[case] expected: u64) {
        let config = SimulationConfig {
            run_duration_ms: duration,
            frame_interval_ms: interval,
            ..SimulationConfig::default()
        };
        assert_eq!(config.max_ticks(), expected);
    }
}
