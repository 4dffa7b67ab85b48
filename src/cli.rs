//! Command-line interface of the `fuzzy_cruise` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ConfigError, OutputFormat, SimulationConfig};

/// Output format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable state dump.
    Text,
    /// One JSON object per tick.
    Json,
    /// No per-tick output.
    Quiet,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
            FormatArg::Quiet => Self::Quiet,
        }
    }
}

/// Simulate a fuzzy-logic cruise control on a hilly road
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML file with simulation settings
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Milliseconds between simulation ticks
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Milliseconds after which the simulation stops
    #[arg(long, value_name = "MS")]
    pub duration_ms: Option<u64>,

    /// Speed the car starts at
    #[arg(long, value_name = "SPEED", allow_negative_numbers = true)]
    pub initial_speed: Option<f64>,

    /// Speed the cruise control aims for
    #[arg(long, value_name = "SPEED", allow_negative_numbers = true)]
    pub target_speed: Option<f64>,

    /// How each tick is printed
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

impl Args {
    /// Loads the layered configuration and applies the flags given here.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when loading fails or the overridden values
    /// do not validate.
    pub fn resolve_config(&self) -> Result<SimulationConfig, ConfigError> {
        let mut config = SimulationConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overwrites the fields of `config` that were given on the command line.
    pub fn apply_overrides(&self, config: &mut SimulationConfig) {
        if let Some(interval) = self.interval_ms {
            config.frame_interval_ms = interval;
        }
        if let Some(duration) = self.duration_ms {
            config.run_duration_ms = duration;
        }
        if let Some(speed) = self.initial_speed {
            config.initial_speed = speed;
        }
        if let Some(speed) = self.target_speed {
            config.target_speed = speed;
        }
        if let Some(format) = self.format {
            config.output = format.into();
        }
    }
}
