//! Shared test fixtures and helpers for simulation integration tests.

use anyhow::{ensure, Context, Result};
use bevy::prelude::*;
use fuzzy_cruise::presentation::FrameSink;
use fuzzy_cruise::{CruisePlugin, CruiseState, OutputFormat, PresentationPlugin, SimulationConfig};
use test_utils::SharedBuffer;

/// Builder for test `App` instances running the cruise simulation headless.
pub struct CruiseTestAppBuilder {
    app: App,
}

impl CruiseTestAppBuilder {
    /// Create a new test app with `MinimalPlugins` and `CruisePlugin` installed.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(CruisePlugin::new(config).context("config should be valid")?);
        Ok(Self { app })
    }

    /// Install `PresentationPlugin` rendering into an in-memory buffer.
    #[must_use]
    pub fn with_captured_frames(mut self, format: OutputFormat) -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        self.app
            .insert_resource(FrameSink::new(format, buffer.clone()))
            .add_plugins(PresentationPlugin::new(format));
        (self, buffer)
    }

    /// Build and return the configured `App`.
    #[must_use]
    pub fn build(self) -> App {
        self.app
    }
}

/// Assertion helpers for common simulation state checks.
pub struct CruiseAssertions;

impl CruiseAssertions {
    /// Fetch the `CruiseState` resource.
    pub fn get_state(app: &App) -> Result<&CruiseState> {
        app.world()
            .get_resource::<CruiseState>()
            .context("CruiseState resource missing")
    }

    /// Assert the number of completed ticks equals `expected`.
    pub fn assert_ticks(app: &App, expected: u64) -> Result<()> {
        let ticks = Self::get_state(app)?.control().ticks();
        ensure!(ticks == expected, "Expected {expected} ticks, got {ticks}");
        Ok(())
    }
}
