//! Presentation layer rendering each completed tick.
//!
//! Rendering runs in `PostUpdate`, after the controller has ticked, and only
//! reads [`CruiseState`]. Output goes to a [`FrameSink`]: standard output in
//! the binary, an in-memory buffer in tests.

use std::fmt;
use std::io::{self, Write};

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;
use serde::Serialize;
use thiserror::Error;

use crate::config::OutputFormat;
use crate::controller::CruiseControl;
use crate::fuzzy::{FuzzyLabel, InferenceSnapshot, LabelMap};
use crate::road::RoadProfile;
use crate::simulation::CruiseState;

/// Serialisable state of the simulation after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// Completed ticks.
    pub tick: u64,
    /// Road grade in degrees.
    pub road_angle: f64,
    /// Car speed after the correction was applied.
    pub current_speed: f64,
    /// Speed the controller aims for.
    pub target_speed: f64,
    /// Working maps of the inference engine.
    pub inference: InferenceSnapshot,
}

impl FrameSnapshot {
    /// Captures the current state of `control`.
    #[must_use]
    pub fn capture<R: RoadProfile>(control: &CruiseControl<R>) -> Self {
        Self {
            tick: control.ticks(),
            road_angle: control.road().current_angle(),
            current_speed: control.vehicle().current_speed(),
            target_speed: control.vehicle().target_speed(),
            inference: control.engine().snapshot(),
        }
    }
}

/// Plain-text view of a control loop, one value per line.
///
/// # Examples
///
/// ```
/// use fuzzy_cruise::presentation::TextFrame;
/// use fuzzy_cruise::road::HillyRoad;
/// use fuzzy_cruise::{CruiseControl, InferenceEngine, Vehicle};
///
/// let control = CruiseControl::new(
///     HillyRoad::default(),
///     Vehicle::default(),
///     InferenceEngine::default(),
/// );
/// let text = TextFrame(&control).to_string();
/// assert!(text.contains("current speed: 60.0"));
/// ```
#[derive(Debug)]
pub struct TextFrame<'a, R>(pub &'a CruiseControl<R>);

fn write_sets<S: FuzzyLabel, const N: usize>(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    values: &LabelMap<S, N>,
) -> fmt::Result {
    writeln!(f, "{heading}:")?;
    for (label, value) in values.iter() {
        writeln!(f, "  - {}: {:.1}", label.name(), value)?;
    }
    Ok(())
}

impl<R: RoadProfile> fmt::Display for TextFrame<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let control = self.0;
        let vehicle = control.vehicle();
        let engine = control.engine();

        writeln!(f, "ROAD")?;
        writeln!(f, "road angle: {:.1}", control.road().current_angle())?;
        writeln!(f, "CAR")?;
        writeln!(f, "current speed: {:.1}", vehicle.current_speed())?;
        writeln!(f, "target speed: {:.1}", vehicle.target_speed())?;
        writeln!(f, "FUZZY CONTROLLER")?;
        write_sets(f, "road angle set membership", engine.road_angle_memberships())?;
        write_sets(f, "relative speed set membership", engine.relative_speed_memberships())?;
        write_sets(f, "car action output", engine.action_outputs())
    }
}

/// Failure to write a rendered frame.
#[derive(Event, Debug, Clone, Error)]
#[error("failed to render tick {tick}: {detail}")]
pub struct FrameRenderError {
    /// Tick whose frame was lost.
    pub tick: u64,
    /// Description of the underlying error.
    pub detail: String,
}

/// Destination and format for rendered frames.
#[derive(Resource)]
pub struct FrameSink {
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    last_tick: Option<u64>,
}

impl fmt::Debug for FrameSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSink")
            .field("format", &self.format)
            .field("last_tick", &self.last_tick)
            .finish_non_exhaustive()
    }
}

impl FrameSink {
    /// Renders frames in `format` into `writer`.
    pub fn new(format: OutputFormat, writer: impl Write + Send + Sync + 'static) -> Self {
        Self {
            format,
            writer: Box::new(writer),
            last_tick: None,
        }
    }

    /// Renders frames in `format` to standard output.
    #[must_use]
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(format, io::stdout())
    }

    /// Format frames are rendered in.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes the state of `control` unless that tick was already rendered.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when serialisation or the write fails.
    pub fn render<R: RoadProfile>(&mut self, control: &CruiseControl<R>) -> io::Result<()> {
        let tick = control.ticks();
        if tick == 0 || self.last_tick == Some(tick) {
            return Ok(());
        }
        self.last_tick = Some(tick);
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "{}", TextFrame(control))?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, &FrameSnapshot::capture(control))?;
                writeln!(self.writer)?;
            }
            OutputFormat::Quiet => return Ok(()),
        }
        self.writer.flush()
    }
}

/// Renders the latest tick into the [`FrameSink`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn render_frame_system(
    state: Res<CruiseState>,
    mut sink: ResMut<FrameSink>,
    mut commands: Commands,
) {
    let control = state.control();
    if let Err(e) = sink.render(control) {
        commands.trigger(FrameRenderError {
            tick: control.ticks(),
            detail: e.to_string(),
        });
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_render_error(event: On<FrameRenderError>) {
    error!("{}", event.event());
}

/// Plugin rendering every completed tick.
///
/// Inserts a [`FrameSink`] writing to standard output unless the app already
/// has one.
#[derive(Debug, Default)]
pub struct PresentationPlugin {
    format: OutputFormat,
}

impl PresentationPlugin {
    /// Renders in `format`.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<FrameSink>() {
            app.insert_resource(FrameSink::stdout(self.format));
        }
        app.add_observer(log_render_error);
        app.add_systems(PostUpdate, render_frame_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::InferenceEngine;
    use crate::road::HillyRoad;
    use crate::vehicle::Vehicle;
    use rstest::rstest;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn ticked_control(current_speed: f64) -> CruiseControl<HillyRoad> {
        let mut control = CruiseControl::new(
            HillyRoad::default(),
            Vehicle::new(current_speed, 70.0),
            InferenceEngine::default(),
        );
        control.tick();
        control
    }

    #[rstest]
    fn text_frame_lists_every_set() {
        let text = TextFrame(&ticked_control(80.0)).to_string();
        let expected = "\
ROAD
road angle: 0.0
CAR
current speed: 79.2
target speed: 70.0
FUZZY CONTROLLER
road angle set membership:
  - downhill: 0.0
  - flat: 1.0
  - uphill: 0.0
relative speed set membership:
  - under: 0.0
  - matched: 0.0
  - over: 1.0
car action output:
  - braking hard: 0.0
  - braking soft: -0.8
  - maintain: 0.0
  - accelerating soft: 0.0
  - accelerating hard: 0.0
";
        assert_eq!(text, expected);
    }

    #[rstest]
    fn snapshot_captures_tick() {
        let snapshot = FrameSnapshot::capture(&ticked_control(80.0));
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.road_angle, 0.0);
        assert!((snapshot.current_speed - 79.18).abs() < 1e-9);
        assert_eq!(snapshot.target_speed, 70.0);
    }

    #[rstest]
    fn quiet_sink_writes_nothing() {
        let mut sink = FrameSink::new(OutputFormat::Quiet, FailingWriter);
        assert!(sink.render(&ticked_control(80.0)).is_ok());
    }

    #[rstest]
    fn write_failure_is_reported() {
        let mut sink = FrameSink::new(OutputFormat::Text, FailingWriter);
        let err = sink.render(&ticked_control(80.0)).expect_err("writer is closed");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[rstest]
    fn unticked_state_is_not_rendered() {
        let control = CruiseControl::new(
            HillyRoad::default(),
            Vehicle::default(),
            InferenceEngine::default(),
        );
        let mut sink = FrameSink::new(OutputFormat::Text, FailingWriter);
        assert!(sink.render(&control).is_ok());
    }

    #[rstest]
    fn plugin_keeps_existing_sink() {
        let mut app = App::new();
        app.insert_resource(FrameSink::new(OutputFormat::Json, io::sink()));
        app.add_plugins(PresentationPlugin::new(OutputFormat::Text));
        assert_eq!(app.world().resource::<FrameSink>().format(), OutputFormat::Json);
    }
}
