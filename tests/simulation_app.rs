//! Integration tests running the cruise simulation in a headless Bevy app.

mod common;

use anyhow::{ensure, Context, Result};
use bevy::app::AppExit;
use common::{CruiseAssertions, CruiseTestAppBuilder};
use fuzzy_cruise::{OutputFormat, SimulationConfig};
use rstest::rstest;
use serde_json::Value;

fn short_run(ticks: u64) -> SimulationConfig {
    SimulationConfig {
        frame_interval_ms: 50,
        run_duration_ms: 50 * ticks,
        initial_speed: 80.0,
        ..SimulationConfig::default()
    }
}

#[rstest]
fn renders_one_json_line_per_tick() -> Result<()> {
    let (builder, frames) =
        CruiseTestAppBuilder::new(short_run(10))?.with_captured_frames(OutputFormat::Json);
    let mut app = builder.build();

    for _ in 0..3 {
        app.update();
    }

    let lines = frames.lines();
    ensure!(lines.len() == 3, "expected 3 frames, got {}", lines.len());
    for (expected_tick, line) in (1_u64..).zip(&lines) {
        let frame: Value = serde_json::from_str(line).context("frame is not JSON")?;
        ensure!(frame["tick"] == expected_tick, "unexpected frame {line}");
        ensure!(frame["target_speed"] == 70.0, "unexpected frame {line}");
        ensure!(
            frame["inference"]["car_action"].get("braking soft").is_some(),
            "action outputs missing from {line}"
        );
    }
    CruiseAssertions::assert_ticks(&app, 3)
}

#[rstest]
fn renders_text_frames() -> Result<()> {
    let (builder, frames) =
        CruiseTestAppBuilder::new(short_run(10))?.with_captured_frames(OutputFormat::Text);
    let mut app = builder.build();

    app.update();

    let text = frames.contents();
    ensure!(text.starts_with("ROAD\nroad angle: 0.0\nCAR\n"), "unexpected frame {text}");
    ensure!(text.contains("current speed: 79.2\n"), "unexpected frame {text}");
    ensure!(text.contains("  - braking soft: -0.8\n"), "unexpected frame {text}");
    Ok(())
}

#[rstest]
fn quiet_output_still_ticks() -> Result<()> {
    let (builder, frames) =
        CruiseTestAppBuilder::new(short_run(10))?.with_captured_frames(OutputFormat::Quiet);
    let mut app = builder.build();

    app.update();
    app.update();

    ensure!(frames.contents().is_empty(), "quiet mode wrote output");
    CruiseAssertions::assert_ticks(&app, 2)
}

#[rstest]
fn stops_after_configured_duration() -> Result<()> {
    let (builder, frames) =
        CruiseTestAppBuilder::new(short_run(3))?.with_captured_frames(OutputFormat::Json);
    let mut app = builder.build();

    app.update();
    app.update();
    ensure!(app.should_exit().is_none(), "exited before the run limit");

    app.update();
    ensure!(
        app.should_exit() == Some(AppExit::Success),
        "expected a successful exit after three ticks"
    );

    app.update();
    CruiseAssertions::assert_ticks(&app, 3)?;
    ensure!(frames.lines().len() == 3, "a frame was rendered past the limit");
    Ok(())
}

#[rstest]
fn rejects_invalid_interval() {
    let config = SimulationConfig {
        frame_interval_ms: 0,
        ..SimulationConfig::default()
    };
    assert!(CruiseTestAppBuilder::new(config).is_err());
}
