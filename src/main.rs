//! Command-line entry point running the cruise-control simulation.
use anyhow::{anyhow, Context, Result};
use bevy::app::{App, AppExit, PluginGroup, ScheduleRunnerPlugin};
use bevy::prelude::MinimalPlugins;
use clap::Parser;
use fuzzy_cruise::cli::Args;
use fuzzy_cruise::{init_logging, CruisePlugin, PresentationPlugin};
use log::info;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args
        .resolve_config()
        .context("failed to resolve simulation settings")?;
    let cruise = CruisePlugin::new(config).context("failed to set up the cruise controller")?;

    info!(
        "driving from {:.1} towards {:.1} for {} ticks of {} ms",
        config.initial_speed,
        config.target_speed,
        config.max_ticks(),
        config.frame_interval_ms
    );

    let exit = App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(config.frame_interval())))
        .add_plugins((cruise, PresentationPlugin::new(config.output)))
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow!("simulation exited with code {code}")),
    }
}
