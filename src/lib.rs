//! Cruise-control simulation governed by a fuzzy inference engine.
//!
//! A [`HillyRoad`](road::HillyRoad) produces a road grade each tick and a
//! [`Vehicle`] tracks its speed against a target. The [`InferenceEngine`]
//! fuzzifies both inputs, fires a fixed nine-rule table with a product t-norm
//! and sums each rule's crisp contribution into a speed correction, which
//! [`CruiseControl`] applies to the vehicle. The [`simulation`] and
//! [`presentation`] modules drive and display the loop inside a headless Bevy
//! app.
pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod fuzzy;
pub mod logging;
pub mod presentation;
pub mod road;
pub mod simulation;
pub mod vehicle;
pub use constants::*;

// Re-export commonly used items
pub use config::{ConfigError, OutputFormat, SimulationConfig};
pub use controller::CruiseControl;
pub use fuzzy::{CarAction, InferenceEngine, InferenceSnapshot, RelativeSpeed, RoadAngle, RuleBase};
pub use logging::init as init_logging;
pub use presentation::{FrameSink, PresentationPlugin};
pub use road::{HillyRoad, RoadProfile};
pub use simulation::{CruisePlugin, CruiseState, SimulationError};
pub use vehicle::Vehicle;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use fuzzy_cruise::prelude::*;
    //! ```

    pub use crate::fuzzy::{FuzzyLabel, LinguisticVariable};
    pub use crate::CruiseControl;
    pub use crate::CruisePlugin;
    pub use crate::HillyRoad;
    pub use crate::InferenceEngine;
    pub use crate::RoadProfile;
    pub use crate::Vehicle;
}
