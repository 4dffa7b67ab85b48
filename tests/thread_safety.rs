//! Compile-time guards ensuring simulation state can cross threads.
//!
//! Bevy resources must be `Send + Sync`, and the rspec runner clones control
//! loops between examples.
use fuzzy_cruise::presentation::FrameSink;
use fuzzy_cruise::simulation::RunLimit;
use fuzzy_cruise::{CruiseControl, CruiseState, HillyRoad, InferenceEngine, SimulationConfig};
use static_assertions::{assert_impl_all, assert_not_impl_any};

assert_impl_all!(InferenceEngine: Send, Sync, Clone);
assert_impl_all!(CruiseControl<HillyRoad>: Send, Sync, Clone);
assert_impl_all!(CruiseState: Send, Sync);
assert_impl_all!(RunLimit: Send, Sync, Copy);
assert_impl_all!(FrameSink: Send, Sync);
assert_impl_all!(SimulationConfig: Send, Sync, Copy);
assert_not_impl_any!(FrameSink: Clone);
