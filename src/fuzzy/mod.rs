//! Fuzzy inference engine for the cruise controller.
//!
//! This module defines [`InferenceEngine`], which turns a crisp road grade and
//! relative speed into a crisp speed correction. Each call to
//! [`InferenceEngine::infer`] runs three stages:
//!
//! 1. fuzzification through the [`RoadAngle`] and [`RelativeSpeed`]
//!    [`LinguisticVariable`]s,
//! 2. rule evaluation over the fixed [`RuleBase`] using the
//!    [`product_t_norm`],
//! 3. rule-local defuzzification through [`CarAction::estimate_output`],
//!    summed per action.
//!
//! Sets, shapes and rules are fixed when the crate is built. The working maps
//! held by the engine are scratch state that every call overwrites.

mod action;
mod engine;
mod labels;
mod rules;
mod sets;

pub use action::CarAction;
pub use engine::{InferenceEngine, InferenceSnapshot};
pub use labels::{ActionOutputs, FuzzyLabel, LabelMap, RelativeSpeedDegrees, RoadAngleDegrees};
pub use rules::{product_t_norm, Rule, RuleBase, RuleBaseError, CRUISE_RULES};
pub use sets::{InputBounds, InputSet, LinguisticVariable, RelativeSpeed, RoadAngle, SetShape};
