//! Fuzzification, rule evaluation and defuzzification.

use log::trace;
use serde::Serialize;

use super::labels::{ActionOutputs, RelativeSpeedDegrees, RoadAngleDegrees};
use super::{LinguisticVariable, RelativeSpeed, RoadAngle, RuleBase};

/// Copy of the engine's working maps after an inference pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InferenceSnapshot {
    /// Membership of the road grade in each road angle set.
    pub road_angle: RoadAngleDegrees,
    /// Membership of the relative speed in each relative speed set.
    pub relative_speed: RelativeSpeedDegrees,
    /// Aggregated speed delta of each action.
    pub car_action: ActionOutputs,
    /// Sum of all action outputs.
    pub total_output: f64,
}

/// Fuzzy controller mapping road grade and relative speed to a speed delta.
///
/// The three working maps are scratch space for the current pass:
/// [`fuzzify`](Self::fuzzify) overwrites both membership maps and
/// [`evaluate_rules`](Self::evaluate_rules) zeroes the action totals before
/// accumulating. Nothing carries over from one pass to the next.
///
/// # Examples
///
/// ```
/// use fuzzy_cruise::fuzzy::InferenceEngine;
///
/// let mut engine = InferenceEngine::default();
/// // Level road, ten units over target: only "flat and over" fires.
/// let delta = engine.infer(0.0, 10.0);
/// assert!((delta + 0.82).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceEngine {
    road_angle: LinguisticVariable<RoadAngle>,
    relative_speed: LinguisticVariable<RelativeSpeed>,
    rules: RuleBase,
    road_angle_degrees: RoadAngleDegrees,
    relative_speed_degrees: RelativeSpeedDegrees,
    action_outputs: ActionOutputs,
}

impl InferenceEngine {
    /// Creates an engine evaluating `rules` over the standard input variables.
    #[must_use]
    pub fn new(rules: RuleBase) -> Self {
        Self {
            road_angle: LinguisticVariable::road_angle(),
            relative_speed: LinguisticVariable::relative_speed(),
            rules,
            road_angle_degrees: RoadAngleDegrees::zeroed(),
            relative_speed_degrees: RelativeSpeedDegrees::zeroed(),
            action_outputs: ActionOutputs::zeroed(),
        }
    }

    /// Recomputes every input membership for the given crisp values.
    pub fn fuzzify(&mut self, angle: f64, relative_speed: f64) {
        self.road_angle.fuzzify(angle, &mut self.road_angle_degrees);
        self.relative_speed
            .fuzzify(relative_speed, &mut self.relative_speed_degrees);
    }

    /// Fires every rule against the current memberships and sums each rule's
    /// crisp contribution into its action's total.
    pub fn evaluate_rules(&mut self) {
        self.action_outputs.reset();
        for rule in self.rules.rules() {
            let strength = rule.strength(&self.road_angle_degrees, &self.relative_speed_degrees);
            let contribution = rule.action.estimate_output(strength);
            trace!(
                "rule ({}, {}) -> {}: strength {strength:.4}, output {contribution:.4}",
                rule.road_angle,
                rule.relative_speed,
                rule.action
            );
            self.action_outputs.accumulate(rule.action, contribution);
        }
    }

    /// Sum of the per-action totals from the last rule evaluation.
    #[must_use]
    pub fn total_output(&self) -> f64 {
        self.action_outputs.sum()
    }

    /// Runs the full pipeline and returns the speed delta to apply.
    pub fn infer(&mut self, angle: f64, relative_speed: f64) -> f64 {
        self.fuzzify(angle, relative_speed);
        self.evaluate_rules();
        self.total_output()
    }

    /// Road angle memberships from the last fuzzification.
    #[must_use]
    pub const fn road_angle_memberships(&self) -> &RoadAngleDegrees {
        &self.road_angle_degrees
    }

    /// Relative speed memberships from the last fuzzification.
    #[must_use]
    pub const fn relative_speed_memberships(&self) -> &RelativeSpeedDegrees {
        &self.relative_speed_degrees
    }

    /// Per-action totals from the last rule evaluation.
    #[must_use]
    pub const fn action_outputs(&self) -> &ActionOutputs {
        &self.action_outputs
    }

    /// Rules the engine evaluates.
    #[must_use]
    pub const fn rule_base(&self) -> &RuleBase {
        &self.rules
    }

    /// Copies the working maps for presentation.
    #[must_use]
    pub fn snapshot(&self) -> InferenceSnapshot {
        InferenceSnapshot {
            road_angle: self.road_angle_degrees,
            relative_speed: self.relative_speed_degrees,
            car_action: self.action_outputs,
            total_output: self.total_output(),
        }
    }
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(RuleBase::cruise_control())
    }
}
