//! The cruise-control rule table and antecedent combination.

use thiserror::Error;

use super::labels::{RelativeSpeedDegrees, RoadAngleDegrees};
use super::{CarAction, RelativeSpeed, RoadAngle};

/// Combines two membership degrees into a rule strength by multiplication.
///
/// Unlike `min`, the product stays sensitive to both antecedents.
///
/// # Examples
///
/// ```
/// use fuzzy_cruise::fuzzy::product_t_norm;
///
/// assert_eq!(product_t_norm(0.5, 0.5), 0.25);
/// assert_eq!(product_t_norm(1.0, 0.0), 0.0);
/// ```
#[must_use]
pub const fn product_t_norm(lhs: f64, rhs: f64) -> f64 {
    lhs * rhs
}

/// One `IF road_angle AND relative_speed THEN action` rule. All rules weigh 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Road grade antecedent.
    pub road_angle: RoadAngle,
    /// Relative speed antecedent.
    pub relative_speed: RelativeSpeed,
    /// Consequent action.
    pub action: CarAction,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(road_angle: RoadAngle, relative_speed: RelativeSpeed, action: CarAction) -> Self {
        Self {
            road_angle,
            relative_speed,
            action,
        }
    }

    /// Antecedent strength of the rule for the given memberships.
    #[must_use]
    pub fn strength(&self, road: &RoadAngleDegrees, speed: &RelativeSpeedDegrees) -> f64 {
        product_t_norm(road.get(self.road_angle), speed.get(self.relative_speed))
    }
}

/// The fixed cruise-control rule table, in evaluation order.
///
/// The last rule brakes hard when climbing below target speed. It is kept
/// as-is even though its neighbours accelerate.
pub const CRUISE_RULES: [Rule; 9] = [
    Rule::new(RoadAngle::Downhill, RelativeSpeed::Over, CarAction::BrakeHard),
    Rule::new(RoadAngle::Flat, RelativeSpeed::Over, CarAction::BrakeSoft),
    Rule::new(RoadAngle::Downhill, RelativeSpeed::Matched, CarAction::BrakeSoft),
    Rule::new(RoadAngle::Uphill, RelativeSpeed::Over, CarAction::Maintain),
    Rule::new(RoadAngle::Flat, RelativeSpeed::Matched, CarAction::Maintain),
    Rule::new(RoadAngle::Downhill, RelativeSpeed::Under, CarAction::Maintain),
    Rule::new(RoadAngle::Uphill, RelativeSpeed::Matched, CarAction::AccelerateSoft),
    Rule::new(RoadAngle::Flat, RelativeSpeed::Under, CarAction::AccelerateSoft),
    Rule::new(RoadAngle::Uphill, RelativeSpeed::Under, CarAction::BrakeHard),
];

/// Errors raised while assembling a [`RuleBase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleBaseError {
    /// No rules were supplied.
    #[error("rule base contains no rules")]
    Empty,
    /// Two rules share the same antecedent pair.
    #[error("rules {first} and {second} both fire on ({road_angle}, {relative_speed})")]
    DuplicateAntecedent {
        /// Position of the first rule.
        first: usize,
        /// Position of the conflicting rule.
        second: usize,
        /// Shared road grade antecedent.
        road_angle: RoadAngle,
        /// Shared relative speed antecedent.
        relative_speed: RelativeSpeed,
    },
}

/// An ordered, validated set of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Validates `table` and wraps them in evaluation order.
    ///
    /// # Errors
    ///
    /// Returns [`RuleBaseError::Empty`] for an empty table and
    /// [`RuleBaseError::DuplicateAntecedent`] when two rules share both
    /// antecedents.
    pub fn try_new(table: impl Into<Vec<Rule>>) -> Result<Self, RuleBaseError> {
        let rules: Vec<Rule> = table.into();
        if rules.is_empty() {
            return Err(RuleBaseError::Empty);
        }
        for (second, rule) in rules.iter().enumerate() {
            let earlier = rules.iter().take(second).position(|other| {
                other.road_angle == rule.road_angle && other.relative_speed == rule.relative_speed
            });
            if let Some(first) = earlier {
                return Err(RuleBaseError::DuplicateAntecedent {
                    first,
                    second,
                    road_angle: rule.road_angle,
                    relative_speed: rule.relative_speed,
                });
            }
        }
        Ok(Self { rules })
    }

    /// The [`CRUISE_RULES`] table.
    #[must_use]
    pub fn cruise_control() -> Self {
        Self {
            rules: CRUISE_RULES.to_vec(),
        }
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for RuleBase {
    fn default() -> Self {
        Self::cruise_control()
    }
}
