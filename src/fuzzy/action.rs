//! Output sets of the controller and their rule-local defuzzification.

use std::fmt;

use super::labels::FuzzyLabel;

/// Corrections the controller can apply to the car's speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CarAction {
    /// Strong deceleration, suppressed for weakly firing rules.
    BrakeHard,
    /// Deceleration proportional to rule strength.
    BrakeSoft,
    /// Leave the speed alone.
    Maintain,
    /// Acceleration proportional to rule strength.
    AccelerateSoft,
    /// Strong acceleration, suppressed for weakly firing rules.
    AccelerateHard,
}

/// Closed-form response curve shared by the braking and accelerating actions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActionResponse {
    max_impact: f64,
    pivot_cap: f64,
    cutoff: f64,
    deadband: bool,
    sign: f64,
}

impl ActionResponse {
    const HARD: Self = Self {
        max_impact: 0.2,
        pivot_cap: 0.08,
        cutoff: 0.04,
        deadband: true,
        sign: 1.0,
    };

    const SOFT: Self = Self {
        max_impact: 0.8,
        pivot_cap: 0.04,
        cutoff: 0.0,
        deadband: false,
        sign: 1.0,
    };

    const fn negated(self) -> Self {
        Self {
            sign: -self.sign,
            ..self
        }
    }

    fn estimate(&self, strength: f64) -> f64 {
        let moderated = self.max_impact * strength;
        // NaN never clears the cutoff.
        let fires = !self.deadband || moderated > self.cutoff;
        if !fires {
            return 0.0;
        }
        let pivot = self.pivot_cap.min(moderated);
        self.sign * (moderated + (pivot - self.cutoff) / 2.0)
    }
}

impl CarAction {
    const fn response(self) -> Option<ActionResponse> {
        match self {
            Self::BrakeHard => Some(ActionResponse::HARD.negated()),
            Self::BrakeSoft => Some(ActionResponse::SOFT.negated()),
            Self::Maintain => None,
            Self::AccelerateSoft => Some(ActionResponse::SOFT),
            Self::AccelerateHard => Some(ActionResponse::HARD),
        }
    }

    /// Crisp speed delta contributed by one rule firing with `strength`.
    ///
    /// Soft actions respond linearly from zero. Hard actions output nothing
    /// until `0.2 * strength` exceeds `0.04`, then add half the distance
    /// between the capped pivot and that cutoff on top of the scaled impact.
    /// [`CarAction::Maintain`] always yields `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzy_cruise::fuzzy::CarAction;
    ///
    /// assert!((CarAction::BrakeSoft.estimate_output(1.0) + 0.82).abs() < 1e-12);
    /// assert_eq!(CarAction::AccelerateHard.estimate_output(0.1), 0.0);
    /// assert_eq!(CarAction::Maintain.estimate_output(1.0), 0.0);
    /// ```
    #[must_use]
    pub fn estimate_output(self, strength: f64) -> f64 {
        self.response()
            .map_or(0.0, |response| response.estimate(strength))
    }
}

impl FuzzyLabel for CarAction {
    const ALL: &'static [Self] = &[
        Self::BrakeHard,
        Self::BrakeSoft,
        Self::Maintain,
        Self::AccelerateSoft,
        Self::AccelerateHard,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::BrakeHard => "braking hard",
            Self::BrakeSoft => "braking soft",
            Self::Maintain => "maintain",
            Self::AccelerateSoft => "accelerating soft",
            Self::AccelerateHard => "accelerating hard",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
