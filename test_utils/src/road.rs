//! Deterministic road profiles for driving the controller in tests.

use std::collections::VecDeque;

use fuzzy_cruise::RoadProfile;

/// A road whose grade never changes. Counts how often it was advanced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedRoad {
    angle: f64,
    advances: u64,
}

impl FixedRoad {
    /// Create a road held at `angle` degrees.
    ///
    /// # Examples
    /// ```
    /// use fuzzy_cruise::RoadProfile;
    /// use test_utils::FixedRoad;
    ///
    /// let mut road = FixedRoad::new(4.0);
    /// road.advance();
    /// assert_eq!(road.current_angle(), 4.0);
    /// assert_eq!(road.advances(), 1);
    /// ```
    pub fn new(angle: f64) -> Self {
        Self { angle, advances: 0 }
    }

    /// Number of times [`RoadProfile::advance`] was called.
    pub fn advances(&self) -> u64 {
        self.advances
    }
}

impl RoadProfile for FixedRoad {
    fn current_angle(&self) -> f64 {
        self.angle
    }

    fn advance(&mut self) {
        self.advances += 1;
    }
}

/// A road that replays a list of grades, holding the last one once exhausted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedRoad {
    upcoming: VecDeque<f64>,
    current: f64,
}

impl ScriptedRoad {
    /// Create a road that yields `angles` on successive advances.
    ///
    /// # Examples
    /// ```
    /// use fuzzy_cruise::RoadProfile;
    /// use test_utils::ScriptedRoad;
    ///
    /// let mut road = ScriptedRoad::new([1.0, -2.0]);
    /// road.advance();
    /// road.advance();
    /// road.advance();
    /// assert_eq!(road.current_angle(), -2.0);
    /// ```
    pub fn new(angles: impl IntoIterator<Item = f64>) -> Self {
        Self {
            upcoming: angles.into_iter().collect(),
            current: 0.0,
        }
    }
}

impl RoadProfile for ScriptedRoad {
    fn current_angle(&self) -> f64 {
        self.current
    }

    fn advance(&mut self) {
        if let Some(next) = self.upcoming.pop_front() {
            self.current = next;
        }
    }
}
