//! Relay state → control system mapping.

use sv_core::SystemLabel;

/// Combined state of the two relays at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelayPair {
    pub a: bool,
    pub b: bool,
}

impl RelayPair {
    pub fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }

    /// Decode raw relay readings; any non-zero value means energized.
    pub fn from_values(a: f64, b: f64) -> Self {
        Self {
            a: a != 0.0,
            b: b != 0.0,
        }
    }

    pub fn label(self) -> SystemLabel {
        classify(self.a, self.b)
    }
}

/// Which control system the relay pair selects.
///
/// Relay A dominates: while it is energized, relay B is ignored.
pub fn classify(a: bool, b: bool) -> SystemLabel {
    match (a, b) {
        (true, _) => SystemLabel::System1,
        (false, false) => SystemLabel::System2,
        (false, true) => SystemLabel::System3,
    }
}
