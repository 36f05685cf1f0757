//! Indicator output traits

use crate::inference::ActuationLevel;

/// Output that visualizes an actuation level
///
/// Implementations rewrite their whole visible state on every call, so
/// showing the same level twice always yields the same outputs.
pub trait LevelIndicator {
    /// Show the given level
    fn show(&mut self, level: ActuationLevel);

    /// Turn every output off
    fn clear(&mut self) {
        self.show(ActuationLevel::OFF);
    }
}

/// Sensor fault lamp
pub trait FaultIndicator {
    /// Light or extinguish the fault lamp
    fn set_fault(&mut self, active: bool);
}
