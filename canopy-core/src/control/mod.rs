//! Control cycle
//!
//! One cycle = read sensors, build features, run both actuator models,
//! update the indicators. The caller owns the loop and the waiting.

pub mod cycle;

pub use cycle::{Actuator, ActuatorOutcome, Controller, CycleReport, CycleSummary};
