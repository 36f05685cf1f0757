//! Collaborator traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific or engine-specific implementations.

pub mod indicator;
pub mod inference;
pub mod sensor;

pub use indicator::{FaultIndicator, LevelIndicator};
pub use inference::{ElementType, EngineError, InferenceEngine, Shape, TensorInfo, MAX_DIMS};
pub use sensor::{ClimateSensor, MoistureSensor, SensorError, WaitStage};
