//! Board-agnostic core logic for the greenhouse indicator firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (climate sensor, moisture sensor, inference engine,
//!   indicators)
//! - Sensor frame micro-format and checksum validation
//! - Tensor numeric kinds and the quantization adapter
//! - Level decision
//! - Configuration type definitions and soil calibration
//! - The per-cycle control sequence

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod features;
pub mod inference;
pub mod sensor;
pub mod traits;

pub use features::{FeatureVector, FEATURE_COUNT};
pub use inference::{infer, ActuationLevel, Inference, InferenceError, TensorKind};
pub use sensor::{MoistureSample, Reading, SensorFrame};
