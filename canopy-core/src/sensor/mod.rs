//! Sensor data types
//!
//! The single-wire climate sensor transmits a 40-bit frame; [`frame`]
//! holds the bit layout and checksum rules, [`reading`] the decoded values.

pub mod frame;
pub mod reading;

pub use frame::{ChecksumMode, SensorFrame, FRAME_BITS};
pub use reading::{MoistureSample, Reading};
