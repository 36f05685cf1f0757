//! Model input features
//!
//! Both classifiers were trained on the same positional input:
//! `[temperature °C, humidity %, soil moisture %]`.

use crate::sensor::{MoistureSample, Reading};

/// Number of model input features
pub const FEATURE_COUNT: usize = 3;

/// Ordered feature triple fed to every model
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    pub const fn new(temperature_c: f32, humidity_pct: f32, soil_pct: f32) -> Self {
        Self([temperature_c, humidity_pct, soil_pct])
    }

    /// Build the features for one cycle
    pub fn from_readings(reading: &Reading, moisture: &MoistureSample) -> Self {
        Self::new(
            reading.temperature_c(),
            reading.humidity_pct(),
            moisture.percent,
        )
    }

    pub fn temperature_c(&self) -> f32 {
        self.0[0]
    }

    pub fn humidity_pct(&self) -> f32 {
        self.0[1]
    }

    pub fn soil_pct(&self) -> f32 {
        self.0[2]
    }

    /// Features in model input order
    pub const fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.0
    }
}
