//! Soil probe calibration
//!
//! Capacitive probes read higher when drier. The calibration records the
//! raw ADC value in dry air and fully submerged, and maps linearly between
//! them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Soil moisture calibration and sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoilCalibration {
    /// Raw reading of a dry probe (0 %)
    pub dry_raw: u16,
    /// Raw reading of a submerged probe (100 %)
    pub wet_raw: u16,
    /// Samples averaged per measurement
    pub sample_count: u16,
    /// Delay between samples (µs)
    pub sample_interval_us: u32,
}

impl Default for SoilCalibration {
    fn default() -> Self {
        Self {
            dry_raw: 4000,
            wet_raw: 1000,
            sample_count: 64,
            sample_interval_us: 50,
        }
    }
}

impl SoilCalibration {
    /// Check the calibration can be used
    pub const fn is_valid(&self) -> bool {
        self.dry_raw > self.wet_raw && self.sample_count > 0
    }

    /// Convert an averaged raw reading to moisture percent
    ///
    /// Non-increasing in `raw`. Readings drier than `dry_raw` give 0,
    /// wetter than `wet_raw` give 100. An unusable calibration
    /// (`dry_raw <= wet_raw`) always gives 0.
    pub fn to_percent(&self, raw: u16) -> f32 {
        let span = self.dry_raw as f32 - self.wet_raw as f32;
        if span <= 0.0 {
            return 0.0;
        }
        let percent = (self.dry_raw as f32 - raw as f32) * 100.0 / span;
        percent.clamp(0.0, 100.0)
    }
}
