//! Configuration type definitions
//!
//! Defaults reproduce the constants of the reference board.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::SoilCalibration;
use crate::sensor::ChecksumMode;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `dry_raw` must be above `wet_raw` and at least one sample taken
    InvalidSoilCalibration,
    /// Sensor polling parameters cannot distinguish bits
    InvalidTiming,
}

/// Single-wire sensor timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorTiming {
    /// Duration the host holds the line low to request a frame (ms)
    pub start_signal_ms: u32,
    /// Sleep between line samples (µs)
    pub poll_interval_us: u32,
    /// Samples before a wait is declared timed out
    pub polling_limit: u16,
    /// High-phase samples at or above which a bit reads as 1
    pub bit_threshold: u16,
    /// Settling time after power-up before the first read (ms)
    pub stabilize_ms: u32,
    /// Require an exact checksum match
    pub strict_checksum: bool,
}

impl Default for SensorTiming {
    fn default() -> Self {
        Self {
            start_signal_ms: 20,
            poll_interval_us: 5,
            polling_limit: 100,
            bit_threshold: 8,
            stabilize_ms: 1000,
            strict_checksum: false,
        }
    }
}

impl SensorTiming {
    pub const fn checksum_mode(&self) -> ChecksumMode {
        if self.strict_checksum {
            ChecksumMode::Strict
        } else {
            ChecksumMode::Tolerant
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.polling_limit > 0 && self.bit_threshold > 0 && self.bit_threshold < self.polling_limit
    }
}

/// Main loop cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlTiming {
    /// Wait after power-up before the first cycle (ms)
    pub boot_delay_ms: u32,
    /// Wait after a completed cycle (ms)
    pub cycle_interval_ms: u32,
    /// Wait after a sensor failure (ms)
    pub fault_backoff_ms: u32,
}

impl Default for ControlTiming {
    fn default() -> Self {
        Self {
            boot_delay_ms: 2000,
            cycle_interval_ms: 3000,
            fault_backoff_ms: 2000,
        }
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanopyConfig {
    pub sensor: SensorTiming,
    pub soil: SoilCalibration,
    pub control: ControlTiming,
}

impl CanopyConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.soil.is_valid() {
            return Err(ConfigError::InvalidSoilCalibration);
        }
        if !self.sensor.is_valid() {
            return Err(ConfigError::InvalidTiming);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert_eq!(CanopyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_checksum_mode() {
        let mut timing = SensorTiming::default();
        assert_eq!(timing.checksum_mode(), ChecksumMode::Tolerant);

        timing.strict_checksum = true;
        assert_eq!(timing.checksum_mode(), ChecksumMode::Strict);
    }

    #[test]
    fn test_invalid_soil() {
        let mut config = CanopyConfig::default();
        config.soil.wet_raw = config.soil.dry_raw;

        assert_eq!(config.validate(), Err(ConfigError::InvalidSoilCalibration));
    }

    #[test]
    fn test_invalid_timing() {
        let mut config = CanopyConfig::default();
        config.sensor.bit_threshold = config.sensor.polling_limit;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));

        let mut config = CanopyConfig::default();
        config.sensor.polling_limit = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));
    }
}
