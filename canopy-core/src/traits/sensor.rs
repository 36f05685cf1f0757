//! Sensor traits

use crate::sensor::{MoistureSample, Reading};

/// Point in the single-wire exchange where the sensor stopped answering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitStage {
    /// Waiting for the sensor to pull the released line low
    ResponseLow,
    /// Waiting for the end of the sensor's low response pulse
    ResponseHigh,
    /// Waiting for the first data bit to begin
    DataStart,
    /// Waiting for a data bit's high phase to begin
    BitStart(u8),
    /// Waiting for a data bit's high phase to end
    BitEnd(u8),
}

/// Errors that can occur while sampling the sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// A bounded wait on the data line ran out of polling iterations
    Timeout(WaitStage),
    /// Frame received but the checksum byte does not match the data bytes
    Checksum { sum: u8, checksum: u8 },
    /// Frame decoded but the value is physically impossible
    Implausible,
    /// ADC conversion error
    ConversionError,
}

impl SensorError {
    /// Protocol-level failure (timeout or checksum mismatch)
    pub fn is_transmission(&self) -> bool {
        matches!(self, SensorError::Timeout(_) | SensorError::Checksum { .. })
    }
}

/// Air temperature and humidity sensor
pub trait ClimateSensor {
    /// Perform one complete bus transaction
    ///
    /// Either both quantities are valid or the whole reading fails; there is
    /// no partial result.
    fn read(&mut self) -> Result<Reading, SensorError>;
}

/// Soil moisture sensor
pub trait MoistureSensor {
    /// Sample the probe and convert to a calibrated percentage
    fn read_moisture(&mut self) -> Result<MoistureSample, SensorError>;
}
