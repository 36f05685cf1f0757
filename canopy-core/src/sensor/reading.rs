//! Decoded sensor values

/// Highest physically meaningful relative humidity (×10)
pub const MAX_HUMIDITY_X10: u16 = 1000;

/// One climate reading
///
/// Both values are fixed-point with 0.1 resolution, e.g. 25.7 °C is
/// stored as 257.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    temperature_x10: i16,
    humidity_x10: u16,
}

impl Reading {
    /// Create a reading from fixed-point values
    pub const fn new(temperature_x10: i16, humidity_x10: u16) -> Self {
        Self {
            temperature_x10,
            humidity_x10,
        }
    }

    /// Combine the integer and decimal bytes of a frame
    ///
    /// The decimal part takes the sign of the integer part.
    pub const fn from_parts(temp_int: i8, temp_dec: u8, rh_int: u8, rh_dec: u8) -> Self {
        let temp_dec = if temp_int < 0 {
            -(temp_dec as i16)
        } else {
            temp_dec as i16
        };

        Self {
            temperature_x10: temp_int as i16 * 10 + temp_dec,
            humidity_x10: rh_int as u16 * 10 + rh_dec as u16,
        }
    }

    /// Temperature in 0.1 °C units
    pub const fn temperature_x10(&self) -> i16 {
        self.temperature_x10
    }

    /// Relative humidity in 0.1 % units
    pub const fn humidity_x10(&self) -> u16 {
        self.humidity_x10
    }

    /// Temperature in °C
    pub fn temperature_c(&self) -> f32 {
        self.temperature_x10 as f32 / 10.0
    }

    /// Relative humidity in %
    pub fn humidity_pct(&self) -> f32 {
        self.humidity_x10 as f32 / 10.0
    }

    /// Check the humidity lies within 0-100 %
    pub const fn is_plausible(&self) -> bool {
        self.humidity_x10 <= MAX_HUMIDITY_X10
    }
}

/// One soil moisture measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoistureSample {
    /// Averaged raw ADC value
    pub raw: u16,
    /// Calibrated moisture, 0-100 %
    pub percent: f32,
}
