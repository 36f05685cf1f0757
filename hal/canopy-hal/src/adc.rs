//! ADC abstraction
//!
//! A single, already-selected analog channel.

/// ADC read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// The conversion did not complete or reported an error
    Conversion,
}

/// Analog channel reader
pub trait AdcReader {
    /// Take one blocking conversion (12-bit, 0-4095 on RP2040)
    fn read(&mut self) -> Result<u16, AdcError>;
}
