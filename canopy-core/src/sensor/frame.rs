//! Single-wire sensor frame
//!
//! The sensor sends 40 bits, most significant bit first:
//!
//! ```text
//! ┌────────────┬────────────┬────────────┬────────────┬────────────┐
//! │ RH int     │ RH dec     │ T int      │ T dec      │ CHECKSUM   │
//! │ bits 39-32 │ bits 31-24 │ bits 23-16 │ bits 15-8  │ bits 7-0   │
//! └────────────┴────────────┴────────────┴────────────┴────────────┘
//! ```
//!
//! The checksum is the low byte of the sum of the four data bytes.
//!
//! # Checksum tolerance
//!
//! By default a frame is only rejected when the truncated data sum exceeds
//! the checksum byte by more than one. This accepts a known off-by-one in
//! some sensors' internal arithmetic, and it also accepts any frame whose
//! sum is below the checksum, which the sensor protocol itself would
//! reject. [`ChecksumMode::Strict`] requires an exact match.

use super::reading::Reading;
use crate::traits::SensorError;

/// Number of bits in one frame
pub const FRAME_BITS: usize = 40;

/// Mask of the valid frame bits
pub const FRAME_MASK: u64 = (1 << FRAME_BITS) - 1;

const BYTE_MASK: u64 = 0xFF;

pub const HUMIDITY_INT_SHIFT: u32 = 32;
pub const HUMIDITY_DEC_SHIFT: u32 = 24;
pub const TEMPERATURE_INT_SHIFT: u32 = 16;
pub const TEMPERATURE_DEC_SHIFT: u32 = 8;
pub const CHECKSUM_SHIFT: u32 = 0;

pub const HUMIDITY_INT_MASK: u64 = BYTE_MASK << HUMIDITY_INT_SHIFT;
pub const HUMIDITY_DEC_MASK: u64 = BYTE_MASK << HUMIDITY_DEC_SHIFT;
pub const TEMPERATURE_INT_MASK: u64 = BYTE_MASK << TEMPERATURE_INT_SHIFT;
pub const TEMPERATURE_DEC_MASK: u64 = BYTE_MASK << TEMPERATURE_DEC_SHIFT;
pub const CHECKSUM_MASK: u64 = BYTE_MASK << CHECKSUM_SHIFT;

/// Checksum acceptance rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumMode {
    /// Reject only when the data sum exceeds the checksum by more than one
    #[default]
    Tolerant,
    /// Reject on any mismatch
    Strict,
}

/// Raw 40-bit sensor frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFrame(u64);

impl SensorFrame {
    /// Wrap a raw word, discarding anything above bit 39
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw & FRAME_MASK)
    }

    /// Build a frame from its five bytes in transmission order
    pub const fn from_bytes(bytes: [u8; 5]) -> Self {
        Self(
            (bytes[0] as u64) << HUMIDITY_INT_SHIFT
                | (bytes[1] as u64) << HUMIDITY_DEC_SHIFT
                | (bytes[2] as u64) << TEMPERATURE_INT_SHIFT
                | (bytes[3] as u64) << TEMPERATURE_DEC_SHIFT
                | (bytes[4] as u64) << CHECKSUM_SHIFT,
        )
    }

    /// The raw 40-bit word
    pub const fn raw(&self) -> u64 {
        self.0
    }

    const fn field(&self, mask: u64, shift: u32) -> u8 {
        ((self.0 & mask) >> shift) as u8
    }

    pub const fn humidity_int(&self) -> u8 {
        self.field(HUMIDITY_INT_MASK, HUMIDITY_INT_SHIFT)
    }

    pub const fn humidity_dec(&self) -> u8 {
        self.field(HUMIDITY_DEC_MASK, HUMIDITY_DEC_SHIFT)
    }

    pub const fn temperature_int(&self) -> u8 {
        self.field(TEMPERATURE_INT_MASK, TEMPERATURE_INT_SHIFT)
    }

    pub const fn temperature_dec(&self) -> u8 {
        self.field(TEMPERATURE_DEC_MASK, TEMPERATURE_DEC_SHIFT)
    }

    pub const fn checksum(&self) -> u8 {
        self.field(CHECKSUM_MASK, CHECKSUM_SHIFT)
    }

    /// Sum of the four data bytes, truncated to 8 bits
    pub const fn data_sum(&self) -> u8 {
        self.humidity_int()
            .wrapping_add(self.humidity_dec())
            .wrapping_add(self.temperature_int())
            .wrapping_add(self.temperature_dec())
    }

    /// Validate the checksum byte
    pub fn verify(&self, mode: ChecksumMode) -> Result<(), SensorError> {
        let sum = self.data_sum();
        let checksum = self.checksum();

        let ok = match mode {
            ChecksumMode::Tolerant => sum as i16 - checksum as i16 <= 1,
            ChecksumMode::Strict => sum == checksum,
        };

        if ok {
            Ok(())
        } else {
            Err(SensorError::Checksum { sum, checksum })
        }
    }

    /// Validate and decode into a reading
    ///
    /// The temperature integer byte is two's complement; when it is
    /// negative the decimal part is subtracted, so `-3` and `5` decode
    /// to -3.5 °C.
    pub fn decode(&self, mode: ChecksumMode) -> Result<Reading, SensorError> {
        self.verify(mode)?;

        Ok(Reading::from_parts(
            self.temperature_int() as i8,
            self.temperature_dec(),
            self.humidity_int(),
            self.humidity_dec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rh_int: u8, rh_dec: u8, t_int: u8, t_dec: u8) -> SensorFrame {
        let sum = rh_int
            .wrapping_add(rh_dec)
            .wrapping_add(t_int)
            .wrapping_add(t_dec);
        SensorFrame::from_bytes([rh_int, rh_dec, t_int, t_dec, sum])
    }

    #[test]
    fn test_field_extraction() {
        let f = SensorFrame::from_raw(0x3C_02_19_07_5E);

        assert_eq!(f.humidity_int(), 0x3C);
        assert_eq!(f.humidity_dec(), 0x02);
        assert_eq!(f.temperature_int(), 0x19);
        assert_eq!(f.temperature_dec(), 0x07);
        assert_eq!(f.checksum(), 0x5E);
    }

    #[test]
    fn test_from_raw_masks_upper_bits() {
        let f = SensorFrame::from_raw(0xFF_00_00_00_00_01);
        assert_eq!(f.raw(), 0x00_00_00_00_01);
    }

    #[test]
    fn test_from_bytes_matches_raw() {
        let f = SensorFrame::from_bytes([0x3C, 0x02, 0x19, 0x07, 0x5E]);
        assert_eq!(f.raw(), 0x3C_02_19_07_5E);
    }

    #[test]
    fn test_decode_valid_frame() {
        // 60.2 %RH, 25.7 °C
        let reading = frame(60, 2, 25, 7).decode(ChecksumMode::Tolerant).unwrap();

        assert_eq!(reading.humidity_x10(), 602);
        assert_eq!(reading.temperature_x10(), 257);
    }

    #[test]
    fn test_decode_negative_temperature() {
        // -3 integer byte with 5 tenths => -3.5 °C
        let reading = frame(40, 0, (-3i8) as u8, 5)
            .decode(ChecksumMode::Tolerant)
            .unwrap();

        assert_eq!(reading.temperature_x10(), -35);
    }

    #[test]
    fn test_checksum_wraps() {
        // 200 + 9 + 50 + 9 = 268 -> 12
        let f = frame(200, 9, 50, 9);
        assert_eq!(f.checksum(), 12);
        assert!(f.verify(ChecksumMode::Strict).is_ok());
        assert!(f.verify(ChecksumMode::Tolerant).is_ok());
    }

    #[test]
    fn test_checksum_off_by_one_tolerated() {
        // Data sum 94, checksum 93
        let f = SensorFrame::from_bytes([60, 2, 25, 7, 93]);

        assert!(f.verify(ChecksumMode::Tolerant).is_ok());
        assert_eq!(
            f.verify(ChecksumMode::Strict),
            Err(SensorError::Checksum {
                sum: 94,
                checksum: 93
            })
        );
    }

    #[test]
    fn test_checksum_too_low_rejected() {
        // Data sum 94, checksum 92
        let f = SensorFrame::from_bytes([60, 2, 25, 7, 92]);

        assert_eq!(
            f.decode(ChecksumMode::Tolerant),
            Err(SensorError::Checksum {
                sum: 94,
                checksum: 92
            })
        );
    }

    #[test]
    fn test_checksum_above_sum_accepted_when_tolerant() {
        let f = SensorFrame::from_bytes([60, 2, 25, 7, 200]);

        assert!(f.verify(ChecksumMode::Tolerant).is_ok());
        assert!(f.verify(ChecksumMode::Strict).is_err());
    }
}
