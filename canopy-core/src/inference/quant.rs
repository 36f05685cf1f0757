//! Affine quantization math
//!
//! `real = (q - zero_point) * scale`, and the inverse
//! `q = round(real / scale) + zero_point`, saturated to the storage type.

/// Affine quantization parameters of one tensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuantParams {
    pub scale: f32,
    pub zero_point: i32,
}

impl QuantParams {
    /// Parameters reported for unquantized tensors
    pub const NONE: Self = Self {
        scale: 0.0,
        zero_point: 0,
    };

    pub const fn new(scale: f32, zero_point: i32) -> Self {
        Self { scale, zero_point }
    }

    /// Scale is usable for division
    pub fn is_valid(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }
}

/// Round half away from zero
///
/// `x - trunc(x)` is exact in f32, so the half-way comparison is too.
/// Values outside the i32 range saturate, NaN maps to zero.
fn round_to_i32(x: f32) -> i32 {
    let truncated = x as i32;
    let frac = x - truncated as f32;

    if frac >= 0.5 {
        truncated.saturating_add(1)
    } else if frac <= -0.5 {
        truncated.saturating_sub(1)
    } else {
        truncated
    }
}

fn quantize(value: f32, params: QuantParams, min: i32, max: i32) -> i32 {
    round_to_i32(value / params.scale)
        .saturating_add(params.zero_point)
        .clamp(min, max)
}

/// Quantize to a signed 8-bit value, clamped to [-128, 127]
pub fn quantize_i8(value: f32, params: QuantParams) -> i8 {
    quantize(value, params, i8::MIN as i32, i8::MAX as i32) as i8
}

/// Quantize to an unsigned 8-bit value, clamped to [0, 255]
pub fn quantize_u8(value: f32, params: QuantParams) -> u8 {
    quantize(value, params, u8::MIN as i32, u8::MAX as i32) as u8
}

/// Map a stored integer back to a real value
pub fn dequantize(raw: i32, params: QuantParams) -> f32 {
    raw.saturating_sub(params.zero_point) as f32 * params.scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_i32(0.4), 0);
        assert_eq!(round_to_i32(0.5), 1);
        assert_eq!(round_to_i32(1.5), 2);
        assert_eq!(round_to_i32(-0.5), -1);
        assert_eq!(round_to_i32(-1.49), -1);
        assert_eq!(round_to_i32(-2.5), -3);
        assert_eq!(round_to_i32(f32::NAN), 0);
        assert_eq!(round_to_i32(1e12), i32::MAX);
    }

    #[test]
    fn test_quantize_i8() {
        let p = QuantParams::new(0.5, -10);

        assert_eq!(quantize_i8(0.0, p), -10);
        assert_eq!(quantize_i8(25.0, p), 40);
        assert_eq!(quantize_i8(-3.0, p), -16);
    }

    #[test]
    fn test_quantize_i8_clamps() {
        let p = QuantParams::new(0.5, -10);

        assert_eq!(quantize_i8(1000.0, p), 127);
        assert_eq!(quantize_i8(-1000.0, p), -128);
    }

    #[test]
    fn test_quantize_u8() {
        let p = QuantParams::new(0.4, 128);

        assert_eq!(quantize_u8(0.0, p), 128);
        assert_eq!(quantize_u8(10.0, p), 153);
        assert_eq!(quantize_u8(-10.0, p), 103);
    }

    #[test]
    fn test_quantize_u8_clamps() {
        let p = QuantParams::new(0.4, 128);

        assert_eq!(quantize_u8(500.0, p), 255);
        assert_eq!(quantize_u8(-500.0, p), 0);
    }

    #[test]
    fn test_dequantize() {
        let p = QuantParams::new(1.0 / 256.0, -128);

        assert_eq!(dequantize(-128, p), 0.0);
        assert_eq!(dequantize(127, p), 255.0 / 256.0);
    }

    #[test]
    fn test_validity() {
        assert!(QuantParams::new(0.1, 0).is_valid());
        assert!(!QuantParams::NONE.is_valid());
        assert!(!QuantParams::new(-0.1, 0).is_valid());
        assert!(!QuantParams::new(f32::INFINITY, 0).is_valid());
    }
}
