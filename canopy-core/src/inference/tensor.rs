//! Tensor numeric kinds
//!
//! A tensor's representation is fixed for the lifetime of a loaded model,
//! so the kind is resolved once per tensor from its metadata and every
//! element conversion dispatches on that single value.

use heapless::Vec;

use super::adapter::InferenceError;
use super::quant::{dequantize, quantize_i8, quantize_u8, QuantParams};
use crate::traits::{ElementType, TensorInfo};

/// Supported tensor representations
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TensorKind {
    /// IEEE-754 single precision, native byte order
    Float32,
    /// Signed 8-bit affine quantized
    Int8(QuantParams),
    /// Unsigned 8-bit affine quantized
    UInt8(QuantParams),
}

impl TensorKind {
    /// Resolve the kind from tensor metadata
    ///
    /// Quantization parameters always come from the tensor itself.
    pub fn from_info(info: &TensorInfo) -> Result<Self, InferenceError> {
        let kind = match info.element_type {
            ElementType::Float32 => return Ok(TensorKind::Float32),
            ElementType::Int8 => TensorKind::Int8(info.quant),
            ElementType::UInt8 => TensorKind::UInt8(info.quant),
            other => return Err(InferenceError::UnsupportedTensorKind(other)),
        };

        if !info.quant.is_valid() {
            return Err(InferenceError::InvalidQuantization(info.quant));
        }

        Ok(kind)
    }

    /// Bytes per element
    pub const fn element_size(&self) -> usize {
        match self {
            TensorKind::Float32 => 4,
            TensorKind::Int8(_) | TensorKind::UInt8(_) => 1,
        }
    }

    /// Write `values` into a tensor buffer
    pub fn encode(&self, values: &[f32], out: &mut [u8]) -> Result<(), InferenceError> {
        let size = self.element_size();
        let needed = values.len() * size;
        if out.len() < needed {
            return Err(InferenceError::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }

        match *self {
            TensorKind::Float32 => {
                for (chunk, &v) in out.chunks_exact_mut(4).zip(values) {
                    chunk.copy_from_slice(&v.to_ne_bytes());
                }
            }
            TensorKind::Int8(params) => {
                for (byte, &v) in out.iter_mut().zip(values) {
                    *byte = quantize_i8(v, params) as u8;
                }
            }
            TensorKind::UInt8(params) => {
                for (byte, &v) in out.iter_mut().zip(values) {
                    *byte = quantize_u8(v, params);
                }
            }
        }

        Ok(())
    }

    /// Read up to `classes` scores from a tensor buffer
    ///
    /// `out` is cleared first. The number of scores is the lesser of
    /// `classes` and the capacity `N`.
    pub fn decode<const N: usize>(
        &self,
        raw: &[u8],
        classes: usize,
        out: &mut Vec<f32, N>,
    ) -> Result<(), InferenceError> {
        out.clear();

        let count = classes.min(N);
        let size = self.element_size();
        let needed = count * size;
        if raw.len() < needed {
            return Err(InferenceError::BufferTooSmall {
                needed,
                available: raw.len(),
            });
        }
        let raw = &raw[..needed];

        // count <= N, so the pushes below cannot fail
        match *self {
            TensorKind::Float32 => {
                for chunk in raw.chunks_exact(4) {
                    let v = f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                    let _ = out.push(v);
                }
            }
            TensorKind::Int8(params) => {
                for &byte in raw {
                    let _ = out.push(dequantize(byte as i8 as i32, params));
                }
            }
            TensorKind::UInt8(params) => {
                for &byte in raw {
                    let _ = out.push(dequantize(byte as i32, params));
                }
            }
        }

        Ok(())
    }
}
