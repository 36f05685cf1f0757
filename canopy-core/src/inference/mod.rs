//! Quantization-aware inference adapter
//!
//! Feeds floating-point features to an [`InferenceEngine`] whatever numeric
//! representation its tensors use, and turns the output back into
//! floating-point scores and a discrete level.
//!
//! ```text
//! FeatureVector ──encode──▶ input bytes ──invoke──▶ output bytes ──decode──▶ scores ──argmax──▶ level
//! ```
//!
//! [`InferenceEngine`]: crate::traits::InferenceEngine

pub mod adapter;
pub mod decision;
pub mod quant;
pub mod tensor;

pub use adapter::{infer, infer_into, Inference, InferenceError, ScoreVector, MAX_OUTPUT_CLASSES};
pub use decision::{argmax, ActuationLevel, MAX_LEVEL};
pub use quant::{dequantize, quantize_i8, quantize_u8, QuantParams};
pub use tensor::TensorKind;
