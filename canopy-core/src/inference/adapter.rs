//! Inference adapter
//!
//! Runs one feature vector through an engine without the caller knowing the
//! model's tensor representation. Any failure aborts only the current call;
//! nothing is retried.

use heapless::Vec;

use super::decision::{argmax, ActuationLevel};
use super::quant::QuantParams;
use super::tensor::TensorKind;
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::traits::{ElementType, EngineError, InferenceEngine};

/// Score buffer capacity
pub const MAX_OUTPUT_CLASSES: usize = 16;

/// Dequantized scores, one per output class
pub type ScoreVector = Vec<f32, MAX_OUTPUT_CLASSES>;

/// Errors that abort one inference
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InferenceError {
    /// Tensor is neither float32 nor 8-bit quantized
    UnsupportedTensorKind(ElementType),
    /// Quantized tensor carries an unusable scale
    InvalidQuantization(QuantParams),
    /// Input tensor does not take exactly one feature vector
    ShapeMismatch { expected: usize, actual: usize },
    /// Tensor buffer shorter than its metadata implies
    BufferTooSmall { needed: usize, available: usize },
    /// Output tensor has no classes
    EmptyOutput,
    /// The engine failed
    Engine(EngineError),
}

impl From<EngineError> for InferenceError {
    fn from(e: EngineError) -> Self {
        InferenceError::Engine(e)
    }
}

/// Result of one successful inference
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inference {
    /// Level to actuate
    pub level: ActuationLevel,
    /// Winning class index before clamping
    pub class: usize,
    /// All decoded scores
    pub scores: ScoreVector,
}

/// Run one inference and decide the level
pub fn infer<E>(engine: &mut E, features: &FeatureVector) -> Result<Inference, InferenceError>
where
    E: InferenceEngine + ?Sized,
{
    let mut scores = ScoreVector::new();
    let class = infer_into(engine, features, &mut scores)?;

    Ok(Inference {
        level: ActuationLevel::from_index(class),
        class,
        scores,
    })
}

/// Run one inference into a caller-provided score buffer
///
/// Returns the winning class index. `scores` holds at most `N` entries even
/// if the model declares more classes.
pub fn infer_into<E, const N: usize>(
    engine: &mut E,
    features: &FeatureVector,
    scores: &mut Vec<f32, N>,
) -> Result<usize, InferenceError>
where
    E: InferenceEngine + ?Sized,
{
    // Encode
    let input = engine.input_info();
    let input_kind = TensorKind::from_info(&input)?;
    let count = input.element_count();
    if count != FEATURE_COUNT {
        return Err(InferenceError::ShapeMismatch {
            expected: FEATURE_COUNT,
            actual: count,
        });
    }
    input_kind.encode(features.as_array(), engine.input_bytes())?;

    // Invoke
    engine.invoke()?;

    // Decode
    let output = engine.output_info();
    let output_kind = TensorKind::from_info(&output)?;
    output_kind.decode(engine.output_bytes(), output.classes(), scores)?;

    // Decide
    argmax(scores).ok_or(InferenceError::EmptyOutput)
}
