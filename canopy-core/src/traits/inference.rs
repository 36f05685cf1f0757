//! Inference engine boundary
//!
//! The neural network runtime is an external collaborator. Whatever runs
//! the model only has to expose its first input and first output tensor as
//! metadata plus raw byte buffers, and run the graph on demand. Loading the
//! model and allocating tensors into a caller-owned arena happen when the
//! engine is constructed, which is engine-specific.

use heapless::Vec;

use crate::inference::QuantParams;

/// Maximum tensor rank tracked in [`TensorInfo`]
pub const MAX_DIMS: usize = 4;

/// Tensor shape
pub type Shape = Vec<usize, MAX_DIMS>;

/// Element type as reported by the engine
///
/// Only `Float32`, `Int8` and `UInt8` are supported by the adapter; the other
/// variants exist so the engine can report what a model really contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElementType {
    Float32,
    Int8,
    UInt8,
    Int16,
    Int32,
    /// Any other engine type code
    Other(u8),
}

/// Tensor metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TensorInfo {
    /// Element representation
    pub element_type: ElementType,
    /// Affine quantization (ignored for float tensors)
    pub quant: QuantParams,
    /// Dimensions, outermost first
    pub shape: Shape,
}

impl TensorInfo {
    /// Create tensor metadata from a shape slice
    ///
    /// Dimensions beyond [`MAX_DIMS`] are dropped.
    pub fn new(element_type: ElementType, quant: QuantParams, dims: &[usize]) -> Self {
        let mut shape = Shape::new();
        for &d in dims.iter().take(MAX_DIMS) {
            let _ = shape.push(d);
        }
        Self {
            element_type,
            quant,
            shape,
        }
    }

    /// Total number of elements
    pub fn element_count(&self) -> usize {
        if self.shape.is_empty() {
            return 0;
        }
        self.shape.iter().product()
    }

    /// Number of output classes (innermost dimension)
    ///
    /// For a `[1, N]` classifier output this is `N`.
    pub fn classes(&self) -> usize {
        self.shape.last().copied().unwrap_or(0)
    }
}

/// Errors reported by the engine itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Model rejected or tensors did not fit in the arena
    Allocation,
    /// Running the graph failed
    Invocation,
    /// The model has no tensor at the requested index
    MissingTensor,
}

/// Loaded model with allocated tensors
pub trait InferenceEngine {
    /// Metadata of the input tensor
    fn input_info(&self) -> TensorInfo;

    /// Metadata of the output tensor
    fn output_info(&self) -> TensorInfo;

    /// Backing buffer of the input tensor
    fn input_bytes(&mut self) -> &mut [u8];

    /// Run the graph on the current input
    fn invoke(&mut self) -> Result<(), EngineError>;

    /// Backing buffer of the output tensor
    fn output_bytes(&self) -> &[u8];
}
