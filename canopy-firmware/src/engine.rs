//! TensorFlow Lite Micro binding
//!
//! The interpreter lives in the prebuilt `tflm_shim` static library, which
//! keeps one interpreter per slot. Each slot gets its own caller-provided
//! arena; the shim never allocates.

use canopy_core::inference::QuantParams;
use canopy_core::traits::{ElementType, EngineError, InferenceEngine, TensorInfo, MAX_DIMS};

/// Tensor view filled in by the shim
#[repr(C)]
#[derive(Clone, Copy)]
struct RawTensor {
    type_code: i32,
    scale: f32,
    zero_point: i32,
    dims_len: i32,
    dims: [i32; MAX_DIMS],
    data: *mut u8,
    bytes: usize,
}

impl RawTensor {
    const EMPTY: Self = Self {
        type_code: 0,
        scale: 0.0,
        zero_point: 0,
        dims_len: 0,
        dims: [0; MAX_DIMS],
        data: core::ptr::null_mut(),
        bytes: 0,
    };

    fn info(&self) -> TensorInfo {
        let len = (self.dims_len.max(0) as usize).min(MAX_DIMS);
        let mut dims = [0usize; MAX_DIMS];
        for (d, &raw) in dims.iter_mut().zip(&self.dims[..len]) {
            *d = raw.max(0) as usize;
        }

        TensorInfo::new(
            element_type(self.type_code),
            QuantParams::new(self.scale, self.zero_point),
            &dims[..len],
        )
    }
}

extern "C" {
    /// Parse the model and allocate tensors into `arena`; 0 on success
    fn canopy_tflm_init(
        slot: u8,
        model: *const u8,
        model_len: usize,
        arena: *mut u8,
        arena_len: usize,
    ) -> i32;
    fn canopy_tflm_input(slot: u8, index: u32, out: *mut RawTensor) -> i32;
    fn canopy_tflm_output(slot: u8, index: u32, out: *mut RawTensor) -> i32;
    fn canopy_tflm_invoke(slot: u8) -> i32;
}

/// Map a TfLiteType code
fn element_type(code: i32) -> ElementType {
    match code {
        1 => ElementType::Float32,
        2 => ElementType::Int32,
        3 => ElementType::UInt8,
        7 => ElementType::Int16,
        9 => ElementType::Int8,
        other => ElementType::Other(other.clamp(0, u8::MAX as i32) as u8),
    }
}

/// Interpreter slot in the shim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Slot {
    Fan = 0,
    Pump = 1,
}

/// One loaded model with its arena
pub struct TflmEngine {
    slot: Slot,
    input: RawTensor,
    output: RawTensor,
    input_info: TensorInfo,
    output_info: TensorInfo,
    /// Tensor memory; `input.data` and `output.data` point into it
    _arena: &'static mut [u8],
}

impl TflmEngine {
    /// Load `model` into `slot`, allocating tensors in `arena`
    ///
    /// Each slot must be loaded at most once.
    pub fn new(slot: Slot, model: &'static [u8], arena: &'static mut [u8]) -> Result<Self, EngineError> {
        // SAFETY: model and arena are 'static and the arena is exclusively
        // borrowed for the lifetime of the engine.
        let status = unsafe {
            canopy_tflm_init(
                slot as u8,
                model.as_ptr(),
                model.len(),
                arena.as_mut_ptr(),
                arena.len(),
            )
        };
        if status != 0 {
            return Err(EngineError::Allocation);
        }

        let mut input = RawTensor::EMPTY;
        let mut output = RawTensor::EMPTY;
        // SAFETY: out pointers reference live stack values of the declared layout
        let found = unsafe {
            canopy_tflm_input(slot as u8, 0, &mut input) == 0
                && canopy_tflm_output(slot as u8, 0, &mut output) == 0
        };
        if !found || input.data.is_null() || output.data.is_null() {
            return Err(EngineError::MissingTensor);
        }

        Ok(Self {
            slot,
            input_info: input.info(),
            output_info: output.info(),
            input,
            output,
            _arena: arena,
        })
    }
}

impl InferenceEngine for TflmEngine {
    fn input_info(&self) -> TensorInfo {
        self.input_info.clone()
    }

    fn output_info(&self) -> TensorInfo {
        self.output_info.clone()
    }

    fn input_bytes(&mut self) -> &mut [u8] {
        // SAFETY: the shim reported this region inside our arena, which we
        // borrow exclusively; the &mut self receiver prevents aliasing.
        unsafe { core::slice::from_raw_parts_mut(self.input.data, self.input.bytes) }
    }

    fn invoke(&mut self) -> Result<(), EngineError> {
        // SAFETY: the slot was initialized in `new`
        match unsafe { canopy_tflm_invoke(self.slot as u8) } {
            0 => Ok(()),
            _ => Err(EngineError::Invocation),
        }
    }

    fn output_bytes(&self) -> &[u8] {
        // SAFETY: as for input_bytes; shared access through &self
        unsafe { core::slice::from_raw_parts(self.output.data, self.output.bytes) }
    }
}
