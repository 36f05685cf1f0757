//! Embedded model blobs
//!
//! TFLM reads the flatbuffer in place and requires 16-byte alignment.

#[repr(C, align(16))]
struct Aligned<const N: usize>([u8; N]);

const FAN_LEN: usize = include_bytes!("../models/fan_model.tflite").len();
const PUMP_LEN: usize = include_bytes!("../models/pump_model.tflite").len();

static FAN_MODEL: Aligned<FAN_LEN> = Aligned(*include_bytes!("../models/fan_model.tflite"));
static PUMP_MODEL: Aligned<PUMP_LEN> = Aligned(*include_bytes!("../models/pump_model.tflite"));

pub fn fan_model() -> &'static [u8] {
    &FAN_MODEL.0
}

pub fn pump_model() -> &'static [u8] {
    &PUMP_MODEL.0
}
