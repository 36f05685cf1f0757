//! Indicator drivers

pub mod fault;
pub mod led_bank;

pub use fault::FaultLed;
pub use led_bank::LedBank;
