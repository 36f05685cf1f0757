//! RP2040-specific HAL for the greenhouse firmware
//!
//! This crate provides RP2040 implementations of the shared `canopy-hal`
//! traits on top of embassy-rp:
//!
//! - Bidirectional and output GPIO wrappers
//! - Blocking ADC channel reader and channel/GPIO mapping

#![no_std]

pub mod adc;
pub mod gpio;

pub use adc::{AdcChannel, RpAdcReader};
pub use gpio::{RpFlexPin, RpOutputPin};
