//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in canopy-core, written against the canopy-hal pin and ADC traits:
//!
//! - Sensors (DHT11 single-wire climate sensor, capacitive soil probe)
//! - Indicators (LED level bank, fault LED)

#![no_std]
#![deny(unsafe_code)]

pub mod indicator;
pub mod sensor;
