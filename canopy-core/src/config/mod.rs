//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills them from
//! `canopy.toml` at build time.

pub mod calibration;
pub mod types;

pub use calibration::*;
pub use types::*;
