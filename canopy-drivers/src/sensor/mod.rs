//! Sensor drivers

pub mod dht11;
pub mod soil;

pub use dht11::Dht11;
pub use soil::SoilSampler;
