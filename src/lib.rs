//! # SCD30 Driver Library
//!
//! Driver for the Sensirion SCD30 CO2/temperature/humidity sensor module.
//!
//! This library implements the sensor's I2C wire protocol: the fixed command
//! register map, the CRC-8 check applied to every 16-bit word on the bus, and
//! the word-swap reconstruction of the 32-bit float measurements. The physical
//! bus is supplied by the caller through the [`bus::I2cBus`] trait, which
//! keeps the protocol layer testable against replayed byte sequences.

pub mod bus;
pub mod config;
pub mod error;
pub mod scd30;

pub use bus::I2cBus;
pub use config::SensorSettings;
pub use error::{Result, Scd30Error};
pub use scd30::driver::Scd30;
pub use scd30::protocol::Measurement;
