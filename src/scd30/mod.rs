//! # SCD30 Protocol Module
//!
//! Implementation of the Sensirion SCD30 I2C command protocol.
//!
//! This module handles:
//! - The fixed command register map (addresses and payload shapes)
//! - CRC-8 checksum calculation over every 16-bit word on the wire
//! - Register read/write transaction encoding and decoding
//! - Measurement frame decoding (word-swapped IEEE-754 floats)
//! - The high-level driver facade over a caller-supplied bus

pub mod codec;
pub mod crc;
pub mod driver;
pub mod measurement;
pub mod protocol;
