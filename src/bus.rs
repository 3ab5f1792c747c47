//! # Bus Transport
//!
//! Trait abstraction for the I2C bus the sensor is attached to.
//!
//! The driver never opens the bus itself; the caller injects any type
//! implementing [`I2cBus`]. This keeps the protocol layer independent of the
//! platform's I2C plumbing and testable with a mock that replays fixed byte
//! sequences.
//!
//! The model is a blocking, transaction-oriented bus: a `write` covers
//! begin-transaction, payload bytes and end-transaction in one call, and a
//! `read` requests `buffer.len()` bytes and reports how many were actually
//! available. The driver assumes exclusive, serialized access; callers
//! sharing a bus across threads must serialize it externally.

use std::io;

/// Trait for blocking I2C bus operations
pub trait I2cBus {
    /// Write all bytes in one transaction to the given 7-bit address.
    ///
    /// A non-success transaction completion must be reported as `Err`; there
    /// is no partial-write distinction.
    fn write(&mut self, address: u8, bytes: &[u8]) -> io::Result<()>;

    /// Request `buffer.len()` bytes from the given 7-bit address.
    ///
    /// Fills `buffer` with as many bytes as the device made available and
    /// returns that count, which may be less than requested.
    fn read(&mut self, address: u8, buffer: &mut [u8]) -> io::Result<usize>;
}
