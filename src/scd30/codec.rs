//! # Transaction Codec
//!
//! Encodes register reads and writes into SCD30 wire transactions and
//! decodes the responses, verifying the per-word CRC-8.
//!
//! Wire formats:
//! - Command, no payload: `addr_hi, addr_lo`
//! - Command, u16 payload: `addr_hi, addr_lo, val_hi, val_lo, crc8(val)`
//! - Register read: write `addr_hi, addr_lo`, then read back
//!   `val_hi, val_lo, crc8(val)` (3 bytes)
//!
//! The codec is stateless and performs no retries; every failure is surfaced
//! to the caller as a typed error.

use tracing::{debug, trace};

use super::crc::crc8;
use super::protocol::{Register, REGISTER_READ_SIZE, SCD30_I2C_ADDRESS, WORD_SIZE};
use crate::bus::I2cBus;
use crate::error::{Result, Scd30Error};

/// Encode a payload-less command into its 2-byte wire form
pub fn encode_command(register: Register) -> [u8; 2] {
    register.address().to_be_bytes()
}

/// Encode a register write with payload into its 5-byte wire form
///
/// # Returns
///
/// * `[u8; 5]` - `addr_hi, addr_lo, val_hi, val_lo, crc8(val)`
pub fn encode_write_payload(register: Register, value: u16) -> [u8; 5] {
    let [addr_hi, addr_lo] = register.address().to_be_bytes();
    let [val_hi, val_lo] = value.to_be_bytes();
    [addr_hi, addr_lo, val_hi, val_lo, crc8(value)]
}

/// Decode one wire word (2 data bytes big-endian + 1 CRC byte)
///
/// # Errors
///
/// Returns [`Scd30Error::CrcMismatch`] if the received CRC byte disagrees
/// with the CRC-8 computed over the two data bytes.
pub fn decode_word(bytes: &[u8; WORD_SIZE]) -> Result<u16> {
    let value = u16::from_be_bytes([bytes[0], bytes[1]]);
    let expected = crc8(value);
    let received = bytes[2];

    if expected != received {
        return Err(Scd30Error::CrcMismatch { expected, received });
    }

    Ok(value)
}

/// Transmit a payload-less command
///
/// # Errors
///
/// Returns [`Scd30Error::Transport`] if the bus reports a failed transaction.
pub fn write_command<B: I2cBus>(bus: &mut B, register: Register) -> Result<()> {
    debug_assert!(!register.access().takes_payload());

    let frame = encode_command(register);
    bus.write(SCD30_I2C_ADDRESS, &frame)
        .map_err(|e| Scd30Error::Transport(format!("command 0x{:04X}: {}", register.address(), e)))?;

    trace!("sent command 0x{:04X}", register.address());
    Ok(())
}

/// Transmit a register write with a u16 payload
///
/// Semantic bounds on the payload (measurement interval, ambient pressure)
/// are a caller-side precondition; the codec only frames and checksums.
///
/// # Errors
///
/// Returns [`Scd30Error::Transport`] if the bus reports a failed transaction.
pub fn write_register<B: I2cBus>(bus: &mut B, register: Register, value: u16) -> Result<()> {
    debug_assert!(register.access().takes_payload());

    let frame = encode_write_payload(register, value);
    bus.write(SCD30_I2C_ADDRESS, &frame)
        .map_err(|e| Scd30Error::Transport(format!("write 0x{:04X}: {}", register.address(), e)))?;

    debug!("wrote register 0x{:04X} = {}", register.address(), value);
    Ok(())
}

/// Read one 16-bit value from a register
///
/// Transmits the register address as a zero-payload write, then requests
/// exactly 3 bytes back and verifies the CRC.
///
/// # Errors
///
/// * [`Scd30Error::Transport`] - the bus reported a failed transaction
/// * [`Scd30Error::ShortRead`] - fewer than 3 bytes were available
/// * [`Scd30Error::CrcMismatch`] - the response word failed its CRC check
pub fn read_register<B: I2cBus>(bus: &mut B, register: Register) -> Result<u16> {
    debug_assert!(register.access().readable());

    write_command_for_read(bus, register)?;

    let mut response = [0u8; REGISTER_READ_SIZE];
    let available = bus
        .read(SCD30_I2C_ADDRESS, &mut response)
        .map_err(|e| Scd30Error::Transport(format!("read 0x{:04X}: {}", register.address(), e)))?;

    if available < REGISTER_READ_SIZE {
        return Err(Scd30Error::ShortRead {
            expected: REGISTER_READ_SIZE,
            actual: available,
        });
    }

    let value = decode_word(&response)?;
    debug!("read register 0x{:04X} = {}", register.address(), value);
    Ok(value)
}

/// Address a register for a subsequent read phase
///
/// Shared by single-word reads and the measurement frame read, which
/// addresses a `ReadTriple` register the same way.
pub(crate) fn write_command_for_read<B: I2cBus>(bus: &mut B, register: Register) -> Result<()> {
    let frame = encode_command(register);
    bus.write(SCD30_I2C_ADDRESS, &frame)
        .map_err(|e| Scd30Error::Transport(format!("address 0x{:04X}: {}", register.address(), e)))
}
