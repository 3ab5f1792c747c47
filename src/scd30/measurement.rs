//! # Measurement Frame Decoder
//!
//! Decodes the sensor's 18-byte measurement response into the CO2,
//! temperature and humidity floats.
//!
//! The frame is six wire words (2 data bytes big-endian + 1 CRC each). Each
//! float is carried by two consecutive words, high word first, so the
//! sensor's byte order is the big-endian IEEE-754 representation:
//! `high.msb, high.lsb, low.msb, low.lsb`. Every word's CRC is verified
//! before any float is assembled; a single bad CRC fails the whole read.

use tracing::debug;

use super::codec::{decode_word, write_command_for_read};
use super::protocol::{
    Measurement, Register, MEASUREMENT_FRAME_SIZE, MEASUREMENT_WORDS, SCD30_I2C_ADDRESS, WORD_SIZE,
};
use crate::bus::I2cBus;
use crate::error::{Result, Scd30Error};

/// Decode a complete 18-byte measurement frame
///
/// # Arguments
///
/// * `frame` - Raw response bytes, 6 words of `data_hi, data_lo, crc`
///
/// # Errors
///
/// Returns [`Scd30Error::CrcMismatch`] if any word fails its CRC check;
/// no partial measurement is produced.
pub fn decode_measurement_frame(frame: &[u8; MEASUREMENT_FRAME_SIZE]) -> Result<Measurement> {
    let mut words = [0u16; MEASUREMENT_WORDS];

    for (index, chunk) in frame.chunks_exact(WORD_SIZE).enumerate() {
        words[index] = decode_word(&[chunk[0], chunk[1], chunk[2]])?;
    }

    Ok(Measurement {
        co2_ppm: decode_float(words[0], words[1]),
        temperature_celsius: decode_float(words[2], words[3]),
        relative_humidity: decode_float(words[4], words[5]),
    })
}

/// Reassemble one float from its high and low wire words
///
/// The two words are the upper and lower halves of the big-endian IEEE-754
/// bit pattern, so placing the high word in the upper 16 bits recovers the
/// value independent of host byte order.
fn decode_float(high: u16, low: u16) -> f32 {
    f32::from_bits(((high as u32) << 16) | low as u32)
}

/// Read one measurement triple from the sensor
///
/// Issues the zero-payload read-measurement command, requests exactly 18
/// bytes and decodes them.
///
/// # Errors
///
/// * [`Scd30Error::Transport`] - the bus reported a failed transaction
/// * [`Scd30Error::ShortRead`] - fewer than 18 bytes were available
/// * [`Scd30Error::CrcMismatch`] - any word failed its CRC check
pub fn read_measurement<B: I2cBus>(bus: &mut B) -> Result<Measurement> {
    write_command_for_read(bus, Register::ReadMeasurement)?;

    let mut frame = [0u8; MEASUREMENT_FRAME_SIZE];
    let available = bus
        .read(SCD30_I2C_ADDRESS, &mut frame)
        .map_err(|e| Scd30Error::Transport(format!("measurement read: {}", e)))?;

    if available < MEASUREMENT_FRAME_SIZE {
        return Err(Scd30Error::ShortRead {
            expected: MEASUREMENT_FRAME_SIZE,
            actual: available,
        });
    }

    let measurement = decode_measurement_frame(&frame)?;
    debug!(
        "measurement: {:.1} ppm, {:.2} degC, {:.2} %RH",
        measurement.co2_ppm, measurement.temperature_celsius, measurement.relative_humidity
    );
    Ok(measurement)
}
