//! # CRC-8 Implementation
//!
//! Sensirion CRC-8 checksum calculation for SCD30 wire words.
//!
//! **Polynomial**: 0x31 (x^8 + x^5 + x^4 + 1)
//! **Initial Value**: 0xFF
//! **Reflection**: none, **Final XOR**: none
//!
//! Every 16-bit word exchanged with the sensor carries this checksum,
//! computed over the word's two bytes most-significant byte first.

/// Sensirion CRC-8 polynomial
const CRC8_POLY: u8 = 0x31;

/// CRC-8 initial value
const CRC8_INIT: u8 = 0xFF;

/// Precomputed CRC8 lookup table for fast calculation
const CRC8_TABLE: [u8; 256] = generate_crc8_table();

/// Generate CRC8 lookup table at compile time
const fn generate_crc8_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u8;
        let mut j = 0;

        while j < 8 {
            if (crc & 0x80) != 0 {
                crc = (crc << 1) ^ CRC8_POLY;
            } else {
                crc <<= 1;
            }
            j += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Calculate the Sensirion CRC-8 of a 16-bit word using the lookup table
///
/// The word is processed most-significant byte first, matching the order the
/// sensor transmits data bytes on the wire.
///
/// # Arguments
///
/// * `value` - 16-bit word to checksum
///
/// # Returns
///
/// * `u8` - Calculated CRC8 checksum
///
/// # Examples
///
/// ```
/// use scd30_driver::scd30::crc::crc8;
///
/// assert_eq!(crc8(0x0000), 0x81);
/// assert_eq!(crc8(0xBEEF), 0x92);
/// ```
pub fn crc8(value: u16) -> u8 {
    let mut crc = CRC8_INIT;

    for byte in value.to_be_bytes() {
        crc = CRC8_TABLE[(crc ^ byte) as usize];
    }

    crc
}

/// Calculate the Sensirion CRC-8 using the direct algorithm (slow, for verification)
///
/// This implementation is slower but easier to verify against the sensor
/// datasheet. Used primarily for testing the lookup table implementation.
#[allow(dead_code)]
fn crc8_slow(value: u16) -> u8 {
    let mut crc = CRC8_INIT;

    for byte in value.to_be_bytes() {
        crc ^= byte;

        for _ in 0..8 {
            if (crc & 0x80) != 0 {
                crc = (crc << 1) ^ CRC8_POLY;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_zero_word() {
        // Reference vector: all-zero word
        assert_eq!(crc8(0x0000), 0x81);
    }

    #[test]
    fn test_crc8_datasheet_vector() {
        // Test vector from the Sensirion interface description
        assert_eq!(crc8(0xBEEF), 0x92);
    }

    #[test]
    fn test_crc8_lookup_table_matches_slow() {
        // Verify lookup table implementation matches slow implementation
        let test_values = [
            0x0000u16, 0x0001, 0x00FF, 0xFF00, 0xFFFF, 0xBEEF, 0x0010, 0xD304, 0x4600, 0x1234,
        ];

        for &value in test_values.iter() {
            assert_eq!(
                crc8(value),
                crc8_slow(value),
                "CRC mismatch for value: 0x{:04X}",
                value
            );
        }
    }

    #[test]
    fn test_crc8_deterministic() {
        let first = crc8(0x0F0F);
        let second = crc8(0x0F0F);
        assert_eq!(first, second);
    }

    #[test]
    fn test_crc8_byte_order_matters() {
        // MSB-first processing: swapped bytes must not produce the same CRC
        assert_ne!(crc8(0xBEEF), crc8(0xEFBE));
    }

    #[test]
    fn test_crc8_changes_with_value() {
        assert_ne!(crc8(0x0010), crc8(0x0011));
    }
}
