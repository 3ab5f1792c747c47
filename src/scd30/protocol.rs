//! # SCD30 Protocol Constants and Types
//!
//! Core protocol definitions for the Sensirion SCD30 command set.

/// Fixed 7-bit I2C address of the SCD30
pub const SCD30_I2C_ADDRESS: u8 = 0x61;

/// Bytes per wire word: 2 data bytes (big-endian) + 1 CRC byte
pub const WORD_SIZE: usize = 3;

/// Bytes in a single register read response
pub const REGISTER_READ_SIZE: usize = WORD_SIZE;

/// Words in a measurement frame (two per float, three floats)
pub const MEASUREMENT_WORDS: usize = 6;

/// Bytes in a measurement read response
pub const MEASUREMENT_FRAME_SIZE: usize = MEASUREMENT_WORDS * WORD_SIZE;

/// Measurement interval domain in seconds (inclusive)
pub const MEASUREMENT_INTERVAL_MIN_S: u16 = 2;
pub const MEASUREMENT_INTERVAL_MAX_S: u16 = 1800;

/// Ambient pressure domain in mbar (inclusive); 0 disables compensation
pub const AMBIENT_PRESSURE_MIN_MBAR: u16 = 700;
pub const AMBIENT_PRESSURE_MAX_MBAR: u16 = 1400;

/// Named sensor commands with their fixed 16-bit addresses
///
/// The command set is closed; addresses are protocol constants defined by
/// the vendor interface description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Start continuous measurement, payload is ambient pressure in mbar
    TriggerContinuousMeasurement,
    StopContinuousMeasurement,
    /// Measurement interval in seconds
    MeasurementInterval,
    DataReadyStatus,
    /// Read one 18-byte measurement frame
    ReadMeasurement,
    AutomaticSelfCalibration,
    /// Forced recalibration reference in ppm
    ForcedRecalibrationValue,
    /// Temperature offset in units of 0.01 degC
    TemperatureOffset,
    /// Altitude compensation in meters above sea level
    AltitudeCompensation,
    FirmwareVersion,
    SoftReset,
}

/// Payload shape of a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Write-only command, no payload
    Command,
    /// Write takes a u16 payload; the current value reads back as one word
    WriteU16,
    /// Read-only, returns one word
    ReadU16,
    /// Read-only, returns the 6-word measurement frame
    ReadTriple,
}

impl Register {
    /// The 16-bit command address transmitted big-endian on the wire
    pub const fn address(self) -> u16 {
        match self {
            Register::TriggerContinuousMeasurement => 0x0010,
            Register::StopContinuousMeasurement => 0x0104,
            Register::MeasurementInterval => 0x4600,
            Register::DataReadyStatus => 0x0202,
            Register::ReadMeasurement => 0x0300,
            Register::AutomaticSelfCalibration => 0x5306,
            Register::ForcedRecalibrationValue => 0x5204,
            Register::TemperatureOffset => 0x5403,
            Register::AltitudeCompensation => 0x5102,
            Register::FirmwareVersion => 0xD100,
            Register::SoftReset => 0xD304,
        }
    }

    pub const fn access(self) -> Access {
        match self {
            Register::TriggerContinuousMeasurement => Access::WriteU16,
            Register::StopContinuousMeasurement => Access::Command,
            Register::MeasurementInterval => Access::WriteU16,
            Register::DataReadyStatus => Access::ReadU16,
            Register::ReadMeasurement => Access::ReadTriple,
            Register::AutomaticSelfCalibration => Access::WriteU16,
            Register::ForcedRecalibrationValue => Access::WriteU16,
            Register::TemperatureOffset => Access::WriteU16,
            Register::AltitudeCompensation => Access::WriteU16,
            Register::FirmwareVersion => Access::ReadU16,
            Register::SoftReset => Access::Command,
        }
    }
}

impl Access {
    /// Whether a single-word read is valid for this register
    pub const fn readable(self) -> bool {
        matches!(self, Access::ReadU16 | Access::WriteU16)
    }

    /// Whether a write carries a u16 payload
    pub const fn takes_payload(self) -> bool {
        matches!(self, Access::WriteU16)
    }
}

/// One decoded sensor reading
///
/// Produced fresh per measurement read; the driver keeps no copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// CO2 concentration in ppm
    pub co2_ppm: f32,

    /// Temperature in degC
    pub temperature_celsius: f32,

    /// Relative humidity in %RH
    pub relative_humidity: f32,
}
