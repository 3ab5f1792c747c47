//! # SCD30 Driver Facade
//!
//! High-level, blocking API over the transaction codec. Owns the
//! caller-supplied bus and exposes one method per sensor operation.
//!
//! Setters with sensor-defined domains (measurement interval, ambient
//! pressure) validate their argument before any bus transaction is issued.
//! The driver performs no retries and no locking; a caller sharing the bus
//! across threads must serialize access externally.

use std::thread;
use std::time::Duration;

use tracing::info;

use super::codec::{read_register, write_command, write_register};
use super::measurement;
use super::protocol::{
    Measurement, Register, AMBIENT_PRESSURE_MAX_MBAR, AMBIENT_PRESSURE_MIN_MBAR,
    MEASUREMENT_INTERVAL_MAX_S, MEASUREMENT_INTERVAL_MIN_S,
};
use crate::bus::I2cBus;
use crate::config::SensorSettings;
use crate::error::{Result, Scd30Error};

/// Recommended pause after a configuration write before the next transaction.
///
/// The sensor needs settling time between consecutive register writes. This
/// is a pacing convention of this driver layer, applied by
/// [`Scd30::apply_settings`]; the codec itself imposes no delay.
pub const SETTLE_TIME: Duration = Duration::from_millis(200);

/// SCD30 sensor handle
///
/// Wraps a bus implementing [`I2cBus`] and talks to the fixed device
/// address `0x61`.
pub struct Scd30<B: I2cBus> {
    bus: B,
}

impl<B: I2cBus> Scd30<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Hand the bus back to the caller
    pub fn release(self) -> B {
        self.bus
    }

    /// Start continuous measurement
    ///
    /// # Arguments
    ///
    /// * `ambient_pressure_mbar` - optional ambient pressure between 700 and
    ///   1400 mbar, 0 to disable pressure compensation
    ///
    /// # Errors
    ///
    /// Returns [`Scd30Error::Validation`] for a pressure outside the domain;
    /// no transaction is issued in that case.
    pub fn start_continuous_measurement(&mut self, ambient_pressure_mbar: u16) -> Result<()> {
        validate_ambient_pressure(ambient_pressure_mbar)?;
        write_register(
            &mut self.bus,
            Register::TriggerContinuousMeasurement,
            ambient_pressure_mbar,
        )
    }

    /// Stop continuous measurement
    pub fn stop_continuous_measurement(&mut self) -> Result<()> {
        write_command(&mut self.bus, Register::StopContinuousMeasurement)
    }

    /// Set the measurement interval in seconds (2 to 1800)
    ///
    /// # Errors
    ///
    /// Returns [`Scd30Error::Validation`] for an interval outside the domain;
    /// no transaction is issued in that case.
    pub fn set_measurement_interval(&mut self, seconds: u16) -> Result<()> {
        validate_measurement_interval(seconds)?;
        write_register(&mut self.bus, Register::MeasurementInterval, seconds)
    }

    /// Get the measurement interval in seconds
    pub fn measurement_interval(&mut self) -> Result<u16> {
        read_register(&mut self.bus, Register::MeasurementInterval)
    }

    /// Whether a measurement is ready to be read
    ///
    /// # Errors
    ///
    /// Returns [`Scd30Error::ProtocolViolation`] if the status word decodes
    /// to anything other than 0 or 1.
    pub fn data_ready(&mut self) -> Result<bool> {
        decode_flag(
            read_register(&mut self.bus, Register::DataReadyStatus)?,
            "data-ready status",
        )
    }

    /// Read one measurement triple (CO2 ppm, temperature degC, humidity %RH)
    pub fn read_measurement(&mut self) -> Result<Measurement> {
        measurement::read_measurement(&mut self.bus)
    }

    /// Enable or disable automatic self calibration
    pub fn set_automatic_self_calibration(&mut self, enabled: bool) -> Result<()> {
        write_register(
            &mut self.bus,
            Register::AutomaticSelfCalibration,
            enabled as u16,
        )
    }

    /// Whether automatic self calibration is enabled
    ///
    /// # Errors
    ///
    /// Returns [`Scd30Error::ProtocolViolation`] if the flag word decodes
    /// to anything other than 0 or 1.
    pub fn automatic_self_calibration(&mut self) -> Result<bool> {
        decode_flag(
            read_register(&mut self.bus, Register::AutomaticSelfCalibration)?,
            "automatic self calibration",
        )
    }

    /// Set the forced recalibration reference in ppm
    pub fn set_forced_recalibration_value(&mut self, ppm: u16) -> Result<()> {
        write_register(&mut self.bus, Register::ForcedRecalibrationValue, ppm)
    }

    /// Get the forced recalibration reference in ppm
    pub fn forced_recalibration_value(&mut self) -> Result<u16> {
        read_register(&mut self.bus, Register::ForcedRecalibrationValue)
    }

    /// Set the temperature offset in units of 0.01 degC
    ///
    /// The sensor persists this value in non-volatile memory.
    pub fn set_temperature_offset(&mut self, centi_celsius: u16) -> Result<()> {
        write_register(&mut self.bus, Register::TemperatureOffset, centi_celsius)
    }

    /// Get the temperature offset in units of 0.01 degC
    pub fn temperature_offset(&mut self) -> Result<u16> {
        read_register(&mut self.bus, Register::TemperatureOffset)
    }

    /// Set the altitude compensation in meters above sea level
    ///
    /// Disregarded by the sensor while an ambient pressure is given.
    pub fn set_altitude_compensation(&mut self, meters: u16) -> Result<()> {
        write_register(&mut self.bus, Register::AltitudeCompensation, meters)
    }

    /// Get the altitude compensation in meters above sea level
    pub fn altitude_compensation(&mut self) -> Result<u16> {
        read_register(&mut self.bus, Register::AltitudeCompensation)
    }

    /// Get the firmware version as (major, minor)
    pub fn firmware_version(&mut self) -> Result<(u8, u8)> {
        let [major, minor] = read_register(&mut self.bus, Register::FirmwareVersion)?.to_be_bytes();
        Ok((major, minor))
    }

    /// Soft-reset the sensor
    pub fn soft_reset(&mut self) -> Result<()> {
        write_command(&mut self.bus, Register::SoftReset)
    }

    /// Bring the sensor in line with the given settings and start measuring
    ///
    /// Reads each configurable register, writes it only when it differs from
    /// the desired value (the offset and altitude registers wear non-volatile
    /// memory), pauses [`SETTLE_TIME`] after every write that was issued, and
    /// finally starts continuous measurement with the configured ambient
    /// pressure.
    ///
    /// # Errors
    ///
    /// Returns [`Scd30Error::Validation`] if the settings fail validation,
    /// or any codec error from the underlying transactions.
    pub fn apply_settings(&mut self, settings: &SensorSettings) -> Result<()> {
        settings.validate()?;

        if self.measurement_interval()? != settings.measurement_interval_s {
            info!(
                "updating measurement interval to {} s",
                settings.measurement_interval_s
            );
            self.set_measurement_interval(settings.measurement_interval_s)?;
            thread::sleep(SETTLE_TIME);
        }

        if self.temperature_offset()? != settings.temperature_offset_centi_celsius {
            info!(
                "updating temperature offset to {} (0.01 degC)",
                settings.temperature_offset_centi_celsius
            );
            self.set_temperature_offset(settings.temperature_offset_centi_celsius)?;
            thread::sleep(SETTLE_TIME);
        }

        if self.automatic_self_calibration()? != settings.automatic_self_calibration {
            info!(
                "updating automatic self calibration to {}",
                settings.automatic_self_calibration
            );
            self.set_automatic_self_calibration(settings.automatic_self_calibration)?;
            thread::sleep(SETTLE_TIME);
        }

        if self.altitude_compensation()? != settings.altitude_compensation_m {
            info!(
                "updating altitude compensation to {} m",
                settings.altitude_compensation_m
            );
            self.set_altitude_compensation(settings.altitude_compensation_m)?;
            thread::sleep(SETTLE_TIME);
        }

        self.start_continuous_measurement(settings.ambient_pressure_mbar)
    }
}

fn validate_measurement_interval(seconds: u16) -> Result<()> {
    if !(MEASUREMENT_INTERVAL_MIN_S..=MEASUREMENT_INTERVAL_MAX_S).contains(&seconds) {
        return Err(Scd30Error::Validation(format!(
            "measurement interval {} s outside {}..={} s",
            seconds, MEASUREMENT_INTERVAL_MIN_S, MEASUREMENT_INTERVAL_MAX_S
        )));
    }
    Ok(())
}

fn validate_ambient_pressure(mbar: u16) -> Result<()> {
    if mbar != 0 && !(AMBIENT_PRESSURE_MIN_MBAR..=AMBIENT_PRESSURE_MAX_MBAR).contains(&mbar) {
        return Err(Scd30Error::Validation(format!(
            "ambient pressure {} mbar outside 0 or {}..={} mbar",
            mbar, AMBIENT_PRESSURE_MIN_MBAR, AMBIENT_PRESSURE_MAX_MBAR
        )));
    }
    Ok(())
}

fn decode_flag(value: u16, register_name: &str) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(Scd30Error::ProtocolViolation(format!(
            "{} decoded to {}, expected 0 or 1",
            register_name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mocks::MockBus;
    use crate::scd30::crc::crc8;
    use crate::scd30::protocol::SCD30_I2C_ADDRESS;

    fn word(value: u16) -> Vec<u8> {
        let [hi, lo] = value.to_be_bytes();
        vec![hi, lo, crc8(value)]
    }

    #[test]
    fn test_set_measurement_interval_too_low() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        let result = sensor.set_measurement_interval(1);
        assert!(matches!(result, Err(Scd30Error::Validation(_))));
        assert!(bus.get_written().is_empty(), "no transaction may be issued");
    }

    #[test]
    fn test_set_measurement_interval_too_high() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        let result = sensor.set_measurement_interval(1801);
        assert!(matches!(result, Err(Scd30Error::Validation(_))));
        assert!(bus.get_written().is_empty());
    }

    #[test]
    fn test_set_measurement_interval_wire_sequence() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        sensor.set_measurement_interval(15).unwrap();
        assert_eq!(
            bus.get_written(),
            vec![(SCD30_I2C_ADDRESS, vec![0x46, 0x00, 0x00, 0x0F, 0xAF])]
        );
    }

    #[test]
    fn test_start_continuous_measurement_pressure_domain() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        // 1 mbar is outside the 0-or-700..=1400 domain
        let result = sensor.start_continuous_measurement(1);
        assert!(matches!(result, Err(Scd30Error::Validation(_))));
        assert!(bus.get_written().is_empty());

        // 0 disables compensation, 1000 is in range
        sensor.start_continuous_measurement(0).unwrap();
        sensor.start_continuous_measurement(1000).unwrap();
        assert_eq!(bus.get_written().len(), 2);
    }

    #[test]
    fn test_stop_and_soft_reset_are_bare_commands() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        sensor.stop_continuous_measurement().unwrap();
        sensor.soft_reset().unwrap();

        assert_eq!(
            bus.get_written(),
            vec![
                (SCD30_I2C_ADDRESS, vec![0x01, 0x04]),
                (SCD30_I2C_ADDRESS, vec![0xD3, 0x04]),
            ]
        );
    }

    #[test]
    fn test_data_ready_flag_values() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        bus.push_response(&word(0));
        assert!(!sensor.data_ready().unwrap());

        bus.push_response(&word(1));
        assert!(sensor.data_ready().unwrap());
    }

    #[test]
    fn test_data_ready_rejects_non_boolean() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        bus.push_response(&word(2));
        let result = sensor.data_ready();
        assert!(matches!(result, Err(Scd30Error::ProtocolViolation(_))));
    }

    #[test]
    fn test_automatic_self_calibration_rejects_non_boolean() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        bus.push_response(&word(0xFFFF));
        let result = sensor.automatic_self_calibration();
        assert!(matches!(result, Err(Scd30Error::ProtocolViolation(_))));
    }

    #[test]
    fn test_firmware_version_splits_word() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        bus.push_response(&word(0x0342));
        assert_eq!(sensor.firmware_version().unwrap(), (3, 0x42));
    }

    #[test]
    fn test_getters_round_trip() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        bus.push_response(&word(15));
        assert_eq!(sensor.measurement_interval().unwrap(), 15);

        bus.push_response(&word(100));
        assert_eq!(sensor.temperature_offset().unwrap(), 100);

        bus.push_response(&word(430));
        assert_eq!(sensor.forced_recalibration_value().unwrap(), 430);

        bus.push_response(&word(520));
        assert_eq!(sensor.altitude_compensation().unwrap(), 520);
    }

    #[test]
    fn test_apply_settings_writes_only_changed_registers() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        let settings = SensorSettings::default();

        // Current state: interval differs, everything else already matches
        bus.push_response(&word(2)); // measurement interval
        bus.push_response(&word(settings.temperature_offset_centi_celsius));
        bus.push_response(&word(1)); // self calibration enabled
        bus.push_response(&word(settings.altitude_compensation_m));

        sensor.apply_settings(&settings).unwrap();

        let writes: Vec<Vec<u8>> = bus.get_written().into_iter().map(|(_, b)| b).collect();
        // 4 address writes for the reads, 1 interval write, 1 start command
        assert_eq!(writes.len(), 6);
        assert_eq!(
            writes[1],
            vec![0x46, 0x00, 0x00, settings.measurement_interval_s as u8, crc8(settings.measurement_interval_s)]
        );
        assert_eq!(writes[5], vec![0x00, 0x10, 0x00, 0x00, crc8(0)]);
    }

    #[test]
    fn test_apply_settings_rejects_invalid_settings() {
        let bus = MockBus::new();
        let mut sensor = Scd30::new(bus.clone());

        let settings = SensorSettings {
            measurement_interval_s: 1,
            ..SensorSettings::default()
        };

        let result = sensor.apply_settings(&settings);
        assert!(matches!(result, Err(Scd30Error::Validation(_))));
        assert!(bus.get_written().is_empty());
    }
}
