//! # Sensor Settings Module
//!
//! Handles loading and validating the desired sensor configuration from
//! TOML files.
//!
//! These are the values [`crate::Scd30::apply_settings`] drives the sensor
//! towards on startup. Validation enforces the sensor-defined domains before
//! any bus transaction is attempted.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, Scd30Error};
use crate::scd30::protocol::{
    AMBIENT_PRESSURE_MAX_MBAR, AMBIENT_PRESSURE_MIN_MBAR, MEASUREMENT_INTERVAL_MAX_S,
    MEASUREMENT_INTERVAL_MIN_S,
};

/// Desired sensor configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SensorSettings {
    /// Measurement interval in seconds (2 to 1800)
    #[serde(default = "default_measurement_interval_s")]
    pub measurement_interval_s: u16,

    /// Temperature offset in units of 0.01 degC
    #[serde(default = "default_temperature_offset")]
    pub temperature_offset_centi_celsius: u16,

    /// Automatic self calibration flag
    #[serde(default = "default_automatic_self_calibration")]
    pub automatic_self_calibration: bool,

    /// Altitude compensation in meters above sea level
    #[serde(default)]
    pub altitude_compensation_m: u16,

    /// Ambient pressure in mbar (0 disables, else 700 to 1400)
    #[serde(default)]
    pub ambient_pressure_mbar: u16,
}

// Default value functions
fn default_measurement_interval_s() -> u16 { 15 }
fn default_temperature_offset() -> u16 { 100 }
fn default_automatic_self_calibration() -> bool { true }

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            measurement_interval_s: default_measurement_interval_s(),
            temperature_offset_centi_celsius: default_temperature_offset(),
            automatic_self_calibration: default_automatic_self_calibration(),
            altitude_compensation_m: 0,
            ambient_pressure_mbar: 0,
        }
    }
}

impl SensorSettings {
    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: SensorSettings = toml::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings against the sensor-defined domains
    ///
    /// # Errors
    ///
    /// Returns [`Scd30Error::Validation`] if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        if !(MEASUREMENT_INTERVAL_MIN_S..=MEASUREMENT_INTERVAL_MAX_S)
            .contains(&self.measurement_interval_s)
        {
            return Err(Scd30Error::Validation(format!(
                "measurement_interval_s must be between {} and {}",
                MEASUREMENT_INTERVAL_MIN_S, MEASUREMENT_INTERVAL_MAX_S
            )));
        }

        if self.ambient_pressure_mbar != 0
            && !(AMBIENT_PRESSURE_MIN_MBAR..=AMBIENT_PRESSURE_MAX_MBAR)
                .contains(&self.ambient_pressure_mbar)
        {
            return Err(Scd30Error::Validation(format!(
                "ambient_pressure_mbar must be 0 or between {} and {}",
                AMBIENT_PRESSURE_MIN_MBAR, AMBIENT_PRESSURE_MAX_MBAR
            )));
        }

        Ok(())
    }
}
