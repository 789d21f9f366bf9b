//! # Sensor Reading Types
//!
//! Value types and field range constants for one sampling instant.
//!
//! A [`Reading`] captures every sensor channel the viewer displays:
//! dual voltage rails, light (LDR) and motion (PIR) sensors, environment
//! (temperature/humidity), power-rail status, GPS fix and coordinates,
//! WiFi signal strength, and a provenance marker. Readings are immutable
//! once generated.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Minimum voltage reading in volts
pub const VOLTAGE_MIN: f64 = 10.0;

/// Maximum voltage reading in volts
pub const VOLTAGE_MAX: f64 = 15.0;

/// Maximum raw LDR (light sensor) value
pub const LDR_VALUE_MAX: u16 = 999;

/// Temperature range in °C
pub const TEMPERATURE_MIN: f64 = 20.0;
pub const TEMPERATURE_MAX: f64 = 35.0;

/// Relative humidity range in percent
pub const HUMIDITY_MIN: f64 = 40.0;
pub const HUMIDITY_MAX: f64 = 80.0;

/// WiFi RSSI range in dBm (always negative)
pub const WIFI_RSSI_MIN: i16 = -80;
pub const WIFI_RSSI_MAX: i16 = -30;

/// Length of a reading's identifier token (base-36 characters)
pub const READING_ID_LEN: usize = 9;

/// Timestamp display format for the feed
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// GPS fix status
///
/// Gates the presence of coordinates: a reading carries latitude and
/// longitude only when the fix is [`GpsStatus::Valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GpsStatus {
    Valid,
    Invalid,
}

/// Provenance marker for a reading
///
/// `Real` models data from live hardware, `Dummy` models synthesized
/// fallback data. Both are locally generated here; the marker exists so
/// the display can badge each card the way the device firmware would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataMode {
    Dummy,
    Real,
}

/// One sensor sample, immutable after generation
///
/// # Invariants
///
/// - `latitude` and `longitude` are both `Some` or both `None`
/// - coordinates are `None` whenever `gps_status` is [`GpsStatus::Invalid`]
/// - continuous fields lie within their documented ranges and precision
///   (voltages 2 decimals, temperature/humidity 1 decimal)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Opaque token, unique within the feed's lifetime
    pub id: String,

    /// Primary rail voltage in volts
    pub voltage1: f64,

    /// Secondary rail voltage in volts
    pub voltage2: f64,

    /// Raw light sensor value (0-999)
    pub ldr_value: u16,

    /// Motion detected flag
    pub pir_detection: bool,

    /// Ambient temperature in °C
    pub temperature: f64,

    /// Relative humidity in percent
    pub humidity: f64,

    /// Main power rail status
    pub main_power: bool,

    /// Backup power rail status
    pub backup_power: bool,

    /// GPS fix status
    pub gps_status: GpsStatus,

    /// Latitude in degrees, present only with a valid fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude in degrees, present only with a valid fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// WiFi signal strength in dBm
    pub wifi_rssi: i16,

    /// Provenance marker
    pub data_mode: DataMode,

    /// Capture instant
    pub timestamp: DateTime<Local>,
}

impl Reading {
    /// Capture instant rendered for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use sensor_feed::generator::SampleGenerator;
    ///
    /// let reading = SampleGenerator::seeded(7).generate();
    /// // e.g. "2024-03-01 14:05:09"
    /// assert_eq!(reading.timestamp_display().len(), 19);
    /// ```
    #[must_use]
    pub fn timestamp_display(&self) -> String {
        self.timestamp.format(TIMESTAMP_DISPLAY_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SampleGenerator;

    #[test]
    fn test_range_constants() {
        assert!(VOLTAGE_MIN < VOLTAGE_MAX);
        assert!(TEMPERATURE_MIN < TEMPERATURE_MAX);
        assert!(HUMIDITY_MIN < HUMIDITY_MAX);
        assert!(WIFI_RSSI_MIN < WIFI_RSSI_MAX);
        assert!(WIFI_RSSI_MAX < 0, "RSSI is always negative");
    }

    #[test]
    fn test_coordinates_are_present_together() {
        let mut generator = SampleGenerator::seeded(42);
        for _ in 0..100 {
            let reading = generator.generate();
            assert_eq!(
                reading.latitude.is_some(),
                reading.longitude.is_some(),
                "latitude and longitude must be present together"
            );
        }
    }

    #[test]
    fn test_serializes_with_original_field_names() {
        let reading = SampleGenerator::seeded(1).generate();
        let json = serde_json::to_value(&reading).unwrap();

        // Wire names are camelCase to match the device's original schema
        assert!(json.get("ldrValue").is_some());
        assert!(json.get("pirDetection").is_some());
        assert!(json.get("mainPower").is_some());
        assert!(json.get("wifiRssi").is_some());
        assert!(json.get("ldr_value").is_none());
    }

    #[test]
    fn test_enum_wire_values_are_uppercase() {
        assert_eq!(
            serde_json::to_value(GpsStatus::Valid).unwrap(),
            serde_json::json!("VALID")
        );
        assert_eq!(
            serde_json::to_value(DataMode::Dummy).unwrap(),
            serde_json::json!("DUMMY")
        );
    }

    #[test]
    fn test_timestamp_display_format() {
        let reading = SampleGenerator::seeded(3).generate();
        let display = reading.timestamp_display();

        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(display.len(), 19);
        assert_eq!(&display[4..5], "-");
        assert_eq!(&display[10..11], " ");
        assert_eq!(&display[13..14], ":");
    }
}
