//! # Sample Generator Module
//!
//! Synthesizes one [`Reading`] per call, each field drawn independently
//! from a distribution appropriate to its physical meaning.
//!
//! ## Field Policies
//!
//! | Field | Draw |
//! |-------|------|
//! | voltage1, voltage2 | uniform [10.0, 15.0] V, 2 decimals |
//! | ldr_value | uniform [0, 999] |
//! | temperature | uniform [20.0, 35.0] °C, 1 decimal |
//! | humidity | uniform [40.0, 80.0] %, 1 decimal |
//! | wifi_rssi | uniform [-80, -30] dBm |
//! | main_power | weighted coin, p(on) = 0.9 |
//! | backup_power | weighted coin, p(engaged) = 0.2 |
//! | pir_detection | weighted coin, p(motion) = 0.3 |
//! | gps_status | weighted coin, p(valid) = 0.8 |
//! | data_mode | weighted coin, p(REAL) = 0.7 |
//!
//! A single draw decides GPS validity; latitude and longitude are
//! populated together exactly when that draw lands valid, so the
//! coordinate pairing invariant holds for every reading.
//!
//! The distributions loosely mimic analog-sensor noise bands and
//! digital-sensor thresholds; they are not derived from real telemetry.
//!
//! ## Determinism
//!
//! The randomness source is injectable: production code uses
//! [`SampleGenerator::from_entropy`], tests use [`SampleGenerator::seeded`]
//! so range, precision and pairing properties can be checked exactly.

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GeneratorConfig;
use crate::reading::{
    DataMode, GpsStatus, Reading, HUMIDITY_MAX, HUMIDITY_MIN, LDR_VALUE_MAX, READING_ID_LEN,
    TEMPERATURE_MAX, TEMPERATURE_MIN, VOLTAGE_MAX, VOLTAGE_MIN, WIFI_RSSI_MAX, WIFI_RSSI_MIN,
};

/// Characters used for reading identifier tokens
const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Latitude range in degrees
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Longitude range in degrees
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Synthesizes sensor readings from an owned randomness source.
///
/// Generation always succeeds and always returns a structurally valid
/// [`Reading`]; there are no error conditions. The only side effects are
/// consuming randomness and reading the clock.
///
/// # Examples
///
/// ```
/// use sensor_feed::generator::SampleGenerator;
///
/// let mut generator = SampleGenerator::seeded(42);
/// let reading = generator.generate();
///
/// assert!(reading.voltage1 >= 10.0 && reading.voltage1 <= 15.0);
/// assert_eq!(reading.latitude.is_some(), reading.longitude.is_some());
/// ```
#[derive(Debug)]
pub struct SampleGenerator<R: Rng = StdRng> {
    rng: R,
    bias: GeneratorConfig,
}

impl SampleGenerator<StdRng> {
    /// Creates a generator seeded from OS entropy with default biases.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy(), GeneratorConfig::default())
    }

    /// Creates a generator seeded from OS entropy with configured biases.
    #[must_use]
    pub fn from_config(bias: GeneratorConfig) -> Self {
        Self::with_rng(StdRng::from_entropy(), bias)
    }

    /// Creates a deterministic generator for tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), GeneratorConfig::default())
    }
}

impl<R: Rng> SampleGenerator<R> {
    /// Creates a generator over an arbitrary randomness source.
    pub fn with_rng(rng: R, bias: GeneratorConfig) -> Self {
        Self { rng, bias }
    }

    /// Produces one synthetic reading for the current instant.
    pub fn generate(&mut self) -> Reading {
        // One shared draw gates both the status enum and the coordinates,
        // so the pairing invariant cannot desynchronize.
        let gps_valid = self.rng.gen_bool(self.bias.gps_valid_probability);
        let (gps_status, latitude, longitude) = if gps_valid {
            (
                GpsStatus::Valid,
                Some(round_to(self.rng.gen_range(LATITUDE_RANGE), 6)),
                Some(round_to(self.rng.gen_range(LONGITUDE_RANGE), 6)),
            )
        } else {
            (GpsStatus::Invalid, None, None)
        };

        let data_mode = if self.rng.gen_bool(self.bias.real_mode_probability) {
            DataMode::Real
        } else {
            DataMode::Dummy
        };

        Reading {
            id: self.next_id(),
            voltage1: round_to(self.rng.gen_range(VOLTAGE_MIN..=VOLTAGE_MAX), 2),
            voltage2: round_to(self.rng.gen_range(VOLTAGE_MIN..=VOLTAGE_MAX), 2),
            ldr_value: self.rng.gen_range(0..=LDR_VALUE_MAX),
            pir_detection: self.rng.gen_bool(self.bias.pir_probability),
            temperature: round_to(self.rng.gen_range(TEMPERATURE_MIN..=TEMPERATURE_MAX), 1),
            humidity: round_to(self.rng.gen_range(HUMIDITY_MIN..=HUMIDITY_MAX), 1),
            main_power: self.rng.gen_bool(self.bias.main_power_probability),
            backup_power: self.rng.gen_bool(self.bias.backup_power_probability),
            gps_status,
            latitude,
            longitude,
            wifi_rssi: self.rng.gen_range(WIFI_RSSI_MIN..=WIFI_RSSI_MAX),
            data_mode,
            timestamp: Local::now(),
        }
    }

    /// Draws a fresh base-36 identifier token.
    fn next_id(&mut self) -> String {
        (0..READING_ID_LEN)
            .map(|_| ID_CHARSET[self.rng.gen_range(0..ID_CHARSET.len())] as char)
            .collect()
    }
}

/// Rounds to the given number of decimal places.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
