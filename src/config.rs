//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            generator: GeneratorConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Rolling window and producer timing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// Maximum number of readings retained (N)
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,

    /// Readings generated up front when the feed initializes
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,

    /// Producer period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            window_capacity: default_window_capacity(),
            seed_count: default_seed_count(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Bias weights for the sample generator's boolean/enum draws
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Probability that the main power rail reads on ("mostly on")
    #[serde(default = "default_main_power_probability")]
    pub main_power_probability: f64,

    /// Probability that the backup rail reads engaged ("rarely engaged")
    #[serde(default = "default_backup_power_probability")]
    pub backup_power_probability: f64,

    /// Probability of a motion detection
    #[serde(default = "default_pir_probability")]
    pub pir_probability: f64,

    /// Probability of a valid GPS fix (also gates coordinates)
    #[serde(default = "default_gps_valid_probability")]
    pub gps_valid_probability: f64,

    /// Probability that a reading is marked REAL rather than DUMMY
    #[serde(default = "default_real_mode_probability")]
    pub real_mode_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            main_power_probability: default_main_power_probability(),
            backup_power_probability: default_backup_power_probability(),
            pir_probability: default_pir_probability(),
            gps_valid_probability: default_gps_valid_probability(),
            real_mode_probability: default_real_mode_probability(),
        }
    }
}

/// Display output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Output format: "text" or "jsonl"
    #[serde(default = "default_display_format")]
    pub format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: default_display_format(),
        }
    }
}

// Default value functions
fn default_window_capacity() -> usize { 20 }
fn default_seed_count() -> usize { 5 }
fn default_tick_interval_ms() -> u64 { 3000 }

fn default_main_power_probability() -> f64 { 0.9 }
fn default_backup_power_probability() -> f64 { 0.2 }
fn default_pir_probability() -> f64 { 0.3 }
fn default_gps_valid_probability() -> f64 { 0.8 }
fn default_real_mode_probability() -> f64 { 0.7 }

fn default_display_format() -> String { "text".to_string() }

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sensor_feed::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.feed.window_capacity == 0 {
            return Err(crate::error::SensorFeedError::Config(
                toml::de::Error::custom("window_capacity must be greater than 0")
            ));
        }

        if self.feed.seed_count > self.feed.window_capacity {
            return Err(crate::error::SensorFeedError::Config(
                toml::de::Error::custom("seed_count must not exceed window_capacity")
            ));
        }

        if self.feed.tick_interval_ms == 0 || self.feed.tick_interval_ms > 60000 {
            return Err(crate::error::SensorFeedError::Config(
                toml::de::Error::custom("tick_interval_ms must be between 1 and 60000")
            ));
        }

        for (name, value) in [
            ("main_power_probability", self.generator.main_power_probability),
            ("backup_power_probability", self.generator.backup_power_probability),
            ("pir_probability", self.generator.pir_probability),
            ("gps_valid_probability", self.generator.gps_valid_probability),
            ("real_mode_probability", self.generator.real_mode_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::error::SensorFeedError::Config(
                    toml::de::Error::custom(format!("{} must be between 0.0 and 1.0", name))
                ));
            }
        }

        if self.display.format != "text" && self.display.format != "jsonl" {
            return Err(crate::error::SensorFeedError::Config(
                toml::de::Error::custom("display format must be 'text' or 'jsonl'")
            ));
        }

        Ok(())
    }
}
