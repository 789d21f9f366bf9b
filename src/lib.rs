//! # Sensor Feed Library
//!
//! Live rolling feed of synthesized environmental, power and location
//! sensor readings.
//!
//! This library provides the core functionality behind the viewer: a
//! sample generator producing one synthetic [`reading::Reading`] per tick,
//! and a bounded, newest-first rolling window that ingests them on a fixed
//! period and exposes snapshots for display.

pub mod config;
pub mod error;
pub mod reading;
pub mod generator;
pub mod feed;
pub mod display;
