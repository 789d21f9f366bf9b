//! # Display Module
//!
//! Renders feed snapshots for the terminal, grouping each reading's
//! fields by subsystem: voltage, sensors, environment, power, location
//! and network.
//!
//! Two formats are supported: `text` for humans and `jsonl` (one JSON
//! object per reading, camelCase field names) for piping into other
//! tooling.

use std::io::{self, Write};

use crate::reading::{DataMode, GpsStatus, Reading};

/// Display output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
}

impl OutputFormat {
    /// Parses the config-file representation ("text" or "jsonl").
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "jsonl" => Some(Self::Jsonl),
            _ => None,
        }
    }
}

/// Writes readings to any [`Write`] sink in the configured format.
///
/// # Examples
///
/// ```
/// use sensor_feed::display::{OutputFormat, Renderer};
/// use sensor_feed::generator::SampleGenerator;
///
/// let reading = SampleGenerator::seeded(5).generate();
/// let mut out = Vec::new();
/// let mut renderer = Renderer::new(&mut out, OutputFormat::Jsonl);
/// renderer.render_reading(&reading).unwrap();
///
/// assert!(out.ends_with(b"\n"));
/// ```
pub struct Renderer<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Renderer<W> {
    /// Creates a renderer over the given sink.
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Renders one reading.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    pub fn render_reading(&mut self, reading: &Reading) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.render_text(reading),
            OutputFormat::Jsonl => self.render_jsonl(reading),
        }
    }

    /// Renders a whole snapshot, newest-first.
    ///
    /// In text mode the snapshot is preceded by a count header; jsonl mode
    /// emits one line per reading with no framing.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    pub fn render_view(&mut self, readings: &[Reading]) -> io::Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "── live sensor feed · {} reading(s) ──", readings.len())?;
        }
        for reading in readings {
            self.render_reading(reading)?;
        }
        self.out.flush()
    }

    fn render_text(&mut self, r: &Reading) -> io::Result<()> {
        let mode = match r.data_mode {
            DataMode::Real => "REAL",
            DataMode::Dummy => "DUMMY",
        };
        let gps = match r.gps_status {
            GpsStatus::Valid => "VALID",
            GpsStatus::Invalid => "INVALID",
        };

        writeln!(self.out, "[{}] {}  GPS {}  (id {})", r.timestamp_display(), mode, gps, r.id)?;
        writeln!(self.out, "  voltage      V1 {:.2} V   V2 {:.2} V", r.voltage1, r.voltage2)?;
        writeln!(
            self.out,
            "  sensors      LDR {}   PIR {}",
            r.ldr_value,
            if r.pir_detection { "motion" } else { "clear" }
        )?;
        writeln!(
            self.out,
            "  environment  {:.1} °C   {:.1} %RH",
            r.temperature, r.humidity
        )?;
        writeln!(
            self.out,
            "  power        main {}   backup {}",
            on_off(r.main_power),
            on_off(r.backup_power)
        )?;
        match (r.latitude, r.longitude) {
            (Some(lat), Some(lon)) => {
                writeln!(self.out, "  location     {:.6}, {:.6}", lat, lon)?;
            }
            _ => writeln!(self.out, "  location     no fix")?,
        }
        writeln!(self.out, "  network      WiFi {} dBm", r.wifi_rssi)
    }

    fn render_jsonl(&mut self, reading: &Reading) -> io::Result<()> {
        let line = serde_json::to_string(reading)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(self.out, "{}", line)
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SampleGenerator;

    fn render_to_string(readings: &[Reading], format: OutputFormat) -> String {
        let mut out = Vec::new();
        let mut renderer = Renderer::new(&mut out, format);
        renderer.render_view(readings).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("jsonl"), Some(OutputFormat::Jsonl));
        assert_eq!(OutputFormat::parse("csv"), None);
    }

    #[test]
    fn test_text_groups_by_subsystem() {
        let reading = SampleGenerator::seeded(21).generate();
        let output = render_to_string(std::slice::from_ref(&reading), OutputFormat::Text);

        for group in ["voltage", "sensors", "environment", "power", "location", "network"] {
            assert!(output.contains(group), "missing {} group:\n{}", group, output);
        }
        assert!(output.contains(&reading.id));
        assert!(output.contains("1 reading(s)"));
    }

    #[test]
    fn test_text_location_without_fix() {
        let mut generator = SampleGenerator::seeded(3);
        // Draw until an invalid fix shows up (p = 0.2 per reading)
        let reading = std::iter::repeat_with(|| generator.generate())
            .find(|r| r.gps_status == GpsStatus::Invalid)
            .unwrap();

        let output = render_to_string(&[reading], OutputFormat::Text);
        assert!(output.contains("no fix"));
    }

    #[test]
    fn test_jsonl_one_parseable_line_per_reading() {
        let mut generator = SampleGenerator::seeded(8);
        let readings: Vec<_> = (0..3).map(|_| generator.generate()).collect();

        let output = render_to_string(&readings, OutputFormat::Jsonl);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);

        for (line, reading) in lines.iter().zip(&readings) {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["id"], reading.id.as_str());
            assert!(value.get("wifiRssi").is_some());
        }
    }

    #[test]
    fn test_jsonl_has_no_framing_header() {
        let reading = SampleGenerator::seeded(9).generate();
        let output = render_to_string(&[reading], OutputFormat::Jsonl);
        assert!(output.starts_with('{'));
    }
}
