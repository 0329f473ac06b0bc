//! Estimate output formatting and serialization
//!
//! Estimates are first normalised into a [`FormattedEstimate`] at a chosen
//! precision, then rendered as human-readable text or JSON.

use crate::algorithms::round_to;
use crate::core::{CompassDirection, NominalEstimate, TrajectoryEstimate, DEFAULT_OUTPUT_PRECISION};
use crate::processing::TrackUpdate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}', expected text or json", other)),
        }
    }
}

impl OutputFormat {
    /// Render with the formatter for this format (multi-line text or pretty JSON)
    pub fn render(&self, formatted: &FormattedEstimate) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Text => Ok(TextFormatter::new().format_text(formatted)),
            OutputFormat::Json => JsonFormatter::pretty().format_json(formatted),
        }
    }
}

/// Estimate with every float rounded to the formatter's precision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedEstimate {
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: f64,
    pub speed_kms: f64,
    /// `None` for single-fix estimates
    pub bearing_degrees: Option<f64>,
    pub direction: Option<CompassDirection>,
    pub altitude_km: f64,
    pub timestamp: i64,
    /// Whether speed was measured from two fixes or assumed
    pub measured: bool,
}

/// Converts estimates to [`FormattedEstimate`]
pub struct EstimateFormatter {
    /// Decimal places for speeds and bearing
    pub precision: u8,
    /// Decimal places for coordinates
    pub coordinate_precision: u8,
}

impl Default for EstimateFormatter {
    fn default() -> Self {
        Self {
            precision: DEFAULT_OUTPUT_PRECISION,
            coordinate_precision: 4,
        }
    }
}

impl EstimateFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn format(&self, estimate: &TrajectoryEstimate) -> FormattedEstimate {
        FormattedEstimate {
            latitude: round_to(estimate.latitude, self.coordinate_precision),
            longitude: round_to(estimate.longitude, self.coordinate_precision),
            speed_kmh: round_to(estimate.speed_kmh, self.precision),
            speed_kms: round_to(estimate.speed_kms, self.precision),
            bearing_degrees: Some(round_to(estimate.bearing_degrees, self.precision) % 360.0),
            direction: Some(estimate.direction),
            altitude_km: estimate.altitude_km,
            timestamp: estimate.timestamp,
            measured: true,
        }
    }

    pub fn format_nominal(&self, estimate: &NominalEstimate) -> FormattedEstimate {
        FormattedEstimate {
            latitude: round_to(estimate.latitude, self.coordinate_precision),
            longitude: round_to(estimate.longitude, self.coordinate_precision),
            speed_kmh: round_to(estimate.speed_kmh, self.precision),
            speed_kms: round_to(estimate.speed_kms, self.precision),
            bearing_degrees: None,
            direction: None,
            altitude_km: estimate.altitude_km,
            timestamp: estimate.timestamp,
            measured: false,
        }
    }

    /// `None` for [`TrackUpdate::Pending`]
    pub fn format_update(&self, update: &TrackUpdate) -> Option<FormattedEstimate> {
        match update {
            TrackUpdate::Measured(estimate) => Some(self.format(estimate)),
            TrackUpdate::Nominal(estimate) => Some(self.format_nominal(estimate)),
            TrackUpdate::Pending => None,
        }
    }
}

/// Human-readable text formatter
#[derive(Default)]
pub struct TextFormatter {
    /// Single-line output
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, formatted: &FormattedEstimate) -> String {
        let heading = match (formatted.bearing_degrees, formatted.direction) {
            (Some(bearing), Some(direction)) => format!("{:.2}° ({})", bearing, direction),
            _ => "unknown".to_string(),
        };
        let source = if formatted.measured { "measured" } else { "nominal" };

        if self.compact {
            return format!(
                "Pos: {:.4}°, {:.4}° | {:.2} km/h ({:.2} km/s, {}) | Heading: {} | Alt: {:.0} km | t={}",
                formatted.latitude,
                formatted.longitude,
                formatted.speed_kmh,
                formatted.speed_kms,
                source,
                heading,
                formatted.altitude_km,
                formatted.timestamp
            );
        }

        let mut output = String::new();
        output.push_str("Position:\n");
        output.push_str(&format!("  Latitude:  {:.4}°\n", formatted.latitude));
        output.push_str(&format!("  Longitude: {:.4}°\n", formatted.longitude));
        output.push_str(&format!("  Altitude:  {:.0} km\n", formatted.altitude_km));
        output.push_str("Velocity:\n");
        output.push_str(&format!("  Speed:     {:.2} km/h ({:.2} km/s, {})\n", formatted.speed_kmh, formatted.speed_kms, source));
        output.push_str(&format!("  Heading:   {}\n", heading));
        output.push_str(&format!("Timestamp:   {}\n", formatted.timestamp));
        output
    }
}

/// JSON formatter for structured output
#[derive(Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, formatted: &FormattedEstimate) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(formatted)
        } else {
            serde_json::to_string(formatted)
        }
    }
}
