//! Output formatting for position updates
//!
//! The rendering consumer decides what to draw; these formatters cover the
//! common text, JSON, and CSV surfaces it may want.

use crate::api::types::LocationUpdate;

/// Human-readable text output
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Single-line output for log-style consumers
    pub compact: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { compact: false }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, update: &LocationUpdate) -> String {
        if self.compact {
            return format!(
                "#{} floor {} ({:.6}, {:.6}){}",
                update.sequence,
                update.floor,
                update.position.latitude,
                update.position.longitude,
                if update.converged { "" } else { " [low confidence]" }
            );
        }

        let mut text = String::new();
        text.push_str(&format!("Position update #{}\n", update.sequence));
        text.push_str(&format!(
            "  Latitude:  {:.6}\n  Longitude: {:.6}\n  Floor:     {}\n",
            update.position.latitude, update.position.longitude, update.floor
        ));
        text.push_str(&format!(
            "  Residual:  {:.3} m² over {} beacons in {} steps\n",
            update.residual_error, update.beacon_count, update.iterations
        ));
        if !update.converged {
            text.push_str("  Confidence: LOW (search hit its iteration cap)\n");
        }
        text
    }
}

/// JSON output via serde
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { pretty: false }
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, update: &LocationUpdate) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(update)
        } else {
            serde_json::to_string(update)
        }
    }
}

/// CSV row output
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self {
            include_header: false,
        }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        "sequence,timestamp_ms,floor,latitude,longitude,residual_error,beacon_count,iterations,converged".to_string()
    }

    pub fn format_csv(&self, update: &LocationUpdate) -> String {
        let row = format!(
            "{},{},{},{:.6},{:.6},{:.3},{},{},{}",
            update.sequence,
            update.timestamp_ms,
            update.floor,
            update.position.latitude,
            update.position.longitude,
            update.residual_error,
            update.beacon_count,
            update.iterations,
            update.converged
        );
        if self.include_header {
            format!("{}\n{}", self.header(), row)
        } else {
            row
        }
    }
}
