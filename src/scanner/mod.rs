//! Beacon scanning abstraction
//!
//! The ranging hardware lives behind [`BeaconScanner`] so the session can
//! be driven by a real Bluetooth ranging stack or by [`MockScanner`] in
//! tests and demos. Converting signal strength to distance happens inside
//! the ranging stack; readings arrive here with both values filled in.

pub mod mock;

pub use mock::MockScanner;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One proximity observation emitted by the scanning layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityReading {
    /// Hardware identifier of the observed beacon
    pub mac: String,
    /// Estimated distance to the beacon (m)
    pub distance_m: f64,
    /// Received signal strength (dBm)
    pub rssi: i32,
}

impl ProximityReading {
    pub fn new(mac: impl Into<String>, distance_m: f64, rssi: i32) -> Self {
        Self {
            mac: mac.into(),
            distance_m,
            rssi,
        }
    }
}

/// Result type for scanner operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Scanner communication failures
#[derive(Debug, Clone, PartialEq)]
pub enum ScanError {
    /// The Bluetooth adapter went away or refused to range
    AdapterUnavailable { details: String },
    /// No batch arrived within the polling window
    Timeout { timeout_ms: u32 },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::AdapterUnavailable { details } => {
                write!(f, "scan adapter unavailable: {}", details)
            }
            ScanError::Timeout { timeout_ms } => {
                write!(f, "no scan batch within {} ms", timeout_ms)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Scanner health and throughput counters
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerStatus {
    pub active: bool,
    pub batches_received: u32,
    pub error_count: u32,
    pub last_batch_time_ms: Option<u64>,
}

impl ScannerStatus {
    pub fn new() -> Self {
        Self {
            active: false,
            batches_received: 0,
            error_count: 0,
            last_batch_time_ms: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.active && self.error_count < 10
    }
}

impl Default for ScannerStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Abstraction over the beacon ranging hardware.
///
/// Implementations deliver point-in-time batches of readings on their own
/// cadence; `poll_batch` never blocks.
pub trait BeaconScanner {
    /// Take the next batch of readings, if one has arrived since the last
    /// poll. `Ok(None)` means nothing new.
    fn poll_batch(&mut self) -> ScanResult<Option<Vec<ProximityReading>>>;

    /// Current scanner status
    fn status(&self) -> ScannerStatus;

    /// Whether the scanner is currently able to deliver batches
    fn is_active(&self) -> bool;

    /// Reset the scanner connection
    fn reset(&mut self) -> ScanResult<()>;
}
