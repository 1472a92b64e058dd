//! Common session types

use crate::algorithms::{EngineConfig, LocalizeError};
use crate::core::GeoPoint;
use crate::scanner::ScanError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-level failures, all scoped to one polling cycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The scanner failed to deliver a batch
    Scan { error: ScanError },
    /// The localization engine rejected this cycle
    Localization { error: LocalizeError },
    /// No tracked reading matched a usable catalog entry
    NoKnownBeacons { readings: usize },
    /// Too few beacons in range for a trustworthy fix
    InsufficientBeacons { available: usize, required: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Scan { error } => write!(f, "scan failed: {}", error),
            SessionError::Localization { error } => write!(f, "localization failed: {}", error),
            SessionError::NoKnownBeacons { readings } => {
                write!(
                    f,
                    "none of {} tracked readings matched a usable catalog entry",
                    readings
                )
            }
            SessionError::InsufficientBeacons {
                available,
                required,
            } => {
                write!(
                    f,
                    "only {} beacons in range, {} required",
                    available, required
                )
            }
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ScanError> for SessionError {
    fn from(error: ScanError) -> Self {
        SessionError::Scan { error }
    }
}

impl From<LocalizeError> for SessionError {
    fn from(error: LocalizeError) -> Self {
        SessionError::Localization { error }
    }
}

/// Position update delivered to the rendering consumer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    /// Estimated position
    pub position: GeoPoint,
    /// Estimated floor
    pub floor: i32,
    /// Mean squared residual at the position (m²)
    pub residual_error: f64,
    /// Beacons that entered the position search
    pub beacon_count: usize,
    /// Accepted search steps
    pub iterations: usize,
    /// False when the search hit its iteration cap; the position is the
    /// best candidate found and should be treated as low-confidence
    pub converged: bool,
    /// Monotonic update counter for the session
    pub sequence: u32,
    /// Wall-clock time the update was produced (ms since epoch)
    pub timestamp_ms: u64,
}

/// Logging levels for session diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and info messages
    Info,
    /// All messages including debug
    Debug,
}

/// Session configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Localization engine tuning
    pub engine: EngineConfig,
    /// Minimum in-range beacons required before computing a fix
    pub min_beacons: usize,
    /// Readings at or below this signal strength may evict their beacon (dBm)
    pub weak_signal_dbm: i32,
    /// Weak-signal eviction only runs while more than this many beacons are tracked
    pub eviction_floor: usize,
    /// Diagnostic verbosity
    pub log_level: LogLevel,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            min_beacons: 3,
            weak_signal_dbm: -90,
            eviction_floor: 3,
            log_level: LogLevel::Warn,
        }
    }
}

impl SessionConfig {
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_min_beacons(mut self, min_beacons: usize) -> Self {
        self.min_beacons = min_beacons;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }
}

/// Session statistics
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Updates delivered since the session started
    pub updates_delivered: u32,
    /// Cycles that ended in an error
    pub error_count: u32,
    /// Wall-clock time of the last delivered update (ms since epoch)
    pub last_update_time_ms: Option<u64>,
    /// Readings skipped because their identifier was not in the catalog
    pub readings_skipped: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            updates_delivered: 0,
            error_count: 0,
            last_update_time_ms: None,
            readings_skipped: 0,
        }
    }
}
