//! Error types for the localization engine

use crate::core::LocationFix;
use std::fmt;

/// Result type for localization operations
pub type LocalizeResult<T> = Result<T, LocalizeError>;

/// Failures of a single localization cycle.
///
/// Every variant is recoverable at call-cycle granularity: the caller skips
/// updating the position this cycle and re-invokes on the next observation
/// batch.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalizeError {
    /// No beacons were supplied for this cycle
    EmptyObservationSet,
    /// No observed beacon contributed usable signal power to any floor
    FloorUndetermined { beacon_count: usize },
    /// Vertical correction left no beacon with a valid horizontal distance
    InvalidDistanceCorrection { dropped: usize },
    /// The search hit its iteration cap; `best` is the lowest-error candidate
    /// found and may be used as a low-confidence estimate
    NotConverged { best: LocationFix },
}

impl fmt::Display for LocalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalizeError::EmptyObservationSet => {
                write!(f, "no beacons observed this cycle")
            }
            LocalizeError::FloorUndetermined { beacon_count } => {
                write!(
                    f,
                    "none of the {} observed beacons determined a floor",
                    beacon_count
                )
            }
            LocalizeError::InvalidDistanceCorrection { dropped } => {
                write!(
                    f,
                    "vertical correction invalidated all {} beacon distances",
                    dropped
                )
            }
            LocalizeError::NotConverged { best } => {
                write!(
                    f,
                    "position search did not converge within {} steps (best residual {:.3} m²)",
                    best.iterations, best.residual_error
                )
            }
        }
    }
}

impl std::error::Error for LocalizeError {}
