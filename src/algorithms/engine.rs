//! Localization engine tying floor estimation, vertical correction, and the
//! position search together

use crate::algorithms::correction::correct_vertical;
use crate::algorithms::error::{LocalizeError, LocalizeResult};
use crate::algorithms::floor::estimate_floor;
use crate::algorithms::hill_climb::{search, HillClimbConfig};
use crate::core::{LocationFix, ObservedBeacon, FLOOR_HEIGHT_M};
use serde::{Deserialize, Serialize};

/// Engine tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Vertical spacing between adjacent floors (m)
    pub floor_height_m: f64,
    /// Position search parameters
    pub hill_climb: HillClimbConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            floor_height_m: FLOOR_HEIGHT_M,
            hill_climb: HillClimbConfig::default(),
        }
    }
}

/// The localization core.
///
/// Purely synchronous and CPU-bound: one [`localize`](Self::localize) call
/// per fresh observation batch, no I/O, no state retained between calls.
#[derive(Debug, Clone, Default)]
pub struct LocalizationEngine {
    config: EngineConfig,
}

impl LocalizationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one localization cycle over a snapshot of the observed beacons.
    ///
    /// The snapshot is borrowed for the duration of the call and never
    /// mutated; vertical correction operates on a copy. Returns the
    /// estimated floor and the terminal point of the position search, or a
    /// cycle-scoped error. A search that hits its iteration cap surfaces as
    /// [`LocalizeError::NotConverged`] carrying the best fix found, which
    /// callers may keep as a low-confidence estimate.
    pub fn localize(&self, observed: &[ObservedBeacon]) -> LocalizeResult<LocationFix> {
        if observed.is_empty() {
            return Err(LocalizeError::EmptyObservationSet);
        }

        let floor = estimate_floor(observed)?;
        let corrected = correct_vertical(observed, floor, self.config.floor_height_m)?;
        let outcome = search(&corrected, &self.config.hill_climb)?;

        let fix = LocationFix {
            position: outcome.position,
            floor,
            residual_error: outcome.residual_error,
            iterations: outcome.iterations,
            beacon_count: corrected.len(),
        };

        if !outcome.converged {
            return Err(LocalizeError::NotConverged { best: fix });
        }
        Ok(fix)
    }
}
