//! Positioning session: roster maintenance and cycle orchestration

use crate::algorithms::{LocalizationEngine, LocalizeError};
use crate::api::types::{
    LocationUpdate, LogLevel, SessionConfig, SessionError, SessionResult, SessionState,
};
use crate::catalog::BeaconCatalog;
use crate::core::LocationFix;
use crate::scanner::{BeaconScanner, ProximityReading, ScannerStatus};
use std::time::{SystemTime, UNIX_EPOCH};

/// Orchestrates one localization cycle per scan batch.
///
/// The session keeps a roster of beacons currently considered in range:
/// fresh readings for a tracked beacon overwrite its previous measurement,
/// readings at or below the weak-signal threshold evict their beacon while
/// enough others remain tracked, and identifiers missing from the catalog
/// are skipped. A cycle only recomputes the position when the roster
/// actually changed. Failed cycles leave the last known good update in
/// place for the renderer.
pub struct PositioningSession {
    catalog: BeaconCatalog,
    scanner: Box<dyn BeaconScanner>,
    engine: LocalizationEngine,
    config: SessionConfig,
    state: SessionState,
    roster: Vec<ProximityReading>,
    last_update: Option<LocationUpdate>,
    sequence: u32,
}

impl PositioningSession {
    pub fn new(catalog: BeaconCatalog, scanner: Box<dyn BeaconScanner>) -> Self {
        Self::with_config(catalog, scanner, SessionConfig::default())
    }

    pub fn with_config(
        catalog: BeaconCatalog,
        scanner: Box<dyn BeaconScanner>,
        config: SessionConfig,
    ) -> Self {
        let engine = LocalizationEngine::with_config(config.engine.clone());
        Self {
            catalog,
            scanner,
            engine,
            config,
            state: SessionState::default(),
            roster: Vec::new(),
            last_update: None,
            sequence: 0,
        }
    }

    /// Run one polling cycle.
    ///
    /// `Ok(None)` means there is nothing new to draw: either no fresh batch
    /// arrived or the batch left the in-range roster unchanged. `Ok(Some)`
    /// carries the next update for the renderer, with `converged: false`
    /// marking a low-confidence best-effort position. Errors are scoped to
    /// this cycle; [`last_known`](Self::last_known) keeps serving the
    /// previous good update.
    pub fn poll_update(&mut self) -> SessionResult<Option<LocationUpdate>> {
        let batch = match self.scanner.poll_batch() {
            Ok(batch) => batch,
            Err(error) => {
                self.state.error_count += 1;
                if self.config.log_level as u8 >= LogLevel::Error as u8 {
                    eprintln!("[session] scan failed: {}", error);
                }
                return Err(error.into());
            }
        };
        let readings = match batch {
            Some(readings) => readings,
            None => return Ok(None),
        };

        if !self.fold_into_roster(readings) {
            return Ok(None);
        }

        let observed = self.catalog.join_readings(&self.roster);
        if observed.is_empty() {
            self.state.error_count += 1;
            return Err(SessionError::NoKnownBeacons {
                readings: self.roster.len(),
            });
        }
        if observed.len() < self.config.min_beacons {
            self.state.error_count += 1;
            return Err(SessionError::InsufficientBeacons {
                available: observed.len(),
                required: self.config.min_beacons,
            });
        }

        match self.engine.localize(&observed) {
            Ok(fix) => Ok(Some(self.deliver(fix, true))),
            Err(LocalizeError::NotConverged { best }) => {
                if self.config.log_level as u8 >= LogLevel::Warn as u8 {
                    eprintln!(
                        "[session] search stopped at iteration cap, delivering best candidate"
                    );
                }
                Ok(Some(self.deliver(best, false)))
            }
            Err(error) => {
                self.state.error_count += 1;
                if self.config.log_level as u8 >= LogLevel::Error as u8 {
                    eprintln!("[session] localization failed: {}", error);
                }
                Err(error.into())
            }
        }
    }

    /// The most recent good update, surviving failed cycles
    pub fn last_known(&self) -> Option<&LocationUpdate> {
        self.last_update.as_ref()
    }

    /// Readings currently considered in range, in first-seen order
    pub fn in_range(&self) -> &[ProximityReading] {
        &self.roster
    }

    pub fn state(&self) -> SessionState {
        self.state.clone()
    }

    pub fn scanner_status(&self) -> ScannerStatus {
        self.scanner.status()
    }

    pub fn catalog(&self) -> &BeaconCatalog {
        &self.catalog
    }

    /// Merge a fresh batch into the roster; returns whether anything changed
    fn fold_into_roster(&mut self, readings: Vec<ProximityReading>) -> bool {
        let mut changed = false;

        for reading in readings {
            let tracked = self.roster.iter().position(|r| r.mac == reading.mac);

            if reading.rssi <= self.config.weak_signal_dbm
                && self.roster.len() > self.config.eviction_floor
            {
                if let Some(i) = tracked {
                    self.roster.remove(i);
                    changed = true;
                }
                continue;
            }

            match tracked {
                Some(i) => {
                    self.roster[i] = reading;
                    changed = true;
                }
                None => {
                    if self.catalog.get(&reading.mac).is_some() {
                        self.roster.push(reading);
                        changed = true;
                    } else {
                        self.state.readings_skipped += 1;
                        if self.config.log_level as u8 >= LogLevel::Info as u8 {
                            eprintln!(
                                "[session] skipping reading from uncataloged beacon {}",
                                reading.mac
                            );
                        }
                    }
                }
            }
        }
        changed
    }

    fn deliver(&mut self, fix: LocationFix, converged: bool) -> LocationUpdate {
        self.sequence += 1;
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let update = LocationUpdate {
            position: fix.position,
            floor: fix.floor,
            residual_error: fix.residual_error,
            beacon_count: fix.beacon_count,
            iterations: fix.iterations,
            converged,
            sequence: self.sequence,
            timestamp_ms,
        };

        self.state.updates_delivered += 1;
        self.state.last_update_time_ms = Some(timestamp_ms);
        self.last_update = Some(update.clone());
        update
    }
}
