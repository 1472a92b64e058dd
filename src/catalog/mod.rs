//! Beacon catalog: the registry of surveyed beacons and its ingestion paths
//!
//! The catalog is populated once, before any localization, from
//! already-fetched text: a remote JSON feed ([`feed`]) or a spreadsheet
//! export ([`sheet`]). The crate never initiates network or file I/O
//! itself.

pub mod feed;
pub mod sheet;

pub use feed::parse_feed;
pub use sheet::SheetReader;

use crate::core::{CatalogBeacon, ObservedBeacon, FLOOR_UNSET};
use crate::scanner::ProximityReading;
use std::collections::HashMap;
use std::fmt;

/// Errors raised while ingesting catalog data
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The feed was not the expected JSON array of rows
    UnexpectedFeedShape { details: String },
    /// A row ended before a required field
    MissingField { row: usize, field: &'static str },
    /// A field failed numeric conversion
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnexpectedFeedShape { details } => {
                write!(f, "unexpected feed shape: {}", details)
            }
            CatalogError::MissingField { row, field } => {
                write!(f, "row {} is missing field '{}'", row, field)
            }
            CatalogError::InvalidNumber { row, field, value } => {
                write!(f, "row {} field '{}' is not numeric: '{}'", row, field, value)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only registry mapping beacon identifiers to surveyed records.
///
/// Lookups are by MAC address; inserting a duplicate identifier replaces
/// the previous record.
#[derive(Debug, Clone, Default)]
pub struct BeaconCatalog {
    beacons: HashMap<String, CatalogBeacon>,
}

impl BeaconCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from any beacon iterator (feed or sheet output)
    pub fn from_beacons(beacons: impl IntoIterator<Item = CatalogBeacon>) -> Self {
        let mut catalog = Self::new();
        catalog.extend(beacons);
        catalog
    }

    pub fn insert(&mut self, beacon: CatalogBeacon) -> Option<CatalogBeacon> {
        self.beacons.insert(beacon.mac.clone(), beacon)
    }

    pub fn extend(&mut self, beacons: impl IntoIterator<Item = CatalogBeacon>) {
        for beacon in beacons {
            self.insert(beacon);
        }
    }

    pub fn get(&self, mac: &str) -> Option<&CatalogBeacon> {
        self.beacons.get(mac)
    }

    pub fn len(&self) -> usize {
        self.beacons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beacons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogBeacon> {
        self.beacons.values()
    }

    /// Join one cycle's proximity readings with the catalog.
    ///
    /// Unknown identifiers and entries without a surveyed floor are skipped;
    /// duplicate identifiers collapse to the last reading. First-seen order
    /// is preserved so downstream behavior is reproducible.
    pub fn join_readings(&self, readings: &[ProximityReading]) -> Vec<ObservedBeacon> {
        let mut observed: Vec<ObservedBeacon> = Vec::with_capacity(readings.len());
        let mut index_by_mac: HashMap<&str, usize> = HashMap::new();

        for reading in readings {
            let entry = match self.beacons.get(&reading.mac) {
                Some(entry) => entry,
                None => continue,
            };
            if entry.floor == FLOOR_UNSET {
                continue;
            }
            match index_by_mac.get(reading.mac.as_str()) {
                Some(&i) => {
                    observed[i].distance_m = reading.distance_m;
                    observed[i].rssi = reading.rssi;
                }
                None => {
                    index_by_mac.insert(&reading.mac, observed.len());
                    observed.push(ObservedBeacon::from_catalog(
                        entry,
                        reading.distance_m,
                        reading.rssi,
                    ));
                }
            }
        }
        observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeoPoint;

    fn catalog() -> BeaconCatalog {
        BeaconCatalog::from_beacons([
            CatalogBeacon::new("aa:01", GeoPoint::new(4.47, 51.02), 1),
            CatalogBeacon::new("aa:02", GeoPoint::new(4.48, 51.03), 2),
            CatalogBeacon::new("aa:03", GeoPoint::new(4.49, 51.04), FLOOR_UNSET),
        ])
    }

    #[test]
    fn lookup_by_identifier() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("aa:02").unwrap().floor, 2);
        assert!(catalog.get("zz:99").is_none());
    }

    #[test]
    fn duplicate_insert_replaces() {
        let mut catalog = catalog();
        let replaced =
            catalog.insert(CatalogBeacon::new("aa:01", GeoPoint::new(0.0, 0.0), 5));
        assert_eq!(replaced.unwrap().floor, 1);
        assert_eq!(catalog.get("aa:01").unwrap().floor, 5);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn join_skips_unknown_identifiers() {
        let catalog = catalog();
        let readings = vec![
            ProximityReading::new("aa:01", 4.0, -60),
            ProximityReading::new("zz:99", 2.0, -50),
        ];
        let observed = catalog.join_readings(&readings);
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].mac, "aa:01");
        assert_eq!(observed[0].distance_m, 4.0);
    }

    #[test]
    fn join_skips_floor_unset_entries() {
        let catalog = catalog();
        let readings = vec![ProximityReading::new("aa:03", 4.0, -60)];
        assert!(catalog.join_readings(&readings).is_empty());
    }

    #[test]
    fn join_collapses_duplicates_to_the_last_reading() {
        let catalog = catalog();
        let readings = vec![
            ProximityReading::new("aa:01", 4.0, -60),
            ProximityReading::new("aa:02", 6.0, -70),
            ProximityReading::new("aa:01", 3.5, -58),
        ];
        let observed = catalog.join_readings(&readings);
        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0].mac, "aa:01");
        assert_eq!(observed[0].distance_m, 3.5);
        assert_eq!(observed[0].rssi, -58);
        assert_eq!(observed[1].mac, "aa:02");
    }
}
