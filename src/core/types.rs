//! Core data types for the positioning system

use serde::{Deserialize, Serialize};

/// Geographic point in signed degrees.
///
/// Equality is exact numeric equality of both fields; the position search
/// uses it to detect a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

/// Immutable catalog entry for a surveyed beacon.
///
/// Created by catalog ingestion; identity, location, and floor never change
/// after that. Live distance and signal strength belong to the per-cycle
/// [`ProximityReading`](crate::scanner::ProximityReading) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogBeacon {
    /// Stable hardware identifier (Bluetooth MAC address)
    pub mac: String,
    /// Human-readable name, when the survey recorded one
    pub name: Option<String>,
    /// Row id from the survey spreadsheet, when imported from one
    pub device_id: Option<u32>,
    /// Surveyed position of the beacon
    pub location: GeoPoint,
    /// Floor the beacon is mounted on; 0 means not surveyed
    pub floor: i32,
}

impl CatalogBeacon {
    pub fn new(mac: impl Into<String>, location: GeoPoint, floor: i32) -> Self {
        Self {
            mac: mac.into(),
            name: None,
            device_id: None,
            location,
            floor,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_device_id(mut self, device_id: u32) -> Self {
        self.device_id = Some(device_id);
        self
    }
}

/// A catalog beacon joined with the proximity measurement of one scan cycle.
///
/// This is the localization engine's input record. The engine borrows a
/// caller-owned snapshot for the duration of one computation and never
/// mutates it; the vertical correction step works on a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedBeacon {
    pub mac: String,
    pub location: GeoPoint,
    pub floor: i32,
    /// Estimated distance to the beacon (m), converted from signal strength upstream
    pub distance_m: f64,
    /// Received signal strength (dBm)
    pub rssi: i32,
}

impl ObservedBeacon {
    pub fn new(
        mac: impl Into<String>,
        location: GeoPoint,
        floor: i32,
        distance_m: f64,
        rssi: i32,
    ) -> Self {
        Self {
            mac: mac.into(),
            location,
            floor,
            distance_m,
            rssi,
        }
    }

    /// Join a catalog entry with a fresh measurement
    pub fn from_catalog(beacon: &CatalogBeacon, distance_m: f64, rssi: i32) -> Self {
        Self {
            mac: beacon.mac.clone(),
            location: beacon.location,
            floor: beacon.floor,
            distance_m,
            rssi,
        }
    }
}

/// Result of one localization cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Terminal point of the position search
    pub position: GeoPoint,
    /// Estimated floor
    pub floor: i32,
    /// Mean squared residual at the returned position (m²)
    pub residual_error: f64,
    /// Accepted search steps before the terminal point
    pub iterations: usize,
    /// Beacons that entered the position search after vertical correction
    pub beacon_count: usize,
}
