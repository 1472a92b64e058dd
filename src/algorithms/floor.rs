//! Floor estimation from per-floor aggregated signal power

use crate::algorithms::error::{LocalizeError, LocalizeResult};
use crate::core::{ObservedBeacon, FLOOR_UNSET};
use std::collections::HashMap;

/// Estimate the floor the device sits on.
///
/// Each beacon's signal strength is converted to a linear power proxy
/// `10^(rssi/10)` and accumulated per floor; the floor holding the most
/// power wins. Accumulators are keyed by whatever floor indices the
/// observed beacons carry, and beacons with an unset floor contribute
/// nothing. An exact power tie breaks to the lowest floor index so the
/// result never depends on map iteration order.
pub fn estimate_floor(beacons: &[ObservedBeacon]) -> LocalizeResult<i32> {
    if beacons.is_empty() {
        return Err(LocalizeError::EmptyObservationSet);
    }

    let mut power_by_floor: HashMap<i32, f64> = HashMap::new();
    for beacon in beacons {
        if beacon.floor == FLOOR_UNSET {
            continue;
        }
        let power = 10f64.powf(beacon.rssi as f64 / 10.0);
        *power_by_floor.entry(beacon.floor).or_insert(0.0) += power;
    }

    let mut best: Option<(i32, f64)> = None;
    for (&floor, &power) in &power_by_floor {
        let replace = match best {
            None => true,
            Some((best_floor, best_power)) => {
                power > best_power || (power == best_power && floor < best_floor)
            }
        };
        if replace {
            best = Some((floor, power));
        }
    }

    best.map(|(floor, _)| floor)
        .ok_or(LocalizeError::FloorUndetermined {
            beacon_count: beacons.len(),
        })
}
