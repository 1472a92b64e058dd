//! Vertical distance correction for beacons on other floors

use crate::algorithms::error::{LocalizeError, LocalizeResult};
use crate::core::{ObservedBeacon, FLOOR_UNSET};

/// Remove the vertical component from each beacon's measured distance.
///
/// A beacon on floor `f` seen from floor `current_floor` reports a
/// straight-line distance that includes `(f - current_floor) * floor_height_m`
/// of vertical offset; the position search needs the same-plane component
/// `sqrt(distance² - offset²)`. Records are cloned, so the caller's
/// observation state is never touched.
///
/// A beacon whose measured distance is shorter than its implied vertical
/// offset carries no usable horizontal information and is dropped from the
/// returned set. When every beacon is dropped the cycle fails with
/// [`LocalizeError::InvalidDistanceCorrection`].
///
/// # Panics
///
/// Panics if `current_floor` is the unset sentinel. The floor must come
/// from a successful [`estimate_floor`](crate::algorithms::floor::estimate_floor)
/// call; correcting against an unknown floor is a programming error.
pub fn correct_vertical(
    beacons: &[ObservedBeacon],
    current_floor: i32,
    floor_height_m: f64,
) -> LocalizeResult<Vec<ObservedBeacon>> {
    assert!(
        current_floor != FLOOR_UNSET,
        "vertical correction requires an estimated floor"
    );

    let mut corrected = Vec::with_capacity(beacons.len());
    let mut dropped = 0usize;

    for beacon in beacons {
        let offset = (beacon.floor - current_floor) as f64 * floor_height_m;
        let radicand = beacon.distance_m * beacon.distance_m - offset * offset;
        if radicand < 0.0 {
            dropped += 1;
            continue;
        }
        let mut flat = beacon.clone();
        flat.distance_m = radicand.sqrt();
        corrected.push(flat);
    }

    if corrected.is_empty() {
        return Err(LocalizeError::InvalidDistanceCorrection { dropped });
    }
    Ok(corrected)
}
