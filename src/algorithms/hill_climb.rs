//! Coordinate-descent position search over a fixed lattice

use crate::algorithms::error::{LocalizeError, LocalizeResult};
use crate::algorithms::geodesic::haversine_distance;
use crate::core::{GeoPoint, ObservedBeacon, DEFAULT_MAX_ITERATIONS, STEP_SIZE_DEG};
use serde::{Deserialize, Serialize};

/// Tuning parameters for the hill-climb search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HillClimbConfig {
    /// Lattice step in degrees
    pub step_deg: f64,
    /// Hard bound on accepted steps before the search gives up
    pub max_iterations: usize,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            step_deg: STEP_SIZE_DEG,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Terminal state of a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Lowest-error point visited
    pub position: GeoPoint,
    /// Mean squared residual at that point (m²)
    pub residual_error: f64,
    /// Accepted steps taken from the centroid
    pub iterations: usize,
    /// False when the iteration cap cut the search short
    pub converged: bool,
}

/// Mean squared disagreement between each beacon's corrected distance and
/// the great-circle distance from `point` to that beacon (m²).
pub fn mean_square_error(point: &GeoPoint, beacons: &[ObservedBeacon]) -> f64 {
    let sum: f64 = beacons
        .iter()
        .map(|beacon| {
            let residual = haversine_distance(point, &beacon.location) - beacon.distance_m;
            residual * residual
        })
        .sum();
    sum / beacons.len() as f64
}

/// Arithmetic mean of the beacon locations, the search start point
pub fn centroid(beacons: &[ObservedBeacon]) -> GeoPoint {
    let n = beacons.len() as f64;
    let mut longitude = 0.0;
    let mut latitude = 0.0;
    for beacon in beacons {
        longitude += beacon.location.longitude;
        latitude += beacon.location.latitude;
    }
    GeoPoint::new(longitude / n, latitude / n)
}

/// Minimize the mean squared residual by steepest descent over a 4-neighbor
/// stencil.
///
/// Starting from the beacon centroid, each step evaluates the four lattice
/// neighbors of the current candidate and moves to the best one, but only
/// when it is strictly better; an exact error tie keeps the current point.
/// The search terminates at a fixed point, or after `max_iterations`
/// accepted steps with `converged: false` and the best candidate found so
/// far. Every accepted step strictly decreases the error, so the returned
/// residual never exceeds the centroid's.
///
/// This is local descent from a single start point; it can settle in a
/// local minimum of the error surface.
pub fn search(
    beacons: &[ObservedBeacon],
    config: &HillClimbConfig,
) -> LocalizeResult<SearchOutcome> {
    if beacons.is_empty() {
        return Err(LocalizeError::EmptyObservationSet);
    }

    let mut current = centroid(beacons);
    let mut current_error = mean_square_error(&current, beacons);
    let mut iterations = 0usize;

    loop {
        let (next, next_error) = best_neighbor(&current, beacons, config.step_deg);

        // Staying put wins an exact tie; this is also the fixed-point test
        if next_error >= current_error {
            return Ok(SearchOutcome {
                position: current,
                residual_error: current_error,
                iterations,
                converged: true,
            });
        }

        current = next;
        current_error = next_error;
        iterations += 1;

        if iterations >= config.max_iterations {
            return Ok(SearchOutcome {
                position: current,
                residual_error: current_error,
                iterations,
                converged: false,
            });
        }
    }
}

/// Evaluate the four lattice neighbors of `point`; the first-evaluated wins
/// among equally good neighbors (+lat, -lat, +lon, -lon order).
fn best_neighbor(
    point: &GeoPoint,
    beacons: &[ObservedBeacon],
    step_deg: f64,
) -> (GeoPoint, f64) {
    let neighbors = [
        GeoPoint::new(point.longitude, point.latitude + step_deg),
        GeoPoint::new(point.longitude, point.latitude - step_deg),
        GeoPoint::new(point.longitude + step_deg, point.latitude),
        GeoPoint::new(point.longitude - step_deg, point.latitude),
    ];

    let mut best = neighbors[0];
    let mut best_error = mean_square_error(&neighbors[0], beacons);
    for neighbor in &neighbors[1..] {
        let error = mean_square_error(neighbor, beacons);
        if error < best_error {
            best = *neighbor;
            best_error = error;
        }
    }
    (best, best_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::geodesic::haversine_distance;

    fn beacon_at(mac: &str, point: GeoPoint, distance_m: f64) -> ObservedBeacon {
        ObservedBeacon::new(mac, point, 1, distance_m, -60)
    }

    #[test]
    fn empty_set_is_rejected() {
        let result = search(&[], &HillClimbConfig::default());
        assert_eq!(result.unwrap_err(), LocalizeError::EmptyObservationSet);
    }

    #[test]
    fn zero_distance_single_beacon_is_an_immediate_fixed_point() {
        // The centroid is the beacon itself and its error is exactly 0;
        // every neighbor is worse, so the search must not move at all
        let anchor = GeoPoint::new(4.4777, 51.0224);
        let beacons = vec![beacon_at("aa", anchor, 0.0)];

        let outcome = search(&beacons, &HillClimbConfig::default()).unwrap();
        assert_eq!(outcome.position, anchor);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.residual_error, 0.0);
        assert!(outcome.converged);
    }

    #[test]
    fn converges_near_the_true_point() {
        let truth = GeoPoint::new(0.00005, 0.00005);
        let anchors = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0001, 0.0),
            GeoPoint::new(0.0, 0.0001),
        ];
        let beacons: Vec<ObservedBeacon> = anchors
            .iter()
            .enumerate()
            .map(|(i, anchor)| {
                beacon_at(&format!("b{}", i), *anchor, haversine_distance(anchor, &truth))
            })
            .collect();

        let config = HillClimbConfig::default();
        let outcome = search(&beacons, &config).unwrap();

        assert!(outcome.converged);
        // The lattice is offset from the true point, so the terminal point
        // can sit up to one step away on each axis
        assert!((outcome.position.latitude - truth.latitude).abs() <= config.step_deg);
        assert!((outcome.position.longitude - truth.longitude).abs() <= config.step_deg);
    }

    #[test]
    fn final_error_never_exceeds_centroid_error() {
        let truth = GeoPoint::new(0.00005, 0.00005);
        let anchors = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0001, 0.0),
            GeoPoint::new(0.0, 0.0001),
        ];
        let beacons: Vec<ObservedBeacon> = anchors
            .iter()
            .enumerate()
            .map(|(i, anchor)| {
                beacon_at(&format!("b{}", i), *anchor, haversine_distance(anchor, &truth))
            })
            .collect();

        let start_error = mean_square_error(&centroid(&beacons), &beacons);
        let outcome = search(&beacons, &HillClimbConfig::default()).unwrap();
        assert!(outcome.residual_error <= start_error);
    }

    #[test]
    fn iteration_cap_reports_non_convergence_with_best_candidate() {
        // The true point is far from the centroid, so two accepted steps
        // cannot reach it
        let truth = GeoPoint::new(0.001, 0.001);
        let anchors = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0001, 0.0),
            GeoPoint::new(0.0, 0.0001),
        ];
        let beacons: Vec<ObservedBeacon> = anchors
            .iter()
            .enumerate()
            .map(|(i, anchor)| {
                beacon_at(&format!("b{}", i), *anchor, haversine_distance(anchor, &truth))
            })
            .collect();

        let config = HillClimbConfig {
            max_iterations: 2,
            ..HillClimbConfig::default()
        };
        let outcome = search(&beacons, &config).unwrap();

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 2);
        let start_error = mean_square_error(&centroid(&beacons), &beacons);
        assert!(outcome.residual_error < start_error);
    }

    #[test]
    fn accepted_steps_strictly_decrease_the_error() {
        let truth = GeoPoint::new(0.00008, 0.00002);
        let anchors = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0001, 0.0),
            GeoPoint::new(0.0, 0.0001),
            GeoPoint::new(0.0001, 0.0001),
        ];
        let beacons: Vec<ObservedBeacon> = anchors
            .iter()
            .enumerate()
            .map(|(i, anchor)| {
                beacon_at(&format!("b{}", i), *anchor, haversine_distance(anchor, &truth))
            })
            .collect();

        // Replay the search step by step and watch the error sequence
        let config = HillClimbConfig::default();
        let mut current = centroid(&beacons);
        let mut current_error = mean_square_error(&current, &beacons);
        for _ in 0..config.max_iterations {
            let (next, next_error) = super::best_neighbor(&current, &beacons, config.step_deg);
            if next_error >= current_error {
                break;
            }
            assert!(next_error < current_error);
            current = next;
            current_error = next_error;
        }

        let outcome = search(&beacons, &config).unwrap();
        assert_eq!(outcome.position, current);
        assert_eq!(outcome.residual_error, current_error);
    }
}
