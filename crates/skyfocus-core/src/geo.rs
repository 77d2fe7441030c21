// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Cruise speed used to turn a distance into flight time.
pub const CRUISE_SPEED_KMH: f64 = 850.0;
/// Every flight lasts at least ten minutes, even a zero-distance hop.
pub const MIN_FLIGHT_SECONDS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance in kilometres (haversine).
///
/// Inputs are expected in the valid lat/lon ranges; nothing is validated here.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Raw cruise time between two points, without the minimum-duration floor.
/// This is the estimate shown while a route is still being planned.
pub fn cruise_seconds(a: Coordinate, b: Coordinate) -> u64 {
    (distance_km(a, b) / CRUISE_SPEED_KMH * 3600.0).floor() as u64
}

/// Duration of the simulated flight: cruise time, but never below [`MIN_FLIGHT_SECONDS`].
pub fn estimated_duration_seconds(a: Coordinate, b: Coordinate) -> u64 {
    cruise_seconds(a, b).max(MIN_FLIGHT_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_along_equator() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 10.0));
        assert!((d - 1111.95).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let jfk = Coordinate::new(40.6413, -73.7781);
        let lhr = Coordinate::new(51.4700, -0.4543);
        let there = distance_km(jfk, lhr);
        let back = distance_km(lhr, jfk);
        assert!((there - back).abs() < 1e-9);
        // JFK-LHR is roughly 5540 km
        assert!((there - 5540.0).abs() < 20.0, "got {}", there);
    }

    #[test]
    fn test_duration_floor_for_same_point() {
        let p = Coordinate::new(48.85, 2.35);
        assert_eq!(distance_km(p, p), 0.0);
        assert_eq!(cruise_seconds(p, p), 0);
        assert_eq!(estimated_duration_seconds(p, p), MIN_FLIGHT_SECONDS);
    }

    #[test]
    fn test_duration_floor_for_short_hop() {
        // ~11 km, well under ten minutes at cruise speed
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.1, 0.0);
        assert!(cruise_seconds(a, b) < MIN_FLIGHT_SECONDS);
        assert_eq!(estimated_duration_seconds(a, b), MIN_FLIGHT_SECONDS);
    }

    #[test]
    fn test_duration_for_ten_degrees() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 10.0);
        assert_eq!(estimated_duration_seconds(a, b), 4709);
    }

    #[test]
    fn test_duration_never_below_floor() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(89.9, 179.9),
            Coordinate::new(-89.9, -179.9),
            Coordinate::new(35.55, 139.78),
            Coordinate::new(-33.94, 151.17),
            Coordinate::new(0.001, 0.001),
        ];
        for a in points {
            for b in points {
                assert!(estimated_duration_seconds(a, b) >= MIN_FLIGHT_SECONDS);
            }
        }
    }
}
