// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geo::Coordinate;
use std::f64::consts::PI;

pub const DEFAULT_SEGMENTS: usize = 100;
/// How far the arc bows out, as a fraction of the straight-line length.
const ARC_BULGE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePosition {
    pub location: Coordinate,
    /// 0 = north, clockwise.
    pub heading_degrees: f64,
}

/// A curved polyline from origin to destination, drawn in plain lat/lon space.
///
/// The bulge is a sine bump perpendicular to the straight line, so longer
/// routes get a more pronounced arc. Endpoints are exact.
#[derive(Debug, Clone)]
pub struct RoutePath {
    points: Vec<Coordinate>,
}

impl RoutePath {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self::with_segments(from, to, DEFAULT_SEGMENTS)
    }

    pub fn with_segments(from: Coordinate, to: Coordinate, segments: usize) -> Self {
        let segments = segments.max(1);
        let d_lat = to.latitude - from.latitude;
        let d_lon = to.longitude - from.longitude;
        let length = (d_lat * d_lat + d_lon * d_lon).sqrt();

        // Unit normal to the straight line; zero for a degenerate route.
        let (n_lat, n_lon) = if length > 0.0 {
            (d_lon / length, -d_lat / length)
        } else {
            (0.0, 0.0)
        };

        let points = (0..=segments)
            .map(|i| {
                let f = i as f64 / segments as f64;
                let offset = (PI * f).sin() * length * ARC_BULGE;
                Coordinate::new(
                    from.latitude + d_lat * f + n_lat * offset,
                    from.longitude + d_lon * f + n_lon * offset,
                )
            })
            .collect::<Vec<_>>();

        let mut path = Self { points };
        // sin(PI) is not exactly zero
        if let Some(last) = path.points.last_mut() {
            *last = to;
        }
        path
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Where the plane sits for a given progress in [0,1], and which way it faces.
    pub fn position_at(&self, progress: f64) -> PlanePosition {
        let n = self.points.len();
        let progress = progress.clamp(0.0, 1.0);
        let index = ((progress * (n - 1) as f64).floor() as usize).min(n - 2);
        let current = self.points[index];
        let next = self.points[index + 1];
        PlanePosition {
            location: current,
            heading_degrees: heading(current, next),
        }
    }
}

fn heading(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = to.latitude - from.latitude;
    let d_lon = to.longitude - from.longitude;
    if d_lat == 0.0 && d_lon == 0.0 {
        return 0.0;
    }
    d_lon.atan2(d_lat).to_degrees().rem_euclid(360.0)
}
