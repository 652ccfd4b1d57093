//! Horizontal water surface against an ordered ground polyline.

use crate::geom::{SectionPoint, section_point};
use serde::Serialize;

/// Result of walking a ground profile against a water surface elevation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterlineIntersection {
    pub water_elevation: f64,
    /// Ground vertices at or below the water surface and the crossing points, in profile order.
    pub submerged_vertices: Vec<SectionPoint>,
    /// Stations where the ground crosses the water surface, ascending.
    pub crossing_stations: Vec<f64>,
}

/// Walks every segment of `ground` (ordered by station) against `water_elevation`.
///
/// A vertex counts as submerged when it is at or below the surface. A crossing is recorded only
/// for segments with one endpoint at or below the surface and the other strictly above it, so a
/// segment lying exactly on the surface never produces a crossing.
pub fn intersect(ground: &[SectionPoint], water_elevation: f64) -> WaterlineIntersection {
    let mut submerged_vertices = Vec::new();
    let mut crossing_stations = Vec::new();

    for pair in ground.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let below1 = p1.y <= water_elevation;
        let below2 = p2.y <= water_elevation;

        if below1 {
            submerged_vertices.push(p1);
        }
        if below1 != below2 {
            // `below1 != below2` implies `p1.y != p2.y`.
            let t = (water_elevation - p1.y) / (p2.y - p1.y);
            let station = p1.x + t * (p2.x - p1.x);
            submerged_vertices.push(section_point(station, water_elevation));
            crossing_stations.push(station);
        }
    }

    if let Some(last) = ground.last() {
        if last.y <= water_elevation {
            submerged_vertices.push(*last);
        }
    }

    crossing_stations.sort_by(f64::total_cmp);

    WaterlineIntersection {
        water_elevation,
        submerged_vertices,
        crossing_stations,
    }
}

impl WaterlineIntersection {
    /// First and last crossing, when they bound a wet span of positive width.
    ///
    /// Profiles with several basins collapse to the single span between the outermost crossings.
    pub fn wet_span(&self) -> Option<(f64, f64)> {
        if self.crossing_stations.len() < 2 {
            return None;
        }
        let first = *self.crossing_stations.first()?;
        let last = *self.crossing_stations.last()?;
        (last > first).then_some((first, last))
    }

    /// Closed submerged ring: the submerged vertices followed by the last and the first crossing
    /// at the water surface. Consecutive duplicates are collapsed, so the ring ends on its first
    /// crossing and a simple basin closes back onto its starting vertex.
    pub fn polygon(&self) -> Option<Vec<SectionPoint>> {
        let (first, last) = self.wet_span()?;
        let mut ring: Vec<SectionPoint> = Vec::with_capacity(self.submerged_vertices.len() + 2);
        for p in self
            .submerged_vertices
            .iter()
            .copied()
            .chain([
                section_point(last, self.water_elevation),
                section_point(first, self.water_elevation),
            ])
        {
            if ring.last() != Some(&p) {
                ring.push(p);
            }
        }
        Some(ring)
    }

    /// Flat waterline across the wet span.
    pub fn waterline(&self) -> Option<(SectionPoint, SectionPoint)> {
        let (first, last) = self.wet_span()?;
        Some((
            section_point(first, self.water_elevation),
            section_point(last, self.water_elevation),
        ))
    }
}
