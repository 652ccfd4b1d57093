//! Resolved cross-sections in section space, before projection.

use crate::descriptor::ShapeKind;
use crate::geom::{SectionBox, SectionPoint};
use crate::gutter::GutterSolution;
use crate::viewport::ScaleMode;
use serde::Serialize;

/// Submerged region: a closed ring plus the flat waterline across its top.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WetRegion {
    pub polygon: Vec<SectionPoint>,
    pub waterline: (SectionPoint, SectionPoint),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionGeometry {
    pub kind: ShapeKind,
    pub ground: Vec<SectionPoint>,
    pub water: Option<WetRegion>,
    /// What the viewport has to show: the ground plus the water surface.
    pub extent: SectionBox,
    pub scale_mode: ScaleMode,
    pub water_surface_elevation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gutter: Option<GutterSolution>,
    pub properties: SectionProperties,
}

/// Geometric measures of the wet region, in section units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProperties {
    pub water_surface_elevation: f64,
    pub flow_area: f64,
    pub wetted_perimeter: f64,
    pub top_width: f64,
    pub hydraulic_radius: f64,
    pub hydraulic_depth: f64,
}

impl SectionProperties {
    pub fn dry(water_surface_elevation: f64) -> Self {
        Self {
            water_surface_elevation,
            ..Self::default()
        }
    }

    fn from_measures(water_surface_elevation: f64, area: f64, perimeter: f64, top: f64) -> Self {
        Self {
            water_surface_elevation,
            flow_area: area,
            wetted_perimeter: perimeter,
            top_width: top,
            hydraulic_radius: if perimeter > 0.0 { area / perimeter } else { 0.0 },
            hydraulic_depth: if top > 0.0 { area / top } else { 0.0 },
        }
    }

    /// Measures a closed-form wet region. Every ring edge except the waterline is wetted.
    pub fn of_region(region: &WetRegion) -> Self {
        let ring = &region.polygon;
        let (left, right) = region.waterline;
        let top = (right.x - left.x).abs();

        let mut twice_area = 0.0;
        let mut boundary = 0.0;
        for (i, a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            twice_area += a.x * b.y - b.x * a.y;
            boundary += (b - *a).length();
        }
        let area = twice_area.abs() / 2.0;
        let perimeter = (boundary - top).max(0.0);
        Self::from_measures(left.y, area, perimeter, top)
    }

    /// Integrates every ground segment against the water surface, so profiles with several
    /// basins are measured exactly. Only ground strictly below the surface is wetted.
    pub fn integrate(ground: &[SectionPoint], water_surface_elevation: f64) -> Self {
        let wse = water_surface_elevation;
        let mut area = 0.0;
        let mut perimeter = 0.0;
        let mut top = 0.0;

        for pair in ground.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            let dx = p2.x - p1.x;
            let length = (p2 - p1).length();
            let (d1, d2) = (wse - p1.y, wse - p2.y);
            let below1 = d1 > 0.0;
            let below2 = d2 > 0.0;

            if below1 && below2 {
                area += 0.5 * (d1 + d2) * dx;
                perimeter += length;
                top += dx;
            } else if below1 != below2 {
                let t = (d1 / (p2.y - p1.y)).clamp(0.0, 1.0);
                let (fraction, depth) = if below1 { (t, d1) } else { (1.0 - t, d2) };
                area += 0.5 * depth * dx * fraction;
                perimeter += length * fraction;
                top += dx * fraction;
            }
        }

        Self::from_measures(wse, area, perimeter, top)
    }
}

impl SectionGeometry {
    pub fn is_dry(&self) -> bool {
        self.water.is_none()
    }
}

pub(crate) fn extent_with_surface(
    ground: &[SectionPoint],
    water: Option<&WetRegion>,
    water_surface_elevation: f64,
) -> SectionBox {
    let mut extent = crate::geom::section_extent(
        ground
            .iter()
            .chain(water.into_iter().flat_map(|w| w.polygon.iter())),
    )
    .unwrap_or_else(|| {
        let origin = crate::geom::section_point(0.0, 0.0);
        SectionBox::new(origin, origin)
    });
    extent.max.y = extent.max.y.max(water_surface_elevation);
    extent
}
