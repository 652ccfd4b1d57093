#![forbid(unsafe_code)]

//! Cross-section flood geometry (headless).
//!
//! Given a channel, gutter or surveyed profile and a water depth, `wetline-core` resolves the
//! ground outline and the submerged region, then fits both into a fixed-size canvas.
//!
//! Design goals:
//! - pure and synchronous: no I/O, no shared state, identical input gives bit-identical output
//! - renderer-agnostic output: ordered point sequences and path commands
//! - full floating-point precision; rounding is left to whoever draws the result

pub mod config;
pub mod descriptor;
pub mod error;
pub mod geom;
pub mod gutter;
pub mod intersect;
pub mod path;
pub mod profile;
pub mod section;
pub mod survey;
pub mod viewport;

pub use config::ViewportConfig;
pub use descriptor::{RawShapeDescriptor, Shape, ShapeDescriptor, ShapeKind};
pub use error::{Error, InvalidReason, Result};
pub use gutter::{GutterBranch, GutterSolution};
pub use path::{CanvasSize, GeometryResult, PathCommand, PathRole, ScenePath};
pub use section::{SectionGeometry, SectionProperties, WetRegion};
pub use viewport::{ScaleMode, Viewport};

use crate::geom::{SectionBox, SectionPoint, section_extent, section_point};
use crate::profile::PrismaticOutline;
use crate::section::extent_with_surface;

/// Resolves `descriptor` in section space.
///
/// Returns `Ok(None)` for an irregular profile with fewer than two points: that is a normal
/// "not enough data yet" state, not an error.
pub fn resolve_section(
    descriptor: &ShapeDescriptor,
    config: &ViewportConfig,
) -> Result<Option<SectionGeometry>> {
    config.validate()?;
    match descriptor.validate() {
        Ok(()) => {}
        Err(Error::InsufficientData { points }) => {
            tracing::debug!(points, "irregular profile is too short to draw");
            return Ok(None);
        }
        Err(err) => return Err(err),
    }

    let kind = descriptor.kind();
    let depth = descriptor.water_level;
    tracing::debug!(%kind, depth, "resolving cross-section");

    let section = match &descriptor.shape {
        Shape::Irregular {
            station_elevation_points,
        } => resolve_irregular(
            station_elevation_points,
            descriptor.water_surface_elevation(),
            depth,
        ),
        Shape::Gutter {
            gutter_width,
            gutter_cross_slope,
            road_cross_slope,
        } => resolve_gutter(
            *gutter_width,
            *gutter_cross_slope,
            *road_cross_slope,
            depth,
            config,
        )?,
        Shape::Rectangular { bottom_width } => resolve_prismatic(
            kind,
            PrismaticOutline::rectangular(*bottom_width),
            depth,
            config,
        ),
        Shape::Trapezoidal {
            bottom_width,
            left_slope,
            right_slope,
        } => resolve_prismatic(
            kind,
            PrismaticOutline::trapezoidal(*bottom_width, *left_slope, *right_slope),
            depth,
            config,
        ),
        Shape::Triangular {
            left_slope,
            right_slope,
        } => resolve_prismatic(
            kind,
            PrismaticOutline::triangular(*left_slope, *right_slope),
            depth,
            config,
        ),
    };

    if section.water.is_none() {
        tracing::debug!(%kind, depth, "no drawable water region");
    }
    Ok(Some(section))
}

fn resolve_irregular(ground: &[SectionPoint], wse: f64, depth: f64) -> SectionGeometry {
    let crossing = intersect::intersect(ground, wse);
    let water = if depth > 0.0 {
        crossing
            .polygon()
            .zip(crossing.waterline())
            .map(|(polygon, waterline)| WetRegion { polygon, waterline })
    } else {
        None
    };
    let properties = if depth > 0.0 {
        SectionProperties::integrate(ground, wse)
    } else {
        SectionProperties::dry(wse)
    };

    SectionGeometry {
        kind: ShapeKind::Irregular,
        extent: extent_with_surface(ground, water.as_ref(), wse),
        ground: ground.to_vec(),
        water,
        scale_mode: ScaleMode::Independent,
        water_surface_elevation: wse,
        gutter: None,
        properties,
    }
}

fn resolve_gutter(
    gutter_width: f64,
    gutter_cross_slope: f64,
    road_cross_slope: f64,
    depth: f64,
    config: &ViewportConfig,
) -> Result<SectionGeometry> {
    let g = gutter::resolve(
        gutter_width,
        gutter_cross_slope,
        road_cross_slope,
        depth,
        config,
    )?;
    let water = g.water.map(|polygon| WetRegion {
        polygon,
        waterline: (
            section_point(0.0, depth),
            section_point(g.solution.spread, depth),
        ),
    });
    let properties = water
        .as_ref()
        .map_or_else(|| SectionProperties::dry(depth), SectionProperties::of_region);

    Ok(SectionGeometry {
        kind: ShapeKind::Gutter,
        ground: g.ground,
        water,
        // Framed by the visual extents, anchored at the curb foot.
        extent: SectionBox::new(
            section_point(0.0, 0.0),
            section_point(g.visual_width, g.visual_depth),
        ),
        scale_mode: ScaleMode::Independent,
        water_surface_elevation: depth,
        gutter: Some(g.solution),
        properties,
    })
}

fn resolve_prismatic(
    kind: ShapeKind,
    outline: PrismaticOutline,
    depth: f64,
    config: &ViewportConfig,
) -> SectionGeometry {
    let height = profile::visual_height(depth, config);
    let ground = outline.at(height);
    let water = (depth > 0.0).then(|| {
        let polygon = outline.at(depth);
        let waterline = (polygon[0], polygon[polygon.len() - 1]);
        WetRegion { polygon, waterline }
    });
    let properties = water
        .as_ref()
        .map_or_else(|| SectionProperties::dry(depth), SectionProperties::of_region);
    let origin = section_point(0.0, 0.0);
    let extent = section_extent(&ground).unwrap_or_else(|| SectionBox::new(origin, origin));

    SectionGeometry {
        kind,
        ground,
        water,
        extent,
        scale_mode: ScaleMode::Uniform,
        water_surface_elevation: depth,
        gutter: None,
        properties,
    }
}

/// Fits a resolved section into the canvas described by `config`.
pub fn project_section(section: &SectionGeometry, config: &ViewportConfig) -> GeometryResult {
    let viewport = viewport::project(section.extent, config, section.scale_mode);
    let ground_path = viewport.project_all(&section.ground);
    let water_polygon = section
        .water
        .as_ref()
        .map(|w| viewport.project_all(&w.polygon));
    let waterline = section.water.as_ref().map(|w| {
        [
            viewport.to_canvas(w.waterline.0),
            viewport.to_canvas(w.waterline.1),
        ]
    });

    path::emit(
        section.kind,
        CanvasSize {
            width: config.canvas_width,
            height: config.canvas_height,
        },
        viewport,
        ground_path,
        water_polygon,
        waterline,
        section.properties,
    )
}

/// Resolves, projects and packages `descriptor` for drawing.
///
/// `Ok(None)` means there is nothing to draw yet (see [`resolve_section`]).
pub fn render(
    descriptor: &ShapeDescriptor,
    config: &ViewportConfig,
) -> Result<Option<GeometryResult>> {
    let Some(section) = resolve_section(descriptor, config)? else {
        return Ok(None);
    };
    Ok(Some(project_section(&section, config)))
}

/// Like [`render`], reading the flat JSON descriptor form.
pub fn render_json(text: &str, config: &ViewportConfig) -> Result<Option<GeometryResult>> {
    let descriptor = ShapeDescriptor::from_json(text)?;
    render(&descriptor, config)
}

/// Bundles a [`ViewportConfig`] so UI integrations don't pass it on every call.
///
/// Stateless apart from the config: calls are independent and may run concurrently.
#[derive(Debug, Clone, Default)]
pub struct GeometryEngine {
    config: ViewportConfig,
}

impl GeometryEngine {
    pub fn new(config: ViewportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn resolve(&self, descriptor: &ShapeDescriptor) -> Result<Option<SectionGeometry>> {
        resolve_section(descriptor, &self.config)
    }

    pub fn render(&self, descriptor: &ShapeDescriptor) -> Result<Option<GeometryResult>> {
        render(descriptor, &self.config)
    }

    pub fn render_json(&self, text: &str) -> Result<Option<GeometryResult>> {
        render_json(text, &self.config)
    }
}
