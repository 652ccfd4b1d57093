//! Renderer-agnostic drawing output.
//!
//! Nothing here computes coordinates: projected vertex sequences are only reshaped into ordered
//! path commands. Any vector or raster backend (and plain assertions in tests) can consume a
//! [`GeometryResult`].

use crate::descriptor::ShapeKind;
use crate::geom::CanvasPoint;
use crate::section::SectionProperties;
use crate::viewport::Viewport;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryResult {
    pub kind: ShapeKind,
    pub canvas: CanvasSize,
    pub viewport: Viewport,
    /// Open ground polyline.
    pub ground_path: Vec<CanvasPoint>,
    /// Closed submerged region.
    pub water_polygon: Option<Vec<CanvasPoint>>,
    /// Endpoints of the dashed flat waterline.
    pub waterline: Option<[CanvasPoint; 2]>,
    /// Wet-region measures in section units (not pixels).
    pub properties: SectionProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathRole {
    Ground,
    Water,
    Waterline,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePath {
    pub role: PathRole,
    pub closed: bool,
    pub dashed: bool,
    pub commands: Vec<PathCommand>,
}

impl ScenePath {
    fn from_points(role: PathRole, points: &[CanvasPoint], closed: bool, dashed: bool) -> Self {
        let mut commands = Vec::with_capacity(points.len() + usize::from(closed));
        for (i, p) in points.iter().enumerate() {
            commands.push(if i == 0 {
                PathCommand::MoveTo { x: p.x, y: p.y }
            } else {
                PathCommand::LineTo { x: p.x, y: p.y }
            });
        }
        if closed && !commands.is_empty() {
            commands.push(PathCommand::Close);
        }
        Self {
            role,
            closed,
            dashed,
            commands,
        }
    }

    /// SVG path data (`M x y L x y ... Z`) with the given number formatter.
    pub fn to_svg_data_with(&self, mut number: impl FnMut(&mut String, f64)) -> String {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            match *cmd {
                PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                    out.push(if matches!(cmd, PathCommand::MoveTo { .. }) {
                        'M'
                    } else {
                        'L'
                    });
                    out.push(' ');
                    number(&mut out, x);
                    out.push(' ');
                    number(&mut out, y);
                }
                PathCommand::Close => out.push('Z'),
            }
        }
        out
    }

    pub fn to_svg_data(&self) -> String {
        self.to_svg_data_with(|out, v| {
            let _ = write!(out, "{v}");
        })
    }
}

/// Packages projected vertex sequences into a [`GeometryResult`].
pub fn emit(
    kind: ShapeKind,
    canvas: CanvasSize,
    viewport: Viewport,
    ground_path: Vec<CanvasPoint>,
    water_polygon: Option<Vec<CanvasPoint>>,
    waterline: Option<[CanvasPoint; 2]>,
    properties: SectionProperties,
) -> GeometryResult {
    GeometryResult {
        kind,
        canvas,
        viewport,
        ground_path,
        water_polygon,
        waterline,
        properties,
    }
}

impl GeometryResult {
    /// Drawing order: water fill, ground outline, then the dashed waterline on top.
    pub fn paths(&self) -> Vec<ScenePath> {
        let mut out = Vec::with_capacity(3);
        if let Some(water) = &self.water_polygon {
            out.push(ScenePath::from_points(PathRole::Water, water, true, false));
        }
        out.push(ScenePath::from_points(
            PathRole::Ground,
            &self.ground_path,
            false,
            false,
        ));
        if let Some(line) = &self.waterline {
            out.push(ScenePath::from_points(PathRole::Waterline, line, false, true));
        }
        out
    }

    pub fn has_water(&self) -> bool {
        self.water_polygon.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::canvas_point;

    #[test]
    fn closed_path_ends_with_z() {
        let p = ScenePath::from_points(
            PathRole::Water,
            &[
                canvas_point(0.0, 0.0),
                canvas_point(10.0, 0.0),
                canvas_point(10.0, 5.5),
            ],
            true,
            false,
        );
        assert_eq!(p.to_svg_data(), "M 0 0 L 10 0 L 10 5.5 Z");
    }

    #[test]
    fn empty_path_has_no_commands() {
        let p = ScenePath::from_points(PathRole::Ground, &[], true, false);
        assert!(p.commands.is_empty());
        assert_eq!(p.to_svg_data(), "");
    }
}
