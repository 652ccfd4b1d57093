//! Curb-and-gutter sections with a composite cross slope.
//!
//! Section space puts the curb face on station 0 and the gutter flow line (the foot of the curb)
//! on elevation 0. The ground rises away from the curb at the gutter cross slope `Sw` for the
//! gutter width `W`, then at the road cross slope `Sx`.

use crate::config::ViewportConfig;
use crate::descriptor::ShapeKind;
use crate::error::{Error, InvalidReason, Result};
use crate::geom::{SectionPoint, section_point};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GutterBranch {
    /// Water stays on the gutter slope.
    Triangular,
    /// Water spills past the gutter/road break point.
    Composite,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GutterSolution {
    pub branch: GutterBranch,
    pub spread: f64,
    /// Depth at the curb when the water surface reaches the break point: `Sw * W`.
    pub break_depth: f64,
    /// `(Sw - Sx) * W`, clamped at zero.
    pub gutter_depression: f64,
    /// Water depth above the ground at the break point; zero on the triangular branch.
    pub depth_at_break: f64,
}

/// Ground and water polylines of a gutter, in section space.
#[derive(Debug, Clone, PartialEq)]
pub struct GutterSection {
    pub solution: GutterSolution,
    /// Curb top, curb foot, break point, road end.
    pub ground: Vec<SectionPoint>,
    /// Closed water region, or `None` for a dry gutter.
    pub water: Option<Vec<SectionPoint>>,
    pub visual_width: f64,
    pub visual_depth: f64,
}

/// Picks the branch and spread for depth `d` at the curb.
pub fn solve(
    gutter_width: f64,
    gutter_cross_slope: f64,
    road_cross_slope: f64,
    depth: f64,
) -> Result<GutterSolution> {
    let kind = ShapeKind::Gutter;
    for (parameter, v) in [
        ("gutterWidth", gutter_width),
        ("gutterCrossSlope", gutter_cross_slope),
        ("roadCrossSlope", road_cross_slope),
    ] {
        if !v.is_finite() {
            return Err(Error::invalid(kind, parameter, InvalidReason::NotFinite));
        }
        if v <= 0.0 {
            return Err(Error::invalid(kind, parameter, InvalidReason::NotPositive));
        }
    }
    if !depth.is_finite() {
        return Err(Error::invalid(kind, "waterLevel", InvalidReason::NotFinite));
    }
    if depth < 0.0 {
        return Err(Error::invalid(kind, "waterLevel", InvalidReason::Negative));
    }

    let (w, sw, sx) = (gutter_width, gutter_cross_slope, road_cross_slope);
    let break_depth = sw * w;
    let gutter_depression = ((sw - sx) * w).max(0.0);

    let solution = if depth <= break_depth {
        GutterSolution {
            branch: GutterBranch::Triangular,
            spread: depth / sw,
            break_depth,
            gutter_depression,
            depth_at_break: 0.0,
        }
    } else {
        GutterSolution {
            branch: GutterBranch::Composite,
            spread: (depth - (sw - sx) * w) / sx + w,
            break_depth,
            gutter_depression,
            depth_at_break: depth - break_depth,
        }
    };
    Ok(solution)
}

/// Solves the gutter and lays out its ground and water polylines.
///
/// The road is drawn out to `max(2W, 1.2T)` (per `config`) so the plot always shows ground beyond
/// the wetted width.
pub fn resolve(
    gutter_width: f64,
    gutter_cross_slope: f64,
    road_cross_slope: f64,
    depth: f64,
    config: &ViewportConfig,
) -> Result<GutterSection> {
    let solution = solve(gutter_width, gutter_cross_slope, road_cross_slope, depth)?;
    let (w, sw, sx) = (gutter_width, gutter_cross_slope, road_cross_slope);

    let visual_width = (w * config.gutter_min_width_factor)
        .max(solution.spread * config.gutter_spread_overshoot);
    let visual_depth = (depth * config.gutter_depth_overshoot)
        .max(solution.break_depth * config.gutter_break_overshoot);

    let ground = vec![
        section_point(0.0, visual_depth),
        section_point(0.0, 0.0),
        section_point(w, solution.break_depth),
        section_point(
            visual_width,
            solution.break_depth + sx * (visual_width - w),
        ),
    ];

    let water = (depth > 0.0).then(|| match solution.branch {
        GutterBranch::Triangular => vec![
            section_point(0.0, depth),
            section_point(0.0, 0.0),
            section_point(depth / sw, depth),
        ],
        GutterBranch::Composite => vec![
            section_point(0.0, depth),
            section_point(0.0, 0.0),
            section_point(w, solution.break_depth),
            section_point(solution.spread, depth),
        ],
    });

    Ok(GutterSection {
        solution,
        ground,
        water,
        visual_width,
        visual_depth,
    })
}
