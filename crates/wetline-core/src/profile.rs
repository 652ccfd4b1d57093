//! Ground profiles for every shape kind, plus the closed-form water regions of the prismatic
//! channels.

use crate::config::ViewportConfig;
use crate::descriptor::{Shape, ShapeDescriptor};
use crate::error::Result;
use crate::geom::{SectionPoint, guarded_extent, section_point};
use crate::gutter;

/// Ordered ground boundary of `descriptor` in section space.
///
/// Prismatic channels (rectangular, trapezoidal, triangular) are drawn with walls
/// `visual_height_factor` depths tall, bottom centered on station 0. Irregular profiles are
/// returned as surveyed.
pub fn resolve(descriptor: &ShapeDescriptor, config: &ViewportConfig) -> Result<Vec<SectionPoint>> {
    descriptor.validate()?;
    let depth = descriptor.water_level;
    let ground = match &descriptor.shape {
        Shape::Irregular {
            station_elevation_points,
        } => station_elevation_points.clone(),
        Shape::Gutter {
            gutter_width,
            gutter_cross_slope,
            road_cross_slope,
        } => {
            gutter::resolve(
                *gutter_width,
                *gutter_cross_slope,
                *road_cross_slope,
                depth,
                config,
            )?
            .ground
        }
        Shape::Rectangular { bottom_width } => {
            PrismaticOutline::rectangular(*bottom_width).at(visual_height(depth, config))
        }
        Shape::Trapezoidal {
            bottom_width,
            left_slope,
            right_slope,
        } => PrismaticOutline::trapezoidal(*bottom_width, *left_slope, *right_slope)
            .at(visual_height(depth, config)),
        Shape::Triangular {
            left_slope,
            right_slope,
        } => PrismaticOutline::triangular(*left_slope, *right_slope)
            .at(visual_height(depth, config)),
    };
    Ok(ground)
}

pub(crate) fn visual_height(depth: f64, config: &ViewportConfig) -> f64 {
    guarded_extent(depth * config.visual_height_factor)
}

/// Bottom width and side slopes of a prismatic channel. A triangle is a trapezoid with no bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PrismaticOutline {
    pub bottom_width: f64,
    pub left_slope: f64,
    pub right_slope: f64,
    has_bottom: bool,
}

impl PrismaticOutline {
    pub(crate) fn rectangular(bottom_width: f64) -> Self {
        Self::trapezoidal(bottom_width, 0.0, 0.0)
    }

    pub(crate) fn trapezoidal(bottom_width: f64, left_slope: f64, right_slope: f64) -> Self {
        Self {
            bottom_width,
            left_slope,
            right_slope,
            has_bottom: true,
        }
    }

    pub(crate) fn triangular(left_slope: f64, right_slope: f64) -> Self {
        Self {
            bottom_width: 0.0,
            left_slope,
            right_slope,
            has_bottom: false,
        }
    }

    /// Open outline from the left bank down to the invert and up to the right bank at `height`.
    pub(crate) fn at(&self, height: f64) -> Vec<SectionPoint> {
        let half = self.bottom_width / 2.0;
        let mut pts = Vec::with_capacity(4);
        pts.push(section_point(-half - self.left_slope * height, height));
        if self.has_bottom {
            pts.push(section_point(-half, 0.0));
            pts.push(section_point(half, 0.0));
        } else {
            pts.push(section_point(0.0, 0.0));
        }
        pts.push(section_point(half + self.right_slope * height, height));
        pts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_outline_has_a_single_apex() {
        let outline = PrismaticOutline::triangular(1.0, 2.0);
        let pts = outline.at(2.0);
        assert_eq!(
            pts,
            vec![
                section_point(-2.0, 2.0),
                section_point(0.0, 0.0),
                section_point(4.0, 2.0),
            ]
        );
    }

    #[test]
    fn irregular_profile_is_returned_as_surveyed() {
        let d = ShapeDescriptor::irregular([(0.0, 3.0), (1.0, 0.5), (4.0, 2.0)], 1.0);
        let ground = resolve(&d, &ViewportConfig::default()).unwrap();
        assert_eq!(
            ground,
            vec![
                section_point(0.0, 3.0),
                section_point(1.0, 0.5),
                section_point(4.0, 2.0),
            ]
        );
    }
}
