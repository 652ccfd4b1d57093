//! Fitting section-space extents into a fixed-size canvas.

use crate::config::ViewportConfig;
use crate::geom::{
    CanvasPoint, SectionBox, SectionPoint, SectionToCanvas, canvas_point, guarded_extent,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Independent X/Y scales fill the drawable area; the extent's minimum corner sits on the
    /// bottom-left margin.
    Independent,
    /// One scale for both axes so proportions survive; centered horizontally, resting on the
    /// bottom margin.
    Uniform,
}

/// Affine map from section space (y up) to canvas space (y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub scale_x: f64,
    pub scale_y: f64,
    /// Canvas position of section station 0.
    pub origin_x: f64,
    /// Canvas position of section elevation 0.
    pub origin_y: f64,
}

impl Viewport {
    pub fn to_canvas(&self, p: SectionPoint) -> CanvasPoint {
        canvas_point(
            self.origin_x + p.x * self.scale_x,
            self.origin_y - p.y * self.scale_y,
        )
    }

    pub fn project_all(&self, points: &[SectionPoint]) -> Vec<CanvasPoint> {
        points.iter().map(|p| self.to_canvas(*p)).collect()
    }

    pub fn transform(&self) -> SectionToCanvas {
        SectionToCanvas::new(
            self.scale_x,
            0.0,
            0.0,
            -self.scale_y,
            self.origin_x,
            self.origin_y,
        )
    }
}

/// Computes the viewport that fits `extent` inside the drawable area of `config`.
///
/// Zero-sized extents fall back to one unit on the degenerate axis.
pub fn project(extent: SectionBox, config: &ViewportConfig, mode: ScaleMode) -> Viewport {
    let width = guarded_extent(extent.max.x - extent.min.x);
    let height = guarded_extent(extent.max.y - extent.min.y);
    let scale_x = config.drawable_width() / width;
    let scale_y = config.drawable_height() / height;
    let bottom = config.canvas_height - config.margin;

    let viewport = match mode {
        ScaleMode::Independent => Viewport {
            scale_x,
            scale_y,
            origin_x: config.margin - extent.min.x * scale_x,
            origin_y: bottom + extent.min.y * scale_y,
        },
        ScaleMode::Uniform => {
            let scale = scale_x.min(scale_y);
            let center_station = (extent.min.x + extent.max.x) / 2.0;
            Viewport {
                scale_x: scale,
                scale_y: scale,
                origin_x: config.canvas_width / 2.0 - center_station * scale,
                origin_y: bottom + extent.min.y * scale,
            }
        }
    };
    tracing::trace!(?mode, ?viewport, "viewport fitted");
    viewport
}
