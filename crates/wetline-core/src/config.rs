use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Output resolution and the visual heuristics used to frame a section.
///
/// All lengths are canvas pixels except the `*_factor`/`*_overshoot` multipliers, which scale
/// logical extents (depth, gutter width, spread) before fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub margin: f64,
    /// Channel walls are drawn this many depths tall.
    pub visual_height_factor: f64,
    /// The road slope is drawn at least this many gutter widths from the curb.
    pub gutter_min_width_factor: f64,
    pub gutter_spread_overshoot: f64,
    pub gutter_depth_overshoot: f64,
    pub gutter_break_overshoot: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            canvas_width: 240.0,
            canvas_height: 140.0,
            margin: 30.0,
            visual_height_factor: 1.35,
            gutter_min_width_factor: 2.0,
            gutter_spread_overshoot: 1.2,
            gutter_depth_overshoot: 1.5,
            gutter_break_overshoot: 1.2,
        }
    }
}

impl ViewportConfig {
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Reads a (possibly partial) JSON object; absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn drawable_width(&self) -> f64 {
        self.canvas_width - 2.0 * self.margin
    }

    pub fn drawable_height(&self) -> f64 {
        self.canvas_height - 2.0 * self.margin
    }

    pub fn validate(&self) -> Result<()> {
        fn positive(field: &'static str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig { field, value })
            }
        }

        positive("canvasWidth", self.canvas_width)?;
        positive("canvasHeight", self.canvas_height)?;
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(Error::InvalidConfig {
                field: "margin",
                value: self.margin,
            });
        }
        positive("drawableWidth", self.drawable_width())?;
        positive("drawableHeight", self.drawable_height())?;
        positive("visualHeightFactor", self.visual_height_factor)?;
        positive("gutterMinWidthFactor", self.gutter_min_width_factor)?;
        positive("gutterSpreadOvershoot", self.gutter_spread_overshoot)?;
        positive("gutterDepthOvershoot", self.gutter_depth_overshoot)?;
        positive("gutterBreakOvershoot", self.gutter_break_overshoot)
    }
}
