//! Stroke and fill presets for cross-section plots.

use serde::{Deserialize, Serialize};
use wetline_core::ShapeKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// Colored plot for dark UI surfaces.
    #[default]
    Dark,
    /// Black strokes and unfilled water, for printed reports.
    Print,
}

impl std::str::FromStr for PlotMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(PlotMode::Dark),
            "print" => Ok(PlotMode::Print),
            other => Err(format!("unknown plot mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub ground_stroke: &'static str,
    pub ground_width: f64,
    /// `None` leaves the water region unfilled.
    pub water_fill: Option<&'static str>,
    pub water_opacity: f64,
    pub waterline_stroke: &'static str,
    pub waterline_width: f64,
    pub waterline_dash: &'static str,
}

impl PlotStyle {
    /// Gutters are drawn with heavier strokes than channels.
    pub fn for_plot(mode: PlotMode, kind: ShapeKind) -> Self {
        let gutter = kind == ShapeKind::Gutter;
        let (waterline_width, waterline_dash, water_opacity) = if gutter {
            (1.5, "4,3", 0.25)
        } else {
            (1.0, "3,2", 0.15)
        };
        match mode {
            PlotMode::Dark => Self {
                ground_stroke: "#525252",
                ground_width: if gutter { 2.0 } else { 1.5 },
                water_fill: Some("#3b82f6"),
                water_opacity,
                waterline_stroke: "#60a5fa",
                waterline_width,
                waterline_dash,
            },
            PlotMode::Print => Self {
                ground_stroke: "#000000",
                ground_width: if gutter { 1.5 } else { 1.0 },
                water_fill: None,
                water_opacity,
                waterline_stroke: "#000000",
                waterline_width,
                waterline_dash,
            },
        }
    }
}
