//! Shape descriptors: the input contract of the engine.
//!
//! Two forms exist. [`RawShapeDescriptor`] is the flat wire shape produced by form-driven UIs,
//! where every field may be present and only some are meaningful for a given `kind`.
//! [`ShapeDescriptor`] is the typed form the pipelines consume: each [`Shape`] variant carries
//! only its own parameters.

use crate::error::{Error, InvalidReason, Result};
use crate::geom::{SectionPoint, section_point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangular,
    Trapezoidal,
    Triangular,
    Gutter,
    Irregular,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangular => "rectangular",
            ShapeKind::Trapezoidal => "trapezoidal",
            ShapeKind::Triangular => "triangular",
            ShapeKind::Gutter => "gutter",
            ShapeKind::Irregular => "irregular",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    #[serde(rename_all = "camelCase")]
    Rectangular { bottom_width: f64 },
    #[serde(rename_all = "camelCase")]
    Trapezoidal {
        bottom_width: f64,
        left_slope: f64,
        right_slope: f64,
    },
    #[serde(rename_all = "camelCase")]
    Triangular { left_slope: f64, right_slope: f64 },
    #[serde(rename_all = "camelCase")]
    Gutter {
        gutter_width: f64,
        gutter_cross_slope: f64,
        road_cross_slope: f64,
    },
    #[serde(rename_all = "camelCase")]
    Irregular {
        station_elevation_points: Vec<SectionPoint>,
    },
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangular { .. } => ShapeKind::Rectangular,
            Shape::Trapezoidal { .. } => ShapeKind::Trapezoidal,
            Shape::Triangular { .. } => ShapeKind::Triangular,
            Shape::Gutter { .. } => ShapeKind::Gutter,
            Shape::Irregular { .. } => ShapeKind::Irregular,
        }
    }
}

/// A fully materialized shape plus its water level.
///
/// `water_level` is a depth: above the invert (channels), above the gutter flow line at the curb
/// (gutters), or above the lowest surveyed elevation (irregular profiles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDescriptor {
    #[serde(flatten)]
    pub shape: Shape,
    pub water_level: f64,
}

impl ShapeDescriptor {
    pub fn rectangular(bottom_width: f64, depth: f64) -> Self {
        Self {
            shape: Shape::Rectangular { bottom_width },
            water_level: depth,
        }
    }

    pub fn trapezoidal(bottom_width: f64, left_slope: f64, right_slope: f64, depth: f64) -> Self {
        Self {
            shape: Shape::Trapezoidal {
                bottom_width,
                left_slope,
                right_slope,
            },
            water_level: depth,
        }
    }

    pub fn triangular(left_slope: f64, right_slope: f64, depth: f64) -> Self {
        Self {
            shape: Shape::Triangular {
                left_slope,
                right_slope,
            },
            water_level: depth,
        }
    }

    pub fn gutter(
        gutter_width: f64,
        gutter_cross_slope: f64,
        road_cross_slope: f64,
        depth: f64,
    ) -> Self {
        Self {
            shape: Shape::Gutter {
                gutter_width,
                gutter_cross_slope,
                road_cross_slope,
            },
            water_level: depth,
        }
    }

    pub fn irregular(points: impl IntoIterator<Item = (f64, f64)>, depth: f64) -> Self {
        Self {
            shape: Shape::Irregular {
                station_elevation_points: points
                    .into_iter()
                    .map(|(s, e)| section_point(s, e))
                    .collect(),
            },
            water_level: depth,
        }
    }

    /// Parses the flat wire form and normalizes it.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawShapeDescriptor = serde_json::from_str(text)?;
        Self::try_from(raw)
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Checks every parameter the shape's formulas rely on.
    ///
    /// Irregular profiles with fewer than two points report [`Error::InsufficientData`]; callers
    /// going through [`crate::render`] see that as an absent result.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind();
        finite(kind, "waterLevel", self.water_level)?;
        if self.water_level < 0.0 {
            return Err(Error::invalid(kind, "waterLevel", InvalidReason::Negative));
        }

        match &self.shape {
            Shape::Rectangular { bottom_width } => positive(kind, "bottomWidth", *bottom_width),
            Shape::Trapezoidal {
                bottom_width,
                left_slope,
                right_slope,
            } => {
                non_negative(kind, "bottomWidth", *bottom_width)?;
                non_negative(kind, "leftSlope", *left_slope)?;
                non_negative(kind, "rightSlope", *right_slope)
            }
            Shape::Triangular {
                left_slope,
                right_slope,
            } => {
                non_negative(kind, "leftSlope", *left_slope)?;
                non_negative(kind, "rightSlope", *right_slope)
            }
            Shape::Gutter {
                gutter_width,
                gutter_cross_slope,
                road_cross_slope,
            } => {
                positive(kind, "gutterWidth", *gutter_width)?;
                positive(kind, "gutterCrossSlope", *gutter_cross_slope)?;
                positive(kind, "roadCrossSlope", *road_cross_slope)
            }
            Shape::Irregular {
                station_elevation_points: points,
            } => {
                if points.len() < 2 {
                    return Err(Error::InsufficientData {
                        points: points.len(),
                    });
                }
                for p in points {
                    finite(kind, "stationElevationPoints", p.x)?;
                    finite(kind, "stationElevationPoints", p.y)?;
                }
                if points.windows(2).any(|w| w[1].x <= w[0].x) {
                    return Err(Error::invalid(
                        kind,
                        "stationElevationPoints",
                        InvalidReason::StationsNotIncreasing,
                    ));
                }
                Ok(())
            }
        }
    }

    /// Water surface elevation in section space.
    ///
    /// Parametric shapes put their invert at elevation 0, so the depth is the elevation. For
    /// irregular profiles the depth is measured from the lowest surveyed point.
    pub fn water_surface_elevation(&self) -> f64 {
        match &self.shape {
            Shape::Irregular {
                station_elevation_points: points,
            } => {
                let min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
                if min.is_finite() {
                    min + self.water_level
                } else {
                    self.water_level
                }
            }
            _ => self.water_level,
        }
    }
}

fn finite(kind: ShapeKind, parameter: &'static str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(kind, parameter, InvalidReason::NotFinite))
    }
}

fn non_negative(kind: ShapeKind, parameter: &'static str, v: f64) -> Result<()> {
    finite(kind, parameter, v)?;
    if v < 0.0 {
        return Err(Error::invalid(kind, parameter, InvalidReason::Negative));
    }
    Ok(())
}

fn positive(kind: ShapeKind, parameter: &'static str, v: f64) -> Result<()> {
    finite(kind, parameter, v)?;
    if v <= 0.0 {
        return Err(Error::invalid(kind, parameter, InvalidReason::NotPositive));
    }
    Ok(())
}

/// Flat wire form of a descriptor, as sent by scenario editors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawShapeDescriptor {
    pub kind: ShapeKind,
    #[serde(default)]
    pub bottom_width: Option<f64>,
    /// Legacy symmetric side slope, used for any side without its own slope.
    #[serde(default)]
    pub side_slope: Option<f64>,
    #[serde(default)]
    pub left_slope: Option<f64>,
    #[serde(default)]
    pub right_slope: Option<f64>,
    #[serde(default)]
    pub gutter_width: Option<f64>,
    #[serde(default)]
    pub gutter_cross_slope: Option<f64>,
    #[serde(default)]
    pub road_cross_slope: Option<f64>,
    #[serde(default)]
    pub station_elevation_points: Option<Vec<(f64, f64)>>,
    pub water_level: f64,
}

fn side_slope(explicit: Option<f64>, symmetric: Option<f64>) -> Option<f64> {
    // Only an absent or zero slope defers to `sideSlope`; anything else is validated as given.
    match explicit {
        Some(z) if z != 0.0 => Some(z),
        _ => symmetric.or(explicit),
    }
}

fn required(kind: ShapeKind, parameter: &'static str, v: Option<f64>) -> Result<f64> {
    v.ok_or_else(|| Error::invalid(kind, parameter, InvalidReason::Missing))
}

impl TryFrom<RawShapeDescriptor> for ShapeDescriptor {
    type Error = Error;

    fn try_from(raw: RawShapeDescriptor) -> Result<Self> {
        let kind = raw.kind;
        let left = side_slope(raw.left_slope, raw.side_slope);
        let right = side_slope(raw.right_slope, raw.side_slope);

        let shape = match kind {
            ShapeKind::Rectangular => Shape::Rectangular {
                bottom_width: required(kind, "bottomWidth", raw.bottom_width)?,
            },
            ShapeKind::Trapezoidal => Shape::Trapezoidal {
                bottom_width: required(kind, "bottomWidth", raw.bottom_width)?,
                left_slope: required(kind, "leftSlope", left)?,
                right_slope: required(kind, "rightSlope", right)?,
            },
            ShapeKind::Triangular => Shape::Triangular {
                left_slope: required(kind, "leftSlope", left)?,
                right_slope: required(kind, "rightSlope", right)?,
            },
            ShapeKind::Gutter => Shape::Gutter {
                gutter_width: required(kind, "gutterWidth", raw.gutter_width)?,
                gutter_cross_slope: required(kind, "gutterCrossSlope", raw.gutter_cross_slope)?,
                road_cross_slope: required(kind, "roadCrossSlope", raw.road_cross_slope)?,
            },
            ShapeKind::Irregular => Shape::Irregular {
                station_elevation_points: raw
                    .station_elevation_points
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(s, e)| section_point(s, e))
                    .collect(),
            },
        };

        Ok(Self {
            shape,
            water_level: raw.water_level,
        })
    }
}
