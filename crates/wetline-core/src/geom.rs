#![forbid(unsafe_code)]

/// Logical cross-section space: `x` is station, `y` is elevation (up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpace;

/// Projected drawing space: pixels, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpace;

pub type SectionPoint = euclid::Point2D<f64, SectionSpace>;
pub type SectionBox = euclid::Box2D<f64, SectionSpace>;
pub type CanvasPoint = euclid::Point2D<f64, CanvasSpace>;
pub type SectionToCanvas = euclid::Transform2D<f64, SectionSpace, CanvasSpace>;

pub fn section_point(station: f64, elevation: f64) -> SectionPoint {
    euclid::point2(station, elevation)
}

pub fn canvas_point(x: f64, y: f64) -> CanvasPoint {
    euclid::point2(x, y)
}

/// Bounding box of a point set. `None` for an empty set.
pub fn section_extent<'a>(points: impl IntoIterator<Item = &'a SectionPoint>) -> Option<SectionBox> {
    let mut it = points.into_iter();
    let first = *it.next()?;
    let mut b = SectionBox::new(first, first);
    for p in it {
        b.min.x = b.min.x.min(p.x);
        b.min.y = b.min.y.min(p.y);
        b.max.x = b.max.x.max(p.x);
        b.max.y = b.max.y.max(p.y);
    }
    Some(b)
}

/// Extents that are zero or not finite would blow up a scale factor.
pub(crate) fn guarded_extent(v: f64) -> f64 {
    if v.is_finite() && v > f64::EPSILON {
        v
    } else {
        1.0
    }
}
