use crate::theme::{PlotMode, PlotStyle};
use std::fmt::Write as _;
use wetline_core::{GeometryResult, PathRole};

mod util;

pub(crate) use util::{escape_xml, fmt, fmt_path_into};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; defaults to `wetline`.
    pub diagram_id: Option<String>,
    pub mode: PlotMode,
    /// Root `width` attribute in pixels. `None` emits `width="100%"`.
    pub width: Option<f64>,
    /// When true, draw the dashed waterline over the water region.
    pub include_waterline: bool,
    /// Adds extra space around the canvas viewBox.
    pub viewbox_padding: f64,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            mode: PlotMode::Dark,
            width: None,
            include_waterline: true,
            viewbox_padding: 0.0,
        }
    }
}

/// Renders projected cross-section geometry as a standalone SVG document.
///
/// The viewBox is the canvas the geometry was projected into, so coordinates are written as-is.
pub fn render_geometry_svg(geometry: &GeometryResult, options: &SvgRenderOptions) -> String {
    let style = PlotStyle::for_plot(options.mode, geometry.kind);
    let diagram_id = options.diagram_id.as_deref().unwrap_or("wetline");
    let diagram_id_esc = escape_xml(diagram_id);

    let pad = if options.viewbox_padding.is_finite() {
        options.viewbox_padding.max(0.0)
    } else {
        0.0
    };
    let viewbox = format!(
        "{} {} {} {}",
        fmt(-pad),
        fmt(-pad),
        fmt(geometry.canvas.width + 2.0 * pad),
        fmt(geometry.canvas.height + 2.0 * pad)
    );
    let width_attr = match options.width {
        Some(w) if w.is_finite() && w > 0.0 => fmt(w),
        _ => "100%".to_string(),
    };
    tracing::trace!(kind = %geometry.kind, %viewbox, "rendering cross-section svg");

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{diagram_id_esc}" width="{width_attr}" xmlns="http://www.w3.org/2000/svg" viewBox="{viewbox}" role="graphics-document document" aria-roledescription="cross-section">"#,
    );
    let _ = write!(
        &mut out,
        r#"<g class="cross-section {kind}">"#,
        kind = geometry.kind
    );

    for path in geometry.paths() {
        match path.role {
            PathRole::Water => {
                let d = path.to_svg_data_with(fmt_path_into);
                match style.water_fill {
                    Some(fill) => {
                        let _ = write!(
                            &mut out,
                            r#"<path class="water" d="{d}" fill="{fill}" fill-opacity="{opacity}" stroke="none"/>"#,
                            opacity = fmt(style.water_opacity),
                        );
                    }
                    // Invisible in print; the waterline alone marks the level.
                    None => {
                        let _ = write!(
                            &mut out,
                            r#"<path class="water" d="{d}" fill="none" stroke="none"/>"#,
                        );
                    }
                }
            }
            PathRole::Ground => {
                let d = path.to_svg_data_with(fmt_path_into);
                let _ = write!(
                    &mut out,
                    r#"<path class="ground" d="{d}" fill="none" stroke="{stroke}" stroke-width="{width}" stroke-linejoin="round" stroke-linecap="round"/>"#,
                    stroke = style.ground_stroke,
                    width = fmt(style.ground_width),
                );
            }
            PathRole::Waterline => {}
        }
    }

    if options.include_waterline {
        if let Some([a, b]) = geometry.waterline {
            let mut coords = String::new();
            for (name, v) in [("x1", a.x), ("y1", a.y), ("x2", b.x), ("y2", b.y)] {
                let _ = write!(&mut coords, r#" {name}=""#);
                fmt_path_into(&mut coords, v);
                coords.push('"');
            }
            let _ = write!(
                &mut out,
                r#"<line class="waterline"{coords} stroke="{stroke}" stroke-width="{width}" stroke-dasharray="{dash}"/>"#,
                stroke = style.waterline_stroke,
                width = fmt(style.waterline_width),
                dash = style.waterline_dash,
            );
        }
    }

    out.push_str("</g></svg>");
    out
}
