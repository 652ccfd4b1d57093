#![forbid(unsafe_code)]

pub mod svg;
pub mod theme;

use wetline_core::{ShapeDescriptor, ViewportConfig};

pub use svg::{SvgRenderOptions, render_geometry_svg};
pub use theme::{PlotMode, PlotStyle};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] wetline_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Resolves `descriptor` and renders it as a standalone SVG document.
///
/// `Ok(None)` when there is nothing to draw yet (an irregular profile with fewer than two points).
pub fn render_svg(
    descriptor: &ShapeDescriptor,
    config: &ViewportConfig,
    options: &SvgRenderOptions,
) -> Result<Option<String>> {
    let Some(geometry) = wetline_core::render(descriptor, config)? else {
        return Ok(None);
    };
    Ok(Some(render_geometry_svg(&geometry, options)))
}
