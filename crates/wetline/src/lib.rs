#![forbid(unsafe_code)]

//! `wetline` draws flood cross-sections headlessly: prismatic channels, curb-and-gutter sections
//! and surveyed station-elevation profiles, with the water surface at a given depth.
//!
//! # Features
//!
//! - `render`: SVG output (`wetline::render`)
//! - `raster`: PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use wetline_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use wetline_render::{
        Error, PlotMode, PlotStyle, Result, SvgRenderOptions, render_geometry_svg, render_svg,
    };

    #[cfg(feature = "raster")]
    pub mod raster;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several plots can be
    /// inlined into one page without id collisions.
    ///
    /// Unsupported characters become `-`, runs of `-` collapse, and ids that don't start with an
    /// ASCII letter get an `xs-` prefix.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        let mut out = String::with_capacity(raw.len() + 3);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() {
            return "xs-untitled".to_string();
        }
        if out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            out.to_string()
        } else {
            format!("xs-{out}")
        }
    }

    /// Bundles a [`crate::ViewportConfig`] and SVG options for UI integrations.
    ///
    /// CPU-bound and I/O-free; cheap to clone and share across threads.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub config: crate::ViewportConfig,
        pub svg_options: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: crate::ViewportConfig) -> Self {
            self.config = config;
            self
        }

        pub fn with_svg_options(mut self, svg_options: SvgRenderOptions) -> Self {
            self.svg_options = svg_options;
            self
        }

        pub fn render_svg(&self, descriptor: &crate::ShapeDescriptor) -> Result<Option<String>> {
            render_svg(descriptor, &self.config, &self.svg_options)
        }

        pub fn render_svg_json(&self, text: &str) -> Result<Option<String>> {
            let descriptor = crate::ShapeDescriptor::from_json(text)?;
            self.render_svg(&descriptor)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn sanitize_svg_id_keeps_safe_tokens() {
            assert_eq!(sanitize_svg_id("creek-xs.12"), "creek-xs.12");
            assert_eq!(sanitize_svg_id("  Main St / gutter  "), "Main-St-gutter");
            assert_eq!(sanitize_svg_id("12+00"), "xs-12-00");
            assert_eq!(sanitize_svg_id("///"), "xs-untitled");
        }

        #[test]
        fn headless_renderer_reads_wire_json() {
            let svg = HeadlessRenderer::new()
                .render_svg_json(r#"{"kind":"rectangular","bottomWidth":5,"waterLevel":2}"#)
                .unwrap()
                .unwrap();
            assert!(svg.starts_with("<svg"));
            assert!(svg.contains(r#"class="water""#));
        }
    }
}
