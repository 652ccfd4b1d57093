use wetline_core::{ShapeDescriptor, ViewportConfig};
use wetline_render::{PlotMode, SvgRenderOptions, render_svg};

fn render(descriptor: &ShapeDescriptor, options: &SvgRenderOptions) -> String {
    render_svg(descriptor, &ViewportConfig::default(), options)
        .unwrap()
        .unwrap()
}

fn by_class<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    class: &str,
) -> Vec<roxmltree::Node<'a, 'input>> {
    doc.descendants()
        .filter(|n| n.attribute("class") == Some(class))
        .collect()
}

#[test]
fn channel_svg_has_water_ground_and_waterline() {
    let svg = render(
        &ShapeDescriptor::trapezoidal(3.0, 1.5, 1.5, 1.2),
        &SvgRenderOptions::default(),
    );
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.attribute("viewBox"), Some("0 0 240 140"));
    assert_eq!(root.attribute("aria-roledescription"), Some("cross-section"));
    assert_eq!(root.attribute("id"), Some("wetline"));

    let water = by_class(&doc, "water");
    assert_eq!(water.len(), 1);
    assert_eq!(water[0].attribute("fill"), Some("#3b82f6"));
    assert_eq!(water[0].attribute("fill-opacity"), Some("0.15"));
    assert!(water[0].attribute("d").unwrap().ends_with('Z'));

    let ground = by_class(&doc, "ground");
    assert_eq!(ground.len(), 1);
    assert_eq!(ground[0].attribute("fill"), Some("none"));
    assert!(!ground[0].attribute("d").unwrap().contains('Z'));

    let line = by_class(&doc, "waterline");
    assert_eq!(line.len(), 1);
    assert_eq!(line[0].attribute("stroke-dasharray"), Some("3,2"));
    assert_eq!(line[0].attribute("y1"), line[0].attribute("y2"));
}

#[test]
fn water_is_drawn_beneath_the_ground() {
    let svg = render(
        &ShapeDescriptor::rectangular(5.0, 2.0),
        &SvgRenderOptions::default(),
    );
    let water = svg.find(r#"class="water""#).unwrap();
    let ground = svg.find(r#"class="ground""#).unwrap();
    let line = svg.find(r#"class="waterline""#).unwrap();
    assert!(water < ground && ground < line);
}

#[test]
fn gutter_svg_uses_heavier_strokes() {
    let svg = render(
        &ShapeDescriptor::gutter(2.0, 0.06, 0.02, 0.2),
        &SvgRenderOptions::default(),
    );
    let doc = roxmltree::Document::parse(&svg).unwrap();
    assert_eq!(
        by_class(&doc, "ground")[0].attribute("stroke-width"),
        Some("2")
    );
    let line = &by_class(&doc, "waterline")[0];
    assert_eq!(line.attribute("stroke-dasharray"), Some("4,3"));
    assert_eq!(line.attribute("stroke-width"), Some("1.5"));
    assert_eq!(line.attribute("x1"), Some("30"));
    assert_eq!(
        by_class(&doc, "water")[0].attribute("fill-opacity"),
        Some("0.25")
    );
}

#[test]
fn print_mode_is_black_and_unfilled() {
    let options = SvgRenderOptions {
        mode: PlotMode::Print,
        ..Default::default()
    };
    let svg = render(
        &ShapeDescriptor::irregular([(0.0, 10.0), (5.0, 0.0), (10.0, 10.0)], 5.0),
        &options,
    );
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let water = by_class(&doc, "water");
    assert_eq!(water[0].attribute("fill"), Some("none"));
    assert_eq!(water[0].attribute("stroke"), Some("none"));
    assert_eq!(by_class(&doc, "waterline").len(), 1);
    assert_eq!(
        by_class(&doc, "ground")[0].attribute("stroke"),
        Some("#000000")
    );
    assert_eq!(
        by_class(&doc, "ground")[0].attribute("stroke-width"),
        Some("1")
    );
}

#[test]
fn dry_section_has_no_water_elements() {
    let svg = render(
        &ShapeDescriptor::irregular([(0.0, 0.0), (10.0, 10.0)], 5.0),
        &SvgRenderOptions::default(),
    );
    let doc = roxmltree::Document::parse(&svg).unwrap();
    assert!(by_class(&doc, "water").is_empty());
    assert!(by_class(&doc, "waterline").is_empty());
    assert_eq!(by_class(&doc, "ground").len(), 1);
}

#[test]
fn options_control_root_attributes() {
    let options = SvgRenderOptions {
        diagram_id: Some("xs<1>".to_string()),
        width: Some(480.0),
        include_waterline: false,
        viewbox_padding: 4.0,
        ..Default::default()
    };
    let svg = render(&ShapeDescriptor::rectangular(2.0, 1.0), &options);
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let root = doc.root_element();
    assert_eq!(root.attribute("id"), Some("xs<1>"));
    assert_eq!(root.attribute("width"), Some("480"));
    assert_eq!(root.attribute("viewBox"), Some("-4 -4 248 148"));
    assert!(by_class(&doc, "waterline").is_empty());
}

#[test]
fn too_short_profile_renders_nothing() {
    let out = render_svg(
        &ShapeDescriptor::irregular([(0.0, 1.0)], 1.0),
        &ViewportConfig::default(),
        &SvgRenderOptions::default(),
    )
    .unwrap();
    assert!(out.is_none());
}

#[test]
fn invalid_shape_is_an_error() {
    let err = render_svg(
        &ShapeDescriptor::gutter(2.0, 0.06, 0.0, 0.1),
        &ViewportConfig::default(),
        &SvgRenderOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("roadCrossSlope"));
}
