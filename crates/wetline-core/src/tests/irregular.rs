use super::approx_eq;
use crate::*;

fn v_profile(depth: f64) -> ShapeDescriptor {
    ShapeDescriptor::irregular([(0.0, 10.0), (5.0, 0.0), (10.0, 10.0)], depth)
}

#[test]
fn v_profile_produces_a_closed_basin() {
    let section = resolve_section(&v_profile(5.0), &ViewportConfig::default())
        .unwrap()
        .unwrap();
    let water = section.water.unwrap();
    assert_eq!(water.polygon.len(), 4);
    assert_eq!(water.polygon.first(), water.polygon.last());
    assert_eq!(water.waterline.0, geom::section_point(2.5, 5.0));
    assert_eq!(water.waterline.1, geom::section_point(7.5, 5.0));
    assert!(approx_eq(section.properties.flow_area, 12.5));
    assert!(approx_eq(section.properties.top_width, 5.0));
    assert!(approx_eq(section.properties.wetted_perimeter, 125.0_f64.sqrt()));
}

#[test]
fn depth_is_measured_from_the_lowest_point() {
    let d = ShapeDescriptor::irregular([(0.0, 104.0), (2.0, 100.5), (6.0, 101.0), (8.0, 104.0)], 1.5);
    assert!(approx_eq(d.water_surface_elevation(), 102.0));
    let section = resolve_section(&d, &ViewportConfig::default())
        .unwrap()
        .unwrap();
    assert!(approx_eq(section.water_surface_elevation, 102.0));
    assert!(section.water.is_some());
}

#[test]
fn irregular_profile_fills_the_drawable_area() {
    let cfg = ViewportConfig::default();
    let out = render(&v_profile(5.0), &cfg).unwrap().unwrap();
    assert!(approx_eq(out.ground_path[0].x, cfg.margin));
    assert!(approx_eq(out.ground_path[0].y, cfg.margin));
    assert!(approx_eq(out.ground_path[2].x, cfg.canvas_width - cfg.margin));
    assert!(approx_eq(out.ground_path[1].y, cfg.canvas_height - cfg.margin));
}

#[test]
fn two_point_slope_yields_ground_without_water() {
    let d = ShapeDescriptor::irregular([(0.0, 0.0), (10.0, 10.0)], 5.0);
    let out = render(&d, &ViewportConfig::default()).unwrap().unwrap();
    assert!(!out.has_water());
    assert!(out.waterline.is_none());
    assert_eq!(out.ground_path.len(), 2);
    // Measured even though nothing is filled.
    assert!(approx_eq(out.properties.top_width, 5.0));
}

#[test]
fn fewer_than_two_points_is_not_an_error() {
    let cfg = ViewportConfig::default();
    assert_eq!(render(&ShapeDescriptor::irregular([], 1.0), &cfg).unwrap(), None);
    assert_eq!(
        render(&ShapeDescriptor::irregular([(3.0, 1.0)], 1.0), &cfg).unwrap(),
        None
    );
}

#[test]
fn overtopped_profile_has_no_drawable_water() {
    let section = resolve_section(&v_profile(20.0), &ViewportConfig::default())
        .unwrap()
        .unwrap();
    assert!(section.is_dry());
    assert!(approx_eq(section.extent.max.y, 20.0));
}

#[test]
fn two_basins_share_one_waterline() {
    let d = ShapeDescriptor::irregular(
        [(0.0, 4.0), (2.0, 0.0), (4.0, 4.0), (6.0, 0.0), (8.0, 4.0)],
        2.0,
    );
    let section = resolve_section(&d, &ViewportConfig::default())
        .unwrap()
        .unwrap();
    let water = section.water.unwrap();
    assert_eq!(water.waterline.0.x, 1.0);
    assert_eq!(water.waterline.1.x, 7.0);
    assert!(approx_eq(section.properties.top_width, 4.0));
}

#[test]
fn repeated_renders_are_bit_identical() {
    let d = ShapeDescriptor::irregular([(0.0, 3.1), (1.7, 0.9), (4.3, 1.3), (7.0, 2.9)], 1.1);
    let cfg = ViewportConfig::default();
    let a = render(&d, &cfg).unwrap().unwrap();
    let b = render(&d, &cfg).unwrap().unwrap();
    let bits = |r: &GeometryResult| -> Vec<u64> {
        r.ground_path
            .iter()
            .chain(r.water_polygon.iter().flatten())
            .flat_map(|p| [p.x.to_bits(), p.y.to_bits()])
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
}
