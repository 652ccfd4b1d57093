use crate::*;

#[test]
fn zero_road_cross_slope_is_an_invalid_shape() {
    let err = render(
        &ShapeDescriptor::gutter(2.0, 0.06, 0.0, 0.2),
        &ViewportConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidShape {
            kind: ShapeKind::Gutter,
            parameter: "roadCrossSlope",
            reason: InvalidReason::NotPositive,
        }
    ));
    assert_eq!(
        err.to_string(),
        "invalid gutter shape: roadCrossSlope must be greater than zero"
    );
}

#[test]
fn negative_depth_is_rejected() {
    let err = render(
        &ShapeDescriptor::rectangular(2.0, -0.5),
        &ViewportConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidShape {
            parameter: "waterLevel",
            reason: InvalidReason::Negative,
            ..
        }
    ));
}

#[test]
fn non_finite_slope_is_rejected() {
    let err = render(
        &ShapeDescriptor::triangular(f64::NAN, 1.0, 1.0),
        &ViewportConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidShape {
            parameter: "leftSlope",
            reason: InvalidReason::NotFinite,
            ..
        }
    ));
}

#[test]
fn unsorted_stations_are_rejected() {
    let d = ShapeDescriptor::irregular([(0.0, 2.0), (5.0, 0.0), (4.0, 2.0)], 1.0);
    let err = render(&d, &ViewportConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidShape {
            reason: InvalidReason::StationsNotIncreasing,
            ..
        }
    ));
}

#[test]
fn broken_viewport_config_is_rejected_before_the_shape() {
    let cfg = ViewportConfig::default().with_margin(80.0);
    let err = render(&ShapeDescriptor::rectangular(2.0, 1.0), &cfg).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(GeometryEngine::new(cfg).is_err());
}
