use criterion::{Criterion, criterion_group, criterion_main};
use wetline::render::{SvgRenderOptions, render_geometry_svg};
use wetline::{ShapeDescriptor, ViewportConfig, render, survey};

fn fixtures() -> Vec<(&'static str, ShapeDescriptor)> {
    let creek = survey::parse_station_elevation(
        "0 104.2\n3.5 102.8\n6.0 100.9\n8.25 100.4\n11.0 101.1\n14.5 103.0\n18.0 104.6\n",
    );
    vec![
        ("rectangular", ShapeDescriptor::rectangular(5.0, 2.0)),
        (
            "trapezoidal",
            ShapeDescriptor::trapezoidal(3.0, 1.5, 2.0, 1.25),
        ),
        ("triangular", ShapeDescriptor::triangular(2.0, 2.0, 0.8)),
        ("gutter", ShapeDescriptor::gutter(2.0, 0.06, 0.02, 0.2)),
        (
            "irregular",
            ShapeDescriptor::irregular(creek.iter().map(|p| (p.x, p.y)), 1.2),
        ),
    ]
}

fn bench_geometry(c: &mut Criterion) {
    let config = ViewportConfig::default();
    let mut group = c.benchmark_group("geometry");
    for (name, descriptor) in fixtures() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let _ = render(&descriptor, &config).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_render_svg(c: &mut Criterion) {
    let config = ViewportConfig::default();
    let options = SvgRenderOptions::default();
    let mut group = c.benchmark_group("render_svg");
    for (name, descriptor) in fixtures() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let Some(geometry) = render(&descriptor, &config).unwrap() else {
                    return;
                };
                let _svg = render_geometry_svg(&geometry, &options);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geometry, bench_render_svg);
criterion_main!(benches);
