// Presentation Benchmarks
// Composition and RGBA conversion done by the window on every redraw

use criterion::{criterion_group, criterion_main, Criterion};
use newton_display::display::{FrameBufferView, Geometry, SHARP_LCD};
use newton_display::{DisplaySurface, FrameComposer, Orientation, Silkscreen, TestPattern};
use std::hint::black_box;

/// Helper function to create a surface holding a checkerboard
fn create_test_surface(geometry: Geometry) -> DisplaySurface {
    let mut pixels = vec![0; geometry.pixel_count().unwrap_or(0)];
    TestPattern::Checkerboard.render(geometry, 0, &mut pixels);

    let mut surface = DisplaySurface::new(geometry).unwrap();
    let view = FrameBufferView::from_slice(&pixels, geometry).unwrap();
    surface.write_frame(&view).unwrap();
    surface
}

/// Benchmark composing a frame in each orientation
fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let surface = create_test_surface(SHARP_LCD);

    for (name, orientation) in [("native", Orientation::Native), ("rotated", Orientation::Rotated)] {
        group.bench_function(name, |b| {
            let mut composer = FrameComposer::new(orientation);
            b.iter(|| {
                let (geometry, pixels) = composer.compose(black_box(&surface));
                black_box((geometry, pixels.len()));
            });
        });
    }

    group.finish();
}

/// Benchmark the full redraw path: rotate, silkscreen, RGBA
fn bench_compose_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_rgba");
    let surface = create_test_surface(SHARP_LCD);

    // Silkscreen strip matching the rotated panel width
    let silk_geometry = Geometry::new(SHARP_LCD.height, 64);
    let bits = vec![0x55; (silk_geometry.width as usize / 8) * silk_geometry.height as usize];
    let silkscreen = Silkscreen::from_bits(silk_geometry, &bits).unwrap();

    group.bench_function("rotated_with_silkscreen", |b| {
        let mut composer =
            FrameComposer::new(Orientation::Rotated).with_silkscreen(Some(silkscreen.clone()));
        let output = composer.output_geometry(surface.geometry());
        let mut rgba = vec![0u8; output.pixel_count().unwrap_or(0) * 4];

        b.iter(|| {
            black_box(composer.compose_rgba(black_box(&surface), &mut rgba));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_compose, bench_compose_rgba);
criterion_main!(benches);
