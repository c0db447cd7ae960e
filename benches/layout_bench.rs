use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs::api::{TimelineConfig, TimelineEngine};
use timeline_rs::core::{
    ColorMapping, ColorPalette, DomainBounds, Row, TimeInterval, Viewport, resolve_domain,
};
use timeline_rs::render::{NullRenderer, Renderer};

fn synthetic_rows(row_count: usize, intervals_per_row: usize) -> Vec<Row> {
    (0..row_count)
        .map(|row| {
            let categories = ["CAR", "FERRY", "BUS", "WAIT"];
            let intervals = (0..intervals_per_row)
                .map(|index| {
                    let start = (row * 7 + index * 13) as f64 * 60_000.0;
                    TimeInterval::new(start, start + 45.0 * 60_000.0, "segment")
                        .expect("valid generated interval")
                        .with_category_key(categories[index % categories.len()])
                })
                .collect();
            Row::new(format!("route {row}"), intervals)
        })
        .collect()
}

fn bench_domain_inference_10k(c: &mut Criterion) {
    let rows = synthetic_rows(100, 100);

    c.bench_function("domain_inference_10k", |b| {
        b.iter(|| {
            let _ = resolve_domain(black_box(&rows), black_box(DomainBounds::default()))
                .expect("domain resolves");
        })
    });
}

fn bench_color_mapping_10k(c: &mut Criterion) {
    let rows = synthetic_rows(100, 100);
    let palette = ColorPalette::default();

    c.bench_function("color_mapping_10k", |b| {
        b.iter(|| {
            let _ = ColorMapping::from_rows(black_box(&rows), black_box(&palette));
        })
    });
}

fn bench_full_scene_build_2k(c: &mut Criterion) {
    let rows = synthetic_rows(40, 50);
    let engine = TimelineEngine::new(TimelineConfig::default().with_width(1_600.0).stacked())
        .expect("engine init");
    let viewport = Viewport::new(1_600, 900);

    c.bench_function("full_scene_build_2k", |b| {
        b.iter(|| {
            let scene = engine
                .render(black_box(&rows), black_box(viewport))
                .expect("scene builds");
            black_box(scene.frame.rects.len());
        })
    });
}

fn bench_null_render_2k(c: &mut Criterion) {
    let rows = synthetic_rows(40, 50);
    let engine = TimelineEngine::new(TimelineConfig::default().with_width(1_600.0).stacked())
        .expect("engine init");
    let scene = engine
        .render(&rows, Viewport::new(1_600, 900))
        .expect("scene builds");
    let mut renderer = NullRenderer::default();

    c.bench_function("null_render_2k", |b| {
        b.iter(|| {
            renderer
                .render(black_box(&scene.frame))
                .expect("frame validates");
        })
    });
}

criterion_group!(
    benches,
    bench_domain_inference_10k,
    bench_color_mapping_10k,
    bench_full_scene_build_2k,
    bench_null_render_2k
);
criterion_main!(benches);
