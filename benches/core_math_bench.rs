use chart_model::api::{ChartEngine, ChartEngineConfig};
use chart_model::core::{
    AnimationPhase, ChartData, ChartKind, Entry, PieAngles, Rounding, SeriesStore, Viewport,
};
use chart_model::render::{NullRenderer, project_all_bar_rects};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wave_series(label: &str, count: usize, offset: f64) -> SeriesStore {
    let entries = (0..count)
        .map(|i| {
            let x = i as f64;
            Entry::new(x, offset + (x * 0.01).sin() * 50.0)
        })
        .collect();
    SeriesStore::new(label, entries)
}

fn stacked_series(label: &str, count: usize) -> SeriesStore {
    let entries = (0..count)
        .map(|i| {
            let x = i as f64;
            Entry::stacked(x, [1.0 + x % 7.0, -(x % 3.0), 2.0])
        })
        .collect();
    SeriesStore::new(label, entries)
}

fn bench_entry_index_lookup_10k(c: &mut Criterion) {
    let series = wave_series("lookup", 10_000, 100.0);

    c.bench_function("entry_index_lookup_10k", |b| {
        b.iter(|| {
            let _ = series.get_entry_index(black_box(4_321.4), black_box(Rounding::Closest));
        })
    });
}

fn bench_pie_angles_1k(c: &mut Criterion) {
    let data = ChartData::new(Vec::new(), vec![wave_series("pie", 1_000, 75.0)]);

    c.bench_function("pie_angles_1k", |b| {
        b.iter(|| {
            let _ = PieAngles::compute(black_box(&data));
        })
    });
}

fn bench_bar_projection_4x2k(c: &mut Criterion) {
    let data = ChartData::new(
        Vec::new(),
        vec![
            wave_series("a", 2_000, 60.0),
            wave_series("b", 2_000, 80.0),
            stacked_series("c", 2_000),
            wave_series("d", 2_000, 20.0),
        ],
    );
    let mut rects = Vec::new();

    c.bench_function("bar_projection_4x2k", |b| {
        b.iter(|| {
            project_all_bar_rects(
                black_box(&data),
                black_box(AnimationPhase::COMPLETE),
                &mut rects,
            );
        })
    });
}

fn bench_engine_bar_frame_2k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(Viewport::new(1600, 900), ChartKind::Bar);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(ChartData::new(
        Vec::new(),
        vec![wave_series("north", 2_000, 60.0), stacked_series("south", 2_000)],
    ));

    c.bench_function("engine_bar_frame_2k", |b| {
        b.iter(|| {
            let _ = engine.build_frame().expect("frame should build");
        })
    });
}

criterion_group!(
    benches,
    bench_entry_index_lookup_10k,
    bench_pie_angles_1k,
    bench_bar_projection_4x2k,
    bench_engine_bar_frame_2k
);
criterion_main!(benches);
