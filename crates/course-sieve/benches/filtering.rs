use std::hint::black_box;

use course_sieve::{
    compute_window, filter, BusySet, Course, PeriodTable, RenderOrchestrator, ViewportConfig,
};
use criterion::{criterion_group, criterion_main, Criterion};

const TIMES: [&str; 6] = ["一234", "二N5,四6", "三1", "五ABC", "一9,三9", "TBA"];

fn catalog(n: usize) -> Vec<Course> {
    (0..n)
        .map(|i| Course {
            code: format!("C{i:05}"),
            name: format!("Course {i}"),
            time: TIMES[i % TIMES.len()].to_string(),
            ..Course::default()
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let table = PeriodTable::standard();
    let courses = catalog(5_000);
    let busy = BusySet::from_wire_keys(["1-3", "2-N", "5-B", "3-9"]).unwrap_or_default();

    c.bench_function("filter 5000 courses", |b| {
        b.iter(|| filter(black_box(&courses), black_box(&busy), &table))
    });
}

fn bench_window(c: &mut Criterion) {
    let config = ViewportConfig::default();

    c.bench_function("compute window", |b| {
        b.iter(|| compute_window(&config, black_box(123_456.0), black_box(50_000)))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut app = RenderOrchestrator::new(PeriodTable::standard(), ViewportConfig::default());
    app.load_results(catalog(50_000));
    app.set_all_selected(true);
    app.on_scroll(1_000_000.0);

    c.bench_function("render visible slice of 50000", |b| {
        b.iter(|| black_box(app.render()).selected_count)
    });
}

criterion_group!(benches, bench_filter, bench_window, bench_render);
criterion_main!(benches);
