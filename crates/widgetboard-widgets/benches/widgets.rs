//! Benchmarks for the builder and the section filter.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use widgetboard_core::{Category, DashboardData, DashboardStore, WidgetDraft};
use widgetboard_widgets::{filter_sections, WidgetBuilder, WidgetType};

fn large_dashboard() -> DashboardData {
    let mut store = DashboardStore::default();
    for i in 0..1000 {
        store.add_widget(
            "cwpp",
            WidgetDraft::text(format!("Workload {i}"), "runtime alerts", Category::Cwpp),
        );
    }
    store.snapshot().clone()
}

fn bench_filter_empty_query(c: &mut Criterion) {
    let data = large_dashboard();
    c.bench_function("filter_empty_query", |b| {
        b.iter(|| filter_sections(black_box(&data.sections), black_box("")))
    });
}

fn bench_filter_match(c: &mut Criterion) {
    let data = large_dashboard();
    c.bench_function("filter_workload_99", |b| {
        b.iter(|| filter_sections(black_box(&data.sections), black_box("workload 99")))
    });
}

fn bench_build_risk_assessment(c: &mut Criterion) {
    c.bench_function("build_risk_assessment", |b| {
        b.iter(|| {
            let mut builder = WidgetBuilder::new();
            builder.select_type(WidgetType::RiskAssessment);
            builder.set_input("failed", black_box("1689"));
            builder.set_input("warning", black_box("681"));
            builder.set_input("not-available", black_box("36"));
            builder.set_input("passed", black_box("7253"));
            builder.build()
        })
    });
}

criterion_group!(
    benches,
    bench_filter_empty_query,
    bench_filter_match,
    bench_build_risk_assessment
);
criterion_main!(benches);
