use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mrp_calc::BomGraph;
use mrp_planner::*;
use rust_decimal::Decimal;
use std::time::Duration;

// 分層 BOM：每層 width 個物料，每個物料連到下一層的 3 個物料
fn layered_input(levels: usize, width: usize, plan_lines: usize) -> PlanningInput {
    let id = |level: usize, i: usize| format!("L{level}-{i:03}");
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();

    let mut edges = Vec::new();
    for level in 0..levels - 1 {
        for i in 0..width {
            for k in 0..3 {
                edges.push(BomEdge::new(
                    id(level, i),
                    id(level + 1, (i + k) % width),
                    Decimal::from(k as i64 + 1),
                ));
            }
        }
    }

    let plan = (0..plan_lines)
        .map(|n| {
            ProductionPlanLine::new(
                id(0, n % width),
                Decimal::from(10 + (n % 7) as i64),
                start + Days::new(30 + (n % 60) as u64),
            )
        })
        .collect();

    let lead_times = (0..levels)
        .flat_map(|level| (0..width).map(move |i| LeadTime::new(id(level, i), 1, 2)))
        .collect();

    let inventories = (0..levels)
        .flat_map(|level| {
            (0..width).map(move |i| InventorySnapshot::new(id(level, i), Decimal::from(50), Decimal::from(5)))
        })
        .collect();

    PlanningInput::new(plan, edges)
        .with_lead_times(lead_times)
        .with_inventories(inventories)
}

fn bom_graph_benchmark(c: &mut Criterion) {
    let input = layered_input(5, 40, 0);

    c.bench_function("bom_graph_build_tree", |b| {
        b.iter(|| {
            let graph = BomGraph::from_edges(black_box(&input.bom_edges));
            black_box(graph.build_tree("L0-000"))
        });
    });
}

fn planning_run_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("planning_run");

    for threads in [1usize, 4] {
        let input = layered_input(4, 30, 200);
        let engine = PlanningEngine::new(
            PlanningConfig::default()
                .with_worker_threads(threads)
                .with_consistency_check(false),
        );

        group.bench_with_input(BenchmarkId::from_parameter(threads), &input, |b, input| {
            b.iter(|| black_box(engine.run(input)));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(20);
    targets =
        bom_graph_benchmark,
        planning_run_benchmark
}

criterion_main!(benches);
