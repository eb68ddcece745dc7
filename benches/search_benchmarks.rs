/*!
# Performance Benchmarks for Pathina

Criterion-based benchmarks to measure performance and detect regressions in
the search engines.
*/

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pathina::core::generators::{random_graph, random_grid};
use pathina::core::types::Undirected;
use pathina::mapf::{ReservationTable, SpaceTimeAStar};
use pathina::search::{AStar, Bfs, Dijkstra, ResumableDijkstra};
use std::hint::black_box;

// ============================================================================
// Single-Agent Engine Benchmarks
// ============================================================================

fn bench_dijkstra_on_grids(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_grid");

    for size in [16, 32, 64, 128].iter() {
        let grid = random_grid(*size, *size, 0.2, 42).unwrap();
        let goal = size * size - 1;
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let path = Dijkstra::new(&grid).find_path(0, goal).unwrap();
                black_box(path)
            });
        });
    }
    group.finish();
}

fn bench_a_star_on_grids(c: &mut Criterion) {
    let mut group = c.benchmark_group("a_star_grid");

    for size in [16, 32, 64, 128].iter() {
        let grid = random_grid(*size, *size, 0.2, 42).unwrap();
        let goal = size * size - 1;
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let path = AStar::new(&grid).find_path(0, goal).unwrap();
                black_box(path)
            });
        });
    }
    group.finish();
}

fn bench_bfs_on_random_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs_random_graph");

    for size in [100, 500, 1000].iter() {
        let graph = random_graph::<Undirected>(*size, 0.05, 42).unwrap();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let path = Bfs::new(&graph).find_path(0, size - 1).unwrap();
                black_box(path)
            });
        });
    }
    group.finish();
}

fn bench_resumable_dijkstra_full_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("resumable_dijkstra_sweep");

    for size in [100, 500, 1000].iter() {
        let graph = random_graph::<Undirected>(*size, 0.05, 42).unwrap();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut search = ResumableDijkstra::new(&graph, 0).unwrap();
                for node in 0..size {
                    black_box(search.distance(node).unwrap());
                }
            });
        });
    }
    group.finish();
}

// ============================================================================
// Space-Time Benchmarks
// ============================================================================

fn bench_space_time_with_traffic(c: &mut Criterion) {
    let mut group = c.benchmark_group("space_time_traffic");

    for size in [8, 16, 32].iter() {
        let grid = random_grid(*size, *size, 0.1, 42).unwrap();
        let mut rt = ReservationTable::new(size * size).with_edge_collision(true);
        // A few crossing agents sweeping the first rows.
        for row in 0..4.min(*size) {
            let path: Vec<usize> = (0..*size).map(|x| row * size + x).collect();
            rt.add_path(0, &path, false, row % 2 == 0).unwrap();
        }
        let goal = size * size - 1;
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let planner = SpaceTimeAStar::new(&grid);
                let path = planner
                    .find_path_with_depth_limit(0, goal, 4 * size, &rt)
                    .unwrap();
                black_box(path)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_dijkstra_on_grids,
    bench_a_star_on_grids,
    bench_bfs_on_random_graphs,
    bench_resumable_dijkstra_full_sweep,
    bench_space_time_with_traffic
);
criterion_main!(benches);
