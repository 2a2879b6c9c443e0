//! Benchmarks for Walk on Spheres solves
//!
//! Author: Moroya Sakamoto

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use walk_on_spheres::prelude::*;

/// Closed cube spanning [-1, 1]^3
fn cube_surface() -> Surface {
    let vertices = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
    ];
    let triangles = vec![
        [0, 1, 2],
        [0, 2, 3],
        [4, 6, 5],
        [4, 7, 6],
        [0, 3, 7],
        [0, 7, 4],
        [1, 5, 6],
        [1, 6, 2],
        [0, 4, 5],
        [0, 5, 1],
        [3, 2, 6],
        [3, 6, 7],
    ];
    Surface::new(vertices, triangles)
}

fn grid_points(n: usize) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(n * n * n);
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let to_coord = |i: usize| (i as f32 + 0.5) / n as f32 * 1.6 - 0.8;
                points.push(Vec3::new(to_coord(x), to_coord(y), to_coord(z)));
            }
        }
    }
    points
}

fn bench_distance_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_oracle");

    let surface = cube_surface();
    let bvh = SurfaceBvh::build(&surface, DEFAULT_MAX_TRIANGLES_PER_LEAF);
    let point = Vec3::new(0.3, -0.2, 0.5);

    group.bench_function("closest_point", |b| {
        b.iter(|| bvh.closest_point(black_box(point)))
    });

    let points = grid_points(8);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("closest_point_batch", |b| {
        b.iter(|| bvh.closest_point_batch(black_box(&points)))
    });

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    let surface = cube_surface();
    let boundary = vec![1.0; surface.vertex_count()];

    for n in [4usize, 8] {
        let queries = grid_points(n);
        group.throughput(Throughput::Elements(queries.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("legacy", queries.len()),
            &queries,
            |b, queries| {
                let config = SolveConfig::default().with_seed(42);
                b.iter(|| solve(&surface, &boundary, black_box(queries), &config))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("accurate", queries.len()),
            &queries,
            |b, queries| {
                let config = SolveConfig::accurate().with_seed(42);
                b.iter(|| solve(&surface, &boundary, black_box(queries), &config))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_distance_oracle, bench_solve);
criterion_main!(benches);
