use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nalgebra::DMatrix;
use plotkit_rs::discretization::generator::{
    CoordinateSpec, RenderNeeds, resolve_coordinates, uniform_centers,
};
use plotkit_rs::discretization::mesh::CenterCoords;
use plotkit_rs::numerics::transform::{center_to_edge, edge_to_center};

fn problem_sizes() -> Vec<usize> {
    vec![64, 256, 1024]
}

fn curvilinear_centers(n: usize) -> CenterCoords {
    let x = DMatrix::from_fn(n, n, |i, j| j as f64 + 0.01 * (i as f64).sin());
    let y = DMatrix::from_fn(n, n, |i, j| i as f64 + 0.01 * (j as f64).cos());
    CenterCoords { x, y }
}

fn bench_center_to_edge(c: &mut Criterion) {
    let mut group = c.benchmark_group("center_to_edge");
    for &size in &problem_sizes() {
        let centers = curvilinear_centers(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter(|| {
                let edges = center_to_edge(std::hint::black_box(&centers)).unwrap();
                std::hint::black_box(edges);
            });
        });
    }
    group.finish();
}

fn bench_edge_to_center(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_to_center");
    for &size in &problem_sizes() {
        let edges = center_to_edge(&curvilinear_centers(size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter(|| {
                let centers = edge_to_center(std::hint::black_box(&edges)).unwrap();
                std::hint::black_box(centers);
            });
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_coordinates");
    let needs = RenderNeeds {
        contours: true,
        ..Default::default()
    };
    for &size in &problem_sizes() {
        let centers = uniform_centers(size, size, 1.0, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter(|| {
                let mesh = resolve_coordinates(
                    (size, size),
                    CoordinateSpec::Centers(centers.clone()),
                    needs,
                )
                .unwrap();
                std::hint::black_box(mesh);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_center_to_edge,
    bench_edge_to_center,
    bench_resolve
);
criterion_main!(benches);
