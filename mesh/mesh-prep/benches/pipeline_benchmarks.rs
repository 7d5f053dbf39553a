//! Benchmarks for the mesh-prep pipeline.
//!
//! Run with: cargo bench -p mesh-prep

#![allow(missing_docs, clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_prep::{PrepParams, clean, rescale};
use mesh_transform::{RescaleTarget, ScalePolicy};
use mesh_types::{Mesh, Point3};
use nalgebra::{Rotation3, Vector3};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Latitude/longitude ellipsoid with semi-axes 3, 2, 1, tilted and offset so
/// the pose stage has real work to do.
fn create_tilted_ellipsoid(segments: u32) -> Mesh {
    let rings = segments / 2;
    let tilt = Rotation3::from_euler_angles(0.4, -0.7, 1.1);
    let offset = Vector3::new(10.0, -4.0, 2.5);
    let mut mesh = Mesh::with_capacity(
        ((rings + 1) * segments) as usize,
        (2 * rings * segments) as usize,
    );

    for ring in 0..=rings {
        let theta = std::f64::consts::PI * f64::from(ring) / f64::from(rings);
        for seg in 0..segments {
            let phi = std::f64::consts::TAU * f64::from(seg) / f64::from(segments);
            let local = Vector3::new(
                3.0 * theta.sin() * phi.cos(),
                2.0 * theta.sin() * phi.sin(),
                theta.cos(),
            );
            mesh.vertices.push(Point3::from(tilt * local + offset));
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let next = (seg + 1) % segments;
            let a = ring * segments + seg;
            let b = ring * segments + next;
            let c = a + segments;
            let d = b + segments;
            mesh.triangles.push([a, c, b]);
            mesh.triangles.push([b, c, d]);
        }
    }

    mesh
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");
    let params = PrepParams::default();

    for segments in [32u32, 128, 512] {
        let mesh = create_tilted_ellipsoid(segments);
        group.throughput(Throughput::Elements(mesh.vertices.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(segments), &mesh, |b, mesh| {
            b.iter(|| {
                let mut m = mesh.clone();
                black_box(clean(&mut m, &params))
            });
        });
    }

    group.finish();
}

fn bench_rescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("rescale");
    let target = RescaleTarget::new(0.1, ScalePolicy::Diagonal);

    for segments in [32u32, 128, 512] {
        let mesh = create_tilted_ellipsoid(segments);
        group.throughput(Throughput::Elements(mesh.vertices.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(segments), &mesh, |b, mesh| {
            b.iter(|| {
                let mut m = mesh.clone();
                black_box(rescale(&mut m, &target))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clean, bench_rescale);
criterion_main!(benches);
