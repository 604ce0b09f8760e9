#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use sprig::geom::FlatteningOptions;
use sprig::math::point;
use sprig::path::Path;
use sprig_tests::*;

fn cubic_flatten(c: &mut Criterion) {
    let curves = generate_cubic_curves(500);
    let mut g = c.benchmark_group("cubic");
    for quality in &QUALITIES {
        g.bench_with_input(BenchmarkId::new("flatten", quality), quality, |b, quality| {
            let options = FlatteningOptions::quality(*quality);
            b.iter(|| {
                for curve in &curves {
                    curve.for_each_flattened(&options, &mut |p| {
                        std::hint::black_box(p);
                    });
                }
            })
        });
    }
}

fn quad_flatten(c: &mut Criterion) {
    let curves = generate_quadratic_curves(500);
    let mut g = c.benchmark_group("quadratic");
    for quality in &QUALITIES {
        g.bench_with_input(BenchmarkId::new("flatten", quality), quality, |b, quality| {
            let options = FlatteningOptions::quality(*quality);
            b.iter(|| {
                for curve in &curves {
                    curve.for_each_flattened(&options, &mut |p| {
                        std::hint::black_box(p);
                    });
                }
            })
        });
    }
}

fn exact_bounds(c: &mut Criterion) {
    let cubics = generate_cubic_curves(500);
    let quads = generate_quadratic_curves(500);
    c.bench_function("exact bounds", |b| {
        b.iter(|| {
            for curve in &cubics {
                std::hint::black_box(curve.bounding_box());
            }
            for curve in &quads {
                std::hint::black_box(curve.bounding_box());
            }
        })
    });
}

fn path_rebuild(c: &mut Criterion) {
    let mut segments = Vec::new();
    for i in 0..50 {
        segments.extend(mixed_segments(point(i as f64 * 120.0, 0.0)));
    }
    let mut path = Path::new(segments).unwrap();

    let mut g = c.benchmark_group("path");
    for quality in &QUALITIES {
        g.bench_with_input(BenchmarkId::new("rebuild", quality), quality, |b, quality| {
            b.iter(|| {
                path.rebuild(*quality).unwrap();
                std::hint::black_box(path.bounding_box());
            })
        });
    }
}

fn scene_queries(c: &mut Criterion) {
    let (scene, nodes) = generate_scene(1, 60);
    c.bench_function("overlaps, all pairs", |b| {
        b.iter(|| {
            let mut count = 0;
            for a in &nodes {
                for other in &nodes {
                    count += scene.overlaps(*a, *other).unwrap() as u32;
                }
            }
            std::hint::black_box(count);
        })
    });

    c.bench_function("global bbox, cold", |b| {
        b.iter(|| {
            scene.invalidate_caches();
            for id in &nodes {
                std::hint::black_box(scene.global_bbox(*id).unwrap());
            }
        })
    });

    c.bench_function("hit test", |b| {
        b.iter(|| {
            for i in 0..100 {
                let p = point(i as f64 * 2.0 - 100.0, 10.0);
                std::hint::black_box(scene.hit_test(p).unwrap());
            }
        })
    });
}

criterion_group!(flatten, cubic_flatten, quad_flatten, exact_bounds);
criterion_group!(paths, path_rebuild);
criterion_group!(scenes, scene_queries);

criterion_main!(flatten, paths, scenes);
