use crate::{generate_cubic_curves, generate_quadratic_curves, generate_scene, Rng};
use sprig::algorithms::{point_edges_distance_squared, Edges};
use sprig::geom::TransformProperties;
use sprig::math::{point, Bounds, Point, Transform};
use sprig::path::{Path, PathSegment};
use sprig::scene::Target;

static TOLERANCE_QUALITIES: [f64; 4] = [1.0, 4.0, 10.0, 50.0];

fn cubic_path(index: usize, quality: f64) -> (Path, sprig::geom::CubicBezierSegment<f64>) {
    let curve = generate_cubic_curves(index + 1)[index];
    let path = Path::with_quality(
        vec![
            PathSegment::MoveTo { to: curve.from },
            PathSegment::CubicTo {
                ctrl1: Some(curve.ctrl1),
                ctrl2: curve.ctrl2,
                to: curve.to,
            },
        ],
        quality,
    )
    .unwrap();

    (path, curve)
}

#[test]
fn flattened_curves_stay_within_tolerance() {
    let cubics = generate_cubic_curves(40);
    let quads = generate_quadratic_curves(40);

    for quality in TOLERANCE_QUALITIES {
        let tolerance = 1.0 / quality;

        for curve in &cubics {
            let path = Path::with_quality(
                vec![
                    PathSegment::MoveTo { to: curve.from },
                    PathSegment::CubicTo {
                        ctrl1: Some(curve.ctrl1),
                        ctrl2: curve.ctrl2,
                        to: curve.to,
                    },
                ],
                quality,
            )
            .unwrap();
            check_tolerance(path.points(), |t| curve.sample(t), tolerance);
        }

        for curve in &quads {
            let path = Path::with_quality(
                vec![
                    PathSegment::MoveTo { to: curve.from },
                    PathSegment::QuadraticTo {
                        ctrl: Some(curve.ctrl),
                        to: curve.to,
                    },
                ],
                quality,
            )
            .unwrap();
            check_tolerance(path.points(), |t| curve.sample(t), tolerance);
        }
    }
}

fn check_tolerance(points: &[Point], sample: impl Fn(f64) -> Point, tolerance: f64) {
    const STEPS: u32 = 500;
    for i in 0..=STEPS {
        let t = i as f64 / STEPS as f64;
        let p = sample(t);
        let d = point_edges_distance_squared(p, Edges::new(points, false)).sqrt();
        assert!(
            d <= tolerance + 1e-9,
            "t = {} is {} away from the polyline, tolerance {}",
            t,
            d,
            tolerance
        );
    }
}

#[test]
fn exact_bounds_contain_the_flattened_points() {
    for index in 0..20 {
        for quality in TOLERANCE_QUALITIES {
            let (path, _) = cubic_path(index, quality);
            let exact = path.bounding_box().inflate(1e-9);
            for p in path.points() {
                assert!(exact.contains_point(*p), "{:?} outside of {:?}", p, exact);
            }
        }
    }
}

#[test]
fn flattened_bounds_converge_to_exact_bounds() {
    for index in 0..20 {
        let (path, curve) = cubic_path(index, 10_000.0);
        let exact = path.bounding_box();
        let sampled = path.polyline().bounds();

        assert!((exact.min - sampled.min).length() < 1e-3, "{:?}", curve);
        assert!((exact.max - sampled.max).length() < 1e-3, "{:?}", curve);
    }
}

#[test]
fn union_never_shrinks() {
    let mut rng = Rng::new(7);
    for _ in 0..200 {
        let a = Bounds::from_points([rng.point(-50.0, 50.0), rng.point(-50.0, 50.0)]);
        let b = Bounds::from_points([rng.point(-50.0, 50.0), rng.point(-50.0, 50.0)]);

        let u = a.union(&b);
        assert!(u.contains_bounds(&a));
        assert!(u.contains_bounds(&b));
        assert_eq!(u, b.union(&a));
        assert_eq!(a.union(&Bounds::empty()), a);
        assert_eq!(Bounds::empty().union(&a), a);
    }

    assert!(Bounds::empty().union(&Bounds::empty()).is_empty());
}

#[test]
fn transform_round_trip() {
    let positions = [(-10.0, 4.0), (0.0, 0.0), (35.5, -200.0)];
    let scales = [(0.5, 2.0), (1.0, 1.0), (3.0, 0.25)];
    let skews = [-0.5, 0.0, 0.7];
    let rotations = [-3.0, -1.0, 0.0, 1.2, 3.1];

    for &(x, y) in &positions {
        for &(scale_x, scale_y) in &scales {
            for &skew_x in &skews {
                for &rotation in &rotations {
                    let props = TransformProperties::identity()
                        .with_position(x, y)
                        .with_scale(scale_x, scale_y)
                        .with_skew(skew_x, 0.0)
                        .with_rotation(rotation);

                    let back = TransformProperties::from_transform(&props.to_transform());
                    let values = |p: &TransformProperties<f64>| {
                        [p.x, p.y, p.scale_x, p.scale_y, p.skew_x, p.skew_y, p.rotation]
                    };
                    for (a, b) in values(&props).iter().zip(values(&back).iter()) {
                        assert!((a - b).abs() < 1e-9, "{:?} != {:?}", props, back);
                    }
                }
            }
        }
    }
}

#[test]
fn decomposition_preserves_the_matrix() {
    // Cases where the properties themselves do not come back: a vertical skew and
    // negative scales.
    let cases = [
        TransformProperties::identity().with_skew(0.2, 0.4),
        TransformProperties::identity().with_scale(-1.0, 2.0).with_rotation(0.5),
        TransformProperties::identity()
            .with_scale(2.0, -3.0)
            .with_skew(-0.3, 0.1)
            .with_position(5.0, 6.0),
    ];

    for props in &cases {
        let m = props.to_transform();
        let back = TransformProperties::from_transform(&m).to_transform();
        assert!(matrices_are_close(&m, &back), "{:?}", props);
    }
}

fn matrices_are_close(a: &Transform, b: &Transform) -> bool {
    a.to_array()
        .iter()
        .zip(b.to_array().iter())
        .all(|(a, b)| (a - b).abs() < 1e-9)
}

#[test]
fn overlaps_is_symmetric_and_implied_by_contains() {
    for seed in [1, 2, 3] {
        let (scene, nodes) = generate_scene(seed, 36);
        let mut rng = Rng::new(seed + 100);

        let mut targets: Vec<Target> = nodes.iter().map(|id| Target::Node(*id)).collect();
        for _ in 0..8 {
            targets.push(Target::Point(rng.point(-120.0, 120.0)));
            let a = rng.point(-120.0, 120.0);
            targets.push(Target::Bounds(Bounds::from_points([
                a,
                a + rng.point(0.0, 80.0).to_vector(),
            ])));
        }

        let mut overlapping = 0;
        let mut contained = 0;
        for a in &targets {
            for b in &targets {
                let ab = scene.overlaps(*a, *b).unwrap();
                let ba = scene.overlaps(*b, *a).unwrap();
                assert_eq!(ab, ba, "{:?} {:?}", a, b);

                if scene.contains(*a, *b).unwrap() {
                    assert!(ab, "{:?} contains {:?} but does not overlap it", a, b);
                    contained += 1;
                }
                overlapping += ab as u32;
            }
        }

        // The fixtures are not degenerate.
        assert!(overlapping > targets.len() as u32);
        assert!(contained > 0);
    }
}

#[test]
fn hit_test_agrees_with_contains() {
    let (scene, _) = generate_scene(42, 30);
    let mut rng = Rng::new(43);

    let mut hits = 0;
    for _ in 0..500 {
        let p = rng.point(-120.0, 120.0);
        match scene.hit_test(p).unwrap() {
            Some(node) => {
                assert!(scene.contains(node, p).unwrap());
                hits += 1;
            }
            None => {
                for root in scene.roots() {
                    assert!(!scene.contains(*root, p).unwrap());
                }
            }
        }
    }

    assert!(hits > 0);
}

#[test]
fn transformed_points_round_trip() {
    let (scene, nodes) = generate_scene(9, 24);
    let local = point(3.0, -7.5);
    for id in nodes {
        let global = scene.local_to_global(id, local).unwrap();
        let back = scene.global_to_local(id, global).unwrap();
        assert!((back - local).length() < 1e-6, "{:?} != {:?}", back, local);
    }
}
