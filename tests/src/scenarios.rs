use crate::QUALITIES;
use sprig::geom::ArcDirection;
use sprig::math::{point, size, vector, Angle, Bounds, Point};
use sprig::path::{Path, PathSegment};
use sprig::scene::{NodeKind, Scene};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_bounds_eq(actual: Bounds, min: Point, max: Point) {
    let eps = 1e-9;
    assert!(
        (actual.min - min).length() < eps && (actual.max - max).length() < eps,
        "{:?} != {:?} - {:?}",
        actual,
        min,
        max
    );
}

#[test]
fn rectangle_bounds() {
    init_logger();
    let path = Path::new(vec![PathSegment::Rect {
        origin: point(0.0, 0.0),
        size: size(100.0, 50.0),
    }])
    .unwrap();

    assert_eq!(
        path.bounding_box(),
        Bounds::new(point(0.0, 0.0), point(100.0, 50.0))
    );

    let mut scene = Scene::default();
    let shape = scene.add_shape(path.segments().to_vec()).unwrap();
    assert_eq!(
        *scene.global_bbox(shape).unwrap().bounds(),
        Bounds::new(point(0.0, 0.0), point(100.0, 50.0))
    );
}

#[test]
fn half_circle_bounds() {
    init_logger();
    let path = Path::new(vec![PathSegment::Arc {
        center: point(50.0, 50.0),
        radius: 25.0,
        start_angle: Angle::zero(),
        end_angle: Angle::pi(),
        direction: ArcDirection::Positive,
    }])
    .unwrap();

    assert_bounds_eq(path.bounding_box(), point(25.0, 50.0), point(75.0, 75.0));
}

#[test]
fn ellipse_bounds() {
    init_logger();
    let path = Path::new(vec![
        PathSegment::Ellipse {
            center: point(50.0, 50.0),
            radii: vector(40.0, 20.0),
            rotation: Angle::zero(),
            start_angle: Angle::zero(),
            end_angle: Angle::two_pi(),
            direction: ArcDirection::Positive,
        },
        PathSegment::Close,
    ])
    .unwrap();

    assert_bounds_eq(path.bounding_box(), point(10.0, 30.0), point(90.0, 70.0));
}

#[test]
fn square_points_do_not_depend_on_quality() {
    init_logger();
    let segments = vec![
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::LineTo {
            to: point(10.0, 0.0),
        },
        PathSegment::LineTo {
            to: point(10.0, 10.0),
        },
        PathSegment::LineTo {
            to: point(0.0, 10.0),
        },
        PathSegment::Close,
    ];

    for quality in QUALITIES {
        let path = Path::with_quality(segments.clone(), quality).unwrap();
        let points = path.points();
        assert_eq!(points.len(), 5, "quality {}", quality);
        assert_eq!(points[0], points[4]);
        assert!(path.polyline().subpaths()[0].closed);
    }
}

#[test]
fn disjoint_rectangles_short_circuit() {
    init_logger();
    let mut scene = Scene::default();
    let a = scene
        .add_shape(vec![PathSegment::Rect {
            origin: point(0.0, 0.0),
            size: size(10.0, 10.0),
        }])
        .unwrap();
    let b = scene
        .add_shape(vec![PathSegment::Rect {
            origin: point(50.0, 0.0),
            size: size(10.0, 10.0),
        }])
        .unwrap();

    scene.reset_hit_test_stats();
    assert!(!scene.overlaps(a, b).unwrap());
    assert!(!scene.overlaps(b, a).unwrap());

    let stats = scene.hit_test_stats();
    assert_eq!(stats.edge_tests, 0);
    assert_eq!(stats.bounds_rejections, 2);
}

#[test]
fn empty_group_bounds() {
    init_logger();
    let mut scene = Scene::default();
    let group = scene.add_group();
    assert!(matches!(
        scene.node(group).unwrap().kind(),
        NodeKind::Group { .. }
    ));

    let bbox = scene.natural_bbox(group).unwrap();
    assert_eq!(bbox.min, point(f64::INFINITY, f64::INFINITY));
    assert_eq!(bbox.max, point(f64::NEG_INFINITY, f64::NEG_INFINITY));
    assert!(bbox.is_empty());

    // It stays the identity of unions up the hierarchy.
    let parent = scene.add_group();
    scene.append_child(parent, group).unwrap();
    assert_eq!(*scene.natural_bbox(parent).unwrap(), Bounds::empty());
}

#[test]
fn mixed_path_in_a_transformed_group() {
    init_logger();
    let mut scene = Scene::default();
    let group = scene.add_group();
    let shape = scene
        .add_shape(crate::mixed_segments(point(0.0, 0.0)))
        .unwrap();
    scene.append_child(group, shape).unwrap();
    scene.set_position(group, 1000.0, 0.0).unwrap();
    scene.set_rotation(group, std::f64::consts::FRAC_PI_2).unwrap();

    let natural = *scene.natural_bbox(shape).unwrap();
    let global = scene.global_bbox(shape).unwrap();

    // A quarter turn maps (x, y) to (-y, x).
    let expected_min = point(1000.0 - natural.max.y, natural.min.x);
    let expected_max = point(1000.0 - natural.min.y, natural.max.x);
    assert_bounds_eq(*global.bounds(), expected_min, expected_max);

    for p in scene.global_points(shape).unwrap().points() {
        assert!(global.bounds().inflate(1e-9).contains_point(*p));
    }
}
