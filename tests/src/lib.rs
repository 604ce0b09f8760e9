//! Shared fixtures for the cross-crate tests and the benchmarks.

use sprig::geom::{ArcDirection, CubicBezierSegment, QuadraticBezierSegment};
use sprig::math::{point, size, vector, Angle, Point};
use sprig::path::{BorderRadii, PathSegment};
use sprig::scene::{NodeId, Scene, Style};
use sprig::FillRule;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;

/// Quality levels exercised by the tests and the benchmarks.
pub static QUALITIES: [f64; 8] = [0.5, 1.0, 2.0, 4.0, 10.0, 25.0, 50.0, 100.0];

/// A small deterministic xorshift generator, so that generated fixtures are the same on
/// every run.
#[derive(Clone, Debug)]
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// A float in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.unit()
    }

    pub fn point(&mut self, min: f64, max: f64) -> Point {
        point(self.range(min, max), self.range(min, max))
    }
}

pub fn generate_cubic_curves(count: usize) -> Vec<CubicBezierSegment<f64>> {
    let mut rng = Rng::new(0x5eed);
    (0..count)
        .map(|_| CubicBezierSegment {
            from: rng.point(0.0, 500.0),
            ctrl1: rng.point(0.0, 500.0),
            ctrl2: rng.point(0.0, 500.0),
            to: rng.point(0.0, 500.0),
        })
        .collect()
}

pub fn generate_quadratic_curves(count: usize) -> Vec<QuadraticBezierSegment<f64>> {
    let mut rng = Rng::new(0xc0ffee);
    (0..count)
        .map(|_| QuadraticBezierSegment {
            from: rng.point(0.0, 500.0),
            ctrl: rng.point(0.0, 500.0),
            to: rng.point(0.0, 500.0),
        })
        .collect()
}

/// A path using every kind of segment.
pub fn mixed_segments(origin: Point) -> Vec<PathSegment> {
    let o = origin.to_vector();
    vec![
        PathSegment::MoveTo {
            to: point(0.0, 0.0) + o,
        },
        PathSegment::LineTo {
            to: point(40.0, 0.0) + o,
        },
        PathSegment::ArcTo {
            corner: point(60.0, 0.0) + o,
            to: point(60.0, 20.0) + o,
            radius: 10.0,
        },
        PathSegment::QuadraticTo {
            ctrl: Some(point(70.0, 40.0) + o),
            to: point(60.0, 50.0) + o,
        },
        PathSegment::QuadraticTo {
            ctrl: None,
            to: point(60.0, 70.0) + o,
        },
        PathSegment::CubicTo {
            ctrl1: None,
            ctrl2: point(40.0, 90.0) + o,
            to: point(30.0, 70.0) + o,
        },
        PathSegment::SvgArc {
            radii: vector(15.0, 10.0),
            x_rotation: Angle::radians(0.3),
            large_arc: false,
            sweep: true,
            to: point(0.0, 60.0) + o,
        },
        PathSegment::Close,
        PathSegment::Ellipse {
            center: point(20.0, 30.0) + o,
            radii: vector(8.0, 4.0),
            rotation: Angle::radians(0.5),
            start_angle: Angle::zero(),
            end_angle: Angle::two_pi(),
            direction: ArcDirection::Positive,
        },
        PathSegment::Close,
        PathSegment::RoundRect {
            origin: point(80.0, 0.0) + o,
            size: size(30.0, 20.0),
            radii: BorderRadii::new(5.0),
        },
    ]
}

/// Builds a scene with a mix of shapes, strokes, text, images and nested groups,
/// returning every node.
pub fn generate_scene(seed: u64, count: usize) -> (Scene, Vec<NodeId>) {
    let mut rng = Rng::new(seed);
    let mut scene = Scene::default();
    let mut nodes = Vec::new();
    let mut groups = Vec::new();

    for i in 0..count {
        let origin = rng.point(-100.0, 100.0);
        let id = match i % 6 {
            0 => scene.add_group(),
            1 => scene
                .add_shape(vec![PathSegment::Rect {
                    origin,
                    size: size(rng.range(1.0, 60.0), rng.range(1.0, 60.0)),
                }])
                .unwrap(),
            2 => {
                let id = scene
                    .add_shape(vec![
                        PathSegment::MoveTo { to: origin },
                        PathSegment::LineTo {
                            to: rng.point(-100.0, 100.0),
                        },
                        PathSegment::QuadraticTo {
                            ctrl: Some(rng.point(-100.0, 100.0)),
                            to: rng.point(-100.0, 100.0),
                        },
                    ])
                    .unwrap();
                scene
                    .set_style(id, Style::stroke(rng.range(0.5, 6.0)))
                    .unwrap();
                id
            }
            3 => {
                let id = scene.add_shape(mixed_segments(origin)).unwrap();
                scene
                    .set_style(id, Style::fill_and_stroke(FillRule::NonZero, 2.0))
                    .unwrap();
                id
            }
            4 => {
                let id = scene.add_text("label", rng.range(5.0, 40.0), rng.range(5.0, 20.0));
                scene.set_position(id, origin.x, origin.y).unwrap();
                id
            }
            _ => {
                let id = scene.add_image("photo.png", rng.range(5.0, 40.0), rng.range(5.0, 40.0));
                scene.set_position(id, origin.x, origin.y).unwrap();
                id
            }
        };

        if rng.unit() < 0.3 {
            scene.set_rotation(id, rng.range(-3.0, 3.0)).unwrap();
        }
        if rng.unit() < 0.2 {
            scene.set_scale(id, rng.range(0.5, 2.0), rng.range(0.5, 2.0)).unwrap();
        }

        if !groups.is_empty() && rng.unit() < 0.5 {
            let parent = groups[rng.next_u64() as usize % groups.len()];
            scene.append_child(parent, id).unwrap();
        }
        if i % 6 == 0 {
            groups.push(id);
        }

        nodes.push(id);
    }

    (scene, nodes)
}
