//! 2D geometry primitives: segments, circles, rectangles, and polygon tests.
//!
//! Intersection tests are inclusive: touching counts as intersecting.
//! Parallel and degenerate inputs never intersect.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Tolerance below which a circle-circle chord is treated as a tangent point.
const TANGENT_EPSILON: f64 = 1e-12;

/// Line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

/// Circle given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

/// Axis-aligned rectangle anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub size: DVec2,
}

impl Segment {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Whether two segments cross or touch.
    pub fn intersects(&self, other: &Segment) -> bool {
        let d1 = self.b - self.a;
        let d2 = other.b - other.a;
        let denom = d2.y * d1.x - d2.x * d1.y;
        if denom == 0.0 {
            return false;
        }
        let offset = self.a - other.a;
        let ua = (d2.x * offset.y - d2.y * offset.x) / denom;
        let ub = (d1.x * offset.y - d1.y * offset.x) / denom;
        (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
    }

    /// Shortest distance from a point to this segment. `None` for a zero-length segment.
    pub fn distance_to_point(&self, p: DVec2) -> Option<f64> {
        let d = self.b - self.a;
        let len_sq = d.length_squared();
        if len_sq == 0.0 {
            return None;
        }
        let t = (p - self.a).dot(d) / len_sq;
        let dist = if t < 0.0 {
            p.distance(self.a)
        } else if t > 1.0 {
            p.distance(self.b)
        } else {
            d.perp_dot(self.a - p).abs() / len_sq.sqrt()
        };
        Some(dist)
    }

    /// Whether `p` lies within `thickness` of this segment.
    pub fn is_near(&self, p: DVec2, thickness: f64) -> bool {
        self.distance_to_point(p)
            .is_some_and(|dist| dist <= thickness)
    }

    /// Points where the segment crosses the circle boundary.
    /// A segment lying entirely inside the circle has none.
    pub fn circle_intersections(&self, circle: &Circle) -> Vec<DVec2> {
        let dir = self.b - self.a;
        let from_center = self.a - circle.center;
        let a = dir.length_squared();
        if a == 0.0 {
            return Vec::new();
        }
        let b = 2.0 * dir.dot(from_center);
        let c = from_center.length_squared() - circle.radius * circle.radius;
        let discriminant = b * b - 4.0 * a * c;

        let mut points = Vec::new();
        if discriminant == 0.0 {
            let t = -b / (2.0 * a);
            if (0.0..=1.0).contains(&t) {
                points.push(self.a + dir * t);
            }
        } else if discriminant > 0.0 {
            let root = discriminant.sqrt();
            for t in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
                if (0.0..=1.0).contains(&t) {
                    points.push(self.a + dir * t);
                }
            }
        }
        points
    }
}

impl Circle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Points where two circle boundaries meet.
    /// Disjoint, nested and concentric circles have none; tangent circles have one.
    pub fn circle_intersections(&self, other: &Circle) -> Vec<DVec2> {
        let delta = other.center - self.center;
        let d = delta.length();
        if d == 0.0 || d > self.radius + other.radius || d < (self.radius - other.radius).abs() {
            return Vec::new();
        }
        let a = (self.radius * self.radius - other.radius * other.radius + d * d) / (2.0 * d);
        let h_sq = self.radius * self.radius - a * a;
        let axis = delta / d;
        let mid = self.center + axis * a;
        if h_sq <= TANGENT_EPSILON {
            return vec![mid];
        }
        let offset = axis.perp() * h_sq.sqrt();
        vec![mid + offset, mid - offset]
    }
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Boundary edges: top, right, bottom, left.
    pub fn edges(&self) -> [Segment; 4] {
        let min = self.min;
        let max = self.max();
        let top_right = DVec2::new(max.x, min.y);
        let bottom_left = DVec2::new(min.x, max.y);
        [
            Segment::new(min, top_right),
            Segment::new(top_right, max),
            Segment::new(max, bottom_left),
            Segment::new(bottom_left, min),
        ]
    }

    /// Points where the circle crosses the rectangle boundary.
    /// A corner crossing may be reported once per adjoining edge.
    pub fn circle_intersections(&self, circle: &Circle) -> Vec<DVec2> {
        self.edges()
            .iter()
            .flat_map(|edge| edge.circle_intersections(circle))
            .collect()
    }
}

/// Even-odd point-in-polygon test. The polygon is implicitly closed.
pub fn polygon_contains(vertices: &[DVec2], p: DVec2) -> bool {
    let mut inside = false;
    let Some(&last) = vertices.last() else {
        return false;
    };
    let mut j = last;
    for &i in vertices {
        let crosses = (i.y <= p.y && p.y < j.y) || (j.y <= p.y && p.y < i.y);
        if crosses && p.x < (j.x - i.x) * (p.y - i.y) / (j.y - i.y) + i.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Angle of the vector from `from` to `to`, in radians.
pub fn angle_between(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}
