//! Static collider shapes.
//!
//! An obstacle only answers one question: where does a query circle cross
//! its boundary. The world turns those contact points into push-out.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Circle, Rect, Segment};

/// Closed set of obstacle shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum Obstacle {
    Line(Segment),
    Circle(Circle),
    Rectangle(Rect),
}

impl Obstacle {
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Obstacle::Line(Segment::new(DVec2::new(x1, y1), DVec2::new(x2, y2)))
    }

    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Obstacle::Circle(Circle::new(DVec2::new(x, y), radius))
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Obstacle::Rectangle(Rect::new(x, y, width, height))
    }

    /// Boundary intersection points against a query circle.
    pub fn intersect_points(&self, center: DVec2, radius: f64) -> Vec<DVec2> {
        let query = Circle::new(center, radius);
        match self {
            Obstacle::Line(segment) => segment.circle_intersections(&query),
            Obstacle::Circle(circle) => query.circle_intersections(circle),
            Obstacle::Rectangle(rect) => rect.circle_intersections(&query),
        }
    }

    /// Per-tick hook. Every current shape is static.
    pub fn update(&mut self, _dt: f64) {}
}
