//! Incremental simple-polygon lasso.
//!
//! Pointer samples are accepted as vertices only if the polyline stays
//! simple: the new edge may not cross or graze an earlier, non-adjacent
//! edge, and no earlier vertex may sit on top of the new edge. Rejected
//! samples are dropped, never retried.
//!
//! Once an accepted vertex leaves a closing edge that crosses the polyline,
//! the lasso stays invalid until it is cleared.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::constants::{LASSO_MOVE_THRESHOLD, LASSO_NEAR_LINE_THRESHOLD};
use skirmish_core::geometry::{polygon_contains, Segment};
use skirmish_core::input::InputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LassoConfig {
    /// Minimum distance from the last vertex for a sample to count.
    pub move_threshold: f64,
    /// Clearance required between vertices and non-adjacent edges.
    pub near_line_threshold: f64,
}

impl Default for LassoConfig {
    fn default() -> Self {
        Self {
            move_threshold: LASSO_MOVE_THRESHOLD,
            near_line_threshold: LASSO_NEAR_LINE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lasso {
    config: LassoConfig,
    points: Vec<DVec2>,
    /// Latest raw pointer sample, accepted or not.
    pointer: DVec2,
    /// Set once the closing edge has crossed the polyline.
    crossed: bool,
}

impl Lasso {
    pub fn new(config: LassoConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            pointer: DVec2::ZERO,
            crossed: false,
        }
    }

    pub fn config(&self) -> &LassoConfig {
        &self.config
    }

    /// Feed one frame of pointer input.
    pub fn update(&mut self, input: &InputSnapshot) -> bool {
        self.push(input.pos)
    }

    /// Offer a pointer sample. Returns whether it became a vertex.
    pub fn push(&mut self, sample: DVec2) -> bool {
        self.pointer = sample;
        if !self.accepts(sample) {
            return false;
        }
        self.points.push(sample);
        if !self.closing_edge_clear() {
            self.crossed = true;
        }
        true
    }

    /// Whether `sample` would be accepted as the next vertex.
    pub fn accepts(&self, sample: DVec2) -> bool {
        let Some(&last) = self.points.last() else {
            return true;
        };
        if last.distance(sample) < self.config.move_threshold {
            return false;
        }

        let candidate = Segment::new(last, sample);
        let near = self.config.near_line_threshold;
        // Everything except the last vertex and the edge ending at it.
        let settled = &self.points[..self.points.len() - 1];
        let mut edges = settled.windows(2).map(|w| Segment::new(w[0], w[1]));

        if edges.clone().any(|edge| edge.intersects(&candidate)) {
            return false;
        }
        if edges.any(|edge| edge.is_near(sample, near)) {
            return false;
        }
        !settled.iter().any(|&vertex| candidate.is_near(vertex, near))
    }

    /// At least three vertices, and no closing edge so far has crossed the polyline.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3 && !self.crossed
    }

    /// Whether the edge from the last vertex back to the first crosses nothing.
    fn closing_edge_clear(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return true;
        }
        let closing = Segment::new(self.points[n - 1], self.points[0]);
        // Skip the first and last edges; they share an endpoint with the closing edge.
        !self.points[1..n - 1]
            .windows(2)
            .any(|w| Segment::new(w[0], w[1]).intersects(&closing))
    }

    /// Even-odd containment. Always false while the lasso is not valid.
    pub fn contains(&self, p: DVec2) -> bool {
        self.is_valid() && polygon_contains(&self.points, p)
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.crossed = false;
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }
}
