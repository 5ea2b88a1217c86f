//! Route recording and resampling.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::constants::ROUTE_MOVE_THRESHOLD;
use skirmish_core::input::InputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Minimum distance from the last point for a sample to be recorded.
    pub move_threshold: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            move_threshold: ROUTE_MOVE_THRESHOLD,
        }
    }
}

/// Polyline drawn by the pointer. No simplicity requirement.
#[derive(Debug, Clone, Default)]
pub struct Route {
    config: RouteConfig,
    points: Vec<DVec2>,
}

impl Route {
    pub fn new(config: RouteConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
        }
    }

    pub fn update(&mut self, input: &InputSnapshot) -> bool {
        self.push(input.pos)
    }

    /// Record `sample` unless it is within the move threshold of the last point.
    pub fn push(&mut self, sample: DVec2) -> bool {
        if let Some(&last) = self.points.last() {
            if last.distance(sample) < self.config.move_threshold {
                return false;
            }
        }
        self.points.push(sample);
        true
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Reduce the route to `n` points, keeping its order.
    ///
    /// Routes of `n` points or fewer come back unchanged. Longer routes keep
    /// both endpoints plus `n - 2` interior points drawn uniformly without
    /// replacement. The endpoints are always kept, so `n < 2` still yields two.
    pub fn random_sampled_points<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<DVec2> {
        let len = self.points.len();
        if len <= n.max(2) {
            return self.points.clone();
        }

        let interior = len - 2;
        let mut picked = rand::seq::index::sample(rng, interior, n.saturating_sub(2)).into_vec();
        picked.sort_unstable();

        let mut sampled = Vec::with_capacity(picked.len() + 2);
        sampled.push(self.points[0]);
        sampled.extend(picked.into_iter().map(|i| self.points[i + 1]));
        sampled.push(self.points[len - 1]);
        sampled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn straight_route(count: usize) -> Route {
        let mut route = Route::default();
        for i in 0..count {
            assert!(route.push(DVec2::new(i as f64 * 10.0, 0.0)));
        }
        route
    }

    #[test]
    fn test_jitter_filtered() {
        let mut route = Route::new(RouteConfig::default());
        assert!(route.push(DVec2::ZERO));
        assert!(!route.push(DVec2::new(2.0, 2.0)));
        assert!(route.push(DVec2::new(4.0, 0.0)));
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn test_route_may_cross_itself() {
        let mut route = Route::default();
        for (x, y) in [(0.0, 0.0), (100.0, 100.0), (100.0, 0.0), (0.0, 100.0)] {
            assert!(route.push(DVec2::new(x, y)));
        }
        assert_eq!(route.len(), 4);
    }

    #[test]
    fn test_short_route_returned_unchanged() {
        let route = straight_route(5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(route.random_sampled_points(5, &mut rng), route.points());
        assert_eq!(route.random_sampled_points(20, &mut rng), route.points());
    }

    #[test]
    fn test_sampling_keeps_endpoints_and_order() {
        let route = straight_route(100);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let sampled = route.random_sampled_points(20, &mut rng);

        assert_eq!(sampled.len(), 20);
        assert_eq!(sampled[0], route.points()[0]);
        assert_eq!(sampled[19], route.points()[99]);
        // Points lie on the x axis in increasing order, so order shows up as increasing x.
        for pair in sampled.windows(2) {
            assert!(pair[0].x < pair[1].x, "Resampled route out of order");
        }
        for p in &sampled {
            assert!(route.points().contains(p));
        }
    }

    #[test]
    fn test_sampling_below_two_keeps_endpoints() {
        let route = straight_route(10);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let sampled = route.random_sampled_points(1, &mut rng);
        assert_eq!(sampled, vec![route.points()[0], route.points()[9]]);
    }

    #[test]
    fn test_sampling_is_stochastic_but_seeded() {
        let route = straight_route(100);

        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(
            route.random_sampled_points(10, &mut a),
            route.random_sampled_points(10, &mut b)
        );

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let first = route.random_sampled_points(10, &mut rng);
        let differs = (0..10).any(|_| route.random_sampled_points(10, &mut rng) != first);
        assert!(differs, "Repeated sampling never varied");
    }

    #[test]
    fn test_clear_and_update() {
        let mut route = straight_route(3);
        route.clear();
        assert!(route.is_empty());
        let input = InputSnapshot {
            pos: DVec2::new(1.0, 2.0),
            is_down: true,
            ..Default::default()
        };
        assert!(route.update(&input));
        assert_eq!(route.points(), &[DVec2::new(1.0, 2.0)]);
    }
}
