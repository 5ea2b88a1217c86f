//! Read-only query surface that decision strategies see.
//!
//! Strategies never hold a reference to the world type itself; they read
//! published unit state through this trait, which keeps them pure and
//! testable against a hand-built fixture.

use glam::DVec2;

use crate::types::{Faction, UnitId, UnitView};

pub trait UnitQuery {
    /// Look up a unit by id. Dead units that have not been pruned yet are still returned.
    fn unit(&self, id: UnitId) -> Option<UnitView>;

    /// All living units within `range` of `point`, boundary inclusive, in iteration order.
    fn alive_units_in_range(&self, point: DVec2, range: f64) -> Vec<UnitView>;

    /// Nearest living unit within `range`, optionally restricted to one faction.
    /// Ties go to the first unit in iteration order.
    fn alive_nearest_unit(
        &self,
        point: DVec2,
        range: f64,
        faction: Option<Faction>,
    ) -> Option<UnitView>;

    /// Resolve an id to a unit only if it is still alive.
    fn alive_unit(&self, id: UnitId) -> Option<UnitView> {
        self.unit(id).filter(|u| u.alive)
    }
}

/// Nearest-unit selection shared by every `UnitQuery` implementation.
/// Strict `<` keeps the first of equally distant candidates.
pub fn nearest_of(
    candidates: impl IntoIterator<Item = UnitView>,
    point: DVec2,
    faction: Option<Faction>,
) -> Option<UnitView> {
    let mut nearest: Option<(f64, UnitView)> = None;
    for unit in candidates {
        if faction.is_some_and(|f| f != unit.faction) {
            continue;
        }
        let dist = unit.position.distance(point);
        if nearest.map_or(true, |(best, _)| dist < best) {
            nearest = Some((dist, unit));
        }
    }
    nearest.map(|(_, unit)| unit)
}
