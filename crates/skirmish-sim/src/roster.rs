//! Id-ordered unit storage and the brute-force spatial queries over it.
//!
//! Iteration is always ascending id, which is insertion order because ids
//! are allocated monotonically. Distance ties resolve to the lowest id.

use std::collections::BTreeMap;

use glam::DVec2;

use skirmish_core::query::{nearest_of, UnitQuery};
use skirmish_core::types::{Faction, UnitId, UnitView};

use crate::unit::Unit;

#[derive(Debug, Default)]
pub struct Roster {
    units: BTreeMap<UnitId, Unit>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub(crate) fn insert(&mut self, unit: Unit) {
        self.units.insert(unit.id(), unit);
    }

    pub(crate) fn remove(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Ids captured up front so the caller can mutate while walking them.
    pub fn ids(&self) -> Vec<UnitId> {
        self.units.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn any_alive(&self, faction: Faction) -> bool {
        self.iter()
            .any(|unit| unit.is_alive() && unit.spec().faction == faction)
    }

    fn alive_within(&self, point: DVec2, range: f64) -> impl Iterator<Item = UnitView> + '_ {
        self.iter()
            .filter(move |unit| unit.is_alive() && unit.position().distance(point) <= range)
            .map(Unit::view)
    }
}

impl UnitQuery for Roster {
    fn unit(&self, id: UnitId) -> Option<UnitView> {
        self.get(id).map(Unit::view)
    }

    fn alive_units_in_range(&self, point: DVec2, range: f64) -> Vec<UnitView> {
        self.alive_within(point, range).collect()
    }

    fn alive_nearest_unit(
        &self,
        point: DVec2,
        range: f64,
        faction: Option<Faction>,
    ) -> Option<UnitView> {
        nearest_of(self.alive_within(point, range), point, faction)
    }
}
