//! Melee resolution.

use skirmish_core::query::UnitQuery;
use skirmish_core::types::UnitId;

use crate::roster::Roster;

/// A landed attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub target: UnitId,
    pub damage: f64,
    /// The target died from this strike.
    pub killed: bool,
}

/// Let `attacker` hit the nearest living opponent within attack range.
///
/// Nothing happens while the cooldown is positive. With no one in range the
/// cooldown is left alone, so the attacker strikes the moment a target arrives.
pub fn run(roster: &mut Roster, attacker: UnitId) -> Option<Strike> {
    let unit = roster.get(attacker)?;
    if !unit.is_alive() || unit.attack_timer() > 0.0 {
        return None;
    }

    let spec = unit.shared_spec();
    let target = roster.alive_nearest_unit(
        unit.position(),
        spec.attack_range,
        Some(spec.faction.opponent()),
    )?;

    let killed = roster.get_mut(target.id)?.apply_damage(spec.attack_damage);
    if let Some(unit) = roster.get_mut(attacker) {
        unit.attack_timer = spec.attack_interval;
    }
    Some(Strike {
        target: target.id,
        damage: spec.attack_damage,
        killed,
    })
}
