//! Removal of units observed dead.

use skirmish_core::types::UnitId;

use crate::roster::Roster;
use crate::unit::Unit;

/// Take `id` out of the roster and run its visual's destroy hook.
pub fn remove(roster: &mut Roster, id: UnitId) -> Option<Unit> {
    let mut unit = roster.remove(id)?;
    unit.destroy_visual();
    Some(unit)
}
