//! Presentation hook bound to a unit.
//!
//! The simulation calls these at lifecycle points and never looks inside.

use skirmish_core::types::UnitView;

pub trait VisualController: Send {
    /// Called once when attached to a unit.
    fn bind(&mut self, _unit: &UnitView) {}

    /// Called at the end of every tick the unit is updated in.
    fn update(&mut self, unit: &UnitView);

    /// Called when the selection changes for this unit.
    fn set_selected(&mut self, _selected: bool) {}

    /// Called when the unit is removed or the visual is replaced.
    fn destroy(&mut self) {}
}
