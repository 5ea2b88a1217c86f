//! Order tool: turns pointer gestures into selections and routes.
//!
//! Pressing with no usable selection starts a lasso; the lasso reselects
//! player units on every frame it is valid. Pressing with a selection
//! starts a route, which is resampled and handed to every selected unit on
//! release. Modes change on the frame the button state changes, and that
//! frame's pointer sample is still fed to the new mode.

use log::debug;
use serde::{Deserialize, Serialize};

use skirmish_core::constants::ROUTE_SAMPLE_COUNT;
use skirmish_core::input::InputSnapshot;
use skirmish_core::types::UnitId;
use skirmish_selection::{Lasso, LassoConfig, Route, RouteConfig};

use crate::world::World;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderMode {
    /// Waiting for a press.
    #[default]
    Idle,
    Lasso,
    Route,
}

#[derive(Debug, Clone)]
pub struct OrderTool {
    mode: OrderMode,
    lasso: Lasso,
    route: Route,
    selected: Vec<UnitId>,
    sample_count: usize,
}

impl Default for OrderTool {
    fn default() -> Self {
        Self::new(LassoConfig::default(), RouteConfig::default())
    }
}

impl OrderTool {
    pub fn new(lasso: LassoConfig, route: RouteConfig) -> Self {
        Self {
            mode: OrderMode::Idle,
            lasso: Lasso::new(lasso),
            route: Route::new(route),
            selected: Vec::new(),
            sample_count: ROUTE_SAMPLE_COUNT,
        }
    }

    /// Feed one frame of input.
    pub fn update(&mut self, input: &InputSnapshot, world: &mut World) {
        if self.mode == OrderMode::Idle && input.is_just_down {
            self.mode = if self.has_commandable_selection(world) {
                OrderMode::Route
            } else {
                OrderMode::Lasso
            };
        }

        match self.mode {
            OrderMode::Idle => {}
            OrderMode::Lasso => self.update_lasso(input, world),
            OrderMode::Route => self.update_route(input, world),
        }

        world.mark_selected(&self.selected);
    }

    fn has_commandable_selection(&self, world: &World) -> bool {
        self.selected.iter().any(|&id| {
            world
                .unit(id)
                .is_some_and(|unit| unit.is_alive() && unit.is_player_controlled())
        })
    }

    fn update_lasso(&mut self, input: &InputSnapshot, world: &World) {
        self.lasso.update(input);

        self.selected.clear();
        if self.lasso.is_valid() {
            self.selected.extend(
                world
                    .units()
                    .filter(|unit| unit.is_alive() && unit.is_player_controlled())
                    .filter(|unit| self.lasso.contains(unit.position()))
                    .map(|unit| unit.id()),
            );
        }

        if !input.is_down {
            self.lasso.clear();
            self.mode = OrderMode::Idle;
        }
    }

    fn update_route(&mut self, input: &InputSnapshot, world: &mut World) {
        self.route.update(input);

        if input.is_down {
            return;
        }

        // Each unit gets its own resampling of the same stroke.
        for &id in &self.selected {
            let points = self
                .route
                .random_sampled_points(self.sample_count, world.rng_mut());
            if let Err(err) = world.set_route(id, &points) {
                debug!("Skipped route for unit {id}: {err}");
            }
        }
        self.route.clear();
        self.selected.clear();
        self.mode = OrderMode::Idle;
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn lasso(&self) -> &Lasso {
        &self.lasso
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn selected_ids(&self) -> &[UnitId] {
        &self.selected
    }

    pub fn is_selected(&self, id: UnitId) -> bool {
        self.selected.contains(&id)
    }
}
