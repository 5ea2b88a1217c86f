//! Selection geometry for SKIRMISH.
//!
//! Incremental lasso validation for picking units, and route
//! recording/resampling for issuing waypoint orders.

pub use skirmish_core as core;

pub mod lasso;
pub mod route;

pub use lasso::{Lasso, LassoConfig};
pub use route::{Route, RouteConfig};
