//! Error type shared by the library crates.
//!
//! Nothing inside a tick returns an error. Errors come only from structural
//! preconditions (a bad `UnitSpec`), mutators addressed at an id that does
//! not resolve, and configuration parsing.

use thiserror::Error;

use crate::types::UnitId;

#[derive(Debug, Error)]
pub enum SkirmishError {
    #[error("unit {0} does not exist")]
    UnknownUnit(UnitId),

    #[error("invalid unit spec: {field} {reason}")]
    InvalidSpec {
        field: &'static str,
        reason: &'static str,
    },

    #[error("unit {0} has no strategy that accepts routes")]
    RouteUnsupported(UnitId),

    #[error("unknown stage {0}")]
    UnknownStage(u32),

    #[error("failed to parse stage: {0}")]
    StageParse(#[from] serde_json::Error),
}
