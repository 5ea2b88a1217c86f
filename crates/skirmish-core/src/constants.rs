//! Simulation constants and tuning parameters.

/// Default host frame rate (Hz) for headless runs.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Largest frame delta (seconds) a host should feed into one tick.
pub const MAX_FRAME_DELTA_SECS: f64 = 0.25;

// --- Intent resolution ---

/// Fraction of max speed used by `RandomWalk` when no speed is given.
pub const RANDOM_WALK_SPEED_FACTOR: f64 = 0.3;

/// Scale applied to a uniform (-PI, PI) draw to get the per-tick random-walk turn.
pub const RANDOM_WALK_TURN_FACTOR: f64 = 0.03;

// --- Collision ---

/// Distance a unit is displaced per tick when overlapping something.
pub const PUSH_COEFFICIENT: f64 = 0.5;

// --- Decision strategies ---

/// Seconds between enemy searches for player-controlled units.
pub const PLAYER_SEARCH_INTERVAL: f64 = 0.5;

/// Seconds between target re-scans for chasing enemies.
pub const CHASE_RESCAN_INTERVAL: f64 = 2.0;

// --- Selection tools ---

/// Minimum pointer travel before a lasso vertex is accepted.
pub const LASSO_MOVE_THRESHOLD: f64 = 4.0;

/// Minimum clearance between a lasso vertex and a non-adjacent edge.
pub const LASSO_NEAR_LINE_THRESHOLD: f64 = 2.0;

/// Minimum pointer travel before a route point is recorded.
pub const ROUTE_MOVE_THRESHOLD: f64 = 4.0;

/// Number of points a recorded route is decimated to before it is issued.
pub const ROUTE_SAMPLE_COUNT: usize = 20;
