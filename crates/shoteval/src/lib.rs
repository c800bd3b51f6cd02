//! Geometric shot evaluation for robot soccer.
//!
//! Given a shot point and one frame of robot positions, estimate the chance
//! that a shot at the opponent goal gets through: goal span, opponent
//! shadows, their union, and the open fraction left over.
//!
//! API Policy
//! - Inputs are borrowed, never stored. Build a `Snapshot` per frame, wrap it
//!   in a `ShotEvaluator`, and evaluate as many points as needed.
//! - Malformed inputs return `EvalError`; degenerate geometry returns 0.

pub mod error;
pub mod field;
pub mod scatter;
pub mod shot;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::EvalError;
pub use field::{Field, GoalSegment};
pub use shot::{evaluate_shot, ShotEvaluator, ShotReport};
pub use types::{EvalCfg, Point, RobotId, RobotState, Snapshot, Team, ROBOT_RADIUS};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::scatter::{draw_shot_points, draw_snapshot, ReplayToken, ScatterCfg};
    pub use crate::shot::{evaluate_shot, AngularInterval, ShotEvaluator, ShotReport};
    pub use crate::{EvalCfg, EvalError, Field, Point, RobotId, RobotState, Snapshot, Team};
    pub use nalgebra::Vector2;
}
