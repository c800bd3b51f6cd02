//! Snapshot types read by the shot evaluator.
//!
//! - `Point`: field coordinate (x, y); +y points at the opponent goal.
//! - `RobotId`, `Team`, `RobotState`: one tracked robot as handed over by the
//!   world-state collaborator.
//! - `Snapshot`: all robots of one frame plus the uniform robot radius.
//! - `EvalCfg`: numeric tolerances and the probability shaping exponent.
//!
//! The engine never mutates a snapshot. Build one per frame and hand the same
//! reference to every evaluation of that frame.

use nalgebra::Vector2;

use crate::error::EvalError;

/// Field coordinate in metres.
pub type Point = Vector2<f64>;

/// Physical robot radius used when a snapshot does not override it.
pub const ROBOT_RADIUS: f64 = 0.09;

/// Team membership relative to the evaluating side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Team {
    Friendly,
    Opponent,
}

/// Robot identity: team plus shell number. Shell numbers are unique per team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId {
    pub team: Team,
    pub shell: u8,
}

impl RobotId {
    #[inline]
    pub fn friendly(shell: u8) -> Self {
        Self {
            team: Team::Friendly,
            shell,
        }
    }
    #[inline]
    pub fn opponent(shell: u8) -> Self {
        Self {
            team: Team::Opponent,
            shell,
        }
    }
}

/// One robot as seen in the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RobotState {
    pub id: RobotId,
    pub pos: Point,
    /// False when the robot is not currently tracked; its position is stale.
    pub visible: bool,
}

impl RobotState {
    #[inline]
    pub fn new(id: RobotId, pos: Point) -> Self {
        Self {
            id,
            pos,
            visible: true,
        }
    }
    #[inline]
    pub fn team(&self) -> Team {
        self.id.team
    }
}

/// Read-only world snapshot for one frame.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub robot_radius: f64,
    pub robots: Vec<RobotState>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            robot_radius: ROBOT_RADIUS,
            robots: Vec::new(),
        }
    }
}

impl Snapshot {
    pub fn new(robot_radius: f64, robots: Vec<RobotState>) -> Self {
        Self {
            robot_radius,
            robots,
        }
    }

    /// Builder-style insert, handy for tests and demos.
    pub fn with_robot(mut self, robot: RobotState) -> Self {
        self.robots.push(robot);
        self
    }

    pub fn robot(&self, id: RobotId) -> Option<&RobotState> {
        self.robots.iter().find(|r| r.id == id)
    }

    /// Snapshot without the given robot (used to compare exclusion with removal).
    pub fn without(&self, id: RobotId) -> Snapshot {
        Snapshot {
            robot_radius: self.robot_radius,
            robots: self.robots.iter().copied().filter(|r| r.id != id).collect(),
        }
    }

    /// Reject snapshots that would make the geometry meaningless.
    pub fn validate(&self) -> Result<(), EvalError> {
        if !self.robot_radius.is_finite() || self.robot_radius <= 0.0 {
            return Err(EvalError::invalid_snapshot(format!(
                "robot radius must be finite and > 0, got {}",
                self.robot_radius
            )));
        }
        for (k, r) in self.robots.iter().enumerate() {
            if !(r.pos.x.is_finite() && r.pos.y.is_finite()) {
                return Err(EvalError::invalid_snapshot(format!(
                    "robot {:?} has a non-finite position",
                    r.id
                )));
            }
            if self.robots[..k].iter().any(|other| other.id == r.id) {
                return Err(EvalError::invalid_snapshot(format!(
                    "robot {:?} appears twice",
                    r.id
                )));
            }
        }
        Ok(())
    }
}

/// Evaluation configuration (tolerances and model shape).
#[derive(Clone, Copy, Debug)]
pub struct EvalCfg {
    /// Shadows whose gap is at most this wide (radians) are merged.
    pub eps_touch: f64,
    /// Probability is `open_fraction.powf(open_exponent)`; 1.0 is the plain fraction.
    pub open_exponent: f64,
}

impl Default for EvalCfg {
    fn default() -> Self {
        Self {
            eps_touch: 1e-12,
            open_exponent: 1.0,
        }
    }
}

impl EvalCfg {
    pub fn validate(&self) -> Result<(), EvalError> {
        if !self.eps_touch.is_finite() || self.eps_touch < 0.0 {
            return Err(EvalError::invalid_cfg("eps_touch must be finite and >= 0"));
        }
        if !self.open_exponent.is_finite() || self.open_exponent <= 0.0 {
            return Err(EvalError::invalid_cfg(
                "open_exponent must be finite and > 0",
            ));
        }
        Ok(())
    }
}
