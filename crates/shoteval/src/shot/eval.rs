//! Shot evaluation: filter, project, merge, map to a probability.

use rayon::prelude::*;

use super::filter::blockers;
use super::goal::goal_span;
use super::interval::{complement_within, merge_union, AngularInterval};
use super::model::success_probability;
use super::shadow::shadow;
use crate::error::EvalError;
use crate::field::{Field, GoalSegment};
use crate::types::{EvalCfg, Point, RobotId, Snapshot};

/// Full breakdown of one evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct ShotReport {
    /// Bearings the goal occupies; `None` when no forward shot exists.
    pub goal_span: Option<AngularInterval>,
    /// Merged shadows inside the goal span, sorted and disjoint.
    pub blocked: Vec<AngularInterval>,
    /// Uncovered parts of the goal span, sorted and disjoint.
    pub open_windows: Vec<AngularInterval>,
    pub blocked_width: f64,
    pub probability: f64,
}

impl ShotReport {
    fn degenerate() -> Self {
        Self {
            goal_span: None,
            blocked: Vec::new(),
            open_windows: Vec::new(),
            blocked_width: 0.0,
            probability: 0.0,
        }
    }

    #[inline]
    pub fn span_width(&self) -> f64 {
        self.goal_span.map_or(0.0, |s| s.width())
    }

    /// Blocked width over span width; 1 for a degenerate span.
    #[inline]
    pub fn occlusion_ratio(&self) -> f64 {
        let w = self.span_width();
        if w > 0.0 {
            (self.blocked_width / w).min(1.0)
        } else {
            1.0
        }
    }
}

/// Evaluator bound to one frame's field and snapshot.
///
/// Construction validates the inputs once; every evaluation afterwards only
/// checks the shot point. Borrowed data is immutable, so one evaluator can
/// serve many threads.
#[derive(Clone, Copy, Debug)]
pub struct ShotEvaluator<'a> {
    field: &'a Field,
    snapshot: &'a Snapshot,
    goal: GoalSegment,
    cfg: EvalCfg,
}

impl<'a> ShotEvaluator<'a> {
    pub fn new(field: &'a Field, snapshot: &'a Snapshot) -> Result<Self, EvalError> {
        Self::with_cfg(field, snapshot, EvalCfg::default())
    }

    pub fn with_cfg(
        field: &'a Field,
        snapshot: &'a Snapshot,
        cfg: EvalCfg,
    ) -> Result<Self, EvalError> {
        field.validate()?;
        snapshot.validate()?;
        cfg.validate()?;
        Ok(Self {
            field,
            snapshot,
            goal: field.their_goal(),
            cfg,
        })
    }

    #[inline]
    pub fn field(&self) -> &'a Field {
        self.field
    }

    #[inline]
    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    #[inline]
    pub fn cfg(&self) -> EvalCfg {
        self.cfg
    }

    /// Probability in [0, 1] that a shot from `target` reaches the goal
    /// unobstructed, ignoring robots in `excluded`.
    pub fn evaluate_shot(&self, target: Point, excluded: &[RobotId]) -> Result<f64, EvalError> {
        Ok(self.evaluate_detailed(target, excluded)?.probability)
    }

    /// Same as `evaluate_shot`, keeping the intermediate geometry.
    pub fn evaluate_detailed(
        &self,
        target: Point,
        excluded: &[RobotId],
    ) -> Result<ShotReport, EvalError> {
        if !(target.x.is_finite() && target.y.is_finite()) {
            return Err(EvalError::InvalidPoint {
                x: target.x,
                y: target.y,
            });
        }
        let Some(span) = goal_span(target, &self.goal) else {
            return Ok(ShotReport::degenerate());
        };
        let radius = self.snapshot.robot_radius;
        let shadows: Vec<AngularInterval> = blockers(self.snapshot, excluded)
            .filter_map(|r| shadow(target, r.pos, radius, &span))
            .collect();
        let blocked = merge_union(&shadows, self.cfg.eps_touch);
        let blocked_width = blocked
            .iter()
            .map(AngularInterval::width)
            .sum::<f64>()
            .min(span.width());
        let open_windows = complement_within(&span, &blocked);
        let probability = success_probability(span.width(), blocked_width, self.cfg.open_exponent);
        Ok(ShotReport {
            goal_span: Some(span),
            blocked,
            open_windows,
            blocked_width,
            probability,
        })
    }

    /// Evaluate many shot points against the same frame, in parallel.
    /// Output order matches `targets`; the first invalid point fails the batch.
    pub fn evaluate_many(
        &self,
        targets: &[Point],
        excluded: &[RobotId],
    ) -> Result<Vec<f64>, EvalError> {
        targets
            .par_iter()
            .map(|&p| self.evaluate_shot(p, excluded))
            .collect()
    }
}

/// One-off evaluation with default tolerances.
///
/// Prefer a `ShotEvaluator` when evaluating several points of the same frame;
/// this validates the whole snapshot on every call.
pub fn evaluate_shot(
    field: &Field,
    snapshot: &Snapshot,
    target: Point,
    excluded: &[RobotId],
) -> Result<f64, EvalError> {
    ShotEvaluator::new(field, snapshot)?.evaluate_shot(target, excluded)
}
