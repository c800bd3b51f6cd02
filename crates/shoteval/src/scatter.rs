//! Random robot layouts (uniform scatter + replay tokens).
//!
//! Purpose
//! - Reproducible snapshots for benches, randomized tests and CLI sweeps.
//!
//! Model
//! - Robots are placed uniformly in the attacking band
//!   `x ∈ [-W/2, W/2]`, `y ∈ [y_min_frac·L, L]`, then each is hidden with
//!   probability `hidden_prob`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EvalError;
use crate::field::Field;
use crate::types::{Point, RobotId, RobotState, Snapshot, ROBOT_RADIUS};

/// Layout sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct ScatterCfg {
    pub opponents: u8,
    pub friendlies: u8,
    /// Chance that a robot is marked not visible. Clamped to [0, 1].
    pub hidden_prob: f64,
    /// Lower edge of the band as a fraction of field length. Clamped to [0, 1].
    pub y_min_frac: f64,
    pub robot_radius: f64,
}

impl Default for ScatterCfg {
    fn default() -> Self {
        Self {
            opponents: 6,
            friendlies: 6,
            hidden_prob: 0.0,
            y_min_frac: 0.5,
            robot_radius: ROBOT_RADIUS,
        }
    }
}

impl ScatterCfg {
    /// Fractions must be finite (they are clamped afterwards); the radius
    /// must be finite and > 0.
    pub fn validate(&self) -> Result<(), EvalError> {
        if !self.hidden_prob.is_finite() {
            return Err(EvalError::invalid_cfg(format!(
                "hidden_prob must be finite, got {}",
                self.hidden_prob
            )));
        }
        check_band(self.y_min_frac)?;
        if !self.robot_radius.is_finite() || self.robot_radius <= 0.0 {
            return Err(EvalError::invalid_cfg(format!(
                "robot_radius must be finite and > 0, got {}",
                self.robot_radius
            )));
        }
        Ok(())
    }
}

fn check_band(y_min_frac: f64) -> Result<(), EvalError> {
    if y_min_frac.is_finite() {
        Ok(())
    } else {
        Err(EvalError::invalid_cfg(format!(
            "y_min_frac must be finite, got {y_min_frac}"
        )))
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn band_point<R: Rng>(rng: &mut R, field: &Field, y_min_frac: f64) -> Point {
    let half_w = 0.5 * field.width;
    let y0 = y_min_frac.clamp(0.0, 1.0) * field.length;
    Vector2::new(
        rng.gen_range(-half_w..=half_w),
        rng.gen_range(y0..=field.length),
    )
}

/// Draw one snapshot. Opponents get shells `0..opponents`, friendlies
/// `0..friendlies`.
pub fn draw_snapshot(
    field: &Field,
    cfg: ScatterCfg,
    tok: ReplayToken,
) -> Result<Snapshot, EvalError> {
    field.validate()?;
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let hidden = cfg.hidden_prob.clamp(0.0, 1.0);
    let ids = (0..cfg.opponents)
        .map(RobotId::opponent)
        .chain((0..cfg.friendlies).map(RobotId::friendly));
    let robots = ids
        .map(|id| RobotState {
            id,
            pos: band_point(&mut rng, field, cfg.y_min_frac),
            visible: !rng.gen_bool(hidden),
        })
        .collect();
    Ok(Snapshot::new(cfg.robot_radius, robots))
}

/// Draw `n` candidate shot points from the same band.
pub fn draw_shot_points(
    field: &Field,
    n: usize,
    y_min_frac: f64,
    tok: ReplayToken,
) -> Result<Vec<Point>, EvalError> {
    field.validate()?;
    check_band(y_min_frac)?;
    let mut rng = tok.to_std_rng();
    Ok((0..n).map(|_| band_point(&mut rng, field, y_min_frac)).collect())
}
