//! Error type for the shot evaluator.
//!
//! Degenerate geometry (shot point on or behind the goal line, inside a robot)
//! is not an error; it has a defined numeric result. Errors are reserved for
//! malformed inputs handed over by callers.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Field dimensions are non-finite, non-positive, or inconsistent.
    InvalidField { reason: String },
    /// Robot radius or a robot position is unusable.
    InvalidSnapshot { reason: String },
    /// The requested shot point is not a finite coordinate.
    InvalidPoint { x: f64, y: f64 },
    /// Tolerances or model parameters are out of range.
    InvalidCfg { reason: String },
}

impl EvalError {
    pub(crate) fn invalid_field(reason: impl Into<String>) -> Self {
        Self::InvalidField {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_snapshot(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_cfg(reason: impl Into<String>) -> Self {
        Self::InvalidCfg {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidField { reason } => write!(f, "invalid field: {reason}"),
            Self::InvalidSnapshot { reason } => write!(f, "invalid snapshot: {reason}"),
            Self::InvalidPoint { x, y } => write!(f, "shot point ({x}, {y}) is not finite"),
            Self::InvalidCfg { reason } => write!(f, "invalid eval config: {reason}"),
        }
    }
}

impl std::error::Error for EvalError {}
