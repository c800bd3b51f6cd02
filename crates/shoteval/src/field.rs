//! Field dimensions and the opponent goal segment.
//!
//! Frame: origin at the centre of our own goal line, +y toward the opponent
//! goal, which sits on `y = length` centred on `x = 0`.

use nalgebra::Vector2;

use crate::error::EvalError;
use crate::types::Point;

/// Field configuration. Defaults follow a division-B small-size field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub length: f64,
    pub width: f64,
    pub goal_width: f64,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            length: 9.0,
            width: 6.0,
            goal_width: 1.0,
        }
    }
}

impl Field {
    pub fn validate(&self) -> Result<(), EvalError> {
        for (name, v) in [
            ("length", self.length),
            ("width", self.width),
            ("goal_width", self.goal_width),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(EvalError::invalid_field(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if self.goal_width > self.width {
            return Err(EvalError::invalid_field(format!(
                "goal_width {} exceeds field width {}",
                self.goal_width, self.width
            )));
        }
        Ok(())
    }

    /// Opponent goal segment (left post first).
    #[inline]
    pub fn their_goal(&self) -> GoalSegment {
        let half = 0.5 * self.goal_width;
        GoalSegment {
            left: Vector2::new(-half, self.length),
            right: Vector2::new(half, self.length),
        }
    }

    /// Whether `p` lies inside the field rectangle (boundary included).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x.abs() <= 0.5 * self.width && (0.0..=self.length).contains(&p.y)
    }
}

/// Target line between the two goal posts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoalSegment {
    pub left: Point,
    pub right: Point,
}

impl GoalSegment {
    #[inline]
    pub fn center(&self) -> Point {
        0.5 * (self.left + self.right)
    }
    #[inline]
    pub fn line_y(&self) -> f64 {
        self.left.y
    }
    #[inline]
    pub fn width(&self) -> f64 {
        (self.right - self.left).norm()
    }
}
