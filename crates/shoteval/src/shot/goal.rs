//! Goal span: the bearing interval the opponent goal occupies from a point.

use std::f64::consts::FRAC_PI_2;

use super::interval::AngularInterval;
use crate::field::GoalSegment;
use crate::types::Point;

/// Bearing of `to` as seen from `from`, measured from +y, positive toward +x.
///
/// Targets in front of `from` (dy > 0) map into (-π/2, π/2).
#[inline]
pub fn bearing(from: Point, to: Point) -> f64 {
    let d = to - from;
    d.x.atan2(d.y)
}

/// Bearing interval subtended by `goal` at `p`, or `None` when no forward
/// shot exists.
///
/// - In front of the goal line: `[bearing(left), bearing(right)]`.
/// - On the goal line strictly between the posts: the whole forward half-plane.
/// - On the line outside the posts, on a post, or behind the line: `None`.
pub fn goal_span(p: Point, goal: &GoalSegment) -> Option<AngularInterval> {
    let line = goal.line_y();
    if p.y > line {
        return None;
    }
    if p.y == line {
        let (lo, hi) = (goal.left.x.min(goal.right.x), goal.left.x.max(goal.right.x));
        return (lo < p.x && p.x < hi).then_some(AngularInterval {
            start: -FRAC_PI_2,
            end: FRAC_PI_2,
        });
    }
    let span = AngularInterval::new(bearing(p, goal.left), bearing(p, goal.right));
    (span.width() > 0.0).then_some(span)
}
