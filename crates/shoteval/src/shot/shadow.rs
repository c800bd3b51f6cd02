//! Shadow of one robot on the goal span.
//!
//! A robot is a disc. From an outside point its two tangent lines bound the
//! blocked bearings: half-angle `asin(radius / distance)` around the bearing
//! to the centre. A shot point inside (or on) the disc sees nothing past it.

use super::goal::bearing;
use super::interval::AngularInterval;
use crate::types::Point;

/// Shadow of the disc `(center, radius)` seen from `p`, clipped to `span`.
///
/// Returns `None` when the raw shadow misses the span entirely.
///
/// Raw shadows extending past ±π would wrap around, but with a half-angle of
/// at most π/2 the wrapped part lands in [-π, -π/2] or [π/2, π], never inside
/// a goal span, so clipping without unwrapping is exact.
pub fn shadow(
    p: Point,
    center: Point,
    radius: f64,
    span: &AngularInterval,
) -> Option<AngularInterval> {
    let dist = (center - p).norm();
    if dist <= radius {
        return Some(*span);
    }
    let theta = bearing(p, center);
    let half = (radius / dist).min(1.0).asin();
    AngularInterval {
        start: theta - half,
        end: theta + half,
    }
    .clip_to(span)
}
