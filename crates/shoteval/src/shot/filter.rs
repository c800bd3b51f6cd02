//! Which robots may block a shot at the opponent goal.
//!
//! Only visible opponents block; friendlies never do. Opponents listed in the
//! caller's exclusion set are ignored for that call, which lets a caller ask
//! "what if this robot were not there".

use crate::types::{RobotId, RobotState, Snapshot, Team};

#[inline]
pub fn can_block(robot: &RobotState, excluded: &[RobotId]) -> bool {
    robot.team() == Team::Opponent && robot.visible && !excluded.contains(&robot.id)
}

/// Candidate obstacles of `snapshot`, in snapshot order.
pub fn blockers<'s>(
    snapshot: &'s Snapshot,
    excluded: &'s [RobotId],
) -> impl Iterator<Item = &'s RobotState> + 's {
    snapshot.robots.iter().filter(move |r| can_block(r, excluded))
}
