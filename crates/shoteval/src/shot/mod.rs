//! Shot evaluation against the opponent goal.
//!
//! Purpose
//! - Estimate how likely a shot from a field point reaches the opponent goal
//!   without being blocked, from one frame's robot positions.
//!
//! Pipeline
//! - `filter`: visible opponents not excluded by the caller.
//! - `goal`: bearing interval the goal occupies from the shot point.
//! - `shadow`: per-robot tangent-line shadow, clipped to that interval.
//! - `interval`: sweep-line union of the shadows.
//! - `model`: blocked fraction to probability.
//!
//! Everything here is pure; `ShotEvaluator` only borrows the frame.

mod eval;
pub mod filter;
pub mod goal;
pub mod interval;
pub mod model;
pub mod shadow;

pub use eval::{evaluate_shot, ShotEvaluator, ShotReport};
pub use filter::{blockers, can_block};
pub use goal::{bearing, goal_span};
pub use interval::{complement_within, merge_union, union_width, AngularInterval};
pub use model::success_probability;
pub use shadow::shadow;

#[cfg(test)]
mod tests;
