//! Shot evaluation bindings.

use crate::common::{
    excluded_from_py, field_from_py, map_eval_err, snapshot_from_py, PyField, PyRobot,
};
use nalgebra::Vector2;
use pyo3::prelude::*;
use shoteval::ShotEvaluator;

/// Probability that a shot from `(x, y)` reaches the opponent goal.
///
/// `robots`: `(team, shell, x, y, visible)` tuples; `excluded`: `(team, shell)` pairs.
/// `field`: `(length, width, goal_width)`, defaults to the library field.
#[pyfunction]
#[pyo3(signature = (
    x,
    y,
    robots,
    excluded = Vec::new(),
    robot_radius = shoteval::ROBOT_RADIUS,
    field = None
))]
pub fn eval_shot(
    x: f64,
    y: f64,
    robots: Vec<PyRobot>,
    excluded: Vec<(String, u8)>,
    robot_radius: f64,
    field: Option<PyField>,
) -> PyResult<f64> {
    let field = field_from_py(field);
    let snapshot = snapshot_from_py(robot_radius, robots)?;
    let excluded = excluded_from_py(excluded)?;
    ShotEvaluator::new(&field, &snapshot)
        .and_then(|ev| ev.evaluate_shot(Vector2::new(x, y), &excluded))
        .map_err(map_eval_err)
}

/// Evaluate many `(x, y)` points against one frame; returns probabilities in order.
/// Arguments as for `eval_shot`.
#[pyfunction]
#[pyo3(signature = (
    points,
    robots,
    excluded = Vec::new(),
    robot_radius = shoteval::ROBOT_RADIUS,
    field = None
))]
pub fn eval_shots(
    points: Vec<(f64, f64)>,
    robots: Vec<PyRobot>,
    excluded: Vec<(String, u8)>,
    robot_radius: f64,
    field: Option<PyField>,
) -> PyResult<Vec<f64>> {
    let field = field_from_py(field);
    let snapshot = snapshot_from_py(robot_radius, robots)?;
    let excluded = excluded_from_py(excluded)?;
    let pts: Vec<_> = points.into_iter().map(|(x, y)| Vector2::new(x, y)).collect();
    ShotEvaluator::new(&field, &snapshot)
        .and_then(|ev| ev.evaluate_many(&pts, &excluded))
        .map_err(map_eval_err)
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(eval_shot, m)?)?;
    m.add_function(wrap_pyfunction!(eval_shots, m)?)?;
    Ok(())
}
