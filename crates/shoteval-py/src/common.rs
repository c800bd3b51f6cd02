use nalgebra::Vector2;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use shoteval::{EvalError, Field, RobotId, RobotState, Snapshot, Team};

/// Python field tuple: `(length, width, goal_width)`.
pub type PyField = (f64, f64, f64);

/// Python robot tuple: `(team, shell, x, y, visible)` with team `"opponent"` or `"friendly"`.
pub type PyRobot = (String, u8, f64, f64, bool);

pub fn team_from_py(team: &str) -> PyResult<Team> {
    match team {
        "opponent" | "their" => Ok(Team::Opponent),
        "friendly" | "our" => Ok(Team::Friendly),
        other => Err(PyValueError::new_err(format!("unknown team {other:?}"))),
    }
}

pub fn robot_id_from_py((team, shell): (String, u8)) -> PyResult<RobotId> {
    Ok(RobotId {
        team: team_from_py(&team)?,
        shell,
    })
}

/// `None` gives the library default field.
pub fn field_from_py(field: Option<PyField>) -> Field {
    field.map_or_else(Field::default, |(length, width, goal_width)| Field {
        length,
        width,
        goal_width,
    })
}

pub fn excluded_from_py(excluded: Vec<(String, u8)>) -> PyResult<Vec<RobotId>> {
    excluded.into_iter().map(robot_id_from_py).collect()
}

pub fn snapshot_from_py(robot_radius: f64, robots: Vec<PyRobot>) -> PyResult<Snapshot> {
    let robots = robots
        .into_iter()
        .map(|(team, shell, x, y, visible)| {
            Ok(RobotState {
                id: robot_id_from_py((team, shell))?,
                pos: Vector2::new(x, y),
                visible,
            })
        })
        .collect::<PyResult<Vec<_>>>()?;
    Ok(Snapshot::new(robot_radius, robots))
}

pub fn map_eval_err(err: EvalError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
