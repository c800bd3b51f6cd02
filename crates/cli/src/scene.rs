//! JSON scene files: field dimensions plus one frame of robots.
//!
//! ```json
//! {
//!   "field": { "length": 9.0, "width": 6.0, "goal_width": 1.0 },
//!   "robot_radius": 0.09,
//!   "robots": [ { "team": "opponent", "shell": 1, "x": 0.0, "y": 6.84 } ]
//! }
//! ```
//! `field` and `robot_radius` are optional and fall back to library defaults;
//! `visible` defaults to true.

use anyhow::{bail, Context, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use shoteval::{Field, RobotId, RobotState, Snapshot, Team, ROBOT_RADIUS};
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamFile {
    Friendly,
    Opponent,
}

impl From<TeamFile> for Team {
    fn from(t: TeamFile) -> Self {
        match t {
            TeamFile::Friendly => Team::Friendly,
            TeamFile::Opponent => Team::Opponent,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldFile {
    pub length: f64,
    pub width: f64,
    pub goal_width: f64,
}

impl From<Field> for FieldFile {
    fn from(f: Field) -> Self {
        Self {
            length: f.length,
            width: f.width,
            goal_width: f.goal_width,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotFile {
    pub team: TeamFile,
    pub shell: u8,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub field: Option<FieldFile>,
    #[serde(default)]
    pub robot_radius: Option<f64>,
    #[serde(default)]
    pub robots: Vec<RobotFile>,
}

/// Field and snapshot ready for evaluation.
pub struct Scene {
    pub field: Field,
    pub snapshot: Snapshot,
}

impl SceneFile {
    pub fn into_scene(self) -> Scene {
        let field = self.field.map_or_else(Field::default, |f| Field {
            length: f.length,
            width: f.width,
            goal_width: f.goal_width,
        });
        let robots = self
            .robots
            .into_iter()
            .map(|r| RobotState {
                id: RobotId {
                    team: r.team.into(),
                    shell: r.shell,
                },
                pos: Vector2::new(r.x, r.y),
                visible: r.visible,
            })
            .collect();
        Scene {
            field,
            snapshot: Snapshot::new(self.robot_radius.unwrap_or(ROBOT_RADIUS), robots),
        }
    }
}

/// Load a scene; `None` gives the default field with no robots.
pub fn load(path: Option<&Path>) -> Result<Scene> {
    let Some(path) = path else {
        return Ok(SceneFile::default().into_scene());
    };
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: SceneFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing scene {}", path.display()))?;
    Ok(file.into_scene())
}

/// Parse `opponent:3` / `friendly:1` (also `o:3` / `f:1`).
pub fn parse_robot_id(s: &str) -> Result<RobotId> {
    let Some((team, shell)) = s.split_once(':') else {
        bail!("expected <team>:<shell>, got {s:?}");
    };
    let team = match team.trim().to_ascii_lowercase().as_str() {
        "opponent" | "o" | "their" => Team::Opponent,
        "friendly" | "f" | "our" => Team::Friendly,
        other => bail!("unknown team {other:?}"),
    };
    let shell: u8 = shell
        .trim()
        .parse()
        .with_context(|| format!("bad shell number in {s:?}"))?;
    Ok(RobotId { team, shell })
}

/// Inverse of `parse_robot_id`, in the long form.
pub fn format_robot_id(id: RobotId) -> String {
    let team = match id.team {
        Team::Opponent => "opponent",
        Team::Friendly => "friendly",
    };
    format!("{team}:{}", id.shell)
}
