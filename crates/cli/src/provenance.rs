//! Provenance sidecars: `<artifact>.provenance.json` beside every file a
//! command writes, recording the frame and evaluator settings behind it.

use anyhow::{Context, Result};
use serde::Serialize;
use shoteval::{EvalCfg, RobotId};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::scene::{format_robot_id, FieldFile, Scene};

/// Evaluator tolerances and model parameters as written to disk.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct EvalRecord {
    pub eps_touch: f64,
    pub open_exponent: f64,
}

impl From<EvalCfg> for EvalRecord {
    fn from(cfg: EvalCfg) -> Self {
        Self {
            eps_touch: cfg.eps_touch,
            open_exponent: cfg.open_exponent,
        }
    }
}

/// Knobs of the command that produced the artifact.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum RunParams {
    Grid {
        step: f64,
        y_min_frac: f64,
        points: usize,
    },
    Batch {
        input: String,
        rows: usize,
    },
    Sweep {
        seed: u64,
        layouts: u64,
        points: usize,
        opponents: u8,
        hidden_prob: f64,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub engine: &'static str,
    /// Scene file; `None` means the default field with no robots.
    pub scene: Option<String>,
    pub field: FieldFile,
    pub robot_radius: f64,
    pub excluded: Vec<String>,
    pub eval: EvalRecord,
    pub run: RunParams,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new(
        scene_path: Option<&Path>,
        scene: &Scene,
        excluded: &[RobotId],
        cfg: EvalCfg,
        run: RunParams,
    ) -> Self {
        Self {
            code_rev: code_rev(),
            engine: shoteval::VERSION,
            scene: scene_path.map(|p| p.display().to_string()),
            field: scene.field.into(),
            robot_radius: scene.snapshot.robot_radius,
            excluded: excluded.iter().copied().map(format_robot_id).collect(),
            eval: cfg.into(),
            run,
            outputs: Vec::new(),
        }
    }

    /// Record `artifact` as the output and write the sidecar next to it.
    pub fn write_beside(mut self, artifact: &Path) -> Result<PathBuf> {
        let path = sidecar_path(artifact);
        self.outputs.push(artifact.display().to_string());
        std::fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `out/grid.csv` -> `out/grid.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Commit of the running binary: `GIT_COMMIT` at build or run time, else
/// `git rev-parse HEAD`, else `"unknown"`.
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_owned())
}
