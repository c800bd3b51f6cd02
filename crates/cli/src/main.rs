use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::Vector2;
use serde_json::json;
use shoteval::scatter::{draw_shot_points, draw_snapshot, ReplayToken, ScatterCfg};
use shoteval::shot::AngularInterval;
use shoteval::{EvalCfg, Field, Point, RobotId, ShotEvaluator};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod scene;
mod table;

use provenance::{Provenance, RunParams};
use scene::{format_robot_id, FieldFile, Scene};

/// Largest lattice `grid` will build.
const MAX_GRID_POINTS: usize = 4_000_000;

#[derive(Parser)]
#[command(name = "shoteval")]
#[command(about = "Shot probability toward the opponent goal from one frame of robots")]
struct Cmd {
    /// Scene JSON with field and robots; omitted means default field, no robots
    #[arg(long, global = true)]
    scene: Option<PathBuf>,

    /// Robot to ignore as an obstacle, e.g. `opponent:1` (repeatable)
    #[arg(long = "exclude", global = true, value_parser = parse_exclude)]
    exclude: Vec<RobotId>,

    /// Exponent applied to the open-angle fraction
    #[arg(long, global = true, default_value_t = 1.0)]
    exponent: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate one shot point and print the breakdown as JSON
    Eval {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
    /// Probability heat map over the attacking band, written as CSV
    Grid {
        #[arg(long, default_value_t = 0.1)]
        step: f64,
        /// Lower edge of the band as a fraction of field length
        #[arg(long, default_value_t = 0.5)]
        y_min_frac: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Evaluate every `x,y` row of a CSV file
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Random layouts against random shot points; prints summary statistics.
    ///
    /// Only the field and `robot_radius` are taken from `--scene`; its robots
    /// are replaced by the random layouts, and `--exclude` does not apply.
    Sweep {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        layouts: u64,
        #[arg(long, default_value_t = 200)]
        points: usize,
        #[arg(long, default_value_t = 6)]
        opponents: u8,
        #[arg(long, default_value_t = 0.0)]
        hidden_prob: f64,
        /// Optional JSON summary file (gets a provenance sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn parse_exclude(s: &str) -> std::result::Result<RobotId, String> {
    scene::parse_robot_id(s).map_err(|e| format!("{e:#}"))
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let cfg = EvalCfg {
        open_exponent: cmd.exponent,
        ..EvalCfg::default()
    };
    let scene_path = cmd.scene.as_deref();
    match cmd.action {
        Action::Eval { x, y } => eval(scene_path, &cmd.exclude, cfg, x, y),
        Action::Grid {
            step,
            y_min_frac,
            out,
        } => grid(scene_path, &cmd.exclude, cfg, step, y_min_frac, &out),
        Action::Batch { input, out } => batch(scene_path, &cmd.exclude, cfg, &input, &out),
        Action::Sweep {
            seed,
            layouts,
            points,
            opponents,
            hidden_prob,
            out,
        } => {
            let scatter = ScatterCfg {
                opponents,
                hidden_prob,
                ..ScatterCfg::default()
            };
            sweep(scene_path, cfg, scatter, seed, layouts, points, out.as_deref())
        }
        Action::Report => report(),
    }
}

fn interval_json(iv: &AngularInterval) -> serde_json::Value {
    json!([iv.start, iv.end])
}

fn excluded_json(excluded: &[RobotId]) -> Vec<String> {
    excluded.iter().copied().map(format_robot_id).collect()
}

fn eval(
    scene_path: Option<&Path>,
    excluded: &[RobotId],
    cfg: EvalCfg,
    x: f64,
    y: f64,
) -> Result<()> {
    let scene = scene::load(scene_path)?;
    let ev = ShotEvaluator::with_cfg(&scene.field, &scene.snapshot, cfg)?;
    let rep = ev.evaluate_detailed(Vector2::new(x, y), excluded)?;
    tracing::info!(x, y, probability = rep.probability, "eval");
    let obj = json!({
        "x": x,
        "y": y,
        "excluded": excluded_json(excluded),
        "probability": rep.probability,
        "goal_span": rep.goal_span.as_ref().map(interval_json),
        "blocked_width": rep.blocked_width,
        "occlusion_ratio": rep.occlusion_ratio(),
        "blocked": rep.blocked.iter().map(interval_json).collect::<Vec<_>>(),
        "open_windows": rep.open_windows.iter().map(interval_json).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Number of lattice coordinates covering `[0, extent]` at spacing `step`.
fn lattice_len(extent: f64, step: f64) -> Result<usize> {
    let cells = (extent / step).floor();
    if !(0.0..MAX_GRID_POINTS as f64).contains(&cells) {
        bail!("step {step} is too fine for an extent of {extent}");
    }
    Ok(cells as usize + 1)
}

/// Lattice over `x ∈ [-W/2, W/2]`, `y ∈ [y_min_frac·L, L]` with spacing `step`,
/// at most `MAX_GRID_POINTS` points.
fn grid_points(field: &Field, step: f64, y_min_frac: f64) -> Result<Vec<Point>> {
    if !step.is_finite() || step <= 0.0 {
        bail!("step must be finite and > 0, got {step}");
    }
    if !y_min_frac.is_finite() {
        bail!("y_min_frac must be finite, got {y_min_frac}");
    }
    let y0 = y_min_frac.clamp(0.0, 1.0) * field.length;
    let nx = lattice_len(field.width, step)?;
    let ny = lattice_len(field.length - y0, step)?;
    let total = nx
        .checked_mul(ny)
        .filter(|&n| n <= MAX_GRID_POINTS)
        .with_context(|| {
            format!("step {step} gives {nx}x{ny} points, above {MAX_GRID_POINTS}")
        })?;
    let mut pts = Vec::with_capacity(total);
    for j in 0..ny {
        let y = y0 + j as f64 * step;
        for i in 0..nx {
            pts.push(Vector2::new(-0.5 * field.width + i as f64 * step, y));
        }
    }
    Ok(pts)
}

fn grid(
    scene_path: Option<&Path>,
    excluded: &[RobotId],
    cfg: EvalCfg,
    step: f64,
    y_min_frac: f64,
    out: &Path,
) -> Result<()> {
    let scene = scene::load(scene_path)?;
    let ev = ShotEvaluator::with_cfg(&scene.field, &scene.snapshot, cfg)?;
    let pts = grid_points(&scene.field, step, y_min_frac)?;
    let probs = ev.evaluate_many(&pts, excluded)?;
    table::write_probabilities(out, &pts, &probs)?;
    tracing::info!(points = pts.len(), out = %out.display(), "grid");

    let run = RunParams::Grid {
        step,
        y_min_frac,
        points: pts.len(),
    };
    Provenance::new(scene_path, &scene, excluded, cfg, run).write_beside(out)?;
    Ok(())
}

fn batch(
    scene_path: Option<&Path>,
    excluded: &[RobotId],
    cfg: EvalCfg,
    input: &Path,
    out: &Path,
) -> Result<()> {
    let scene = scene::load(scene_path)?;
    let ev = ShotEvaluator::with_cfg(&scene.field, &scene.snapshot, cfg)?;
    let pts = table::read_points(input)?;
    let probs = ev.evaluate_many(&pts, excluded)?;
    table::write_probabilities(out, &pts, &probs)?;
    tracing::info!(rows = pts.len(), input = %input.display(), out = %out.display(), "batch");

    let run = RunParams::Batch {
        input: input.display().to_string(),
        rows: pts.len(),
    };
    Provenance::new(scene_path, &scene, excluded, cfg, run).write_beside(out)?;
    Ok(())
}

#[derive(Debug, Default)]
struct SweepStats {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
    zero: usize,
    one: usize,
}

impl SweepStats {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            ..Self::default()
        }
    }

    fn push(&mut self, p: f64) {
        self.count += 1;
        self.sum += p;
        self.min = self.min.min(p);
        self.max = self.max.max(p);
        if p == 0.0 {
            self.zero += 1;
        }
        if p == 1.0 {
            self.one += 1;
        }
    }

    fn to_json(&self) -> serde_json::Value {
        let n = self.count.max(1) as f64;
        json!({
            "evaluations": self.count,
            "mean": self.sum / n,
            "min": if self.count > 0 { self.min } else { 0.0 },
            "max": if self.count > 0 { self.max } else { 0.0 },
            "fully_blocked_share": self.zero as f64 / n,
            "fully_open_share": self.one as f64 / n,
        })
    }
}

/// Run `layouts` random frames on the scene's field and robot radius.
fn sweep_stats(
    scene: &Scene,
    cfg: EvalCfg,
    scatter: ScatterCfg,
    seed: u64,
    layouts: u64,
    points: usize,
) -> Result<SweepStats> {
    let scatter = ScatterCfg {
        robot_radius: scene.snapshot.robot_radius,
        ..scatter
    };
    scatter.validate()?;
    let field = &scene.field;
    let mut stats = SweepStats::new();
    for index in 0..layouts {
        let snap = draw_snapshot(field, scatter, ReplayToken::new(seed, index))?;
        let ev = ShotEvaluator::with_cfg(field, &snap, cfg)?;
        let tok = ReplayToken::new(!seed, index);
        let pts = draw_shot_points(field, points, scatter.y_min_frac, tok)?;
        for p in ev.evaluate_many(&pts, &[])? {
            stats.push(p);
        }
    }
    Ok(stats)
}

fn sweep(
    scene_path: Option<&Path>,
    cfg: EvalCfg,
    scatter: ScatterCfg,
    seed: u64,
    layouts: u64,
    points: usize,
    out: Option<&Path>,
) -> Result<()> {
    let scene = scene::load(scene_path)?;
    let summary = sweep_stats(&scene, cfg, scatter, seed, layouts, points)?.to_json();
    tracing::info!(seed, layouts, points, mean = ?summary["mean"], "sweep");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(out, serde_json::to_vec_pretty(&summary)?)?;
        let run = RunParams::Sweep {
            seed,
            layouts,
            points,
            opponents: scatter.opponents,
            hidden_prob: scatter.hidden_prob,
        };
        Provenance::new(scene_path, &scene, &[], cfg, run).write_beside(out)?;
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::code_rev(),
        "engine": shoteval::VERSION,
        "defaults": {
            "field": FieldFile::from(Field::default()),
            "robot_radius": shoteval::ROBOT_RADIUS,
            "eval": provenance::EvalRecord::from(EvalCfg::default()),
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
