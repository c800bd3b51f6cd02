//! CSV tables of shot points and probabilities (polars).

use anyhow::{anyhow, Context, Result};
use nalgebra::Vector2;
use polars::prelude::*;
use shoteval::Point;
use std::fs::File;
use std::path::Path;

/// Read `x`,`y` columns (any numeric type) as shot points. Other columns are ignored.
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y from {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Vector2::new(x, y)),
            _ => Err(anyhow!("row {row}: missing x or y")),
        })
        .collect()
}

/// Write `x,y,probability` rows; creates parent directories.
pub fn write_probabilities(path: &Path, points: &[Point], probs: &[f64]) -> Result<()> {
    if points.len() != probs.len() {
        return Err(anyhow!(
            "{} points but {} probabilities",
            points.len(),
            probs.len()
        ));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mut df = df!(
        "x" => xs,
        "y" => ys,
        "probability" => probs.to_vec()
    )?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}
