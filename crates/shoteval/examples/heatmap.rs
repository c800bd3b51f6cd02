//! ASCII heat map of shot probability over the attacking half.
//!
//! Purpose
//! - Eyeball the shadows cast by a fixed defensive layout: a keeper on the
//!   goal line and two defenders in front of the box.
//!
//! Legend: ' ' < 0.1 <= '.' < 0.3 <= ':' < 0.5 <= '+' < 0.7 <= '*' < 0.9 <= '#'

use nalgebra::Vector2;
use shoteval::{Field, RobotId, RobotState, ShotEvaluator, Snapshot};

fn main() {
    let field = Field::default();
    let snap = Snapshot::default()
        .with_robot(RobotState::new(RobotId::opponent(0), Vector2::new(0.0, 8.85)))
        .with_robot(RobotState::new(RobotId::opponent(1), Vector2::new(-0.6, 7.4)))
        .with_robot(RobotState::new(RobotId::opponent(2), Vector2::new(0.7, 7.2)))
        .with_robot(RobotState::new(RobotId::friendly(1), Vector2::new(0.0, 6.5)));
    let ev = ShotEvaluator::new(&field, &snap).expect("valid layout");

    let (cols, rows) = (61usize, 23usize);
    let mut points = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        let y = field.length - (j as f64 + 0.5) * (0.5 * field.length) / rows as f64;
        for i in 0..cols {
            let x = -0.5 * field.width + (i as f64 + 0.5) * field.width / cols as f64;
            points.push(Vector2::new(x, y));
        }
    }
    let probs = ev.evaluate_many(&points, &[]).expect("finite points");

    for row in probs.chunks(cols) {
        let line: String = row.iter().map(|&p| glyph(p)).collect();
        println!("|{line}|");
    }
    let mean = probs.iter().sum::<f64>() / probs.len() as f64;
    println!("mean={mean:.4} points={}", probs.len());
}

fn glyph(p: f64) -> char {
    match p {
        p if p < 0.1 => ' ',
        p if p < 0.3 => '.',
        p if p < 0.5 => ':',
        p if p < 0.7 => '+',
        p if p < 0.9 => '*',
        _ => '#',
    }
}
