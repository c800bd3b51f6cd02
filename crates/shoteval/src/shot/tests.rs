use super::*;
use crate::field::Field;
use crate::scatter::{draw_snapshot, ReplayToken, ScatterCfg};
use crate::types::{EvalCfg, Point, RobotId, RobotState, Snapshot};
use crate::EvalError;
use nalgebra::Vector2;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

struct Scene {
    field: Field,
    snapshot: Snapshot,
}

impl Scene {
    fn new() -> Self {
        Self {
            field: Field::default(),
            snapshot: Snapshot::default(),
        }
    }
    fn length(&self) -> f64 {
        self.field.length
    }
    fn width(&self) -> f64 {
        self.field.width
    }
    fn radius(&self) -> f64 {
        self.snapshot.robot_radius
    }
    fn place(&mut self, id: RobotId, x: f64, y: f64) {
        match self.snapshot.robots.iter_mut().find(|r| r.id == id) {
            Some(r) => r.pos = Vector2::new(x, y),
            None => self
                .snapshot
                .robots
                .push(RobotState::new(id, Vector2::new(x, y))),
        }
    }
    fn eval(&self, x: f64, y: f64, excluded: &[RobotId]) -> f64 {
        ShotEvaluator::new(&self.field, &self.snapshot)
            .unwrap()
            .evaluate_shot(Vector2::new(x, y), excluded)
            .unwrap()
    }
}

#[test]
fn clear_field() {
    let s = Scene::new();
    let (l, w, r) = (s.length(), s.width(), s.radius());
    assert_eq!(s.eval(0.0, l, &[]), 1.0);
    assert_eq!(s.eval(0.0, 3.0 * l / 4.0, &[]), 1.0);
    assert_eq!(s.eval(0.0, l / 2.0 + r, &[]), 1.0);
    assert!(s.eval(w / 4.0, 3.0 * l / 4.0, &[]) > 0.99);
    assert!(s.eval(w / -4.0, 3.0 * l / 4.0, &[]) > 0.99);
    assert!(s.eval(w / 4.0, l / 2.0 + r, &[]) > 0.95);
    assert!(s.eval(w / -4.0, l / 2.0 + r, &[]) > 0.95);
}

#[test]
fn clear_field_center_line_is_fully_open() {
    let s = Scene::new();
    for k in 0..=40 {
        let y = s.length() * k as f64 / 40.0;
        assert_eq!(s.eval(0.0, y, &[]), 1.0, "y = {y}");
    }
}

#[test]
fn blocking_opponent_and_exclusion() {
    let mut s = Scene::new();
    let (l, r) = (s.length(), s.radius());
    let shooting_pos = 3.0 * l / 4.0;
    let theirs = RobotId::opponent(1);
    let ours = RobotId::friendly(1);

    s.place(theirs, 0.0, shooting_pos + r);
    assert!(s.eval(0.0, shooting_pos, &[]) < 0.05);
    assert_eq!(s.eval(0.0, shooting_pos, &[theirs]), 1.0);

    // friendlies never block
    s.place(ours, 0.0, shooting_pos + r);
    assert_eq!(s.eval(0.0, shooting_pos, &[theirs]), 1.0);

    s.place(theirs, 0.0, shooting_pos + l / 8.0);
    assert!(s.eval(0.0, shooting_pos, &[]) < 1.0);
    assert_eq!(s.eval(0.0, shooting_pos, &[theirs]), 1.0);
}

#[test]
fn friendly_on_shot_line_does_not_block_but_opponent_does() {
    let mut s = Scene::new();
    let y = 6.0;
    s.place(RobotId::friendly(2), 0.0, y + 0.5);
    assert_eq!(s.eval(0.0, y, &[]), 1.0);

    let mut t = Scene::new();
    t.place(RobotId::opponent(2), 0.0, y + 0.5);
    assert!(t.eval(0.0, y, &[]) < 0.7);
}

#[test]
fn invisible_opponent_is_ignored() {
    let mut s = Scene::new();
    s.place(RobotId::opponent(4), 0.0, 7.0);
    let blocked = s.eval(0.0, 6.0, &[]);
    s.snapshot.robots[0].visible = false;
    assert!(blocked < 1.0);
    assert_eq!(s.eval(0.0, 6.0, &[]), 1.0);
}

#[test]
fn behind_goal_line_or_beside_posts_is_zero() {
    let s = Scene::new();
    let l = s.length();
    assert_eq!(s.eval(0.0, l + 0.1, &[]), 0.0);
    assert_eq!(s.eval(0.0, 2.0 * l, &[]), 0.0);
    assert_eq!(s.eval(2.0, l, &[]), 0.0);
    let goal = s.field.their_goal();
    assert_eq!(s.eval(goal.left.x, goal.left.y, &[]), 0.0);
}

#[test]
fn shooter_inside_opponent_footprint_is_zero() {
    let mut s = Scene::new();
    s.place(RobotId::opponent(0), 0.02, 6.0);
    assert_eq!(s.eval(0.0, 6.0, &[]), 0.0);
}

#[test]
fn two_opponents_covering_both_halves_block_fully() {
    let mut s = Scene::new();
    // two robots right in front of the shooter, left and right of the axis
    s.place(RobotId::opponent(0), -0.05, 6.3);
    s.place(RobotId::opponent(1), 0.05, 6.3);
    assert_eq!(s.eval(0.0, 6.0, &[]), 0.0);
    // one of them excluded leaves a partial chance
    let p = s.eval(0.0, 6.0, &[RobotId::opponent(0)]);
    assert!(p > 0.0 && p < 1.0);
}

#[test]
fn overlapping_shadows_are_not_double_counted() {
    let mut s = Scene::new();
    s.place(RobotId::opponent(0), 0.3, 7.5);
    let single = s.eval(0.0, 6.0, &[]);
    // a second robot hidden inside the first one's shadow
    s.place(RobotId::opponent(1), 0.3 * 2.5 / 1.5, 8.5);
    let ev = ShotEvaluator::new(&s.field, &s.snapshot).unwrap();
    let report = ev.evaluate_detailed(Vector2::new(0.0, 6.0), &[]).unwrap();
    assert_eq!(report.blocked.len(), 1);
    assert!(report.probability <= single);
    assert!(report.probability > 0.0);
}

#[test]
fn detailed_report_is_consistent() {
    let mut s = Scene::new();
    s.place(RobotId::opponent(0), -0.2, 7.5);
    s.place(RobotId::opponent(1), 0.25, 8.0);
    let ev = ShotEvaluator::new(&s.field, &s.snapshot).unwrap();
    let rep = ev.evaluate_detailed(Vector2::new(0.0, 6.0), &[]).unwrap();
    let span = rep.goal_span.unwrap();
    let open: f64 = rep.open_windows.iter().map(AngularInterval::width).sum();
    assert!((open + rep.blocked_width - span.width()).abs() < 1e-12);
    assert!((rep.probability - (1.0 - rep.occlusion_ratio())).abs() < 1e-12);
    for w in &rep.open_windows {
        assert!(span.start <= w.start && w.end <= span.end);
    }

    let behind = ev.evaluate_detailed(Vector2::new(0.0, 10.0), &[]).unwrap();
    assert!(behind.goal_span.is_none());
    assert_eq!(behind.probability, 0.0);
    assert_eq!(behind.occlusion_ratio(), 1.0);
}

#[test]
fn off_center_blocking_is_mirror_symmetric() {
    let mut left = Scene::new();
    left.place(RobotId::opponent(0), -0.2, 8.0);
    let mut right = Scene::new();
    right.place(RobotId::opponent(0), 0.2, 8.0);
    let a = left.eval(0.0, 6.0, &[]);
    let b = right.eval(0.0, 6.0, &[]);
    assert!(a > 0.0 && a < 1.0);
    assert!((a - b).abs() < 1e-12);
}

#[test]
fn exponent_sharpens_partial_blockage() {
    let mut s = Scene::new();
    s.place(RobotId::opponent(0), 0.2, 8.0);
    let plain = s.eval(0.0, 6.0, &[]);
    let cfg = EvalCfg {
        open_exponent: 2.0,
        ..EvalCfg::default()
    };
    let sharp = ShotEvaluator::with_cfg(&s.field, &s.snapshot, cfg)
        .unwrap()
        .evaluate_shot(Vector2::new(0.0, 6.0), &[])
        .unwrap();
    assert!((sharp - plain * plain).abs() < 1e-12);
}

#[test]
fn malformed_inputs_fail_fast() {
    let field = Field::default();
    let bad_radius = Snapshot::new(-1.0, vec![]);
    assert!(matches!(
        ShotEvaluator::new(&field, &bad_radius),
        Err(EvalError::InvalidSnapshot { .. })
    ));

    let nan_robot = Snapshot::default().with_robot(RobotState::new(
        RobotId::opponent(0),
        Vector2::new(0.0, f64::INFINITY),
    ));
    assert!(evaluate_shot(&field, &nan_robot, Vector2::new(0.0, 6.0), &[]).is_err());

    let snap = Snapshot::default();
    let ev = ShotEvaluator::new(&field, &snap).unwrap();
    assert!(matches!(
        ev.evaluate_shot(Vector2::new(f64::NAN, 1.0), &[]),
        Err(EvalError::InvalidPoint { .. })
    ));

    let bad_field = Field {
        width: -6.0,
        ..Field::default()
    };
    assert!(ShotEvaluator::new(&bad_field, &snap).is_err());
}

#[test]
fn batch_matches_single_evaluations() {
    let field = Field::default();
    let snap = draw_snapshot(&field, ScatterCfg::default(), ReplayToken::new(11, 0)).unwrap();
    let ev = ShotEvaluator::new(&field, &snap).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let pts: Vec<Point> = (0..200)
        .map(|_| Vector2::new(rng.gen_range(-3.0..3.0), rng.gen_range(0.0..9.5)))
        .collect();
    let excluded = [RobotId::opponent(0)];
    let batch = ev.evaluate_many(&pts, &excluded).unwrap();
    for (p, b) in pts.iter().zip(&batch) {
        assert_eq!(*b, ev.evaluate_shot(*p, &excluded).unwrap());
    }

    let mut with_nan = pts.clone();
    with_nan.push(Vector2::new(f64::NAN, 0.0));
    assert!(ev.evaluate_many(&with_nan, &[]).is_err());
}

#[test]
fn batch_honours_non_default_field() {
    let big = Field {
        length: 12.0,
        width: 9.0,
        goal_width: 1.8,
    };
    let empty = Snapshot::default();
    // behind the default goal line, in front of the big field's
    let p = Vector2::new(0.0, 10.0);
    let on_big = ShotEvaluator::new(&big, &empty).unwrap();
    let default_field = Field::default();
    let on_default = ShotEvaluator::new(&default_field, &empty).unwrap();
    assert_eq!(on_big.evaluate_many(&[p], &[]).unwrap(), vec![1.0]);
    assert_eq!(on_default.evaluate_many(&[p], &[]).unwrap(), vec![0.0]);

    let cfg = ScatterCfg {
        opponents: 8,
        ..ScatterCfg::default()
    };
    let snap = draw_snapshot(&big, cfg, ReplayToken::new(12, 0)).unwrap();
    let ev = ShotEvaluator::new(&big, &snap).unwrap();
    let pts = crate::scatter::draw_shot_points(&big, 100, 0.5, ReplayToken::new(13, 0)).unwrap();
    let batch = ev.evaluate_many(&pts, &[]).unwrap();
    for (p, b) in pts.iter().zip(&batch) {
        assert_eq!(*b, evaluate_shot(&big, &snap, *p, &[]).unwrap());
    }
}

fn mirrored(s: &Snapshot) -> Snapshot {
    let mut m = s.clone();
    for r in &mut m.robots {
        r.pos.x = -r.pos.x;
    }
    m
}

proptest! {
    #[test]
    fn probability_stays_in_unit_interval(
        x in -5.0f64..5.0,
        y in -1.0f64..11.0,
        seed in any::<u64>(),
    ) {
        let field = Field::default();
        let cfg = ScatterCfg { hidden_prob: 0.2, ..ScatterCfg::default() };
        let snap = draw_snapshot(&field, cfg, ReplayToken::new(seed, 0)).unwrap();
        let p = evaluate_shot(&field, &snap, Vector2::new(x, y), &[]).unwrap();
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn adding_an_opponent_never_helps(
        x in -3.0f64..3.0,
        y in 4.5f64..9.0,
        ox in -3.0f64..3.0,
        oy in 4.5f64..9.0,
        seed in any::<u64>(),
    ) {
        let field = Field::default();
        let cfg = ScatterCfg { opponents: 3, friendlies: 3, ..ScatterCfg::default() };
        let base = draw_snapshot(&field, cfg, ReplayToken::new(seed, 1)).unwrap();
        let extra = base
            .clone()
            .with_robot(RobotState::new(RobotId::opponent(200), Vector2::new(ox, oy)));
        let p = Vector2::new(x, y);
        let before = evaluate_shot(&field, &base, p, &[]).unwrap();
        let after = evaluate_shot(&field, &extra, p, &[]).unwrap();
        prop_assert!(after <= before + 1e-12);
    }

    #[test]
    fn exclusion_equals_removal(
        x in -3.0f64..3.0,
        y in 4.5f64..9.0,
        pick in 0u8..6,
        seed in any::<u64>(),
    ) {
        let field = Field::default();
        let snap = draw_snapshot(&field, ScatterCfg::default(), ReplayToken::new(seed, 2)).unwrap();
        let id = RobotId::opponent(pick);
        let p = Vector2::new(x, y);
        let excluded = evaluate_shot(&field, &snap, p, &[id]).unwrap();
        let removed = evaluate_shot(&field, &snap.without(id), p, &[]).unwrap();
        prop_assert_eq!(excluded, removed);
    }

    #[test]
    fn reflection_about_center_line(
        x in -3.0f64..3.0,
        y in 4.5f64..9.0,
        seed in any::<u64>(),
    ) {
        let field = Field::default();
        let snap = draw_snapshot(&field, ScatterCfg::default(), ReplayToken::new(seed, 3)).unwrap();
        let a = evaluate_shot(&field, &snap, Vector2::new(x, y), &[]).unwrap();
        let b = evaluate_shot(&field, &mirrored(&snap), Vector2::new(-x, y), &[]).unwrap();
        prop_assert!((a - b).abs() < 1e-9);
    }
}
