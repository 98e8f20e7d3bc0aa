use curvepoly::algorithms::continuity::continuity_allowed;
use curvepoly::{
    Constraint, Continuity, EdgeKind, EdgeType, EditorConfig, HandleEnd, Polygon, Vec2,
};
use log::LevelFilter;
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

#[derive(Clone, Debug)]
enum Op {
    MoveVertex { idx: u16, dx: i8, dy: i8 },
    MoveHandle { idx: u16, end: bool, dx: i8, dy: i8 },
    SetConstraint { idx: u16, kind: u8, len: u8 },
    SetContinuity { idx: u16, kind: u8 },
    Convert { idx: u16, kind: u8 },
    Insert { idx: u16 },
    Delete { idx: u16 },
    Translate { dx: i8, dy: i8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u16>(), any::<i8>(), any::<i8>())
            .prop_map(|(idx, dx, dy)| Op::MoveVertex { idx, dx, dy }),
        (any::<u16>(), any::<bool>(), any::<i8>(), any::<i8>())
            .prop_map(|(idx, end, dx, dy)| Op::MoveHandle { idx, end, dx, dy }),
        (any::<u16>(), 0u8..=3, any::<u8>())
            .prop_map(|(idx, kind, len)| Op::SetConstraint { idx, kind, len }),
        (any::<u16>(), 0u8..=2).prop_map(|(idx, kind)| Op::SetContinuity { idx, kind }),
        (any::<u16>(), 0u8..=2).prop_map(|(idx, kind)| Op::Convert { idx, kind }),
        any::<u16>().prop_map(|idx| Op::Insert { idx }),
        any::<u16>().prop_map(|idx| Op::Delete { idx }),
        (any::<i8>(), any::<i8>()).prop_map(|(dx, dy)| Op::Translate { dx, dy }),
    ]
}

fn pick<T: Copy>(items: &[T], idx: u16) -> T {
    items[idx as usize % items.len()]
}

fn apply_op(p: &mut Polygon, op: Op) {
    match op {
        Op::MoveVertex { idx, dx, dy } => {
            let v = pick(p.vertex_ids(), idx);
            let at = p.vertex_position(v).unwrap();
            let _ = p.move_vertex(v, at + Vec2::new(dx as f64 * 0.5, dy as f64 * 0.5));
        }
        Op::MoveHandle { idx, end, dx, dy } => {
            let e = pick(p.edge_ids(), idx);
            let end = if end { HandleEnd::End } else { HandleEnd::Start };
            let _ = p.move_control_point(e, end, Vec2::new(dx as f64, dy as f64));
        }
        Op::SetConstraint { idx, kind, len } => {
            let e = pick(p.edge_ids(), idx);
            let c = match kind {
                0 => Constraint::None,
                1 => Constraint::Vertical,
                2 => Constraint::Diagonal45,
                _ => Constraint::FixedLength(len as f64),
            };
            let _ = p.set_edge_constraint(e, c);
        }
        Op::SetContinuity { idx, kind } => {
            let v = pick(p.vertex_ids(), idx);
            let _ = p.set_vertex_continuity(v, Continuity::from_u8(kind).unwrap());
        }
        Op::Convert { idx, kind } => {
            let e = pick(p.edge_ids(), idx);
            let _ = p.convert_edge(e, EdgeType::from_u8(kind).unwrap());
        }
        Op::Insert { idx } => {
            let e = pick(p.edge_ids(), idx);
            let _ = p.insert_vertex_on_edge(e);
        }
        Op::Delete { idx } => {
            let v = pick(p.vertex_ids(), idx);
            let _ = p.delete_vertex(v);
        }
        Op::Translate { dx, dy } => {
            let _ = p.translate(Vec2::new(dx as f64, dy as f64));
        }
    }
}

fn check_invariants(p: &Polygon) -> Result<(), TestCaseError> {
    let vs = p.vertex_ids();
    let es = p.edge_ids();
    let n = vs.len();
    prop_assert!(n >= 3);
    prop_assert_eq!(es.len(), n);
    for i in 0..n {
        let (a, b) = (vs[i], vs[(i + 1) % n]);
        let e = p.edge(es[i]).expect("edge in cycle");
        prop_assert!(e.touches(a) && e.touches(b));
        prop_assert_eq!(p.edge_between(a, b), Some(es[i]));
        prop_assert!(p.vertex_position(a).unwrap().is_finite());
        if let EdgeKind::Bezier { c1, c2 } = e.kind {
            prop_assert!(c1.is_finite() && c2.is_finite());
        }
        if !matches!(e.kind, EdgeKind::Line { .. }) {
            prop_assert!(e.constraint().is_none());
        }
    }
    for &v in vs {
        let c = p.vertex_continuity(v).unwrap();
        prop_assert!(continuity_allowed(p, v, c), "vertex {} holds {:?}", v, c);
    }
    prop_assert!(serde_json::to_string(&p.snapshot()).is_ok());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn random_edits_keep_polygon_consistent(ops in proptest::collection::vec(op_strategy(), 1..48)) {
        init_logging();
        let mut p = Polygon::from_points(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(40.0, 0.0),
                Vec2::new(60.0, 30.0),
                Vec2::new(30.0, 60.0),
                Vec2::new(-10.0, 40.0),
            ],
            EditorConfig::default(),
        )
        .unwrap();
        for op in ops {
            let ver = p.geom_version();
            apply_op(&mut p, op);
            prop_assert!(p.geom_version() >= ver);
            check_invariants(&p)?;
        }
    }
}
