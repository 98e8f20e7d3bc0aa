//! Directional and metric constraints on Line edges and their propagation
//! around the boundary.

use crate::algorithms::continuity;
use crate::error::{EditError, EditResult};
use crate::geometry::math::unit;
use crate::geometry::tolerance::{DIAGONAL_UNIT_STEP, EPS_DIR};
use crate::model::{Constraint, EdgeId, EdgeKind, Vec2, VertexId};
use crate::Polygon;
use std::f64::consts::FRAC_1_SQRT_2;

/// Reposition `v2` so the segment from the fixed `v1` satisfies `c`.
/// The flag tells the caller whether propagation continues past this edge.
pub fn enforce(v1: Vec2, v2: Vec2, c: Constraint) -> (Vec2, bool) {
    match c {
        Constraint::None => (v2, false),
        Constraint::Vertical => (Vec2::new(v1.x, v2.y), true),
        Constraint::Diagonal45 => (snap_diagonal(v1, v2), true),
        Constraint::FixedLength(l) => (fix_length(v1, v2, l), true),
    }
}

/// Nearest 45° diagonal in the quadrant of `v2 - v1`, keeping the distance.
pub fn snap_diagonal(v1: Vec2, v2: Vec2) -> Vec2 {
    let d = v2 - v1;
    let sx = if d.x < 0.0 { -1.0 } else { 1.0 };
    let sy = if d.y < 0.0 { -1.0 } else { 1.0 };
    let mut dist = d.length();
    if dist < EPS_DIR {
        dist = DIAGONAL_UNIT_STEP;
    }
    let k = dist * FRAC_1_SQRT_2;
    Vec2::new(v1.x + sx * k, v1.y + sy * k)
}

pub fn fix_length(v1: Vec2, v2: Vec2, l: f64) -> Vec2 {
    match unit(v2 - v1) {
        (Some(u), _) => v1 + u * l,
        (None, _) => Vec2::new(v1.x + l, v1.y),
    }
}

/// Enforce the constraint of the edge at cycle position `idx` with `fixed`
/// held still. Returns false when the edge has no constraint.
fn enforce_at(p: &mut Polygon, idx: usize, fixed: VertexId, moving: VertexId) -> bool {
    let c = match p.edge(p.cycle[idx]) {
        Some(e) => e.constraint(),
        None => return false,
    };
    let (Some(a), Some(b)) = (p.vertex_position(fixed), p.vertex_position(moving)) else {
        return false;
    };
    let (nb, go_on) = enforce(a, b, c);
    if go_on && nb != b {
        log::trace!("vertex {} pulled to ({}, {}) by {:?}", moving, nb.x, nb.y, c);
        p.set_position(moving, nb);
    }
    go_on
}

/// Walk the boundary away from `origin` in both directions, enforcing each
/// constrained edge until an unconstrained one is met or the walk would
/// return to `origin`.
pub fn propagate_from(p: &mut Polygon, origin: VertexId) {
    let Some(start) = p.ring_index(origin) else {
        return;
    };
    let n = p.ring.len();

    // rightward: edge i joins ring[i] (fixed) and ring[i+1] (moving)
    for k in 0..n {
        let i = (start + k) % n;
        let (fixed, moving) = (p.ring[i], p.ring[(i + 1) % n]);
        if moving == origin || !enforce_at(p, i, fixed, moving) {
            break;
        }
    }

    // leftward: edge i-1 joins ring[i-1] (moving) and ring[i] (fixed)
    for k in 0..n {
        let i = (start + n - k) % n;
        let e = (i + n - 1) % n;
        let (fixed, moving) = (p.ring[i], p.ring[e]);
        if moving == origin || !enforce_at(p, e, fixed, moving) {
            break;
        }
    }
}

/// Set a vertex position as the result of a move, then settle constraints
/// and continuity around the boundary.
pub fn on_vertex_moved(p: &mut Polygon, v: VertexId, pos: Vec2) {
    if !p.set_position(v, pos) {
        return;
    }
    propagate_from(p, v);
    continuity::enforce_all(p);
}

/// Assign a constraint to a Line edge and enforce it right away.
pub fn apply_constraint(p: &mut Polygon, edge: EdgeId, c: Constraint) -> EditResult<()> {
    let e = *p.edge(edge).ok_or(EditError::UnknownEdge(edge))?;
    if !matches!(e.kind, EdgeKind::Line { .. }) {
        return Err(EditError::NotLine(edge));
    }
    match c {
        Constraint::FixedLength(l) if !l.is_finite() || l < 0.0 => {
            return Err(EditError::InvalidLength(l));
        }
        Constraint::Vertical => {
            if let Some((prev, next)) = p.neighbor_edges(edge) {
                let vertical = |id| p.edge_constraint(id) == Some(Constraint::Vertical);
                if vertical(prev) || vertical(next) {
                    log::debug!("edge {}: vertical rejected, neighbour already vertical", edge);
                    return Err(EditError::AdjacentVertical);
                }
            }
        }
        _ => {}
    }

    if let Some(Some(slot)) = p.edges.get_mut(edge as usize) {
        slot.kind = EdgeKind::Line { constraint: c };
    }
    log::debug!("edge {} constraint set to {:?}", edge, c);
    if c.is_none() {
        return Ok(());
    }
    let (Some(a), Some(b)) = (p.vertex_position(e.v1), p.vertex_position(e.v2)) else {
        return Ok(());
    };
    let (nb, _) = enforce(a, b, c);
    // settle the whole constrained run from v2, not only this edge
    on_vertex_moved(p, e.v2, nb);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertical_copies_x() {
        let (v, go_on) = enforce(Vec2::new(3.0, 1.0), Vec2::new(7.5, -4.0), Constraint::Vertical);
        assert!(go_on);
        assert_eq!(v, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn none_stops_propagation() {
        let b = Vec2::new(2.0, 2.0);
        assert_eq!(enforce(Vec2::ZERO, b, Constraint::None), (b, false));
    }

    #[test]
    fn diagonal_keeps_length_and_quadrant() {
        let v2 = snap_diagonal(Vec2::ZERO, Vec2::new(-3.0, 4.0));
        assert_relative_eq!(v2.length(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(v2.x.abs(), v2.y.abs(), epsilon = 1e-12);
        assert!(v2.x < 0.0 && v2.y > 0.0);
    }

    #[test]
    fn diagonal_from_coincident_points_uses_unit_step() {
        let a = Vec2::new(5.0, 5.0);
        let v2 = snap_diagonal(a, a);
        assert_relative_eq!(v2.distance(a), DIAGONAL_UNIT_STEP, epsilon = 1e-12);
        assert!(v2.x > a.x && v2.y > a.y);
    }

    #[test]
    fn fixed_length_scales_or_places_on_x_axis() {
        let v2 = fix_length(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0), 10.0);
        assert_relative_eq!(v2.x, 7.0, epsilon = 1e-12);
        assert_relative_eq!(v2.y, 9.0, epsilon = 1e-12);
        let a = Vec2::new(2.0, 3.0);
        assert_eq!(fix_length(a, a, 4.0), Vec2::new(6.0, 3.0));
    }

    #[test]
    fn constraint_on_bezier_is_rejected() {
        let mut p = Polygon::default();
        let e0 = p.edge_ids()[0];
        let before = p.snapshot();
        assert_eq!(
            apply_constraint(&mut p, e0, Constraint::Vertical),
            Err(EditError::NotLine(e0))
        );
        assert_eq!(p.snapshot().vertices[0].pos, before.vertices[0].pos);
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut p = Polygon::default();
        let e1 = p.edge_ids()[1];
        let err = apply_constraint(&mut p, e1, Constraint::FixedLength(-1.0)).unwrap_err();
        assert_eq!(err.code(), "invalid_length");
        assert_eq!(p.edge_constraint(e1), Some(Constraint::None));
    }
}
