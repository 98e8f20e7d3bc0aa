//! Smoothness at vertices: keeps Bezier handles, line endpoints and arc
//! tangents in line with the continuity each vertex requests.
//!
//! Two entry points share the case logic. `enforce_from_vertex` runs after a
//! vertex moved and only ever edits handles. `enforce_from_control` runs after
//! the user dragged a handle; the dragged handle drives and the other side
//! follows, which for mixed Bezier/Line joins means moving the line's far
//! vertex and settling the boundary from there once.

use crate::algorithms::arc::{solve_arc, travel_tangent};
use crate::algorithms::constraints::on_vertex_moved;
use crate::error::{EditError, EditResult};
use crate::geometry::math::unit;
use crate::model::{Constraint, Continuity, Edge, EdgeId, EdgeKind, HandleSide, Vec2, VertexId};
use crate::Polygon;
use std::f64::consts::FRAC_1_SQRT_2;

/// A vertex together with its two adjacent edges.
struct Join {
    v: VertexId,
    at: Vec2,
    cont: Continuity,
    prev_id: EdgeId,
    prev: Edge,
    next_id: EdgeId,
    next: Edge,
}

fn join(p: &Polygon, v: VertexId) -> Option<Join> {
    let vx = p.vertex(v)?;
    let adj = p.adjacent_edges(v)?;
    Some(Join {
        v,
        at: vx.pos,
        cont: vx.continuity,
        prev_id: adj.prev,
        prev: *p.edge(adj.prev)?,
        next_id: adj.next,
        next: *p.edge(adj.next)?,
    })
}

/// Re-enforce every vertex that requests G1 or C1.
pub fn enforce_all(p: &mut Polygon) {
    let ring = p.ring.clone();
    for v in ring {
        if p.vertex_continuity(v).map_or(false, |c| c != Continuity::G0) {
            enforce_from_vertex(p, v);
        }
    }
}

/// Adjust the handles next to `v` so its continuity holds. Vertices never move.
pub fn enforce_from_vertex(p: &mut Polygon, v: VertexId) {
    let Some(j) = join(p, v) else {
        return;
    };
    if j.cont == Continuity::G0 {
        return;
    }
    match (j.prev.kind, j.next.kind) {
        (EdgeKind::Bezier { .. }, EdgeKind::Bezier { .. }) => match j.cont {
            Continuity::G1 => {
                let prev_live = j
                    .prev
                    .handle_at(v)
                    .and_then(|h| unit(j.at - h).0)
                    .is_some();
                let driver = if prev_live { HandleSide::Prev } else { HandleSide::Next };
                align_handles(p, &j, driver);
            }
            Continuity::C1 => mirror_handles(p, &j, HandleSide::Prev),
            Continuity::G0 => {}
        },
        (EdgeKind::Bezier { .. }, EdgeKind::Line { constraint }) => {
            let Some(far) = j.next.other_end(v).and_then(|f| p.vertex_position(f)) else {
                return;
            };
            let Some(dir) = unit(far - j.at).0 else {
                return;
            };
            let target = match j.cont {
                Continuity::G1 => {
                    let len = handle_len(&j, HandleSide::Prev);
                    j.at - project_direction(dir, constraint) * len
                }
                _ => far.reflect_through(j.at),
            };
            p.set_handle(j.prev_id, v, target);
        }
        (EdgeKind::Line { constraint }, EdgeKind::Bezier { .. }) => {
            let Some(far) = j.prev.other_end(v).and_then(|f| p.vertex_position(f)) else {
                return;
            };
            let Some(dir) = unit(j.at - far).0 else {
                return;
            };
            let target = match j.cont {
                Continuity::G1 => {
                    let len = handle_len(&j, HandleSide::Next);
                    j.at + project_direction(dir, constraint) * len
                }
                _ => far.reflect_through(j.at),
            };
            p.set_handle(j.next_id, v, target);
        }
        (EdgeKind::Bezier { .. }, EdgeKind::Arc) if j.cont == Continuity::G1 => {
            if let Some(t) = solve_arc(p, j.next_id).and_then(|a| travel_tangent(&a, j.at)) {
                let len = handle_len(&j, HandleSide::Prev);
                p.set_handle(j.prev_id, v, j.at - t * len);
            }
        }
        (EdgeKind::Arc, EdgeKind::Bezier { .. }) if j.cont == Continuity::G1 => {
            if let Some(t) = solve_arc(p, j.prev_id).and_then(|a| travel_tangent(&a, j.at)) {
                let len = handle_len(&j, HandleSide::Next);
                p.set_handle(j.next_id, v, j.at + t * len);
            }
        }
        // arcs follow the tangent resolver on every read; two lines carry no smoothness
        _ => {}
    }
    log::trace!("vertex {} {:?} enforced from vertex", v, j.cont);
}

/// Adjust the neighbourhood of `v` after the user dragged the handle on the
/// `moved` side.
pub fn enforce_from_control(p: &mut Polygon, v: VertexId, moved: HandleSide) {
    let Some(j) = join(p, v) else {
        return;
    };
    match (j.prev.kind, j.next.kind, j.cont) {
        (_, _, Continuity::G0) => {}
        (EdgeKind::Bezier { .. }, EdgeKind::Bezier { .. }, Continuity::G1) => {
            align_handles(p, &j, moved)
        }
        (EdgeKind::Bezier { .. }, EdgeKind::Bezier { .. }, Continuity::C1) => {
            mirror_handles(p, &j, moved)
        }
        (EdgeKind::Bezier { .. }, EdgeKind::Line { constraint }, cont)
            if moved == HandleSide::Prev =>
        {
            let (Some(h), Some(far)) = (j.prev.handle_at(v), j.next.other_end(v)) else {
                return;
            };
            let (Some(dir), h_len) = unit(j.at - h) else {
                return;
            };
            let Some(far_pos) = p.vertex_position(far) else {
                return;
            };
            // the line may only leave the vertex in a direction its constraint allows
            let dir = project_direction(dir, constraint);
            let h = j.at - dir * h_len;
            p.set_handle(j.prev_id, v, h);
            let target = match cont {
                Continuity::C1 => h.reflect_through(j.at),
                _ => j.at + dir * j.at.distance(far_pos),
            };
            log::trace!("vertex {} follows handle at vertex {}", far, v);
            on_vertex_moved(p, far, target);
        }
        (EdgeKind::Line { constraint }, EdgeKind::Bezier { .. }, cont)
            if moved == HandleSide::Next =>
        {
            let (Some(h), Some(far)) = (j.next.handle_at(v), j.prev.other_end(v)) else {
                return;
            };
            let (Some(dir), h_len) = unit(h - j.at) else {
                return;
            };
            let Some(far_pos) = p.vertex_position(far) else {
                return;
            };
            let dir = project_direction(dir, constraint);
            let h = j.at + dir * h_len;
            p.set_handle(j.next_id, v, h);
            let target = match cont {
                Continuity::C1 => h.reflect_through(j.at),
                _ => j.at - dir * j.at.distance(far_pos),
            };
            log::trace!("vertex {} follows handle at vertex {}", far, v);
            on_vertex_moved(p, far, target);
        }
        // a handle next to an arc steers the arc itself
        _ => {}
    }
}

fn handle_len(j: &Join, side: HandleSide) -> f64 {
    let edge = match side {
        HandleSide::Prev => &j.prev,
        HandleSide::Next => &j.next,
    };
    edge.handle_at(j.v).map_or(0.0, |h| h.distance(j.at))
}

/// G1 between two Bezier handles: the follower is turned to point away from
/// the driver, keeping its own length.
fn align_handles(p: &mut Polygon, j: &Join, driver: HandleSide) {
    let (Some(hp), Some(hn)) = (j.prev.handle_at(j.v), j.next.handle_at(j.v)) else {
        return;
    };
    match driver {
        HandleSide::Prev => {
            if let (Some(u), _) = unit(j.at - hp) {
                p.set_handle(j.next_id, j.v, j.at + u * hn.distance(j.at));
            }
        }
        HandleSide::Next => {
            if let (Some(u), _) = unit(hn - j.at) {
                p.set_handle(j.prev_id, j.v, j.at - u * hp.distance(j.at));
            }
        }
    }
}

/// C1 between two Bezier handles: the follower is the point reflection of
/// the driver through the vertex.
fn mirror_handles(p: &mut Polygon, j: &Join, driver: HandleSide) {
    let (Some(hp), Some(hn)) = (j.prev.handle_at(j.v), j.next.handle_at(j.v)) else {
        return;
    };
    match driver {
        HandleSide::Prev => p.set_handle(j.next_id, j.v, hp.reflect_through(j.at)),
        HandleSide::Next => p.set_handle(j.prev_id, j.v, hn.reflect_through(j.at)),
    };
}

/// Closest direction the line constraint allows.
pub fn project_direction(dir: Vec2, c: Constraint) -> Vec2 {
    let sign = |x: f64| if x < 0.0 { -1.0 } else { 1.0 };
    match c {
        Constraint::Vertical => Vec2::new(0.0, sign(dir.y)),
        Constraint::Diagonal45 => Vec2::new(sign(dir.x), sign(dir.y)) * FRAC_1_SQRT_2,
        Constraint::None | Constraint::FixedLength(_) => dir,
    }
}

/// Reason `requested` cannot be held at `v`, if any.
pub fn check_continuity(p: &Polygon, v: VertexId, requested: Continuity) -> EditResult<()> {
    let adj = p.adjacent_edges(v).ok_or(EditError::UnknownVertex(v))?;
    if requested == Continuity::G0 {
        return Ok(());
    }
    let prev = p.edge(adj.prev).ok_or(EditError::UnknownEdge(adj.prev))?;
    let next = p.edge(adj.next).ok_or(EditError::UnknownEdge(adj.next))?;
    let is_line = |e: &Edge| matches!(e.kind, EdgeKind::Line { .. });
    let is_arc = |e: &Edge| matches!(e.kind, EdgeKind::Arc);

    if is_line(prev) && is_line(next) {
        return Err(EditError::LineOnlyVertex);
    }
    if requested == Continuity::C1 && (is_arc(prev) || is_arc(next)) {
        return Err(EditError::C1WithArc);
    }
    if requested == Continuity::G1 {
        for e in [prev, next] {
            if !is_arc(e) {
                continue;
            }
            let other_g1 = e
                .other_end(v)
                .and_then(|o| p.vertex_continuity(o))
                .map_or(false, |c| c == Continuity::G1);
            if other_g1 {
                return Err(EditError::ArcG1Conflict);
            }
        }
    }
    Ok(())
}

pub fn continuity_allowed(p: &Polygon, v: VertexId, requested: Continuity) -> bool {
    check_continuity(p, v, requested).is_ok()
}

/// Assign a continuity request and enforce it right away.
pub fn apply_continuity(p: &mut Polygon, v: VertexId, requested: Continuity) -> EditResult<()> {
    if let Err(e) = check_continuity(p, v, requested) {
        log::debug!("vertex {}: {:?} rejected: {}", v, requested, e);
        return Err(e);
    }
    p.set_continuity_raw(v, requested);
    enforce_from_vertex(p, v);
    log::debug!("vertex {} continuity set to {:?}", v, requested);
    Ok(())
}
