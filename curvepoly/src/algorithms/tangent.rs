//! Effective tangent at an arc endpoint, read off the neighbouring edge.

use crate::geometry::math::unit;
use crate::model::{Continuity, EdgeId, EdgeKind, Vec2, VertexId};
use crate::Polygon;

/// Unit tangent in boundary travel direction at `vertex`, an endpoint of
/// `edge`. The previous edge is consulted when `at_v1`, the next one otherwise.
pub fn tangent_at(p: &Polygon, vertex: VertexId, edge: EdgeId, at_v1: bool) -> Option<Vec2> {
    let cur = p.edge(edge)?;
    let offset = if at_v1 { -1 } else { 1 };
    let nb = p.edge_at_offset(edge, offset)?;
    let v = p.vertex_position(vertex)?;
    let far = p.vertex_position(nb.other_end(vertex)?)?;

    let dir = match nb.kind {
        EdgeKind::Arc if p.vertex_continuity(vertex) == Some(Continuity::G1) => {
            let own_far = p.vertex_position(cur.other_end(vertex)?)?;
            let (incoming, outgoing) = if at_v1 {
                (v - far, own_far - v)
            } else {
                (v - own_far, far - v)
            };
            bisector(incoming, outgoing)?
        }
        EdgeKind::Bezier { .. } => {
            let h = nb.handle_at(vertex)?;
            if at_v1 {
                v - h
            } else {
                h - v
            }
        }
        EdgeKind::Line { .. } | EdgeKind::Arc => {
            if at_v1 {
                v - far
            } else {
                far - v
            }
        }
    };
    unit(dir).0
}

/// Direction halfway between two travel directions. Falls back to whichever
/// one is defined, and to `b` when they cancel out.
fn bisector(a: Vec2, b: Vec2) -> Option<Vec2> {
    match (unit(a).0, unit(b).0) {
        (Some(ua), Some(ub)) => match unit(ua + ub).0 {
            Some(m) => Some(m),
            None => Some(ub),
        },
        (Some(ua), None) => Some(ua),
        (None, ub) => ub,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeType;
    use crate::EditorConfig;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::from_points(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ],
            EditorConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn line_neighbour_gives_travel_direction() {
        let mut p = square();
        let e = p.edge_ids().to_vec();
        let v = p.vertex_ids().to_vec();
        p.convert_edge(e[1], EdgeType::Arc).unwrap();
        // arriving at v1 of the arc along the previous edge (0,0)->(10,0)
        let t = tangent_at(&p, v[1], e[1], true).unwrap();
        assert_relative_eq!(t.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(t.y, 0.0, epsilon = 1e-12);
        // leaving v2 along the next edge (10,10)->(0,10)
        let t = tangent_at(&p, v[2], e[1], false).unwrap();
        assert_relative_eq!(t.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn bezier_neighbour_uses_nearer_handle() {
        let mut p = square();
        let e = p.edge_ids().to_vec();
        let v = p.vertex_ids().to_vec();
        p.convert_edge(e[0], EdgeType::Bezier).unwrap();
        p.convert_edge(e[1], EdgeType::Arc).unwrap();
        p.move_control_point(e[0], crate::HandleEnd::End, Vec2::new(10.0, -5.0))
            .unwrap();
        let t = tangent_at(&p, v[1], e[1], true).unwrap();
        assert_relative_eq!(t.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(t.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bisector_handles_degenerate_inputs() {
        let b = bisector(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)).unwrap();
        assert_relative_eq!(b.x, b.y, epsilon = 1e-12);
        assert_eq!(bisector(Vec2::ZERO, Vec2::new(0.0, 2.0)), Some(Vec2::new(0.0, 1.0)));
        assert_eq!(bisector(Vec2::new(3.0, 0.0), Vec2::ZERO), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(bisector(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)), Some(Vec2::new(-1.0, 0.0)));
        assert_eq!(bisector(Vec2::ZERO, Vec2::ZERO), None);
    }
}
