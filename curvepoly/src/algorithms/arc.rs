//! Circle through the two endpoints of an Arc edge.
//!
//! Nothing is cached: the circle is derived from the endpoint positions and
//! their continuity every time it is asked for. At most one endpoint steers
//! the circle with its tangent; when both request G1 only v1 is honoured.

use crate::algorithms::tangent::tangent_at;
use crate::geometry::math::{normalize_angle, rotate90_ccw, rotate90_cw, solve2, unit};
use crate::geometry::tolerance::{EPS_CHORD, EPS_DET};
use crate::model::{ArcGeometry, Continuity, EdgeId, EdgeKind, Orientation, Vec2};
use crate::Polygon;
use std::f64::consts::TAU;

/// Tangent requirement at one endpoint of the chord.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentAnchor {
    pub at_v1: bool,
    /// Unit travel direction (v1 towards v2) the arc must have at that endpoint.
    pub dir: Vec2,
}

pub fn solve_arc(p: &Polygon, edge: EdgeId) -> Option<ArcGeometry> {
    let e = p.edge(edge)?;
    if !matches!(e.kind, EdgeKind::Arc) {
        return None;
    }
    let p1 = p.vertex_position(e.v1)?;
    let p2 = p.vertex_position(e.v2)?;
    let g1_v1 = p.vertex_continuity(e.v1) == Some(Continuity::G1);
    let g1_v2 = p.vertex_continuity(e.v2) == Some(Continuity::G1) && !g1_v1;

    let anchor = if g1_v1 {
        tangent_at(p, e.v1, edge, true).map(|dir| TangentAnchor { at_v1: true, dir })
    } else if g1_v2 {
        tangent_at(p, e.v2, edge, false).map(|dir| TangentAnchor { at_v1: false, dir })
    } else {
        None
    };
    Some(arc_through(p1, p2, anchor))
}

/// Circle through `p1` and `p2`, tangent to `anchor.dir` at the anchored end
/// when given. Falls back to the semicircle on the chord when the tangent is
/// (nearly) parallel to the chord.
pub fn arc_through(p1: Vec2, p2: Vec2, anchor: Option<TangentAnchor>) -> ArcGeometry {
    let mid = p1.midpoint(p2);
    let (chord_dir, len) = unit(p2 - p1);
    let chord_dir = match chord_dir {
        Some(d) if len >= EPS_CHORD => d,
        _ => {
            let a = normalize_angle((p1.y - mid.y).atan2(p1.x - mid.x));
            return ArcGeometry {
                center: mid,
                radius: 0.5 * len,
                start_angle: a,
                end_angle: a,
                sweep: 0.0,
                orientation: Orientation::Ccw,
            };
        }
    };

    let mut center = mid;
    let mut radius = 0.5 * len;
    let mut orientation = Orientation::Ccw;

    if let Some(TangentAnchor { at_v1, dir }) = anchor {
        let at = if at_v1 { p1 } else { p2 };
        let normal = rotate90_ccw(dir);
        let bisector = rotate90_ccw(chord_dir);
        // at + s * normal == mid + t * bisector
        if let Some((s, _)) = solve2(normal, -bisector, mid - at, EPS_DET) {
            center = at + normal * s;
            radius = at.distance(center);
        } else {
            log::trace!("arc tangent parallel to chord, keeping semicircle");
        }
        if let (Some(r), _) = unit(at - center) {
            if rotate90_cw(r).dot(dir) > rotate90_ccw(r).dot(dir) {
                orientation = Orientation::Cw;
            }
        }
    }

    let start_angle = normalize_angle((p1.y - center.y).atan2(p1.x - center.x));
    let end_angle = normalize_angle((p2.y - center.y).atan2(p2.x - center.x));
    let mut sweep = match orientation {
        Orientation::Ccw => end_angle - start_angle,
        Orientation::Cw => start_angle - end_angle,
    };
    if sweep <= 0.0 {
        sweep += TAU;
    }
    ArcGeometry {
        center,
        radius,
        start_angle,
        end_angle,
        sweep,
        orientation,
    }
}

/// Unit travel direction of the arc at a point on its circle.
pub fn travel_tangent(arc: &ArcGeometry, at: Vec2) -> Option<Vec2> {
    if arc.is_degenerate() {
        return None;
    }
    let r = unit(at - arc.center).0?;
    Some(match arc.orientation {
        Orientation::Ccw => rotate90_ccw(r),
        Orientation::Cw => rotate90_cw(r),
    })
}
