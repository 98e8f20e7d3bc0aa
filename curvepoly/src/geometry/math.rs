use super::tolerance::{near_zero, EPS_DIR};
use crate::model::Vec2;
use std::f64::consts::TAU;

/// Unit vector of `v` and the original length. The direction is `None` when
/// the length is below `EPS_DIR`; near-zero vectors are never normalized.
pub fn unit(v: Vec2) -> (Option<Vec2>, f64) {
    let len = v.length();
    if len < EPS_DIR {
        (None, len)
    } else {
        (Some(Vec2 { x: v.x / len, y: v.y / len }), len)
    }
}

#[inline]
pub fn rotate90_ccw(v: Vec2) -> Vec2 {
    Vec2 { x: -v.y, y: v.x }
}

#[inline]
pub fn rotate90_cw(v: Vec2) -> Vec2 {
    Vec2 { x: v.y, y: -v.x }
}

/// Angle folded into [0, 2π).
pub fn normalize_angle(a: f64) -> f64 {
    let r = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if r >= TAU { 0.0 } else { r }
}

/// Solve `a * s + b * t = rhs` for (s, t). `None` when |det| <= eps.
pub fn solve2(a: Vec2, b: Vec2, rhs: Vec2, eps: f64) -> Option<(f64, f64)> {
    let det = a.x * b.y - b.x * a.y;
    if near_zero(det, eps) {
        return None;
    }
    let s = (rhs.x * b.y - b.x * rhs.y) / det;
    let t = (a.x * rhs.y - rhs.x * a.y) / det;
    Some((s, t))
}
