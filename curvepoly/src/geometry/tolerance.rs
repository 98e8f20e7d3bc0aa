// Centralized tolerances for the consistency engine

pub const EPS_DIR: f64 = 1e-8;        // below this a vector has no direction
pub const EPS_CHORD: f64 = 1e-6;      // arc chords shorter than this are degenerate
pub const EPS_DET: f64 = 1e-8;        // 2x2 solves with |det| at or below this are unstable
pub const EPS_POS: f64 = 1e-9;        // position change treated as a no-op

// Length of the diagonal step used when a Diagonal45 edge has collapsed to a point
pub const DIAGONAL_UNIT_STEP: f64 = 1.0;

#[inline] pub fn near_zero(x: f64, eps: f64) -> bool { x.abs() <= eps }
