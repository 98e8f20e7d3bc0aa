use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

pub type VertexId = u32;
pub type EdgeId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }
    pub fn dot(self, o: Vec2) -> f64 {
        self.x * o.x + self.y * o.y
    }
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
    pub fn distance(self, o: Vec2) -> f64 {
        (o - self).length()
    }
    pub fn midpoint(self, o: Vec2) -> Vec2 {
        Vec2 {
            x: 0.5 * (self.x + o.x),
            y: 0.5 * (self.y + o.y),
        }
    }
    /// Point reflection of `self` through `center`.
    pub fn reflect_through(self, center: Vec2) -> Vec2 {
        Vec2 {
            x: 2.0 * center.x - self.x,
            y: 2.0 * center.y - self.y,
        }
    }
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2 { x: self.x + o.x, y: self.y + o.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2 { x: self.x - o.x, y: self.y - o.y }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, k: f64) -> Vec2 {
        Vec2 { x: self.x * k, y: self.y * k }
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2 { x: -self.x, y: -self.y }
    }
}

/// Smoothness requested at a vertex between its two adjacent edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuity {
    #[default]
    G0 = 0,
    G1 = 1,
    C1 = 2,
}

impl Continuity {
    pub fn from_u8(v: u8) -> Option<Continuity> {
        match v {
            0 => Some(Continuity::G0),
            1 => Some(Continuity::G1),
            2 => Some(Continuity::C1),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Vec2,
    pub continuity: Continuity,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Vertex {
            pos: Vec2 { x, y },
            continuity: Continuity::G0,
        }
    }
}

/// Directional or metric constraint carried by a straight edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    #[default]
    None,
    Vertical,
    Diagonal45,
    FixedLength(f64),
}

impl Constraint {
    pub fn is_none(&self) -> bool {
        matches!(self, Constraint::None)
    }
    /// Numeric code used by flat array exports: 0 none, 1 vertical, 2 diagonal, 3 fixed length.
    pub fn code(&self) -> u8 {
        match self {
            Constraint::None => 0,
            Constraint::Vertical => 1,
            Constraint::Diagonal45 => 2,
            Constraint::FixedLength(_) => 3,
        }
    }
    /// Inverse of `code`; `value` is only read for fixed length.
    pub fn from_code(code: u8, value: f64) -> Option<Constraint> {
        match code {
            0 => Some(Constraint::None),
            1 => Some(Constraint::Vertical),
            2 => Some(Constraint::Diagonal45),
            3 => Some(Constraint::FixedLength(value)),
            _ => None,
        }
    }
    pub fn value(&self) -> Option<f64> {
        match self {
            Constraint::FixedLength(l) => Some(*l),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EdgeKind {
    Line { constraint: Constraint },
    Bezier { c1: Vec2, c2: Vec2 },
    Arc,
}

/// Variant tag without payload, used for conversion requests and readouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeType {
    Line = 0,
    Bezier = 1,
    Arc = 2,
}

impl EdgeType {
    pub fn from_u8(v: u8) -> Option<EdgeType> {
        match v {
            0 => Some(EdgeType::Line),
            1 => Some(EdgeType::Bezier),
            2 => Some(EdgeType::Arc),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub v1: VertexId,
    pub v2: VertexId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn line(v1: VertexId, v2: VertexId) -> Self {
        Edge {
            v1,
            v2,
            kind: EdgeKind::Line {
                constraint: Constraint::None,
            },
        }
    }
    pub fn edge_type(&self) -> EdgeType {
        match self.kind {
            EdgeKind::Line { .. } => EdgeType::Line,
            EdgeKind::Bezier { .. } => EdgeType::Bezier,
            EdgeKind::Arc => EdgeType::Arc,
        }
    }
    pub fn constraint(&self) -> Constraint {
        match self.kind {
            EdgeKind::Line { constraint } => constraint,
            _ => Constraint::None,
        }
    }
    pub fn touches(&self, v: VertexId) -> bool {
        self.v1 == v || self.v2 == v
    }
    /// Endpoint opposite to `v`, or None when `v` is not an endpoint.
    pub fn other_end(&self, v: VertexId) -> Option<VertexId> {
        if self.v1 == v {
            Some(self.v2)
        } else if self.v2 == v {
            Some(self.v1)
        } else {
            None
        }
    }
    /// Bézier handle attached to endpoint `v`.
    pub fn handle_at(&self, v: VertexId) -> Option<Vec2> {
        match self.kind {
            EdgeKind::Bezier { c1, c2 } => {
                if self.v1 == v {
                    Some(c1)
                } else if self.v2 == v {
                    Some(c2)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
    pub(crate) fn set_handle_at(&mut self, v: VertexId, p: Vec2) -> bool {
        let (v1, v2) = (self.v1, self.v2);
        match &mut self.kind {
            EdgeKind::Bezier { c1, c2 } => {
                if v1 == v {
                    *c1 = p;
                    true
                } else if v2 == v {
                    *c2 = p;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}

/// Which handle of a Bézier edge: `Start` is c1 (at v1), `End` is c2 (at v2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleEnd {
    Start = 0,
    End = 1,
}

impl HandleEnd {
    pub fn from_u8(v: u8) -> Option<HandleEnd> {
        match v {
            0 => Some(HandleEnd::Start),
            1 => Some(HandleEnd::End),
            _ => None,
        }
    }
}

/// Which adjacent edge of a vertex had its handle dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleSide {
    Prev,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Ccw,
    Cw,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    pub center: Vec2,
    pub radius: f64,
    /// Angle of v1 seen from the center, in [0, 2π).
    pub start_angle: f64,
    /// Angle of v2 seen from the center, in [0, 2π).
    pub end_angle: f64,
    /// Positive angular extent travelled from v1 to v2 in `orientation`.
    pub sweep: f64,
    pub orientation: Orientation,
}

impl ArcGeometry {
    /// Zero-sweep circles come from collapsed chords; renderers skip them.
    pub fn is_degenerate(&self) -> bool {
        self.sweep <= 0.0
    }
}

/// Renderable parameters of one edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeGeometry {
    Line { p1: Vec2, p2: Vec2 },
    Bezier { p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2 },
    Arc(ArcGeometry),
}
