pub mod config;
pub mod error;
pub mod model;
pub mod topology;
pub mod geometry {
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod arc;
    pub mod constraints;
    pub mod continuity;
    pub mod tangent;
}

pub use config::EditorConfig;
pub use error::{EditError, EditResult};
use geometry::tolerance::{near_zero, EPS_POS};
pub use model::{
    ArcGeometry, Constraint, Continuity, Edge, EdgeGeometry, EdgeId, EdgeKind, EdgeType,
    HandleEnd, HandleSide, Orientation, Vec2, Vertex, VertexId,
};
pub use topology::Adjacent;

use serde::Serialize;
use std::collections::HashMap;

/// Smallest vertex count a closed polygon may have.
pub const MIN_VERTICES: usize = 3;

/// A closed polygon of Line, Bezier and Arc edges kept geometrically consistent
/// under edits.
#[derive(Clone, Debug)]
pub struct Polygon {
    pub(crate) vertices: Vec<Option<Vertex>>, // id is index
    pub(crate) edges: Vec<Option<Edge>>,      // id is index
    pub(crate) ring: Vec<VertexId>,           // cyclic vertex order
    pub(crate) cycle: Vec<EdgeId>,            // cycle[i] joins ring[i] and ring[i+1]
    // Derived indices, rebuilt by topology::rebuild_lookup
    pub(crate) lookup: HashMap<(VertexId, VertexId), EdgeId>,
    pub(crate) ring_pos: HashMap<VertexId, usize>,
    pub(crate) edge_pos: HashMap<EdgeId, usize>,
    pub(crate) config: EditorConfig,
    pub(crate) geom_ver: u64,
}

pub struct EdgeArrays {
    pub ids: Vec<u32>,
    pub endpoints: Vec<u32>,
    pub kinds: Vec<u8>,
    pub constraint_kinds: Vec<u8>,
    pub constraint_values: Vec<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct VertexView {
    pub id: VertexId,
    pub pos: Vec2,
    pub continuity: Continuity,
}

#[derive(Clone, Debug, Serialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub v1: VertexId,
    pub v2: VertexId,
    pub edge_type: EdgeType,
    pub constraint: Constraint,
    pub geometry: EdgeGeometry,
}

/// Read-only view of the whole polygon in boundary order.
#[derive(Clone, Debug, Serialize)]
pub struct PolygonSnapshot {
    pub version: u64,
    pub vertices: Vec<VertexView>,
    pub edges: Vec<EdgeView>,
}

impl Default for Polygon {
    /// Starter shape: a triangle whose first edge is a Bezier curve.
    fn default() -> Self {
        Self::starter(EditorConfig::default())
    }
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EditorConfig) -> EditResult<Self> {
        config.validate()?;
        Ok(Self::starter(config))
    }

    fn starter(config: EditorConfig) -> Self {
        let mut p = Self::empty(config);
        p.push_ring(&[
            Vec2::new(-20.0, 60.0),
            Vec2::new(50.0, -30.0),
            Vec2::new(200.0, 40.0),
        ]);
        if let Some(Some(e)) = p.edges.get_mut(0) {
            e.kind = EdgeKind::Bezier {
                c1: Vec2::new(-50.0, 20.0),
                c2: Vec2::new(0.0, -70.0),
            };
        }
        p.rebuild_lookup();
        p
    }

    /// Closed polygon of plain Line edges through `points` in order.
    pub fn from_points(points: &[Vec2], config: EditorConfig) -> EditResult<Self> {
        config.validate()?;
        if points.len() < MIN_VERTICES {
            return Err(EditError::TooFewVertices {
                count: points.len(),
                min: MIN_VERTICES,
            });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(EditError::NonFinite("points"));
        }
        let mut p = Self::empty(config);
        p.push_ring(points);
        p.rebuild_lookup();
        Ok(p)
    }

    fn empty(config: EditorConfig) -> Self {
        Polygon {
            vertices: Vec::new(),
            edges: Vec::new(),
            ring: Vec::new(),
            cycle: Vec::new(),
            lookup: HashMap::new(),
            ring_pos: HashMap::new(),
            edge_pos: HashMap::new(),
            config,
            geom_ver: 1,
        }
    }

    fn push_ring(&mut self, points: &[Vec2]) {
        for p in points {
            let id = self.vertices.len() as VertexId;
            self.vertices.push(Some(Vertex::new(p.x, p.y)));
            self.ring.push(id);
        }
        let n = self.ring.len();
        for i in 0..n {
            let id = self.edges.len() as EdgeId;
            self.edges
                .push(Some(Edge::line(self.ring[i], self.ring[(i + 1) % n])));
            self.cycle.push(id);
        }
    }

    /// Monotonic geometry version; increments on every accepted edit.
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    pub(crate) fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) -> EditResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // Read accessors

    pub fn vertex_count(&self) -> usize {
        self.ring.len()
    }
    pub fn edge_count(&self) -> usize {
        self.cycle.len()
    }
    /// Vertex ids in boundary order.
    pub fn vertex_ids(&self) -> &[VertexId] {
        &self.ring
    }
    /// Edge ids in boundary order; `edge_ids()[i]` follows `vertex_ids()[i]`.
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.cycle
    }
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id as usize).and_then(|v| v.as_ref())
    }
    pub fn vertex_position(&self, id: VertexId) -> Option<Vec2> {
        self.vertex(id).map(|v| v.pos)
    }
    pub fn vertex_continuity(&self, id: VertexId) -> Option<Continuity> {
        self.vertex(id).map(|v| v.continuity)
    }
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id as usize).and_then(|e| e.as_ref())
    }
    pub fn edge_type(&self, id: EdgeId) -> Option<EdgeType> {
        self.edge(id).map(|e| e.edge_type())
    }
    pub fn edge_constraint(&self, id: EdgeId) -> Option<Constraint> {
        self.edge(id).map(|e| e.constraint())
    }
    /// Straight-line distance between the endpoints of an edge.
    pub fn edge_length(&self, id: EdgeId) -> Option<f64> {
        let e = self.edge(id)?;
        Some(self.vertex_position(e.v1)?.distance(self.vertex_position(e.v2)?))
    }

    /// Renderable parameters; arcs are solved fresh on every call.
    pub fn edge_geometry(&self, id: EdgeId) -> Option<EdgeGeometry> {
        let e = self.edge(id)?;
        let p1 = self.vertex_position(e.v1)?;
        let p2 = self.vertex_position(e.v2)?;
        match e.kind {
            EdgeKind::Line { .. } => Some(EdgeGeometry::Line { p1, p2 }),
            EdgeKind::Bezier { c1, c2 } => Some(EdgeGeometry::Bezier {
                p0: p1,
                p1: c1,
                p2: c2,
                p3: p2,
            }),
            EdgeKind::Arc => algorithms::arc::solve_arc(self, id).map(EdgeGeometry::Arc),
        }
    }

    pub fn get_vertex_arrays(&self) -> (Vec<u32>, Vec<f64>) {
        let mut ids = Vec::with_capacity(self.ring.len());
        let mut pos = Vec::with_capacity(self.ring.len() * 2);
        for &id in &self.ring {
            if let Some(v) = self.vertex(id) {
                ids.push(id);
                pos.push(v.pos.x);
                pos.push(v.pos.y);
            }
        }
        (ids, pos)
    }

    pub fn get_continuity_array(&self) -> Vec<u8> {
        self.ring
            .iter()
            .filter_map(|&id| self.vertex(id))
            .map(|v| v.continuity as u8)
            .collect()
    }

    pub fn get_edge_arrays(&self) -> EdgeArrays {
        let mut ids = Vec::new();
        let mut ep = Vec::new();
        let mut kinds = Vec::new();
        let mut ck = Vec::new();
        let mut cv = Vec::new();
        for &id in &self.cycle {
            if let Some(e) = self.edge(id) {
                ids.push(id);
                ep.push(e.v1);
                ep.push(e.v2);
                kinds.push(e.edge_type() as u8);
                let c = e.constraint();
                ck.push(c.code());
                cv.push(c.value().unwrap_or(0.0));
            }
        }
        EdgeArrays {
            ids,
            endpoints: ep,
            kinds,
            constraint_kinds: ck,
            constraint_values: cv,
        }
    }

    pub fn snapshot(&self) -> PolygonSnapshot {
        let vertices = self
            .ring
            .iter()
            .filter_map(|&id| {
                self.vertex(id).map(|v| VertexView {
                    id,
                    pos: v.pos,
                    continuity: v.continuity,
                })
            })
            .collect();
        let edges = self
            .cycle
            .iter()
            .filter_map(|&id| {
                let e = self.edge(id)?;
                Some(EdgeView {
                    id,
                    v1: e.v1,
                    v2: e.v2,
                    edge_type: e.edge_type(),
                    constraint: e.constraint(),
                    geometry: self.edge_geometry(id)?,
                })
            })
            .collect();
        PolygonSnapshot {
            version: self.geom_ver,
            vertices,
            edges,
        }
    }

    // Raw data mutation: no propagation, no continuity

    pub(crate) fn set_position(&mut self, id: VertexId, p: Vec2) -> bool {
        match self.vertices.get_mut(id as usize) {
            Some(Some(v)) => {
                v.pos = p;
                true
            }
            _ => false,
        }
    }

    /// Move the handle of Bezier `edge` that is attached to vertex `at`.
    pub(crate) fn set_handle(&mut self, edge: EdgeId, at: VertexId, p: Vec2) -> bool {
        match self.edges.get_mut(edge as usize) {
            Some(Some(e)) => e.set_handle_at(at, p),
            _ => false,
        }
    }

    pub(crate) fn set_continuity_raw(&mut self, id: VertexId, c: Continuity) {
        if let Some(Some(v)) = self.vertices.get_mut(id as usize) {
            v.continuity = c;
        }
    }

    // User edits

    /// User drag of a vertex: constraints propagate outward, then continuity settles.
    pub fn move_vertex(&mut self, id: VertexId, pos: Vec2) -> EditResult<()> {
        if !pos.is_finite() {
            return Err(EditError::NonFinite("pos"));
        }
        let old = self.vertex_position(id).ok_or(EditError::UnknownVertex(id))?;
        if near_zero(old.distance(pos), EPS_POS) {
            return Ok(());
        }
        algorithms::constraints::on_vertex_moved(self, id, pos);
        self.bump();
        Ok(())
    }

    /// User drag of a Bezier handle. The dragged handle drives continuity at its vertex.
    pub fn move_control_point(&mut self, edge: EdgeId, end: HandleEnd, pos: Vec2) -> EditResult<()> {
        if !pos.is_finite() {
            return Err(EditError::NonFinite("pos"));
        }
        let e = *self.edge(edge).ok_or(EditError::UnknownEdge(edge))?;
        if !matches!(e.kind, EdgeKind::Bezier { .. }) {
            return Err(EditError::NotBezier(edge));
        }
        let at = match end {
            HandleEnd::Start => e.v1,
            HandleEnd::End => e.v2,
        };
        self.set_handle(edge, at, pos);
        let requests_continuity = self
            .vertex_continuity(at)
            .map_or(false, |c| c != Continuity::G0);
        if requests_continuity {
            if let Some(adj) = self.adjacent_edges(at) {
                let side = if adj.next == edge {
                    HandleSide::Next
                } else {
                    HandleSide::Prev
                };
                algorithms::continuity::enforce_from_control(self, at, side);
            }
        }
        self.bump();
        Ok(())
    }

    /// Re-assigning the constraint an edge already holds changes nothing.
    pub fn set_edge_constraint(&mut self, edge: EdgeId, constraint: Constraint) -> EditResult<()> {
        let current = self.edge(edge).ok_or(EditError::UnknownEdge(edge))?;
        if matches!(current.kind, EdgeKind::Line { constraint: c } if c == constraint) {
            return Ok(());
        }
        algorithms::constraints::apply_constraint(self, edge, constraint)?;
        self.bump();
        Ok(())
    }

    pub fn set_vertex_continuity(&mut self, id: VertexId, continuity: Continuity) -> EditResult<()> {
        let current = self.vertex_continuity(id).ok_or(EditError::UnknownVertex(id))?;
        if current == continuity {
            return Ok(());
        }
        algorithms::continuity::apply_continuity(self, id, continuity)?;
        self.bump();
        Ok(())
    }

    /// Replace the variant of an edge. The constraint is dropped; Bezier
    /// handles are seeded on the chord; arcs force both endpoints to G0.
    pub fn convert_edge(&mut self, id: EdgeId, to: EdgeType) -> EditResult<()> {
        let e = *self.edge(id).ok_or(EditError::UnknownEdge(id))?;
        if e.edge_type() == to {
            return Ok(());
        }
        let p1 = self.vertex_position(e.v1).ok_or(EditError::UnknownVertex(e.v1))?;
        let p2 = self.vertex_position(e.v2).ok_or(EditError::UnknownVertex(e.v2))?;
        let kind = match to {
            EdgeType::Line => EdgeKind::Line {
                constraint: Constraint::None,
            },
            EdgeType::Bezier => {
                let d = p2 - p1;
                let k = self.config.handle_ratio;
                EdgeKind::Bezier {
                    c1: p1 + d * k,
                    c2: p2 - d * k,
                }
            }
            EdgeType::Arc => EdgeKind::Arc,
        };
        if let Some(Some(edge)) = self.edges.get_mut(id as usize) {
            edge.kind = kind;
        }
        self.rebuild_lookup();
        if to == EdgeType::Arc {
            self.set_continuity_raw(e.v1, Continuity::G0);
            self.set_continuity_raw(e.v2, Continuity::G0);
        } else {
            self.settle_after_structural_edit(&[e.v1, e.v2]);
        }
        log::debug!("edge {} converted {:?} -> {:?}", id, e.edge_type(), to);
        self.bump();
        Ok(())
    }

    /// Split an edge at its chord midpoint into two unconstrained Line edges.
    /// Returns the new vertex.
    pub fn insert_vertex_on_edge(&mut self, id: EdgeId) -> EditResult<VertexId> {
        let idx = self.edge_index(id).ok_or(EditError::UnknownEdge(id))?;
        let at = self.split_point(id).ok_or(EditError::UnknownEdge(id))?;
        let n = self.ring.len();
        let a = self.ring[idx];
        let b = self.ring[(idx + 1) % n];

        let vid = self.vertices.len() as VertexId;
        self.vertices.push(Some(Vertex::new(at.x, at.y)));
        self.ring.insert(idx + 1, vid);

        if let Some(slot) = self.edges.get_mut(id as usize) {
            *slot = None;
        }
        let e1 = self.edges.len() as EdgeId;
        self.edges.push(Some(Edge::line(a, vid)));
        let e2 = self.edges.len() as EdgeId;
        self.edges.push(Some(Edge::line(vid, b)));
        self.cycle[idx] = e1;
        self.cycle.insert(idx + 1, e2);
        self.rebuild_lookup();

        self.settle_after_structural_edit(&[a, b]);
        log::debug!("edge {} split at ({}, {}) -> vertex {}", id, at.x, at.y, vid);
        self.bump();
        Ok(vid)
    }

    /// Chord midpoint, whatever the edge variant.
    fn split_point(&self, id: EdgeId) -> Option<Vec2> {
        let e = self.edge(id)?;
        let p1 = self.vertex_position(e.v1)?;
        let p2 = self.vertex_position(e.v2)?;
        Some(p1.midpoint(p2))
    }

    /// Remove a vertex and merge its two edges into one plain Line.
    pub fn delete_vertex(&mut self, id: VertexId) -> EditResult<()> {
        let n = self.ring.len();
        let i = self.ring_index(id).ok_or(EditError::UnknownVertex(id))?;
        if n <= MIN_VERTICES {
            log::debug!("refused to delete vertex {}: only {} vertices", id, n);
            return Err(EditError::TooFewVertices {
                count: n,
                min: MIN_VERTICES,
            });
        }
        let adj = self.adjacent_edges(id).ok_or(EditError::UnknownVertex(id))?;
        let before = self.ring[(i + n - 1) % n];
        let after = self.ring[(i + 1) % n];

        let merged = self.edges.len() as EdgeId;
        self.edges.push(Some(Edge::line(before, after)));
        for old in [adj.prev, adj.next] {
            if let Some(slot) = self.edges.get_mut(old as usize) {
                *slot = None;
            }
        }
        if let Some(slot) = self.vertices.get_mut(id as usize) {
            *slot = None;
        }
        self.ring.remove(i);
        self.cycle[adj.prev_index] = merged;
        self.cycle.remove(adj.next_index);
        self.rebuild_lookup();

        self.settle_after_structural_edit(&[before, after]);
        log::debug!("vertex {} deleted, edge {} joins {} and {}", id, merged, before, after);
        self.bump();
        Ok(())
    }

    /// Rigid move of every vertex and handle.
    pub fn translate(&mut self, delta: Vec2) -> EditResult<()> {
        if !delta.is_finite() {
            return Err(EditError::NonFinite("delta"));
        }
        if delta == Vec2::ZERO {
            return Ok(());
        }
        for v in self.vertices.iter_mut().flatten() {
            v.pos = v.pos + delta;
        }
        for e in self.edges.iter_mut().flatten() {
            if let EdgeKind::Bezier { c1, c2 } = &mut e.kind {
                *c1 = *c1 + delta;
                *c2 = *c2 + delta;
            }
        }
        self.bump();
        Ok(())
    }

    /// Drop continuity requests that the new neighbourhood of each vertex can
    /// no longer honour, then re-run enforcement for the ones that remain.
    fn settle_after_structural_edit(&mut self, touched: &[VertexId]) {
        for &v in touched {
            let Some(c) = self.vertex_continuity(v) else {
                continue;
            };
            if c == Continuity::G0 {
                continue;
            }
            if !algorithms::continuity::continuity_allowed(self, v, c) {
                log::debug!("vertex {} continuity {:?} reset to G0", v, c);
                self.set_continuity_raw(v, Continuity::G0);
                continue;
            }
            algorithms::continuity::enforce_from_vertex(self, v);
        }
    }
}
