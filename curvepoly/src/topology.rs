//! Cyclic order bookkeeping: the endpoint-pair index and adjacency queries.
//!
//! `cycle[i]` joins `ring[i]` and `ring[(i + 1) % n]`. Every structural edit
//! (split, delete, convert) calls `rebuild_lookup` before returning, so the
//! queries below never observe a stale index.

use crate::model::{Edge, EdgeId, VertexId};
use crate::Polygon;

/// Edges on both sides of a vertex with their positions in the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adjacent {
    pub prev: EdgeId,
    pub prev_index: usize,
    pub next: EdgeId,
    pub next_index: usize,
}

impl Polygon {
    pub(crate) fn rebuild_lookup(&mut self) {
        self.lookup.clear();
        self.ring_pos.clear();
        self.edge_pos.clear();
        for (i, &v) in self.ring.iter().enumerate() {
            self.ring_pos.insert(v, i);
        }
        for (i, &eid) in self.cycle.iter().enumerate() {
            if let Some(Some(e)) = self.edges.get(eid as usize) {
                // both orientations so callers may ask in either order
                self.lookup.insert((e.v1, e.v2), eid);
                self.lookup.insert((e.v2, e.v1), eid);
            }
            self.edge_pos.insert(eid, i);
        }
    }

    /// Edge joining `a` and `b`, regardless of its orientation.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.lookup
            .get(&(a, b))
            .or_else(|| self.lookup.get(&(b, a)))
            .copied()
    }

    /// Position of `v` in the cyclic vertex order.
    pub fn ring_index(&self, v: VertexId) -> Option<usize> {
        self.ring_pos.get(&v).copied()
    }

    /// Position of `e` in the cyclic edge order.
    pub fn edge_index(&self, e: EdgeId) -> Option<usize> {
        self.edge_pos.get(&e).copied()
    }

    pub fn adjacent_edges(&self, v: VertexId) -> Option<Adjacent> {
        let n = self.ring.len();
        let i = self.ring_index(v)?;
        let before = self.ring[(i + n - 1) % n];
        let after = self.ring[(i + 1) % n];
        let prev = self.edge_between(before, v)?;
        let next = self.edge_between(v, after)?;
        Some(Adjacent {
            prev,
            prev_index: self.edge_index(prev)?,
            next,
            next_index: self.edge_index(next)?,
        })
    }

    /// The edges before and after `e` in the cycle.
    pub fn neighbor_edges(&self, e: EdgeId) -> Option<(EdgeId, EdgeId)> {
        let n = self.cycle.len();
        let i = self.edge_index(e)?;
        Some((self.cycle[(i + n - 1) % n], self.cycle[(i + 1) % n]))
    }

    /// Edge at a signed cycle offset from `e`.
    pub(crate) fn edge_at_offset(&self, e: EdgeId, offset: isize) -> Option<&Edge> {
        let n = self.cycle.len() as isize;
        let i = self.edge_index(e)? as isize;
        let j = (i + offset).rem_euclid(n) as usize;
        self.edge(self.cycle[j])
    }
}

#[cfg(test)]
mod tests {
    use crate::model::Vec2;
    use crate::{EditorConfig, Polygon};

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
    fn edge_between_tries_both_orders() {
        let p = square();
        let v = p.vertex_ids().to_vec();
        let e = p.edge_between(v[1], v[2]).unwrap();
        assert_eq!(p.edge_between(v[2], v[1]), Some(e));
        assert_eq!(p.edge_between(v[0], v[2]), None);
    }

    #[test]
    fn adjacency_wraps_around() {
        let p = square();
        let v = p.vertex_ids().to_vec();
        let e = p.edge_ids().to_vec();
        let adj = p.adjacent_edges(v[0]).unwrap();
        assert_eq!(adj.prev, e[3]);
        assert_eq!(adj.prev_index, 3);
        assert_eq!(adj.next, e[0]);
        assert_eq!(adj.next_index, 0);
        assert_eq!(p.neighbor_edges(e[0]), Some((e[3], e[1])));
    }

    #[test]
    fn lookup_follows_structural_edits() {
        let mut p = square();
        let v = p.vertex_ids().to_vec();
        let e0 = p.edge_ids()[0];
        let mid = p.insert_vertex_on_edge(e0).unwrap();
        assert_eq!(p.edge_between(v[0], v[1]), None);
        assert!(p.edge_between(v[0], mid).is_some());
        assert!(p.edge_between(mid, v[1]).is_some());
        assert_eq!(p.ring_index(mid), Some(1));
        p.delete_vertex(mid).unwrap();
        assert!(p.edge_between(v[0], v[1]).is_some());
        assert_eq!(p.ring_index(mid), None);
    }
}
