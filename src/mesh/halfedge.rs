//! The half-edge table record and its read-only traversal cursor.
//!
//! Each face corner owns one fixed-size [`HalfEdge`] record. The records of
//! one face sit contiguously in the table and link to each other through
//! *relative* signed offsets, never addresses or absolute indices, so the
//! table stays valid when it is copied or reallocated. The offset `0` in the
//! `opposite` slot is the boundary sentinel: a half-edge is never its own
//! opposite, so the value is free to mean "no neighboring face".
//!
//! [`HalfEdgeRef`] borrows the finalized table and walks it. All queries are
//! pure reads, so any number of threads may traverse concurrently.

use nalgebra::Point3;

use crate::geometry::Aabb;

/// One directed traversal of one edge around one face.
///
/// 28 bytes, `repr(C)`; the layout is part of the relocation story, not an
/// accident of field order.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
    /// Index of the vertex this half-edge starts at.
    pub(crate) start_vertex: u32,
    /// Relative offset to the next half-edge around the same face.
    pub(crate) next_ofs: i32,
    /// Relative offset to the previous half-edge around the same face.
    pub(crate) prev_ofs: i32,
    /// Relative offset to the opposite half-edge, or 0 for a boundary edge.
    pub(crate) opposite_ofs: i32,
    /// Crease sharpness of this edge; 0 = smooth, [`SHARP`](crate::mesh::SHARP) = fully sharp.
    pub(crate) edge_crease_weight: f32,
    /// Crease sharpness of the start vertex.
    pub(crate) vertex_crease_weight: f32,
    /// Tessellation density assigned to this edge.
    pub(crate) edge_level: f32,
}

impl HalfEdge {
    /// Index of the vertex this half-edge starts at.
    #[inline]
    pub fn start_vertex(&self) -> u32 {
        self.start_vertex
    }

    /// True if a face lies on the other side of this edge.
    #[inline]
    pub fn has_opposite(&self) -> bool {
        self.opposite_ofs != 0
    }

    /// Crease sharpness of this edge.
    #[inline]
    pub fn edge_crease_weight(&self) -> f32 {
        self.edge_crease_weight
    }

    /// Crease sharpness of the start vertex.
    #[inline]
    pub fn vertex_crease_weight(&self) -> f32 {
        self.vertex_crease_weight
    }

    /// Tessellation density assigned to this edge.
    #[inline]
    pub fn edge_level(&self) -> f32 {
        self.edge_level
    }
}

/// A read-only cursor into a finalized half-edge table.
///
/// The cursor pairs the borrowed table with a position, so traversal steps
/// are plain offset arithmetic. Two cursors compare equal when they point at
/// the same position of the same table.
#[derive(Clone, Copy)]
pub struct HalfEdgeRef<'a> {
    table: &'a [HalfEdge],
    pos: usize,
}

impl PartialEq for HalfEdgeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table.as_ptr(), other.table.as_ptr()) && self.pos == other.pos
    }
}

impl Eq for HalfEdgeRef<'_> {}

impl std::fmt::Debug for HalfEdgeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HalfEdgeRef({})", self.pos)
    }
}

impl<'a> HalfEdgeRef<'a> {
    /// Create a cursor at `pos` in `table`.
    pub(crate) fn new(table: &'a [HalfEdge], pos: usize) -> Self {
        debug_assert!(pos < table.len());
        Self { table, pos }
    }

    #[inline]
    fn step(&self, ofs: i32) -> HalfEdgeRef<'a> {
        HalfEdgeRef {
            table: self.table,
            pos: (self.pos as i64 + ofs as i64) as usize,
        }
    }

    /// Position of this half-edge in the table.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The underlying record.
    #[inline]
    pub fn record(&self) -> &'a HalfEdge {
        &self.table[self.pos]
    }

    /// Index of the vertex this half-edge starts at.
    #[inline]
    pub fn start_vertex(&self) -> u32 {
        self.record().start_vertex
    }

    /// Index of the vertex this half-edge ends at.
    #[inline]
    pub fn end_vertex(&self) -> u32 {
        self.next().start_vertex()
    }

    /// The next half-edge around the same face.
    #[inline]
    pub fn next(&self) -> HalfEdgeRef<'a> {
        self.step(self.record().next_ofs)
    }

    /// The previous half-edge around the same face.
    #[inline]
    pub fn prev(&self) -> HalfEdgeRef<'a> {
        self.step(self.record().prev_ofs)
    }

    /// True if a face lies on the other side of this edge.
    #[inline]
    pub fn has_opposite(&self) -> bool {
        self.record().has_opposite()
    }

    /// The half-edge on the other side of the same edge, if any.
    #[inline]
    pub fn opposite(&self) -> Option<HalfEdgeRef<'a>> {
        let ofs = self.record().opposite_ofs;
        if ofs == 0 {
            None
        } else {
            Some(self.step(ofs))
        }
    }

    /// Rotate counterclockwise around the start vertex: the next outgoing
    /// half-edge, or `None` when the edge is on the boundary.
    #[inline]
    pub fn rotate(&self) -> Option<HalfEdgeRef<'a>> {
        self.opposite().map(|o| o.next())
    }

    /// Number of corners of the face this half-edge belongs to.
    pub fn face_vertex_count(&self) -> usize {
        let mut count = 1;
        let mut p = self.next();
        while p != *self {
            count += 1;
            p = p.next();
        }
        count
    }

    /// Tests if the start vertex is regular in the Catmull-Clark sense: an
    /// interior vertex of valence exactly 4. Any boundary edge encountered
    /// while rotating, or a valence other than 4, classifies as irregular.
    pub fn is_regular_vertex(&self) -> bool {
        let mut p = *self;
        for i in 0..4 {
            match p.rotate() {
                Some(r) => p = r,
                None => return false,
            }
            if i < 3 && p == *self {
                return false;
            }
        }
        p == *self
    }

    /// Tests if the face is regular: a quadrilateral whose four corners are
    /// all regular vertices. Regular faces need no special-case subdivision
    /// stencil.
    pub fn is_regular_face(&self) -> bool {
        let mut p = *self;
        for i in 0..4 {
            if !p.is_regular_vertex() {
                return false;
            }
            p = p.next();
            if i < 3 && p == *self {
                return false;
            }
        }
        p == *self
    }

    /// Bounds of the vertices of the face this half-edge belongs to.
    pub fn face_bounds(&self, positions: &[Point3<f32>]) -> Aabb {
        let mut b = Aabb::from_point(&positions[self.start_vertex() as usize]);
        let mut p = self.next();
        while p != *self {
            b.extend_point(&positions[p.start_vertex() as usize]);
            p = p.next();
        }
        b
    }

    /// Bounds of every face incident to the start vertex.
    ///
    /// The walk goes clockwise (`prev` then `opposite`). When it runs into a
    /// boundary edge it restarts at this half-edge and rotates the other way
    /// to the far boundary, so a boundary vertex still gets full 1-ring
    /// coverage.
    pub fn one_ring_bounds(&self, positions: &[Point3<f32>]) -> Aabb {
        let mut bounds = Aabb::empty();
        let mut p = *self;
        loop {
            bounds.extend(&p.face_bounds(positions));
            p = p.prev();
            match p.opposite() {
                Some(o) => p = o,
                None => {
                    // No neighbor on this side: reach the far boundary edge
                    // from the other direction.
                    p = *self;
                    while let Some(r) = p.rotate() {
                        p = r;
                    }
                }
            }
            if p == *self {
                break;
            }
        }
        bounds
    }

    /// Conservative bounds of the subdivision patch of this face: the union
    /// of the 1-rings of all its corners. Every vertex the subdivided
    /// surface of this face can depend on lies inside, so the true surface
    /// never escapes the box.
    pub fn bounds(&self, positions: &[Point3<f32>]) -> Aabb {
        let mut b = self.one_ring_bounds(positions);
        let mut p = self.next();
        while p != *self {
            b.extend(&p.one_ring_bounds(positions));
            p = p.next();
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_28_bytes() {
        assert_eq!(std::mem::size_of::<HalfEdge>(), 28);
    }

    #[test]
    fn test_boundary_sentinel() {
        let he = HalfEdge {
            start_vertex: 7,
            next_ofs: 1,
            prev_ofs: 2,
            opposite_ofs: 0,
            edge_crease_weight: 0.0,
            vertex_crease_weight: 0.0,
            edge_level: 1.0,
        };
        assert!(!he.has_opposite());
        assert_eq!(he.start_vertex(), 7);
    }

    #[test]
    fn test_cursor_equality() {
        let table = vec![
            HalfEdge {
                start_vertex: 0,
                next_ofs: 1,
                prev_ofs: 2,
                opposite_ofs: 0,
                edge_crease_weight: 0.0,
                vertex_crease_weight: 0.0,
                edge_level: 1.0,
            },
            HalfEdge {
                start_vertex: 1,
                next_ofs: 1,
                prev_ofs: -1,
                opposite_ofs: 0,
                edge_crease_weight: 0.0,
                vertex_crease_weight: 0.0,
                edge_level: 1.0,
            },
            HalfEdge {
                start_vertex: 2,
                next_ofs: -2,
                prev_ofs: -1,
                opposite_ofs: 0,
                edge_crease_weight: 0.0,
                vertex_crease_weight: 0.0,
                edge_level: 1.0,
            },
        ];
        let a = HalfEdgeRef::new(&table, 0);
        assert_eq!(a.next().next().next(), a);
        assert_eq!(a.prev(), a.next().next());
        assert_eq!(a.face_vertex_count(), 3);
        assert_eq!(a.end_vertex(), 1);
        assert!(a.opposite().is_none());
        assert!(!a.is_regular_vertex());
    }
}
