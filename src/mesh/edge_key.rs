//! Canonical edge keys and sort-based opposite matching.
//!
//! Every half-edge gets a 64-bit key that identifies its undirected edge:
//! the larger vertex index in the high word, the smaller in the low word.
//! Sorting `(key, position)` pairs brings the half-edges of a shared edge
//! next to each other, which turns opposite discovery into a single scan.

use rayon::prelude::*;

use super::halfedge::HalfEdge;

/// Canonical identifier of the undirected edge `(v0, v1)`.
///
/// `(a, b)` and `(b, a)` map to the same key.
#[inline]
pub(crate) fn edge_key(v0: u32, v1: u32) -> u64 {
    let (lo, hi) = if v0 < v1 { (v0, v1) } else { (v1, v0) };
    ((hi as u64) << 32) | lo as u64
}

/// An edge key paired with the table position of its half-edge.
///
/// The derived ordering (key first, then position) is total, which keeps
/// the sort — and therefore opposite pairing — deterministic regardless of
/// thread count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct KeyedHalfEdge {
    pub key: u64,
    pub pos: u32,
}

/// Resolve `opposite` links in `table` from the keyed half-edge sequence.
///
/// Half-edges with a unique key stay boundary. A key shared by exactly two
/// half-edges links them mutually. A key shared by more than two half-edges
/// is non-manifold input: only the pair with the lowest table positions is
/// linked and the rest stay boundary. That first-pair-wins policy is a
/// documented limitation, not a failure.
pub(crate) fn resolve_opposites(keys: &mut [KeyedHalfEdge], table: &mut [HalfEdge]) {
    keys.par_sort_unstable();

    let mut i = 0;
    while i < keys.len() {
        let mut j = i + 1;
        while j < keys.len() && keys[j].key == keys[i].key {
            j += 1;
        }
        if j - i >= 2 {
            let a = keys[i].pos as usize;
            let b = keys[i + 1].pos as usize;
            table[a].opposite_ofs = (b as i64 - a as i64) as i32;
            table[b].opposite_ofs = (a as i64 - b as i64) as i32;
        }
        i = j;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(start_vertex: u32) -> HalfEdge {
        HalfEdge {
            start_vertex,
            next_ofs: 1,
            prev_ofs: -1,
            opposite_ofs: 0,
            edge_crease_weight: 0.0,
            vertex_crease_weight: 0.0,
            edge_level: 1.0,
        }
    }

    #[test]
    fn test_key_is_unordered() {
        assert_eq!(edge_key(3, 9), edge_key(9, 3));
        assert_ne!(edge_key(3, 9), edge_key(3, 8));
        assert_eq!(edge_key(1, 2), (2u64 << 32) | 1);
    }

    #[test]
    fn test_unique_keys_stay_boundary() {
        let mut table = vec![blank(0), blank(1)];
        let mut keys = vec![
            KeyedHalfEdge { key: edge_key(0, 1), pos: 0 },
            KeyedHalfEdge { key: edge_key(1, 2), pos: 1 },
        ];
        resolve_opposites(&mut keys, &mut table);
        assert!(!table[0].has_opposite());
        assert!(!table[1].has_opposite());
    }

    #[test]
    fn test_pair_links_mutually() {
        let mut table = vec![blank(0), blank(9), blank(1)];
        let mut keys = vec![
            KeyedHalfEdge { key: edge_key(0, 1), pos: 2 },
            KeyedHalfEdge { key: edge_key(9, 9), pos: 1 },
            KeyedHalfEdge { key: edge_key(1, 0), pos: 0 },
        ];
        resolve_opposites(&mut keys, &mut table);
        assert_eq!(table[0].opposite_ofs, 2);
        assert_eq!(table[2].opposite_ofs, -2);
        assert!(!table[1].has_opposite());
    }

    #[test]
    fn test_nonmanifold_links_lowest_pair_only() {
        // Three half-edges on the same undirected edge.
        let mut table = vec![blank(0), blank(0), blank(0), blank(1)];
        let mut keys = vec![
            KeyedHalfEdge { key: edge_key(0, 1), pos: 3 },
            KeyedHalfEdge { key: edge_key(0, 1), pos: 0 },
            KeyedHalfEdge { key: edge_key(0, 1), pos: 1 },
        ];
        resolve_opposites(&mut keys, &mut table);
        assert_eq!(table[0].opposite_ofs, 1);
        assert_eq!(table[1].opposite_ofs, -1);
        assert!(!table[3].has_opposite());
    }
}
