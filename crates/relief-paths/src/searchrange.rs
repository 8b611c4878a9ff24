use std::fmt;

use relief_core::{Point, Range};

/// A position with its final distance, returned from map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub dist: i32,
}

// ---------------------------------------------------------------------------
// Internal node for the priority-queue search
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    /// Tentative distance from the source. Only ever decreases within a
    /// generation; final once the node leaves the open set.
    pub(crate) g: i32,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered by distance for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) dist: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest distance first.
        other.dist.cmp(&self.dist)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel value meaning "not reached" in distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// SearchRange
// ---------------------------------------------------------------------------

/// Central coordinator for shortest-path queries on a grid rectangle.
///
/// `SearchRange` owns all per-query mutable state (tentative distances,
/// open flags, the reached-node list) in flat arrays, so repeated queries
/// incur no allocations after the first use. Stale state from previous
/// queries is invalidated lazily via a generation counter.
pub struct SearchRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) dist_map: Vec<i32>,
    pub(crate) results: Vec<PathNode>,
}

impl SearchRange {
    /// Create a new `SearchRange` for the given grid rectangle.
    ///
    /// Fails with [`SearchError::InvalidInput`] if the range is empty.
    pub fn new(rng: Range) -> Result<Self, SearchError> {
        if rng.is_empty() {
            return Err(SearchError::InvalidInput);
        }
        let len = rng.len();
        Ok(Self {
            rng,
            width: rng.width() as usize,
            nodes: vec![Node::default(); len],
            generation: 0,
            dist_map: vec![UNREACHABLE; len],
            results: Vec::new(),
        })
    }

    /// Replace the underlying range, reallocating caches as needed.
    ///
    /// If the new size fits within existing capacity, caches are preserved
    /// and only the generation counter is bumped. Fails with
    /// [`SearchError::InvalidInput`] if the new range is empty.
    pub fn set_range(&mut self, rng: Range) -> Result<(), SearchError> {
        if rng.is_empty() {
            return Err(SearchError::InvalidInput);
        }
        let new_len = rng.len();
        let old_capacity = self.nodes.len();
        self.rng = rng;
        self.width = rng.width() as usize;
        self.results.clear();

        if new_len <= old_capacity {
            // Fits within existing capacity; stale entries are ignored via
            // the generation counter.
            self.generation = self.generation.wrapping_add(1);
            return Ok(());
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
        self.dist_map.clear();
        self.dist_map.resize(new_len, UNREACHABLE);
        Ok(())
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SearchRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rng.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SearchRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rng = Range::deserialize(deserializer)?;
        SearchRange::new(rng).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by [`SearchRange`] queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Empty range, or a source/target coordinate outside the range.
    InvalidInput,
    /// Single-target search exhausted the frontier before reaching the
    /// target.
    Unreachable,
    /// Any-match search completed a full traversal without reaching any
    /// cell satisfying the target predicate.
    NoTargetFound,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "search: empty range or out-of-range coordinate"),
            Self::Unreachable => write!(f, "search: target is not reachable from the source"),
            Self::NoTargetFound => write!(f, "search: no matching cell was reached"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_range() {
        assert_eq!(
            SearchRange::new(Range::default()).err(),
            Some(SearchError::InvalidInput)
        );
        assert_eq!(
            SearchRange::new(Range::new(3, 3, 3, 7)).err(),
            Some(SearchError::InvalidInput)
        );
    }

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut sr = SearchRange::new(Range::new(0, 0, 20, 20)).unwrap();
        let original_cap = sr.nodes.len(); // 400

        sr.set_range(Range::new(0, 0, 5, 5)).unwrap();
        assert_eq!(sr.range(), Range::new(0, 0, 5, 5));
        assert_eq!(sr.nodes.len(), original_cap); // still 400
        assert_eq!(sr.width, 5);
        assert!(sr.generation > 0);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut sr = SearchRange::new(Range::new(0, 0, 5, 5)).unwrap();
        let old_cap = sr.nodes.len(); // 25

        sr.set_range(Range::new(0, 0, 20, 20)).unwrap();
        assert!(sr.nodes.len() > old_cap);
        assert_eq!(sr.nodes.len(), 400);
        assert_eq!(sr.dist_map.len(), 400);
    }

    #[test]
    fn set_range_rejects_empty() {
        let mut sr = SearchRange::new(Range::new(0, 0, 5, 5)).unwrap();
        assert_eq!(
            sr.set_range(Range::default()),
            Err(SearchError::InvalidInput)
        );
    }

    #[test]
    fn idx_point_round_trip() {
        let sr = SearchRange::new(Range::new(2, 3, 7, 9)).unwrap();
        for p in sr.range().iter() {
            let i = sr.idx(p).unwrap();
            assert_eq!(sr.point(i), p);
        }
        assert_eq!(sr.idx(Point::new(7, 3)), None);
        assert_eq!(sr.idx(Point::new(2, 9)), None);
    }

    #[test]
    fn noderef_orders_smallest_first() {
        let mut heap = std::collections::BinaryHeap::new();
        heap.push(NodeRef { idx: 0, dist: 5 });
        heap.push(NodeRef { idx: 1, dist: 2 });
        heap.push(NodeRef { idx: 2, dist: 9 });
        assert_eq!(heap.pop().unwrap().dist, 2);
        assert_eq!(heap.pop().unwrap().dist, 5);
        assert_eq!(heap.pop().unwrap().dist, 9);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Point::new(3, 7),
            dist: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn searchrange_round_trip() {
        let rng = Range::new(1, 2, 10, 20);
        let sr = SearchRange::new(rng).unwrap();
        let json = serde_json::to_string(&sr).unwrap();
        let back: SearchRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back.range(), rng);
        // Caches are freshly initialized (not serialized).
        assert_eq!(back.generation, 0);
        assert_eq!(back.dist_map.len(), rng.len());
    }
}
