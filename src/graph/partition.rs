//! The neighbor-list and vertex-validity oracle consumed by extraction.
//!
//! Extraction never builds or mutates a graph. It only asks a [`PartitionedGraph`]
//! which ids are valid, which are owned locally, and what a local vertex's
//! neighbor list looks like.

use crate::graph::vertex::VertexId;

/// A borrowed neighbor list of one local vertex.
///
/// `weights`, when present, is parallel to `neighbors`.
#[derive(Debug, Clone, Copy)]
pub struct LocalEdges<'a, V, W> {
    neighbors: &'a [V],
    weights: Option<&'a [W]>,
}

impl<'a, V: Copy, W: Copy> LocalEdges<'a, V, W> {
    /// Wraps a neighbor slice and its optional weights.
    ///
    /// # Panics
    ///
    /// Panics if `weights` is present and its length differs from `neighbors`.
    #[inline]
    pub fn new(neighbors: &'a [V], weights: Option<&'a [W]>) -> Self {
        if let Some(w) = weights {
            assert_eq!(w.len(), neighbors.len(), "weights must be parallel to neighbors");
        }
        Self { neighbors, weights }
    }

    /// An edge list with no neighbors.
    #[inline]
    pub fn empty() -> Self {
        Self {
            neighbors: &[],
            weights: None,
        }
    }

    /// Number of neighbors, counting multi-edges separately.
    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbor ids in storage order.
    #[inline]
    pub fn neighbors(&self) -> &'a [V] {
        self.neighbors
    }

    /// Edge weights in storage order, if the graph is weighted.
    #[inline]
    pub fn weights(&self) -> Option<&'a [W]> {
        self.weights
    }

    /// Iterates `(neighbor, weight)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (V, Option<W>)> + 'a {
        let weights = self.weights;
        self.neighbors
            .iter()
            .enumerate()
            .map(move |(i, &v)| (v, weights.map(|w| w[i])))
    }
}

/// A graph (or one shard of a split graph) as seen by the extractor.
///
/// Implementations must be safe to query from many threads at once; the
/// extractor only ever holds `&self`.
pub trait PartitionedGraph: Sync {
    /// Vertex id type.
    type Vertex: VertexId;
    /// Edge weight type. Unweighted graphs still name one.
    type Weight: Copy + Default + Send + Sync;

    /// Returns `true` if `v` names a vertex of the whole graph.
    fn is_valid_vertex(&self, v: Self::Vertex) -> bool;

    /// Returns `true` if `v` is owned by this partition.
    fn is_local_vertex(&self, v: Self::Vertex) -> bool;

    /// Returns the neighbor list of a local vertex.
    ///
    /// Vertices that are not local yield an empty list.
    fn local_edges(&self, v: Self::Vertex) -> LocalEdges<'_, Self::Vertex, Self::Weight>;

    /// Returns `true` if every local edge list carries weights.
    fn is_weighted(&self) -> bool;

    /// Returns `true` if the adjacency is split across more than one compute unit.
    fn is_multi_partition(&self) -> bool;
}

impl<G: PartitionedGraph + ?Sized> PartitionedGraph for &G {
    type Vertex = G::Vertex;
    type Weight = G::Weight;

    #[inline]
    fn is_valid_vertex(&self, v: Self::Vertex) -> bool {
        (**self).is_valid_vertex(v)
    }

    #[inline]
    fn is_local_vertex(&self, v: Self::Vertex) -> bool {
        (**self).is_local_vertex(v)
    }

    #[inline]
    fn local_edges(&self, v: Self::Vertex) -> LocalEdges<'_, Self::Vertex, Self::Weight> {
        (**self).local_edges(v)
    }

    #[inline]
    fn is_weighted(&self) -> bool {
        (**self).is_weighted()
    }

    #[inline]
    fn is_multi_partition(&self) -> bool {
        (**self).is_multi_partition()
    }
}
