//! Borrowed view over a batch of subgraph requests.

use crate::error::{InvalidInput, Result};

/// A batch of vertex groups in CSR-style grouping.
///
/// Subgraph `k` is `vertices[offsets[k]..offsets[k + 1]]`. The caller keeps
/// ownership of both slices; the view only borrows them for the duration of a call.
#[derive(Debug, Clone, Copy)]
pub struct SubgraphBatch<'a, V> {
    offsets: &'a [usize],
    vertices: &'a [V],
}

impl<'a, V: Copy> SubgraphBatch<'a, V> {
    /// Wraps a request after checking its shape.
    ///
    /// Only the O(1) shape is checked here: `offsets` must hold `num_subgraphs + 1`
    /// entries and its last entry must equal `vertices.len()`. Ordering and vertex
    /// ownership are the job of [`crate::subgraph::validate`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the shape does not match.
    pub fn new(offsets: &'a [usize], vertices: &'a [V], num_subgraphs: usize) -> Result<Self> {
        let expected = num_subgraphs.saturating_add(1);
        if offsets.len() != expected {
            return Err(InvalidInput::OffsetsLength {
                len: offsets.len(),
                expected,
            }
            .into());
        }
        let last = offsets[num_subgraphs];
        if last != vertices.len() {
            return Err(InvalidInput::OffsetsEnd {
                last,
                vertices: vertices.len(),
            }
            .into());
        }
        Ok(Self { offsets, vertices })
    }

    /// Number of subgraphs in the batch.
    #[inline]
    pub fn num_subgraphs(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of flattened subgraph vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The per-subgraph start offsets, `num_subgraphs + 1` entries.
    #[inline]
    pub fn offsets(&self) -> &'a [usize] {
        self.offsets
    }

    /// The flattened vertex ids.
    #[inline]
    pub fn vertices(&self) -> &'a [V] {
        self.vertices
    }

    /// The sorted vertex list of subgraph `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= num_subgraphs()` or if the offsets of `k` are descending.
    #[inline]
    pub fn segment(&self, k: usize) -> &'a [V] {
        &self.vertices[self.offsets[k]..self.offsets[k + 1]]
    }

    /// The subgraph that flattened vertex `i` belongs to.
    ///
    /// Computed as `upper_bound(offsets, i) - 1`, so empty subgraphs sharing the
    /// same start offset are skipped over.
    ///
    /// # Panics
    ///
    /// Panics if `i` lies before `offsets[0]`, which only happens for offsets
    /// that do not start at zero.
    #[inline]
    pub fn owner_of(&self, i: usize) -> usize {
        let upper = self.offsets.partition_point(|&o| o <= i);
        assert!(upper > 0, "vertex position {i} precedes the first subgraph offset");
        upper - 1
    }
}
