//! Result assembly: per-subgraph boundaries and the owned edge batch.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::subgraph::two_phase::try_filled;

/// Derives per-subgraph edge boundaries from per-vertex output offsets.
///
/// `subgraph_edge_offsets[k] = vertex_offsets[subgraph_offsets[k]]`. This holds because
/// the vertices of one subgraph are contiguous in the flattened request and the scan
/// lays their output ranges out back to back.
///
/// # Errors
///
/// Returns `AllocationFailure` if the boundary array cannot be reserved.
///
/// # Panics
///
/// Panics if a subgraph offset exceeds `vertex_offsets.len() - 1`.
pub fn gather_subgraph_offsets(vertex_offsets: &[usize], subgraph_offsets: &[usize]) -> Result<Vec<usize>> {
    let mut out = try_filled(subgraph_offsets.len(), 0usize)?;
    for (slot, &o) in out.iter_mut().zip(subgraph_offsets) {
        *slot = vertex_offsets[o];
    }
    Ok(out)
}

/// The induced edges of a batch of subgraphs.
///
/// Edges are stored as parallel columns. The edges of subgraph `k` occupy
/// `subgraph_edge_offsets[k]..subgraph_edge_offsets[k + 1]`; within that run they
/// are grouped by major vertex in request order, and each major's minors keep the
/// order of the source neighbor list.
///
/// Deserialization checks the column lengths and the boundary array, so a
/// decoded batch upholds the same layout as one produced by extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeBatch<V, W> {
    edge_majors: Vec<V>,
    edge_minors: Vec<V>,
    edge_weights: Option<Vec<W>>,
    subgraph_edge_offsets: Vec<usize>,
}

impl<V: Copy, W: Copy> EdgeBatch<V, W> {
    pub(crate) fn from_parts(
        edge_majors: Vec<V>,
        edge_minors: Vec<V>,
        edge_weights: Option<Vec<W>>,
        subgraph_edge_offsets: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(edge_majors.len(), edge_minors.len());
        debug_assert!(edge_weights.as_ref().map_or(true, |w| w.len() == edge_majors.len()));
        debug_assert_eq!(subgraph_edge_offsets.last().copied(), Some(edge_majors.len()));
        Self {
            edge_majors,
            edge_minors,
            edge_weights,
            subgraph_edge_offsets,
        }
    }

    /// Total number of edges across all subgraphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.edge_majors.len()
    }

    /// Returns `true` if no subgraph kept any edge.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edge_majors.is_empty()
    }

    /// Number of subgraphs the batch was extracted for.
    #[inline]
    pub fn num_subgraphs(&self) -> usize {
        self.subgraph_edge_offsets.len().saturating_sub(1)
    }

    /// Returns `true` if the batch carries edge weights.
    #[inline]
    pub fn is_weighted(&self) -> bool {
        self.edge_weights.is_some()
    }

    /// Source endpoint of every edge.
    pub fn edge_majors(&self) -> &[V] {
        &self.edge_majors
    }

    /// Destination endpoint of every edge.
    pub fn edge_minors(&self) -> &[V] {
        &self.edge_minors
    }

    /// Weight of every edge, if the source graph is weighted.
    pub fn edge_weights(&self) -> Option<&[W]> {
        self.edge_weights.as_deref()
    }

    /// Per-subgraph edge boundaries, `num_subgraphs + 1` entries.
    pub fn subgraph_edge_offsets(&self) -> &[usize] {
        &self.subgraph_edge_offsets
    }

    /// Number of edges induced by subgraph `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= num_subgraphs()`.
    pub fn subgraph_len(&self, k: usize) -> usize {
        self.subgraph_edge_offsets[k + 1] - self.subgraph_edge_offsets[k]
    }

    /// Iterates the edges of subgraph `k` as `(major, minor, weight)`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= num_subgraphs()`.
    pub fn subgraph(&self, k: usize) -> InducedEdges<'_, V, W> {
        let range = self.subgraph_edge_offsets[k]..self.subgraph_edge_offsets[k + 1];
        InducedEdges {
            majors: &self.edge_majors[range.clone()],
            minors: &self.edge_minors[range.clone()],
            weights: self.edge_weights.as_ref().map(|w| &w[range]),
            pos: 0,
        }
    }

    /// Releases the columns to the caller:
    /// `(edge_majors, edge_minors, edge_weights, subgraph_edge_offsets)`.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(self) -> (Vec<V>, Vec<V>, Option<Vec<W>>, Vec<usize>) {
        (
            self.edge_majors,
            self.edge_minors,
            self.edge_weights,
            self.subgraph_edge_offsets,
        )
    }
}

/// Checks that the columns agree in length and that the boundaries run
/// monotonically from zero to the edge count.
fn check_layout(
    majors: usize,
    minors: usize,
    weights: Option<usize>,
    offsets: &[usize],
) -> core::result::Result<(), &'static str> {
    if minors != majors {
        return Err("edge_minors and edge_majors differ in length");
    }
    if weights.is_some_and(|w| w != majors) {
        return Err("edge_weights and edge_majors differ in length");
    }
    if offsets.first() != Some(&0) {
        return Err("subgraph_edge_offsets must start at zero");
    }
    if offsets.windows(2).any(|w| w[0] > w[1]) {
        return Err("subgraph_edge_offsets not sorted");
    }
    if offsets.last() != Some(&majors) {
        return Err("last subgraph edge offset does not match the edge count");
    }
    Ok(())
}

impl<'de, V, W> Deserialize<'de> for EdgeBatch<V, W>
where
    V: Deserialize<'de>,
    W: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Columns<V, W> {
            edge_majors: Vec<V>,
            edge_minors: Vec<V>,
            edge_weights: Option<Vec<W>>,
            subgraph_edge_offsets: Vec<usize>,
        }

        let c = Columns::<V, W>::deserialize(deserializer)?;
        check_layout(
            c.edge_majors.len(),
            c.edge_minors.len(),
            c.edge_weights.as_ref().map(Vec::len),
            &c.subgraph_edge_offsets,
        )
        .map_err(<D::Error as de::Error>::custom)?;
        Ok(Self {
            edge_majors: c.edge_majors,
            edge_minors: c.edge_minors,
            edge_weights: c.edge_weights,
            subgraph_edge_offsets: c.subgraph_edge_offsets,
        })
    }
}

/// Iterator over the edges of one subgraph.
#[derive(Debug, Clone)]
pub struct InducedEdges<'a, V, W> {
    majors: &'a [V],
    minors: &'a [V],
    weights: Option<&'a [W]>,
    pos: usize,
}

impl<'a, V: Copy, W: Copy> Iterator for InducedEdges<'a, V, W> {
    type Item = (V, V, Option<W>);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.pos;
        if i >= self.majors.len() {
            return None;
        }
        self.pos += 1;
        Some((self.majors[i], self.minors[i], self.weights.map(|w| w[i])))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.majors.len() - self.pos;
        (rest, Some(rest))
    }
}

impl<'a, V: Copy, W: Copy> ExactSizeIterator for InducedEdges<'a, V, W> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_skips_to_subgraph_starts() {
        // Three subgraphs over five flattened vertices: {v0, v1}, {}, {v2, v3, v4}.
        let vertex_offsets = [0, 2, 3, 3, 7, 8];
        let subgraph_offsets = [0, 2, 2, 5];
        assert_eq!(
            gather_subgraph_offsets(&vertex_offsets, &subgraph_offsets).unwrap(),
            vec![0, 3, 3, 8]
        );
    }

    #[test]
    fn test_batch_views() {
        let batch = EdgeBatch::from_parts(
            vec![0u32, 1, 5],
            vec![1u32, 0, 5],
            Some(vec![0.5f32, 0.25, 2.0]),
            vec![0, 2, 2, 3],
        );

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.num_subgraphs(), 3);
        assert!(batch.is_weighted());
        assert_eq!(batch.subgraph_len(1), 0);
        assert_eq!(batch.subgraph(1).count(), 0);
        assert_eq!(
            batch.subgraph(0).collect::<Vec<_>>(),
            vec![(0, 1, Some(0.5)), (1, 0, Some(0.25))]
        );
        assert_eq!(batch.subgraph(2).len(), 1);

        let (majors, minors, weights, offsets) = batch.into_parts();
        assert_eq!(majors, vec![0, 1, 5]);
        assert_eq!(minors, vec![1, 0, 5]);
        assert_eq!(weights, Some(vec![0.5, 0.25, 2.0]));
        assert_eq!(offsets, vec![0, 2, 2, 3]);
    }

    #[test]
    fn test_batch_serde_round_trip() {
        let batch: EdgeBatch<u32, f32> = EdgeBatch::from_parts(vec![2], vec![3], None, vec![0, 1]);
        let json = serde_json::to_string(&batch).unwrap();
        let back: EdgeBatch<u32, f32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, batch);
        assert!(!back.is_weighted());
    }

    #[test]
    fn test_batch_deserialize_rejects_broken_layout() {
        let cases = [
            (r#"{"edge_majors":[1,2],"edge_minors":[3],"edge_weights":null,"subgraph_edge_offsets":[0,2]}"#, "differ in length"),
            (r#"{"edge_majors":[1],"edge_minors":[3],"edge_weights":[0.5,1.5],"subgraph_edge_offsets":[0,1]}"#, "differ in length"),
            (r#"{"edge_majors":[1],"edge_minors":[3],"edge_weights":null,"subgraph_edge_offsets":[]}"#, "start at zero"),
            (r#"{"edge_majors":[1],"edge_minors":[3],"edge_weights":null,"subgraph_edge_offsets":[0,5,1]}"#, "not sorted"),
            (r#"{"edge_majors":[1],"edge_minors":[3],"edge_weights":null,"subgraph_edge_offsets":[0,4]}"#, "edge count"),
        ];

        for (json, message) in cases {
            let err = serde_json::from_str::<EdgeBatch<u32, f32>>(json).unwrap_err();
            assert!(err.to_string().contains(message), "{json}: {err}");
        }
    }
}
