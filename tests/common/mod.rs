//! Host-side reference checker for induced subgraph extraction.
//!
//! Recomputes every subgraph's induced edge multiset straight from raw CSR arrays
//! and compares it with an extraction result. Order inside a subgraph is ignored.

#![allow(dead_code)]

use std::fmt::Debug;

use induced::EdgeBatch;

/// Raw CSR arrays of a single-partition graph.
pub struct HostCsr<'a, W> {
    pub offsets: &'a [usize],
    pub indices: &'a [u32],
    pub weights: Option<&'a [W]>,
}

fn sort_edges<W: PartialOrd>(edges: &mut [(u32, u32, Option<W>)]) {
    edges.sort_by(|a, b| {
        (a.0, a.1)
            .cmp(&(b.0, b.1))
            .then_with(|| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
    });
}

/// Panics with a description of the first mismatch between `batch` and the reference.
pub fn induced_subgraph_validate<W>(
    graph: &HostCsr<'_, W>,
    subgraph_offsets: &[usize],
    subgraph_vertices: &[u32],
    batch: &EdgeBatch<u32, W>,
) where
    W: Copy + PartialOrd + Debug,
{
    let num_subgraphs = subgraph_offsets.len() - 1;
    assert_eq!(batch.num_subgraphs(), num_subgraphs, "subgraph count mismatch");
    assert_eq!(
        batch.subgraph_edge_offsets().last().copied(),
        Some(batch.len()),
        "last subgraph edge offset must equal the edge count"
    );
    assert_eq!(
        batch.is_weighted(),
        graph.weights.is_some(),
        "weights must be present exactly when the graph is weighted"
    );

    for k in 0..num_subgraphs {
        let segment = &subgraph_vertices[subgraph_offsets[k]..subgraph_offsets[k + 1]];

        let mut expected = Vec::new();
        for &u in segment {
            let row = u as usize;
            for e in graph.offsets[row]..graph.offsets[row + 1] {
                let v = graph.indices[e];
                if segment.binary_search(&v).is_ok() {
                    expected.push((u, v, graph.weights.map(|w| w[e])));
                }
            }
        }

        let mut actual: Vec<_> = batch.subgraph(k).collect();
        sort_edges(&mut expected);
        sort_edges(&mut actual);
        assert_eq!(actual, expected, "induced edges of subgraph {k} differ");
    }
}

/// Builds flattened `(offsets, vertices)` from per-subgraph vertex sets,
/// sorting and de-duplicating each set.
pub fn flatten(groups: &[Vec<u32>]) -> (Vec<usize>, Vec<u32>) {
    let mut offsets = vec![0];
    let mut vertices = Vec::new();
    for group in groups {
        let mut g = group.clone();
        g.sort_unstable();
        g.dedup();
        vertices.extend(g);
        offsets.push(vertices.len());
    }
    (offsets, vertices)
}
