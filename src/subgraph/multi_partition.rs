//! Extraction over graphs whose adjacency is split across compute units.
//!
//! Not supported yet. A complete version routes each subgraph vertex's neighbor
//! fetch to the partition that owns it, exchanges per-vertex counts and filtered
//! edges across partition boundaries, and merges the partial results before the
//! per-subgraph gather. Until then the call fails instead of returning the edges
//! of the local shard only.

use crate::error::{ExtractError, Result};
use crate::graph::partition::PartitionedGraph;
use crate::subgraph::assemble::EdgeBatch;
use crate::subgraph::request::SubgraphBatch;

/// Refuses multi-partition extraction.
///
/// # Errors
///
/// Always returns `NotImplemented`.
pub fn extract_multi_partition<G: PartitionedGraph>(
    _graph: &G,
    batch: &SubgraphBatch<'_, G::Vertex>,
) -> Result<EdgeBatch<G::Vertex, G::Weight>> {
    tracing::warn!(
        target: "induced::extract",
        num_subgraphs = batch.num_subgraphs(),
        "induced subgraph extraction requested on a multi-partition graph"
    );
    Err(ExtractError::NotImplemented(
        "induced subgraph extraction is not supported for multi-partition graphs",
    ))
}
