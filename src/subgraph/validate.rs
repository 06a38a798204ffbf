//! Expensive structural checks on a subgraph request.
//!
//! These checks cost more than the extraction's per-vertex bookkeeping (every id is
//! classified, every segment is scanned) and are meant for debugging and for
//! untrusted input. Each check is an independent parallel predicate that reports the
//! lowest violating position, so the error a caller sees does not depend on scheduling.
//!
//! Sortedness and uniqueness are separate checks: a segment can be ascending and still
//! repeat an id, and single-element segments trivially pass both.

use crate::concurrency::lanes::Lanes;
use crate::error::{InvalidInput, Result};
use crate::graph::partition::PartitionedGraph;
use crate::subgraph::request::SubgraphBatch;

/// Runs every check in order and returns the first violation.
///
/// # Errors
///
/// Returns `InvalidArgument` describing the first failed check.
pub fn validate_request<G: PartitionedGraph>(
    lanes: &Lanes,
    graph: &G,
    batch: &SubgraphBatch<'_, G::Vertex>,
) -> Result<()> {
    check_offsets_start_at_zero(batch)?;
    check_offsets_sorted(lanes, batch)?;
    check_vertices_local(lanes, graph, batch)?;
    check_segments_sorted(lanes, batch)?;
    check_segments_unique(lanes, batch)?;
    tracing::trace!(
        target: "induced::validate",
        num_subgraphs = batch.num_subgraphs(),
        num_vertices = batch.num_vertices(),
        "request passed validation"
    );
    Ok(())
}

/// `subgraph_offsets[0] == 0`.
///
/// # Errors
///
/// Returns `InvalidArgument(OffsetsStart)` otherwise.
pub fn check_offsets_start_at_zero<V: Copy>(batch: &SubgraphBatch<'_, V>) -> Result<()> {
    if batch.offsets()[0] == 0 {
        Ok(())
    } else {
        Err(InvalidInput::OffsetsStart.into())
    }
}

/// `subgraph_offsets` is non-decreasing over its full length.
///
/// # Errors
///
/// Returns `InvalidArgument(OffsetsUnsorted)` with the first descending pair.
pub fn check_offsets_sorted<V: Copy>(lanes: &Lanes, batch: &SubgraphBatch<'_, V>) -> Result<()> {
    let offsets = batch.offsets();
    match lanes.find_first(offsets.len() - 1, |i| offsets[i] > offsets[i + 1]) {
        None => Ok(()),
        Some(position) => Err(InvalidInput::OffsetsUnsorted { position }.into()),
    }
}

/// Every flattened id is a valid vertex owned by this partition.
///
/// # Errors
///
/// Returns `InvalidArgument(VertexNotLocal)` with the first offending position.
pub fn check_vertices_local<G: PartitionedGraph>(
    lanes: &Lanes,
    graph: &G,
    batch: &SubgraphBatch<'_, G::Vertex>,
) -> Result<()> {
    let vertices = batch.vertices();
    let bad = lanes.find_first(vertices.len(), |i| {
        let v = vertices[i];
        !(graph.is_valid_vertex(v) && graph.is_local_vertex(v))
    });
    match bad {
        None => Ok(()),
        Some(position) => Err(InvalidInput::VertexNotLocal { position }.into()),
    }
}

/// Every subgraph's vertex list is in ascending order (ties allowed).
///
/// Assumes the offsets already passed [`check_offsets_sorted`].
///
/// # Errors
///
/// Returns `InvalidArgument(SegmentUnsorted)` with the first offending subgraph.
pub fn check_segments_sorted<V: Copy + PartialOrd + Sync>(
    lanes: &Lanes,
    batch: &SubgraphBatch<'_, V>,
) -> Result<()> {
    let bad = lanes.find_first(batch.num_subgraphs(), |k| {
        batch.segment(k).windows(2).any(|w| w[0] > w[1])
    });
    match bad {
        None => Ok(()),
        Some(subgraph) => Err(InvalidInput::SegmentUnsorted { subgraph }.into()),
    }
}

/// No subgraph's vertex list holds the same id in two adjacent slots.
///
/// On a sorted segment this is exactly "no duplicates".
///
/// # Errors
///
/// Returns `InvalidArgument(SegmentDuplicate)` with the first offending subgraph.
pub fn check_segments_unique<V: Copy + PartialEq + Sync>(
    lanes: &Lanes,
    batch: &SubgraphBatch<'_, V>,
) -> Result<()> {
    let bad = lanes.find_first(batch.num_subgraphs(), |k| {
        batch.segment(k).windows(2).any(|w| w[0] == w[1])
    });
    match bad {
        None => Ok(()),
        Some(subgraph) => Err(InvalidInput::SegmentDuplicate { subgraph }.into()),
    }
}
