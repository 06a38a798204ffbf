//! Batched induced-subgraph extraction over a single partition.
//!
//! For every flattened subgraph vertex `u` of subgraph `k`, the kept edges are the
//! `(u, v)` in `u`'s neighbor list with `v` a member of subgraph `k`. The output size
//! is unknown until every list has been scanned, so extraction runs count-then-fill:
//!
//! 1. count kept neighbors per flattened vertex (parallel, one item per vertex)
//! 2. exclusive scan of the counts; the total sizes the output (barrier)
//! 3. rescan and write kept edges into each vertex's own output range (parallel)
//! 4. gather per-subgraph boundaries from the per-vertex offsets
//!
//! Neighbor order is preserved, self-loops are kept, and multi-edges stay separate.

use crate::concurrency::lanes::Lanes;
use crate::error::Result;
use crate::graph::partition::PartitionedGraph;
use crate::subgraph::assemble::{gather_subgraph_offsets, EdgeBatch};
use crate::subgraph::membership::{MembershipKind, MembershipStrategy};
use crate::subgraph::multi_partition::extract_multi_partition;
use crate::subgraph::options::ExtractOptions;
use crate::subgraph::request::SubgraphBatch;
use crate::subgraph::two_phase::{count_phase, fill_phase, split_by_offsets, try_filled};
use crate::subgraph::validate::validate_request;

/// The output range of one flattened subgraph vertex.
struct EdgeChunk<'a, V, W> {
    majors: &'a mut [V],
    minors: &'a mut [V],
    weights: Option<&'a mut [W]>,
}

fn edge_chunks<'a, V, W>(
    majors: &'a mut [V],
    minors: &'a mut [V],
    weights: Option<&'a mut [W]>,
    offsets: &[usize],
) -> Vec<EdgeChunk<'a, V, W>> {
    let minors = split_by_offsets(minors, offsets);
    let mut weights = weights.map(|w| split_by_offsets(w, offsets).into_iter());
    split_by_offsets(majors, offsets)
        .into_iter()
        .zip(minors)
        .map(|(majors, minors)| EdgeChunk {
            majors,
            minors,
            weights: weights.as_mut().and_then(Iterator::next),
        })
        .collect()
}

/// Extracts induced subgraphs with a fixed configuration and membership strategy.
///
/// The extractor holds no per-call state; one instance can serve concurrent calls
/// over the same read-only graph.
#[derive(Debug, Clone)]
pub struct InducedSubgraphExtractor<M = MembershipKind> {
    options: ExtractOptions,
    lanes: Lanes,
    membership: M,
}

impl Default for InducedSubgraphExtractor<MembershipKind> {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

impl InducedSubgraphExtractor<MembershipKind> {
    /// Creates an extractor using the membership test named in `options`.
    pub fn new(options: ExtractOptions) -> Self {
        let membership = options.membership;
        Self::with_strategy(options, membership)
    }
}

impl<M> InducedSubgraphExtractor<M> {
    /// Creates an extractor with a caller-supplied membership strategy.
    ///
    /// `options.membership` is ignored in favor of `membership`.
    pub fn with_strategy(options: ExtractOptions, membership: M) -> Self {
        let lanes = options.lanes();
        Self {
            options,
            lanes,
            membership,
        }
    }

    /// The configuration this extractor was built with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extracts the induced edges of every subgraph in the request.
    ///
    /// `subgraph_offsets` holds `num_subgraphs + 1` entries; subgraph `k` is
    /// `subgraph_vertices[subgraph_offsets[k]..subgraph_offsets[k + 1]]`, sorted and
    /// duplicate-free, every id local to `graph`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the offsets do not match `num_subgraphs` or the vertex
    ///   count, or, with validation enabled, if any request check fails
    /// - `NotImplemented` if `graph` is split across several partitions; with
    ///   validation enabled the request is checked first
    /// - `AllocationFailure` if the output cannot be sized or reserved
    ///
    /// # Panics
    ///
    /// With validation disabled, a request whose offsets do not start at zero or
    /// descend may panic while locating a vertex's subgraph or slicing its vertex
    /// list. Enable validation for untrusted input.
    pub fn extract<G>(
        &self,
        graph: &G,
        subgraph_offsets: &[usize],
        subgraph_vertices: &[G::Vertex],
        num_subgraphs: usize,
    ) -> Result<EdgeBatch<G::Vertex, G::Weight>>
    where
        G: PartitionedGraph,
        M: MembershipStrategy<G::Vertex>,
    {
        let span = tracing::debug_span!(
            target: "induced::extract",
            "extract_induced_subgraphs",
            num_subgraphs,
            num_vertices = subgraph_vertices.len(),
            weighted = graph.is_weighted()
        );
        let _guard = span.enter();

        let batch = SubgraphBatch::new(subgraph_offsets, subgraph_vertices, num_subgraphs)?;

        let span = &span;
        self.lanes.install(|| {
            span.in_scope(|| {
                if self.options.validate_inputs {
                    validate_request(&self.lanes, graph, &batch)?;
                }
                if graph.is_multi_partition() {
                    return extract_multi_partition(graph, &batch);
                }
                self.extract_local(graph, &batch)
            })
        })
    }

    fn extract_local<G>(
        &self,
        graph: &G,
        batch: &SubgraphBatch<'_, G::Vertex>,
    ) -> Result<EdgeBatch<G::Vertex, G::Weight>>
    where
        G: PartitionedGraph,
        M: MembershipStrategy<G::Vertex>,
    {
        let index = self.membership.prepare(&self.lanes, batch);
        let vertices = batch.vertices();
        let num_vertices = vertices.len();

        // Everything a work item needs: its subgraph, that subgraph's vertex list,
        // and its own neighbor list.
        let item = |i: usize| {
            let k = batch.owner_of(i);
            (k, batch.segment(k), graph.local_edges(vertices[i]))
        };

        let vertex_offsets = count_phase(&self.lanes, num_vertices, |i| {
            let (k, segment, edges) = item(i);
            edges
                .neighbors()
                .iter()
                .filter(|&&v| self.membership.contains(&index, k, segment, v))
                .count()
        })?;
        let total = vertex_offsets[num_vertices];
        tracing::debug!(
            target: "induced::extract",
            total_edges = total,
            "count phase complete"
        );

        let mut majors = try_filled(total, G::Vertex::default())?;
        let mut minors = try_filled(total, G::Vertex::default())?;
        let mut weights = if graph.is_weighted() {
            Some(try_filled(total, G::Weight::default())?)
        } else {
            None
        };

        let chunks = edge_chunks(&mut majors, &mut minors, weights.as_deref_mut(), &vertex_offsets);
        fill_phase(&self.lanes, chunks, |i, chunk| {
            let EdgeChunk {
                majors,
                minors,
                mut weights,
            } = chunk;
            let (k, segment, edges) = item(i);
            let source_weights = edges.weights();
            let mut slot = 0;
            for (j, &v) in edges.neighbors().iter().enumerate() {
                if !self.membership.contains(&index, k, segment, v) {
                    continue;
                }
                majors[slot] = vertices[i];
                minors[slot] = v;
                if let (Some(out), Some(src)) = (weights.as_deref_mut(), source_weights) {
                    out[slot] = src[j];
                }
                slot += 1;
            }
            debug_assert_eq!(slot, majors.len(), "fill disagrees with count for item {i}");
        });

        let subgraph_edge_offsets = gather_subgraph_offsets(&vertex_offsets, batch.offsets())?;
        Ok(EdgeBatch::from_parts(majors, minors, weights, subgraph_edge_offsets))
    }
}

/// Extracts the induced edges of every subgraph in the request with default options.
///
/// This is the one-call form of [`InducedSubgraphExtractor::extract`]; set
/// `validate_inputs` to run the expensive request checks first.
///
/// ```rust
/// use induced::{extract_induced_subgraphs, CsrPartition};
///
/// let graph = CsrPartition::<u32>::from_adjacency(&[vec![1, 2], vec![0, 3], vec![0], vec![1]]);
/// let batch = extract_induced_subgraphs(&graph, &[0, 2, 4], &[0, 1, 2, 3], 2, true).unwrap();
///
/// assert_eq!(batch.edge_majors(), &[0, 1]);
/// assert_eq!(batch.edge_minors(), &[1, 0]);
/// assert_eq!(batch.subgraph_edge_offsets(), &[0, 2, 2]);
/// ```
///
/// # Errors
///
/// See [`InducedSubgraphExtractor::extract`].
pub fn extract_induced_subgraphs<G: PartitionedGraph>(
    graph: &G,
    subgraph_offsets: &[usize],
    subgraph_vertices: &[G::Vertex],
    num_subgraphs: usize,
    validate_inputs: bool,
) -> Result<EdgeBatch<G::Vertex, G::Weight>> {
    InducedSubgraphExtractor::new(ExtractOptions::default().with_validation(validate_inputs)).extract(
        graph,
        subgraph_offsets,
        subgraph_vertices,
        num_subgraphs,
    )
}
