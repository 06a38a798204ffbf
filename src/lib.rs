//! # `induced` - Batched Induced-Subgraph Extraction
//!
//! Extracts, from one large partitioned graph, a batch of *induced subgraphs*: given
//! groups of vertex ids, it returns for each group exactly the edges of the graph whose
//! two endpoints both belong to that group. It is a building block for graph sampling,
//! neighborhood extraction and mini-batch generation over graphs too large to
//! materialize densely.
//!
//! ## Guarantees
//!
//! ### Correctness
//! - **Exact induced edge sets**: for every subgraph `V_i`, the output holds every
//!   `(u, v)` edge of the graph with `u, v ∈ V_i`, multi-edges and self-loops included.
//! - **Contiguous segments**: subgraph `k`'s edges occupy
//!   `subgraph_edge_offsets[k]..subgraph_edge_offsets[k + 1]`, mirroring the request's
//!   own grouping.
//! - **Weight fidelity**: weights are copied, never recomputed, so they are
//!   bit-identical to the source.
//!
//! ### Resource Use
//! - **One exact allocation**: a count phase and an exclusive scan size the output
//!   before anything is written.
//! - **Bounded membership memory**: the default membership test is a binary search
//!   over the request's own sorted vertex lists.
//! - **No shared mutable state**: work items write disjoint output ranges; the graph
//!   and the request are only ever borrowed immutably.
//!
//! ## Architecture
//!
//! 1. **Partition oracle** ([`PartitionedGraph`]): vertex validity, ownership and
//!    neighbor lists. [`CsrPartition`] is a ready-made CSR implementation.
//! 2. **Validator** ([`subgraph::validate`]): optional, caller-toggled request checks.
//! 3. **Extractor** ([`InducedSubgraphExtractor`]): count, scan, fill.
//! 4. **Assembler** ([`EdgeBatch`]): per-subgraph boundaries and the owned result.
//!
//! Graphs split across several partitions are refused with
//! [`ExtractError::NotImplemented`] rather than answered from the local shard alone.
//!
//! ## Example
//!
//! ```rust
//! use induced::{extract_induced_subgraphs, CsrPartition};
//!
//! // 0 -> 1, 2 ; 1 -> 0, 3 ; 2 -> 0 ; 3 -> 1
//! let graph = CsrPartition::<u32>::from_adjacency(&[vec![1, 2], vec![0, 3], vec![0], vec![1]]);
//!
//! // subgraph 0 = {0, 1}, subgraph 1 = {2, 3}
//! let batch = extract_induced_subgraphs(&graph, &[0, 2, 4], &[0, 1, 2, 3], 2, true).unwrap();
//!
//! assert_eq!(batch.subgraph(0).collect::<Vec<_>>(), vec![(0, 1, None), (1, 0, None)]);
//! assert_eq!(batch.subgraph_len(1), 0);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod error;
pub mod graph;
pub mod subgraph;

pub use concurrency::Lanes;
pub use error::{AllocError, ExtractError, InvalidInput, Result};
pub use graph::{CsrPartition, LocalEdges, PartitionedGraph, VertexId};
pub use subgraph::{
    extract_induced_subgraphs,
    EdgeBatch,
    ExtractOptions,
    HashedSearch,
    InducedEdges,
    InducedSubgraphExtractor,
    MembershipKind,
    MembershipStrategy,
    SortedSearch,
    SubgraphBatch,
};
