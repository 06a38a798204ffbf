//! Error taxonomy for subgraph extraction.
//!
//! Every failure aborts the whole call; no partial edge batch is ever returned.

use std::collections::TryReserveError;

/// A structural violation found in a subgraph request.
///
/// The `Display` text of each variant is stable and is what callers see through
/// [`ExtractError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    /// `subgraph_offsets.len()` does not equal `num_subgraphs + 1`.
    #[error("offsets length {len} does not match num_subgraphs + 1 = {expected}")]
    OffsetsLength {
        /// Observed length.
        len: usize,
        /// Required length.
        expected: usize,
    },
    /// The last offset does not equal the number of flattened vertices.
    #[error("last offset {last} does not match vertex count {vertices}")]
    OffsetsEnd {
        /// Observed last offset.
        last: usize,
        /// Length of `subgraph_vertices`.
        vertices: usize,
    },
    /// `subgraph_offsets[0] != 0`.
    #[error("offsets must start at zero")]
    OffsetsStart,
    /// `subgraph_offsets[position] > subgraph_offsets[position + 1]`.
    #[error("offsets not sorted (at position {position})")]
    OffsetsUnsorted {
        /// Index of the first descending pair.
        position: usize,
    },
    /// A flattened vertex id is out of range or owned by another partition.
    #[error("vertex id invalid or not local (at position {position})")]
    VertexNotLocal {
        /// Index into `subgraph_vertices`.
        position: usize,
    },
    /// A subgraph's vertex list is not in ascending order.
    #[error("subgraph vertex list not sorted/unique (subgraph {subgraph} is not ascending)")]
    SegmentUnsorted {
        /// The offending subgraph.
        subgraph: usize,
    },
    /// A subgraph's vertex list contains the same id twice.
    #[error("subgraph vertex list not sorted/unique (subgraph {subgraph} repeats a vertex)")]
    SegmentDuplicate {
        /// The offending subgraph.
        subgraph: usize,
    },
}

/// Why an output buffer could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// The allocator refused to reserve the buffer.
    #[error("could not reserve {requested} output elements")]
    Reserve {
        /// Number of elements that was requested.
        requested: usize,
        /// The allocator's refusal.
        #[source]
        source: TryReserveError,
    },
    /// The per-item counts sum past `usize::MAX`.
    #[error("output size overflows usize at item {item}")]
    CountOverflow {
        /// First item whose count no longer fits.
        item: usize,
    },
}

/// The error type returned by every extraction entry point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The request violates the input contract. Only raised by checks that run
    /// before any extraction work starts.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidInput),
    /// The requested operation is not supported for this graph layout.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    /// The output buffers could not be sized or allocated.
    #[error("allocation failure: {0}")]
    AllocationFailure(#[from] AllocError),
}

impl ExtractError {
    /// Returns the input violation, if this is an `InvalidArgument` error.
    pub fn invalid_input(&self) -> Option<InvalidInput> {
        match self {
            Self::InvalidArgument(kind) => Some(*kind),
            _ => None,
        }
    }

    pub(crate) fn reserve_failed(requested: usize, source: TryReserveError) -> Self {
        AllocError::Reserve { requested, source }.into()
    }
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, ExtractError>;
