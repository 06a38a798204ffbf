//! Graph-side building blocks consumed by extraction.
//!
//! - `vertex`: the integer width of vertex ids
//! - `partition`: the [`PartitionedGraph`] oracle trait
//! - `csr_partition`: a CSR shard implementing it

pub mod csr_partition;
pub mod partition;
pub mod vertex;

pub use csr_partition::CsrPartition;
pub use partition::{LocalEdges, PartitionedGraph};
pub use vertex::VertexId;
