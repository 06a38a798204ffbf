//! Batched induced-subgraph extraction.
//!
//! A request is a flattened, CSR-grouped list of vertex sets ([`SubgraphBatch`]).
//! Extraction is organized in the same layers it runs in:
//! - `validate`: optional expensive checks on the request
//! - `membership`: the per-neighbor "is it in my subgraph?" test
//! - `two_phase`: the generic count/scan/fill pipeline
//! - `extract`: the single-partition extractor built on the three above
//! - `multi_partition`: the (unsupported) split-graph route
//! - `assemble`: per-subgraph boundaries and the owned [`EdgeBatch`]

pub mod assemble;
pub mod extract;
pub mod membership;
pub mod multi_partition;
pub mod options;
pub mod request;
pub mod two_phase;
pub mod validate;

pub use assemble::{EdgeBatch, InducedEdges};
pub use extract::{extract_induced_subgraphs, InducedSubgraphExtractor};
pub use membership::{HashedSearch, MembershipKind, MembershipStrategy, SortedSearch};
pub use options::ExtractOptions;
pub use request::SubgraphBatch;
