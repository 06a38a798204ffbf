//! Extraction configuration.

use serde::{Deserialize, Serialize};

use crate::concurrency::lanes::Lanes;
use crate::subgraph::membership::MembershipKind;

/// Knobs for [`crate::InducedSubgraphExtractor`].
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```rust
/// use induced::{ExtractOptions, MembershipKind};
///
/// let opts = ExtractOptions::from_json(r#"{ "validate_inputs": true, "membership": "hashed" }"#).unwrap();
/// assert!(opts.validate_inputs);
/// assert_eq!(opts.membership, MembershipKind::Hashed);
/// assert_eq!(opts.num_threads, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Run the expensive request checks before extracting.
    pub validate_inputs: bool,
    /// Membership test used by both phases.
    pub membership: MembershipKind,
    /// Phases with fewer work items than this run on the calling thread.
    pub min_parallel_len: usize,
    /// Size of a dedicated worker pool; `None` shares the global pool.
    pub num_threads: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            validate_inputs: false,
            membership: MembershipKind::Sorted,
            min_parallel_len: Lanes::DEFAULT_MIN_PARALLEL_LEN,
            num_threads: None,
        }
    }
}

impl ExtractOptions {
    /// Parses options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed documents or unknown variant names.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Enables or disables the expensive request checks.
    #[must_use]
    pub fn with_validation(mut self, validate_inputs: bool) -> Self {
        self.validate_inputs = validate_inputs;
        self
    }

    /// Selects the membership test.
    #[must_use]
    pub fn with_membership(mut self, membership: MembershipKind) -> Self {
        self.membership = membership;
        self
    }

    /// Sets the parallelism threshold.
    #[must_use]
    pub fn with_min_parallel_len(mut self, min_parallel_len: usize) -> Self {
        self.min_parallel_len = min_parallel_len;
        self
    }

    /// Requests a dedicated worker pool of `num_threads` threads.
    #[must_use]
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub(crate) fn lanes(&self) -> Lanes {
        Lanes::new(self.min_parallel_len, self.num_threads)
    }
}
