//! Membership tests: "is neighbor `v` part of subgraph `k`?".
//!
//! The default answers by binary search over the subgraph's sorted vertex list and
//! needs no memory beyond the request itself. When subgraphs are small compared to
//! the degree of their vertices, a per-subgraph hash set answers in O(1) instead;
//! [`HashedSearch`] builds those sets once per call.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::concurrency::lanes::Lanes;
use crate::graph::vertex::VertexId;
use crate::subgraph::request::SubgraphBatch;

/// A strategy for testing subgraph membership during extraction.
///
/// `prepare` runs once per call before the count phase; `contains` runs once per
/// scanned neighbor in both phases and must give the same answer both times.
pub trait MembershipStrategy<V: VertexId>: Sync {
    /// Per-call lookup state.
    type Index: Sync;

    /// Builds the lookup state for a request.
    fn prepare(&self, lanes: &Lanes, batch: &SubgraphBatch<'_, V>) -> Self::Index;

    /// Returns `true` if `v` belongs to subgraph `k`, whose sorted vertex list is `segment`.
    fn contains(&self, index: &Self::Index, k: usize, segment: &[V], v: V) -> bool;
}

/// Binary search against the sorted segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedSearch;

impl<V: VertexId> MembershipStrategy<V> for SortedSearch {
    type Index = ();

    #[inline]
    fn prepare(&self, _lanes: &Lanes, _batch: &SubgraphBatch<'_, V>) -> Self::Index {}

    #[inline]
    fn contains(&self, _index: &(), _k: usize, segment: &[V], v: V) -> bool {
        segment.binary_search(&v).is_ok()
    }
}

/// One hash set per subgraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedSearch;

impl<V: VertexId> MembershipStrategy<V> for HashedSearch {
    type Index = Vec<FxHashSet<V>>;

    fn prepare(&self, lanes: &Lanes, batch: &SubgraphBatch<'_, V>) -> Self::Index {
        lanes.map(batch.num_subgraphs(), |k| {
            batch.segment(k).iter().copied().collect::<FxHashSet<V>>()
        })
    }

    #[inline]
    fn contains(&self, index: &Self::Index, k: usize, _segment: &[V], v: V) -> bool {
        index[k].contains(&v)
    }
}

/// Configuration-level choice of membership strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipKind {
    /// [`SortedSearch`].
    #[default]
    Sorted,
    /// [`HashedSearch`].
    Hashed,
}

/// Lookup state for [`MembershipKind`].
#[derive(Debug)]
pub enum KindIndex<V> {
    /// No state; binary search needs none.
    Sorted,
    /// One set per subgraph.
    Hashed(Vec<FxHashSet<V>>),
}

impl<V: VertexId> MembershipStrategy<V> for MembershipKind {
    type Index = KindIndex<V>;

    fn prepare(&self, lanes: &Lanes, batch: &SubgraphBatch<'_, V>) -> Self::Index {
        match self {
            Self::Sorted => KindIndex::Sorted,
            Self::Hashed => KindIndex::Hashed(HashedSearch.prepare(lanes, batch)),
        }
    }

    #[inline]
    fn contains(&self, index: &Self::Index, k: usize, segment: &[V], v: V) -> bool {
        match index {
            KindIndex::Sorted => SortedSearch.contains(&(), k, segment, v),
            KindIndex::Hashed(sets) => HashedSearch.contains(sets, k, segment, v),
        }
    }
}
