//! Vertex id width.
//!
//! Vertex ids are plain primitive integers. Signed widths are allowed, but a
//! negative id never maps to an index and is therefore never a valid vertex.

use core::fmt::Debug;
use core::hash::Hash;

use num_traits::{NumCast, PrimInt};

/// An integer type usable as a vertex id.
///
/// Blanket-implemented for every primitive integer.
pub trait VertexId: PrimInt + Default + Hash + Debug + Send + Sync + 'static {
    /// Converts the id into a dense index.
    ///
    /// Returns `None` for negative ids and for ids that do not fit `usize`.
    #[inline]
    fn to_index(self) -> Option<usize> {
        self.to_usize()
    }

    /// Converts a dense index back into an id of this width.
    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        <Self as NumCast>::from(index)
    }
}

impl<T> VertexId for T where T: PrimInt + Default + Hash + Debug + Send + Sync + 'static {}
