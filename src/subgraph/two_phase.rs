//! Count-then-fill: one exact allocation for an output of unknown size.
//!
//! 1. **Count**: every work item reports how many output elements it will produce.
//! 2. **Scan**: an exclusive prefix sum turns counts into start offsets; the last
//!    offset is the exact total and sizes the output.
//! 3. **Fill**: the output is split into disjoint per-item chunks at those offsets
//!    and every item writes its own chunk.
//!
//! Items never share mutable state. The scan is the only barrier, and it runs on the
//! calling thread between the two parallel phases.

use crate::concurrency::lanes::Lanes;
use crate::error::{AllocError, ExtractError, Result};

/// Splits `slice` into consecutive chunks of lengths `offsets[i + 1] - offsets[i]`.
///
/// # Panics
///
/// Panics if `offsets` is descending or overruns `slice`.
pub fn split_by_offsets<'a, T>(slice: &'a mut [T], offsets: &[usize]) -> Vec<&'a mut [T]> {
    let mut rest = slice;
    let mut chunks = Vec::with_capacity(offsets.len().saturating_sub(1));
    for w in offsets.windows(2) {
        let (head, tail) = core::mem::take(&mut rest).split_at_mut(w[1] - w[0]);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

/// Exclusive prefix sum: `n` counts in, `n + 1` offsets out, starting at zero.
///
/// # Errors
///
/// Returns `AllocationFailure(CountOverflow)` if the total does not fit `usize`.
pub fn exclusive_scan(counts: &[usize]) -> Result<Vec<usize>> {
    let mut offsets = try_filled(counts.len() + 1, 0usize)?;
    let mut acc = 0usize;
    for (item, (slot, &c)) in offsets[1..].iter_mut().zip(counts).enumerate() {
        acc = acc
            .checked_add(c)
            .ok_or(AllocError::CountOverflow { item })?;
        *slot = acc;
    }
    Ok(offsets)
}

/// Allocates `len` copies of `value`, surfacing allocation failure instead of aborting.
///
/// # Errors
///
/// Returns `AllocationFailure(Reserve)` carrying the allocator's error if the
/// buffer cannot be reserved.
pub fn try_filled<T: Copy>(len: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|e| ExtractError::reserve_failed(len, e))?;
    v.resize(len, value);
    Ok(v)
}

/// Count phase plus scan: runs `count` for every item and returns the `items + 1`
/// start offsets. The last offset is the exact output size.
///
/// This is the barrier between the two parallel phases; nothing may be written
/// until it returns.
///
/// # Errors
///
/// Returns `AllocationFailure` if the total does not fit `usize`.
pub fn count_phase<C>(lanes: &Lanes, items: usize, count: C) -> Result<Vec<usize>>
where
    C: Fn(usize) -> usize + Sync + Send,
{
    let counts = lanes.map(items, count);
    exclusive_scan(&counts)
}

/// Fill phase: hands every item its own pre-sized chunk of the output.
///
/// `chunks[i]` must be exactly as long as item `i`'s count.
pub fn fill_phase<Ch, F>(lanes: &Lanes, chunks: Vec<Ch>, fill: F)
where
    Ch: Send,
    F: Fn(usize, Ch) + Sync + Send,
{
    lanes.for_each(chunks, fill);
}

/// Runs the full count/scan/fill pipeline for a single output column.
///
/// Returns the `items + 1` per-item offsets together with the filled column.
///
/// # Errors
///
/// Returns `AllocationFailure` if the output cannot be sized or reserved.
pub fn count_then_fill<T, C, F>(
    lanes: &Lanes,
    items: usize,
    count: C,
    fill: F,
) -> Result<(Vec<usize>, Vec<T>)>
where
    T: Copy + Default + Send,
    C: Fn(usize) -> usize + Sync + Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    let offsets = count_phase(lanes, items, count)?;
    let mut out = try_filled(offsets[items], T::default())?;
    fill_phase(lanes, split_by_offsets(&mut out, &offsets), |i, chunk| fill(i, chunk));
    Ok((offsets, out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_scan() {
        assert_eq!(exclusive_scan(&[]).unwrap(), vec![0]);
        assert_eq!(exclusive_scan(&[2, 0, 3, 1]).unwrap(), vec![0, 2, 2, 5, 6]);
    }

    #[test]
    fn test_exclusive_scan_overflow_is_allocation_failure() {
        let err = exclusive_scan(&[3, usize::MAX, 1]).unwrap_err();
        assert_eq!(err, ExtractError::AllocationFailure(AllocError::CountOverflow { item: 1 }));
    }

    #[test]
    fn test_split_by_offsets() {
        let mut data = [1, 2, 3, 4, 5];
        let chunks = split_by_offsets(&mut data, &[0, 2, 2, 5]);
        assert_eq!(chunks.len(), 3);
        assert_eq!(&*chunks[0], &[1, 2]);
        assert!(chunks[1].is_empty());
        assert_eq!(&*chunks[2], &[3, 4, 5]);
    }

    #[test]
    fn test_try_filled_reports_impossible_reservation() {
        let err = try_filled(usize::MAX, 0u64).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::AllocationFailure(AllocError::Reserve { requested: usize::MAX, .. })
        ));

        // The allocator's own error stays reachable through the source chain.
        let alloc = std::error::Error::source(&err).unwrap();
        assert!(std::error::Error::source(alloc).is_some());
    }

    #[test]
    fn test_count_then_fill_filters_ranges() {
        // Each item is a range; keep the multiples of three.
        let ranges = [0u32..10, 10..11, 11..13, 13..31];
        let keep = |x: &u32| x % 3 == 0;

        for lanes in [Lanes::sequential(), Lanes::new(0, None)] {
            let (offsets, out) = count_then_fill(
                &lanes,
                ranges.len(),
                |i| ranges[i].clone().filter(keep).count(),
                |i, chunk: &mut [u32]| {
                    for (slot, x) in chunk.iter_mut().zip(ranges[i].clone().filter(keep)) {
                        *slot = x;
                    }
                },
            )
            .unwrap();

            assert_eq!(offsets, vec![0, 4, 4, 5, 11]);
            assert_eq!(out, vec![0, 3, 6, 9, 12, 15, 18, 21, 24, 27, 30]);
        }
    }
}
