//! Search algorithms
//!
//! Point lookups over a [`RandomAccessView`]. Both algorithms return the
//! most recently written occurrence of a key when it appears more than once.

use crate::error::Result;
use crate::storage::RandomAccessView;
use crate::types::{Key, Value};

/// Keys fetched per step of a linear scan
const SCAN_CHUNK: usize = 4096;

/// Binary search over the whole view. See [`binary_search_in`].
pub fn binary_search<V: RandomAccessView + ?Sized>(view: &V, key: Key) -> Result<Option<Value>> {
    binary_search_in(view, key, 0, view.count())
}

/// Binary search over `view[lower..upper)`, which must be sorted by key.
///
/// On a hit, walks left while the previous key is equal and returns the
/// leftmost occurrence in the range. Sorted levels keep newer duplicates to
/// the left of older ones, so that occurrence is the newest.
pub fn binary_search_in<V: RandomAccessView + ?Sized>(
    view: &V,
    key: Key,
    lower: usize,
    upper: usize,
) -> Result<Option<Value>> {
    let mut lo = lower;
    let mut hi = upper;

    while lo < hi {
        let mut mid = lo + (hi - lo) / 2;
        let probe = view.key(mid)?;

        if probe < key {
            lo = mid + 1;
        } else if probe > key {
            hi = mid;
        } else {
            while mid > lower && view.key(mid - 1)? == key {
                mid -= 1;
            }
            return view.value(mid).map(Some);
        }
    }

    Ok(None)
}

/// Linear search over the whole view. See [`linear_search_in`].
pub fn linear_search<V: RandomAccessView + ?Sized>(view: &V, key: Key) -> Result<Option<Value>> {
    linear_search_in(view, key, 0, view.count())
}

/// Scan `view[lower..upper)` from the end towards the start and return the
/// first match, i.e. the most recently appended one. No ordering required.
pub fn linear_search_in<V: RandomAccessView + ?Sized>(
    view: &V,
    key: Key,
    lower: usize,
    upper: usize,
) -> Result<Option<Value>> {
    let mut end = upper;
    while end > lower {
        let start = end.saturating_sub(SCAN_CHUNK).max(lower);
        let keys = view.keys_in(start, end)?;
        if let Some(offset) = keys.iter().rposition(|&k| k == key) {
            return view.value(start + offset).map(Some);
        }
        end = start;
    }
    Ok(None)
}
