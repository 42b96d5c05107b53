//! Index and range semantics of the remote store, in one place.
//!
//! The store addresses sequences with zero-based indices, accepts negative
//! indices counting from the tail, and treats range stops as inclusive.
//! Every implementation of [`Commands`](crate::Commands) and every local
//! structure claiming parity with the store must resolve indices the same
//! way, so the rules live here rather than in each store.

/// Resolve a possibly-negative index against a sequence of `len` elements.
///
/// Returns `None` if the index falls outside the sequence.
///
/// # Examples
///
/// ```rust
/// use keyspace_command::resolve_index;
///
/// assert_eq!(resolve_index(4, 0), Some(0));
/// assert_eq!(resolve_index(4, -1), Some(3));
/// assert_eq!(resolve_index(4, 4), None);
/// assert_eq!(resolve_index(4, -5), None);
/// ```
pub fn resolve_index(len: usize, index: i64) -> Option<usize> {
    let len = len as i64;
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        Some(resolved as usize)
    } else {
        None
    }
}

/// Resolve an inclusive `[start, stop]` range against a sequence of `len`
/// elements, clamping out-of-bounds ends the way the store does.
///
/// Returns the half-open `[start, end)` slice bounds, or `None` if the
/// range selects nothing.
///
/// # Examples
///
/// ```rust
/// use keyspace_command::resolve_range;
///
/// assert_eq!(resolve_range(4, 0, -1), Some((0, 4)));
/// assert_eq!(resolve_range(4, 1, 2), Some((1, 3)));
/// assert_eq!(resolve_range(4, 2, 100), Some((2, 4)));
/// assert_eq!(resolve_range(4, 3, 1), None);
/// ```
pub fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let ilen = len as i64;
    let mut start = if start < 0 { ilen + start } else { start };
    let mut stop = if stop < 0 { ilen + stop } else { stop };
    if start < 0 {
        start = 0;
    }
    if stop >= ilen {
        stop = ilen - 1;
    }
    if start >= ilen || stop < 0 || start > stop {
        return None;
    }
    Some((start as usize, stop as usize + 1))
}
