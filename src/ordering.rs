//! Key ordering
//!
//! Keys are ordered by plain lexicographic byte comparison, which is the
//! order every store cursor walks in. Sorting a lookup batch into that order
//! lets the multi-get engine resolve it in one forward sweep.

use std::cmp::Ordering;

/// Compare two keys byte by byte
#[inline]
pub fn compare_keys(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Permutation of indices that visits `keys` in ascending byte order
///
/// The keys are not moved; `keys[order[i]]` is the i-th smallest key. Ties
/// keep their input order.
pub fn sorted_order<K: AsRef<[u8]>>(keys: &[K]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| compare_keys(keys[a].as_ref(), keys[b].as_ref()));
    order
}
