//! Comparison sorts shared by the baseline engines and the radix small-bucket path.
//!
//! Both sorts take an explicit comparator so they run unchanged over packed
//! keys (integer order) and over whole strings ([`compare_folded`] order).
//!
//! [`compare_folded`]: crate::core::compare_folded

use std::cmp::Ordering;

/// Straight insertion sort.
///
/// Each element is moved into place with a single rotation, so no element is
/// cloned and the sort is stable.
pub(crate) fn insertion_sort_by<T, F>(v: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        if compare(&v[i], &v[i - 1]) != Ordering::Less {
            continue;
        }
        let mut slot = i - 1;
        while slot > 0 && compare(&v[i], &v[slot - 1]) == Ordering::Less {
            slot -= 1;
        }
        v[slot..=i].rotate_right(1);
    }
}

/// Top-down merge sort using `wrk` (same length as `buf`) as auxiliary storage.
///
/// Runs shorter than `cutoff` are insertion sorted. Each level sorts the four
/// quarters in place, merges the two halves into `wrk` and merges back, so the
/// result always lands in `buf`.
pub(crate) fn merge_sort_by<T, F>(buf: &mut [T], wrk: &mut [T], cutoff: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert_eq!(buf.len(), wrk.len());
    if buf.len() < cutoff.max(2) {
        insertion_sort_by(buf, compare);
        return;
    }

    let half = buf.len() / 2;
    let (lo, hi) = buf.split_at_mut(half);
    let (wrk_lo, wrk_hi) = wrk.split_at_mut(half);
    sort_halves_into(lo, wrk_lo, cutoff, compare);
    sort_halves_into(hi, wrk_hi, cutoff, compare);
    merge(wrk_lo, wrk_hi, buf, compare);
}

/// Sorts both halves of `src` in place and merges them into `dst`.
fn sort_halves_into<T, F>(src: &mut [T], dst: &mut [T], cutoff: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let half = src.len() / 2;
    let (a, b) = src.split_at_mut(half);
    merge_sort_by(a, &mut dst[..a.len()], cutoff, compare);
    merge_sort_by(b, &mut dst[..b.len()], cutoff, compare);
    merge(a, b, dst, compare);
}

/// Stable merge of two sorted runs into `dst`.
fn merge<T, F>(a: &[T], b: &[T], dst: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert_eq!(a.len() + b.len(), dst.len());
    let (mut i, mut j) = (0, 0);
    for slot in dst.iter_mut() {
        let take_a = j == b.len() || (i < a.len() && compare(&a[i], &b[j]) != Ordering::Greater);
        if take_a {
            *slot = a[i].clone();
            i += 1;
        } else {
            *slot = b[j].clone();
            j += 1;
        }
    }
}
