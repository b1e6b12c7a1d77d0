//! Generic algorithms over `[begin, end)` cursor pairs.
//!
//! Everything here goes through the [`Cursor`] interface only and never sees the array behind it.
//!
//! ## Safety
//!
//! Every function requires that `begin` and `end` came from the same array, that
//! `begin <= end`, and that the array has not changed length since they were taken.

use core::cmp::Ordering;

use crate::Cursor;

/// Ranges at most this long are sorted by insertion.
const INSERTION_THRESHOLD: isize = 16;

/// Sorts `[begin, end)` in ascending order. Not stable.
///
/// ## Safety
/// See the [module docs](self).
pub unsafe fn sort<'a, T: Ord>(begin: Cursor<'a, T>, end: Cursor<'a, T>) {
    sort_by(begin, end, T::cmp);
}

/// Sorts `[begin, end)` with a comparator. Not stable.
///
/// ## Safety
/// See the [module docs](self).
pub unsafe fn sort_by<'a, T, F>(begin: Cursor<'a, T>, end: Cursor<'a, T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut less = |a: &T, b: &T| compare(a, b) == Ordering::Less;
    quicksort(begin, end, &mut less);
}

unsafe fn quicksort<'a, T, F>(mut begin: Cursor<'a, T>, mut end: Cursor<'a, T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    // recurse on the shorter side so the stack stays logarithmic
    while end - begin > INSERTION_THRESHOLD {
        let pivot = partition(begin, end, less);
        if pivot - begin < end - pivot {
            quicksort(begin, pivot, less);
            begin = pivot + 1;
        } else {
            quicksort(pivot + 1, end, less);
            end = pivot;
        }
    }
    insertion_sort(begin, end, less);
}

/// Partitions around the median of the first, middle and last elements.
///
/// Returns the pivot's final position: everything before it is not greater, everything after
/// it is not less. Both scans stop on elements equal to the pivot, so runs of equal keys are
/// split evenly instead of piling up on one side.
unsafe fn partition<'a, T, F>(begin: Cursor<'a, T>, end: Cursor<'a, T>, less: &mut F) -> Cursor<'a, T>
where
    F: FnMut(&T, &T) -> bool,
{
    let last = end - 1;
    let mid = begin + (end - begin) / 2;
    if less(mid.as_ref(), begin.as_ref()) {
        mid.swap(begin);
    }
    if less(last.as_ref(), begin.as_ref()) {
        last.swap(begin);
    }
    if less(last.as_ref(), mid.as_ref()) {
        last.swap(mid);
    }
    // the pivot waits at `begin` until the scans meet
    mid.swap(begin);

    let mut i = begin;
    let mut j = end;
    loop {
        i.inc();
        while i < last && less(i.as_ref(), begin.as_ref()) {
            i.inc();
        }
        j.dec();
        while less(begin.as_ref(), j.as_ref()) {
            j.dec();
        }
        if i >= j {
            break;
        }
        i.swap(j);
    }
    begin.swap(j);
    j
}

unsafe fn insertion_sort<'a, T, F>(begin: Cursor<'a, T>, end: Cursor<'a, T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if end - begin < 2 {
        return;
    }
    let mut i = begin + 1;
    while i < end {
        let mut j = i;
        while j > begin && less(j.as_ref(), (j - 1).as_ref()) {
            j.swap(j - 1);
            j.dec();
        }
        i.inc();
    }
}

/// Returns a cursor to the first smallest element, or `end` if the range is empty.
///
/// ## Safety
/// See the [module docs](self).
pub unsafe fn min_element<'a, T: Ord>(begin: Cursor<'a, T>, end: Cursor<'a, T>) -> Cursor<'a, T> {
    min_element_by(begin, end, T::cmp)
}

/// Returns a cursor to the first element no other element compares less than, or `end` if
/// the range is empty.
///
/// ## Safety
/// See the [module docs](self).
pub unsafe fn min_element_by<'a, T, F>(
    begin: Cursor<'a, T>,
    end: Cursor<'a, T>,
    mut compare: F,
) -> Cursor<'a, T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if begin == end {
        return end;
    }
    let mut best = begin;
    let mut cursor = begin + 1;
    while cursor < end {
        if compare(cursor.as_ref(), best.as_ref()) == Ordering::Less {
            best = cursor;
        }
        cursor.inc();
    }
    best
}

/// Returns a cursor to the first largest element, or `end` if the range is empty.
///
/// ## Safety
/// See the [module docs](self).
pub unsafe fn max_element<'a, T: Ord>(begin: Cursor<'a, T>, end: Cursor<'a, T>) -> Cursor<'a, T> {
    max_element_by(begin, end, T::cmp)
}

/// Returns a cursor to the first element that compares greater than or equal to every other,
/// or `end` if the range is empty.
///
/// ## Safety
/// See the [module docs](self).
pub unsafe fn max_element_by<'a, T, F>(
    begin: Cursor<'a, T>,
    end: Cursor<'a, T>,
    mut compare: F,
) -> Cursor<'a, T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if begin == end {
        return end;
    }
    let mut best = begin;
    let mut cursor = begin + 1;
    while cursor < end {
        if compare(best.as_ref(), cursor.as_ref()) == Ordering::Less {
            best = cursor;
        }
        cursor.inc();
    }
    best
}

/// Returns `true` if both ranges have the same length and pairwise equal elements.
///
/// ## Safety
/// See the [module docs](self). Applies to each pair.
pub unsafe fn equal<'a, 'b, T, U>(
    begin1: Cursor<'a, T>,
    end1: Cursor<'a, T>,
    begin2: Cursor<'b, U>,
    end2: Cursor<'b, U>,
) -> bool
where
    T: PartialEq<U>,
{
    if end1 - begin1 != end2 - begin2 {
        return false;
    }
    let mut a = begin1;
    let mut b = begin2;
    while a < end1 {
        if a.as_ref() != b.as_ref() {
            return false;
        }
        a.inc();
        b.inc();
    }
    true
}
