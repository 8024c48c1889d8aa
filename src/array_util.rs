//! # Sequence utilities
//!
//! Small, stateless helpers for index arithmetic, range generation, element
//! search and array surgery. Everything else in the crate builds on these.

use itertools::Itertools;

use crate::error::PermutationError;

/// The indices `0..end`, in order.
///
/// # Examples
///
/// ```
/// # use cycloid::array_util::range;
/// assert_eq!(range(4), vec![0, 1, 2, 3]);
/// assert!(range(0).is_empty());
/// ```
pub fn range(end: usize) -> Vec<usize> {
    (0..end).collect()
}

/// The numbers from `start` (included) to `end` (excluded).
///
/// The sequence is descending if `end < start`, and empty if they are equal.
///
/// # Examples
///
/// ```
/// # use cycloid::array_util::range_between;
/// assert_eq!(range_between(2, 5), vec![2, 3, 4]);
/// assert_eq!(range_between(5, 2), vec![5, 4, 3]);
/// ```
pub fn range_between(start: usize, end: usize) -> Vec<usize> {
    if start <= end {
        (start..end).collect()
    } else {
        ((end + 1)..=start).rev().collect()
    }
}

/// Like [`range_between`], but `end` is included.
///
/// # Examples
///
/// ```
/// # use cycloid::array_util::range_inclusive;
/// assert_eq!(range_inclusive(1, 3), vec![1, 2, 3]);
/// assert_eq!(range_inclusive(3, 1), vec![3, 2, 1]);
/// assert_eq!(range_inclusive(2, 2), vec![2]);
/// ```
pub fn range_inclusive(start: usize, end: usize) -> Vec<usize> {
    if start <= end {
        (start..=end).collect()
    } else {
        (end..=start).rev().collect()
    }
}

/// Position of the `skip`-th occurrence of `el` in `a`, counting from zero.
///
/// With `skip == 0` this is the first occurrence. Returns `None` if `el` does
/// not occur, or occurs no more than `skip` times.
///
/// # Examples
///
/// ```
/// # use cycloid::array_util::index_of;
/// let a = [4, 1, 4, 4];
/// assert_eq!(index_of(&a, &4, 0), Some(0));
/// assert_eq!(index_of(&a, &4, 2), Some(3));
/// assert_eq!(index_of(&a, &4, 3), None);
/// ```
pub fn index_of<T: PartialEq>(a: &[T], el: &T, skip: usize) -> Option<usize> {
    a.iter()
        .enumerate()
        .filter(|(_, x)| *x == el)
        .nth(skip)
        .map(|(i, _)| i)
}

/// Adds `k` to every element.
pub fn add(a: &[usize], k: usize) -> Vec<usize> {
    a.iter().map(|&x| x + k).collect()
}

/// The largest element, or `None` for empty input.
pub fn max(a: &[usize]) -> Option<usize> {
    a.iter().copied().max()
}

/// Pairs every element with its index, as `(value, index)`.
pub fn with_index(a: &[usize]) -> Vec<(usize, usize)> {
    a.iter().enumerate().map(|(i, &x)| (x, i)).collect()
}

/// Removes the element at `i`, returning a copy one shorter than `a`.
///
/// # Errors
///
/// [`PermutationError::IndexOutOfBounds`] if `i >= a.len()`.
///
/// # Examples
///
/// ```
/// # use cycloid::array_util::cut;
/// assert_eq!(cut(&[1, 2, 3], 1).unwrap(), vec![1, 3]);
/// assert!(cut(&[1, 2, 3], 3).is_err());
/// ```
pub fn cut<T: Clone>(a: &[T], i: usize) -> Result<Vec<T>, PermutationError> {
    if i >= a.len() {
        return Err(PermutationError::IndexOutOfBounds {
            index: i,
            len: a.len(),
        });
    }
    let mut result = Vec::with_capacity(a.len() - 1);
    result.extend_from_slice(&a[..i]);
    result.extend_from_slice(&a[i + 1..]);
    Ok(result)
}

/// Inserts `el` at position `i`, returning a copy one longer than `a`.
///
/// # Errors
///
/// [`PermutationError::IndexOutOfBounds`] if `i > a.len()`.
///
/// # Examples
///
/// ```
/// # use cycloid::array_util::paste;
/// assert_eq!(paste(&[1, 3], 1, 2).unwrap(), vec![1, 2, 3]);
/// assert_eq!(paste(&[1, 2], 2, 3).unwrap(), vec![1, 2, 3]);
/// ```
pub fn paste<T: Clone>(a: &[T], i: usize, el: T) -> Result<Vec<T>, PermutationError> {
    if i > a.len() {
        return Err(PermutationError::IndexOutOfBounds {
            index: i,
            len: a.len(),
        });
    }
    let mut result = Vec::with_capacity(a.len() + 1);
    result.extend_from_slice(&a[..i]);
    result.push(el);
    result.extend_from_slice(&a[i..]);
    Ok(result)
}

/// Allocation free version of [`paste`]: writes `src` with `el` inserted at `i`
/// into the first `src.len() + 1` slots of `dst`.
pub(crate) fn paste_into<T: Copy>(dst: &mut [T], src: &[T], i: usize, el: T) {
    dst[..i].copy_from_slice(&src[..i]);
    dst[i] = el;
    dst[i + 1..=src.len()].copy_from_slice(&src[i..]);
}

/// Checks that an input of length `actual` is long enough for an operation
/// that reaches up to `required`.
pub fn check_length(required: usize, actual: usize) -> Result<(), PermutationError> {
    if actual < required {
        return Err(PermutationError::LengthMismatch { required, actual });
    }
    Ok(())
}

/// The first index that occurs a second time, in order of occurrence.
///
/// # Examples
///
/// ```
/// # use cycloid::array_util::first_duplicate;
/// assert_eq!(first_duplicate(&[4, 1, 2, 1, 4]), Some(1));
/// assert_eq!(first_duplicate(&[usize::MAX, 0]), None);
/// ```
pub fn first_duplicate(indices: &[usize]) -> Option<usize> {
    indices.iter().copied().duplicates().next()
}
