//! # Rankings
//!
//! The algorithmic core, operating on raw index arrays.
//!
//! A *ranking* of length `n` is a `&[usize]` in which every index of `0..n`
//! occurs exactly once. Entry `ranking[i]` is the position that index `i` is
//! sent to, so applying a ranking to a sequence is a scatter:
//! `result[ranking[i]] = input[i]`. Positions at or past the end of the ranking
//! are fixed points.
//!
//! A ranking is *trimmed* if its last entry is not a fixed point. Every
//! permutation has exactly one trimmed ranking, and the identity's is empty.
//!
//! Nothing in here allocates more than a constant number of vectors, and
//! nothing here validates its input unless the function name says so; the
//! [`Permutation`](crate::permutation::Permutation) type is the validated
//! front end.

use std::cmp::Ordering;

use bitvec::vec::BitVec;
use rand::{seq::SliceRandom, Rng};
use tracing::{trace, warn};

use crate::{
    array_util::{add, check_length, range, with_index},
    error::PermutationError,
};

pub mod symmetric_group;

pub use symmetric_group::SymmetricGroup;

/// Whether `a` is a bijection on `0..a.len()`.
///
/// # Examples
///
/// ```
/// # use cycloid::ranking::is_valid;
/// assert!(is_valid(&[2, 0, 1]));
/// assert!(is_valid(&[]));
/// assert!(!is_valid(&[0, 0]));
/// assert!(!is_valid(&[0, 2]));
/// ```
pub fn is_valid(a: &[usize]) -> bool {
    let mut seen: BitVec = BitVec::repeat(false, a.len());
    for &x in a {
        if x >= a.len() || seen.replace(x, true) {
            return false;
        }
    }
    true
}

/// Like [`is_valid`], but as a `Result`.
pub fn check_ranking(a: &[usize]) -> Result<(), PermutationError> {
    if is_valid(a) {
        Ok(())
    } else {
        Err(PermutationError::InvalidRanking { len: a.len() })
    }
}

/// Length of `a` once its fixed-point suffix is removed.
pub fn trimmed_length(a: &[usize]) -> usize {
    let mut length = a.len();
    while length > 0 && a[length - 1] == length - 1 {
        length -= 1;
    }
    length
}

/// Drops the maximal suffix of fixed points.
///
/// # Examples
///
/// ```
/// # use cycloid::ranking::trim;
/// assert_eq!(trim(vec![1, 0, 2, 3]), vec![1, 0]);
/// assert!(trim(vec![0, 1, 2]).is_empty());
/// ```
pub fn trim(mut a: Vec<usize>) -> Vec<usize> {
    a.truncate(trimmed_length(&a));
    a
}

/// A ranking that fixes `0..n` and acts like `ranking` on everything after,
/// shifted up by `n`.
pub fn shift(n: usize, ranking: &[usize]) -> Vec<usize> {
    if ranking.is_empty() {
        return Vec::new();
    }
    let mut result = range(n);
    result.extend(add(ranking, n));
    result
}

/// The inverse ranking, so that `invert(a)[a[i]] == i`.
///
/// Values are distinct, so sorting the `(value, index)` pairs by value is
/// enough and the unstable sort is fine.
pub fn invert(a: &[usize]) -> Vec<usize> {
    let mut pairs = with_index(a);
    pairs.sort_unstable();
    pairs.into_iter().map(|(_, i)| i).collect()
}

/// Composes two rankings: applying the result is the same as applying `rhs`
/// first and `lhs` second.
///
/// The rankings may have different lengths. Past its own end, each of them
/// acts as the identity.
///
/// # Examples
///
/// ```
/// # use cycloid::ranking::comp;
/// // (0 1) after (1 2)
/// assert_eq!(comp(&[1, 0], &[0, 2, 1]), vec![1, 2, 0]);
/// ```
pub fn comp(lhs: &[usize], rhs: &[usize]) -> Vec<usize> {
    if rhs.is_empty() {
        return lhs.to_vec();
    }
    if lhs.is_empty() {
        return rhs.to_vec();
    }
    (0..lhs.len().max(rhs.len()))
        .map(|i| apply_index(lhs, apply_index(rhs, i)))
        .collect()
}

/// The image of `i`. Indices past the end are fixed.
#[inline]
pub fn apply_index(ranking: &[usize], i: usize) -> usize {
    ranking.get(i).copied().unwrap_or(i)
}

/// Moves `input[i]` to position `ranking[i]`. Elements past the end of the
/// ranking stay where they are.
///
/// # Errors
///
/// [`PermutationError::LengthMismatch`] if `input` is shorter than `ranking`.
///
/// # Examples
///
/// ```
/// # use cycloid::ranking::apply;
/// assert_eq!(apply(&[1, 2, 0], &['a', 'b', 'c', 'd']).unwrap(), vec!['c', 'a', 'b', 'd']);
/// assert!(apply(&[1, 2, 0], &['a', 'b']).is_err());
/// ```
pub fn apply<T: Clone>(ranking: &[usize], input: &[T]) -> Result<Vec<T>, PermutationError> {
    check_length(ranking.len(), input.len())?;
    let mut result = input.to_vec();
    for (i, &target) in ranking.iter().enumerate() {
        result[target] = input[i].clone();
    }
    Ok(result)
}

/// Owned version of [`apply`]: the elements are moved, not cloned.
pub fn apply_vec<T>(ranking: &[usize], input: Vec<T>) -> Result<Vec<T>, PermutationError> {
    check_length(ranking.len(), input.len())?;
    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(input.len()).collect();
    for (i, x) in input.into_iter().enumerate() {
        slots[apply_index(ranking, i)] = Some(x);
    }
    Ok(slots.into_iter().flatten().collect())
}

/// Walk state of one run of equal values in a sorted slice, keyed by the
/// run's first slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// No slot of this run has been handed out yet.
    Fresh,
    /// The slot at `start + offset` was the last one handed out.
    At(isize),
}

/// Next offset of the outward walk over the run of values equal to
/// `sorted[idx]`, starting from `idx` and having last visited `idx + offset`.
///
/// From a non-negative offset the walk moves forward. Once the forward side
/// is used up it turns around to `-1`, provided the run extends before `idx`.
/// From a negative offset it keeps moving backward. Returns `None` when every
/// slot of the run has been visited.
pub(crate) fn next_offset<T>(
    idx: usize,
    offset: isize,
    sorted: &[T],
    mut same: impl FnMut(&T, &T) -> bool,
) -> Option<isize> {
    if offset >= 0 {
        let next = idx + offset.unsigned_abs() + 1;
        if next < sorted.len() && same(&sorted[next], &sorted[idx]) {
            return Some(offset + 1);
        }
        if idx > 0 && same(&sorted[idx - 1], &sorted[idx]) {
            return Some(-1);
        }
        return None;
    }
    let next = idx.checked_sub(offset.unsigned_abs() + 1)?;
    same(&sorted[next], &sorted[idx]).then_some(offset - 1)
}

/// For every element of `items`, claims one slot of `sorted` holding an equal
/// value. Equal items claim the slots of their run in order of appearance.
///
/// Returns `None` when some item has no unclaimed equal slot left.
fn claim_slots<T, F>(items: &[T], sorted: &[&T], cmp: &mut F) -> Option<Vec<usize>>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut cursors = vec![Cursor::Fresh; sorted.len()];
    items
        .iter()
        .map(|x| {
            let start = sorted.partition_point(|y| cmp(*y, x) == Ordering::Less);
            if start == sorted.len() || cmp(sorted[start], x) != Ordering::Equal {
                return None;
            }
            let offset = match cursors[start] {
                Cursor::Fresh => 0,
                Cursor::At(offset) => next_offset(start, offset, sorted, |u, v| {
                    cmp(*u, *v) == Ordering::Equal
                })?,
            };
            cursors[start] = Cursor::At(offset);
            start.checked_add_signed(offset)
        })
        .collect()
}

/// A ranking that sorts `a` by `cmp` when applied to it.
///
/// Ties are broken by position: among equal elements, the first one in `a`
/// goes to the first of their slots, and so on. So for an already sorted
/// input the result is always the identity.
///
/// # Examples
///
/// ```
/// # use cycloid::ranking::{apply, sorting_by};
/// let a = [3, 1, 3, 2];
/// let r = sorting_by(&a, |x, y| x.cmp(y));
/// assert_eq!(r, vec![2, 0, 3, 1]);
/// assert_eq!(apply(&r, &a).unwrap(), vec![1, 2, 3, 3]);
/// ```
pub fn sorting_by<T, F>(a: &[T], mut cmp: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted: Vec<&T> = a.iter().collect();
    sorted.sort_by(|x, y| cmp(*x, *y));
    claim_slots(a, &sorted, &mut cmp).unwrap_or_else(|| {
        warn!("comparator is not a total order, falling back to a stable index sort");
        let mut indices = range(a.len());
        indices.sort_by(|&i, &j| cmp(&a[i], &a[j]));
        invert(&indices)
    })
}

/// [`sorting_by`] with the natural order.
pub fn sorting<T: Ord>(a: &[T]) -> Vec<usize> {
    sorting_by(a, T::cmp)
}

/// A ranking that turns `a` into `b`, where elements are compared with `cmp`.
///
/// Returns `None` when `b` is not a rearrangement of `a`: a value of `a` is
/// missing from `b`, occurs a different number of times, or the lengths differ.
/// Equal elements are matched in order of appearance.
///
/// # Examples
///
/// ```
/// # use cycloid::ranking::{apply, from_by};
/// let r = from_by(&[1, 2, 1], &[2, 1, 1], |x, y| x.cmp(y)).unwrap();
/// assert_eq!(apply(&r, &[1, 2, 1]).unwrap(), vec![2, 1, 1]);
///
/// // every value occurs in both, but not equally often
/// assert_eq!(from_by(&[1, 1, 2], &[1, 2, 2], |x, y| x.cmp(y)), None);
/// ```
pub fn from_by<T, F>(a: &[T], b: &[T], mut cmp: F) -> Option<Vec<usize>>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if a.len() != b.len() {
        trace!(source = a.len(), target = b.len(), "no rearrangement: lengths differ");
        return None;
    }
    let unsort = invert(&sorting_by(b, &mut cmp));
    let sorted: Vec<&T> = unsort.iter().map(|&j| &b[j]).collect();
    let Some(slots) = claim_slots(a, &sorted, &mut cmp) else {
        trace!(len = a.len(), "no rearrangement: multisets differ");
        return None;
    };
    Some(slots.into_iter().map(|slot| unsort[slot]).collect())
}

/// [`from_by`] with the natural order.
pub fn from<T: Ord>(a: &[T], b: &[T]) -> Option<Vec<usize>> {
    from_by(a, b, T::cmp)
}

/// Whether applying `ranking` to `a` leaves it sorted by `cmp`.
pub fn sorts_by<T, F>(ranking: &[usize], a: &[T], mut cmp: F) -> Result<bool, PermutationError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let applied = apply_vec(ranking, a.iter().collect())?;
    Ok(applied
        .windows(2)
        .all(|w| cmp(w[0], w[1]) != Ordering::Greater))
}

/// [`sorts_by`] with the natural order.
pub fn sorts<T: Ord>(ranking: &[usize], a: &[T]) -> Result<bool, PermutationError> {
    sorts_by(ranking, a, T::cmp)
}

/// A uniformly random ranking of the given length.
pub fn random<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<usize> {
    let mut ranking = range(length);
    ranking.shuffle(rng);
    ranking
}

/// Every ranking of length `n`, each exactly once. See [`SymmetricGroup`].
pub fn symmetric_group(n: usize) -> SymmetricGroup {
    SymmetricGroup::new(n)
}
