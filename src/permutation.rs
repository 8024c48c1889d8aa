//! # Permutations
//!
//! This module provides the immutable [`Permutation`] value type, the
//! validated front end to the algorithms in [`crate::ranking`].
//!
//! ## Key Features:
//!
//! - **Representation**: a `Permutation` owns one *trimmed* ranking. Entry `i`
//!   is the position that index `i` is sent to, and all indices past the end
//!   are fixed. Equality, hashing and ordering are structural on that ranking.
//! - **Construction**:
//!   - Identity: `Permutation::identity()`.
//!   - From a ranking: `Permutation::define(vec![...])`.
//!   - From cycle notation: `Permutation::cycle([1, 2, 3])` (one-based) or
//!     `Permutation::from_cycle([0, 1, 2])` (zero-based).
//!   - From a desired order: `Permutation::sorting(&data)`, `sorting_by`,
//!     `sorting_by_key`.
//!   - From a desired result: `Permutation::taking(&a).to(&b)`.
//!   - `reverse`, `move_index`, `random`, `product`, `symmetric_group`.
//! - **Algebra**: `compose` (applies the argument first), `invert`, `pow`,
//!   `shift`.
//! - **Application**: to an index (`apply`), to slices, owned iterators,
//!   arrays and strings. Nothing is modified in place; see
//!   [`Cycles`](crate::cycles::Cycles) and [`Swap`](crate::swap::Swap) for
//!   that.
//! - **Introspection**: `length`, `order`, `orbit`, `signature`, `to_cycles`,
//!   and one-based cycle notation through `Display`.

use std::{cmp::Ordering, fmt, iter::FusedIterator, iter::Product};

use rand::Rng;

use crate::{
    array_util::{first_duplicate, range, range_inclusive},
    cycles::Cycles,
    error::PermutationError,
    ranking,
};

/// An immutable permutation of the indices `0, 1, 2, ...`, moving only finitely
/// many of them.
///
/// # Examples
///
/// ```
/// use cycloid::permutation::Permutation;
///
/// // 0 -> 1, 1 -> 2, 2 -> 0
/// let p = Permutation::define(vec![1, 2, 0]).unwrap();
/// assert_eq!(p.apply_str("abc").unwrap(), "cab");
/// assert_eq!(p.to_string(), "(1 2 3)");
///
/// let q = Permutation::cycle([1, 2]).unwrap().compose(&Permutation::cycle([2, 3]).unwrap());
/// assert_eq!(p, q);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Permutation {
    ranking: Vec<usize>,
}

/// Shorter rankings come first, rankings of equal length are compared
/// entry by entry.
impl Ord for Permutation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ranking
            .len()
            .cmp(&other.ranking.len())
            .then_with(|| self.ranking.cmp(&other.ranking))
    }
}

impl PartialOrd for Permutation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Constructors
    // --------------------------------------------------------------------------------------------

    pub fn identity() -> Self {
        Permutation::default()
    }

    /// Creates a permutation from a ranking: `ranking[i]` is where `i` goes.
    ///
    /// Trailing fixed points are dropped, so `define(vec![1, 0, 2])` equals
    /// `define(vec![1, 0])`.
    ///
    /// # Errors
    ///
    /// [`PermutationError::InvalidRanking`] if `ranking` is not a bijection on
    /// `0..ranking.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::permutation::Permutation;
    /// let p = Permutation::define(vec![1, 0, 2]).unwrap();
    /// assert_eq!(p.length(), 2);
    /// assert!(Permutation::define(vec![1, 1]).is_err());
    /// ```
    pub fn define(ranking: impl Into<Vec<usize>>) -> Result<Self, PermutationError> {
        let ranking = ranking.into();
        ranking::check_ranking(&ranking)?;
        Ok(Permutation::define_trusted(ranking))
    }

    /// Skips validation. `ranking` must be a bijection on its index range.
    pub(crate) fn define_trusted(ranking: Vec<usize>) -> Self {
        Permutation {
            ranking: ranking::trim(ranking),
        }
    }

    /// A single cycle in one-based notation: `cycle([1, 2, 3])` sends the
    /// first element to the second position, the second to the third and the
    /// third to the first. Fewer than two indices give the identity.
    ///
    /// # Errors
    ///
    /// [`PermutationError::NegativeIndex`] if an index is `0`, and
    /// [`PermutationError::DuplicateIndex`] if an index occurs twice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::permutation::Permutation;
    /// let p = Permutation::cycle([1, 2, 3]).unwrap();
    /// assert_eq!(p.apply_str("abc").unwrap(), "cab");
    /// assert!(Permutation::cycle([0, 1]).is_err());
    /// assert!(Permutation::cycle([1, 2, 1]).is_err());
    /// ```
    pub fn cycle(one_based: impl IntoIterator<Item = usize>) -> Result<Self, PermutationError> {
        let zero_based = one_based
            .into_iter()
            .map(|i| i.checked_sub(1).ok_or(PermutationError::NegativeIndex(-1)))
            .collect::<Result<Vec<_>, _>>()?;
        Permutation::from_cycle(zero_based).map_err(|err| match err {
            PermutationError::DuplicateIndex(i) => PermutationError::DuplicateIndex(i + 1),
            err => err,
        })
    }

    /// Like [`Permutation::cycle`], with zero-based indices.
    pub fn from_cycle(zero_based: impl IntoIterator<Item = usize>) -> Result<Self, PermutationError> {
        let cycle: Vec<usize> = zero_based.into_iter().collect();
        if cycle.len() < 2 {
            return Ok(Permutation::identity());
        }
        if let Some(duplicate) = first_duplicate(&cycle) {
            return Err(PermutationError::DuplicateIndex(duplicate));
        }
        Ok(Permutation::define_trusted(cycle_ranking(&cycle)))
    }

    /// A uniformly random permutation of `0..length`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Self {
        Permutation::define_trusted(ranking::random(rng, length))
    }

    /// The permutation that sorts `data`, keeping equal elements in their
    /// original order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::permutation::Permutation;
    /// let data = vec![30, 10, 20, 40];
    /// let p = Permutation::sorting(&data);
    /// assert_eq!(p.apply_slice(&data).unwrap(), vec![10, 20, 30, 40]);
    /// assert!(p.sorts(&data).unwrap());
    /// ```
    pub fn sorting<T: Ord>(data: &[T]) -> Self {
        Permutation::define_trusted(ranking::sorting(data))
    }

    pub fn sorting_by<T, F>(data: &[T], cmp: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        Permutation::define_trusted(ranking::sorting_by(data, cmp))
    }

    pub fn sorting_by_key<T, K, F>(data: &[T], mut key: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        Permutation::sorting_by(data, |a, b| key(a).cmp(&key(b)))
    }

    /// Starts building the permutation that turns `source` into some target.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::permutation::Permutation;
    /// let p = Permutation::taking(&['a', 'b', 'b', 'c']).to(&['b', 'c', 'a', 'b']).unwrap();
    /// assert_eq!(p.apply_str("abbc").unwrap(), "bcab");
    ///
    /// assert_eq!(Permutation::taking(&[1, 1, 2]).to(&[1, 2, 2]), None);
    /// ```
    pub fn taking<T>(source: &[T]) -> Taking<'_, T> {
        Taking { source }
    }

    /// The permutation that reverses the first `length` positions.
    pub fn reverse(length: usize) -> Self {
        Permutation::define_trusted((0..length).rev().collect())
    }

    /// Removes the element at `delete` and reinserts it at `insert`,
    /// shifting everything in between by one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::permutation::Permutation;
    /// assert_eq!(Permutation::move_index(0, 2).apply_str("12345").unwrap(), "23145");
    /// assert_eq!(Permutation::move_index(3, 1).apply_str("12345").unwrap(), "14235");
    /// ```
    pub fn move_index(delete: usize, insert: usize) -> Self {
        Permutation::define_trusted(cycle_ranking(&range_inclusive(insert, delete)))
    }

    /// `p1.compose(p2).compose(p3)...`, or the identity for no input.
    pub fn product<'a>(permutations: impl IntoIterator<Item = &'a Permutation>) -> Self {
        permutations
            .into_iter()
            .fold(Permutation::identity(), |acc, p| acc.compose(p))
    }

    /// All `n!` permutations of `0..n`, each exactly once, identity first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::permutation::Permutation;
    /// assert_eq!(Permutation::symmetric_group(4).count(), 24);
    /// ```
    pub fn symmetric_group(n: usize) -> impl Iterator<Item = Permutation> + FusedIterator {
        ranking::symmetric_group(n).map(Permutation::define_trusted)
    }

    // --------------------------------------------------------------------------------------------
    // Algebra
    // --------------------------------------------------------------------------------------------

    /// The permutation that applies `other` first and `self` second, so
    /// `p.compose(&q).apply(i) == p.apply(q.apply(i))`.
    pub fn compose(&self, other: &Permutation) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        Permutation::define_trusted(ranking::comp(&self.ranking, &other.ranking))
    }

    pub fn invert(&self) -> Self {
        if self.is_identity() {
            return Permutation::identity();
        }
        Permutation {
            ranking: ranking::invert(&self.ranking),
        }
    }

    /// `self` composed with itself `n` times. Negative `n` uses the inverse
    /// and `n == 0` always gives the identity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::permutation::Permutation;
    /// let p = Permutation::cycle([1, 2, 3]).unwrap();
    /// assert_eq!(p.pow(2), p.compose(&p));
    /// assert_eq!(p.pow(-1), p.invert());
    /// assert!(p.pow(3).is_identity());
    /// ```
    pub fn pow(&self, n: i64) -> Self {
        let mut base = if n < 0 { self.invert() } else { self.clone() };
        let mut result = Permutation::identity();
        let mut exp = n.unsigned_abs();
        while exp > 0 {
            if exp % 2 == 1 {
                result = result.compose(&base);
            }
            exp /= 2;
            if exp > 0 {
                base = base.compose(&base);
            }
        }
        result
    }

    /// Fixes `0..n` and acts like `self`, shifted up by `n`, on the rest.
    pub fn shift(&self, n: usize) -> Self {
        Permutation {
            ranking: ranking::shift(n, &self.ranking),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Application
    // --------------------------------------------------------------------------------------------

    /// Where index `i` is sent.
    pub fn apply(&self, i: usize) -> usize {
        ranking::apply_index(&self.ranking, i)
    }

    /// A copy of `input` with `input[i]` moved to position `self.apply(i)`.
    ///
    /// # Errors
    ///
    /// [`PermutationError::LengthMismatch`] if `input` is shorter than
    /// [`Permutation::length`].
    pub fn apply_slice<T: Clone>(&self, input: &[T]) -> Result<Vec<T>, PermutationError> {
        ranking::apply(&self.ranking, input)
    }

    /// Like [`Permutation::apply_slice`], moving the elements instead of
    /// cloning them.
    pub fn apply_iter<T>(&self, input: impl IntoIterator<Item = T>) -> Result<Vec<T>, PermutationError> {
        ranking::apply_vec(&self.ranking, input.into_iter().collect())
    }

    /// Permutes a fixed size array without going through the heap.
    pub fn apply_array<T, const N: usize>(&self, mut input: [T; N]) -> Result<[T; N], PermutationError> {
        self.to_cycles().clobber(&mut input[..])?;
        Ok(input)
    }

    pub fn apply_str(&self, s: &str) -> Result<String, PermutationError> {
        let chars = self.apply_iter(s.chars())?;
        Ok(chars.into_iter().collect())
    }

    // --------------------------------------------------------------------------------------------
    // Introspection
    // --------------------------------------------------------------------------------------------

    /// Minimum length of an input this permutation can be applied to: one
    /// more than the largest index it moves.
    pub fn length(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_identity(&self) -> bool {
        self.ranking.is_empty()
    }

    pub fn ranking(&self) -> &[usize] {
        &self.ranking
    }

    pub fn to_ranking(&self) -> Vec<usize> {
        self.ranking.clone()
    }

    pub fn to_cycles(&self) -> Cycles {
        Cycles::from_ranking(&self.ranking)
    }

    /// The smallest `n > 0` with `self.pow(n)` the identity, found by
    /// composing until the identity comes back.
    pub fn order(&self) -> usize {
        let mut order = 1;
        let mut current = self.clone();
        while !current.is_identity() {
            current = current.compose(self);
            order += 1;
        }
        order
    }

    /// `i`, `self.apply(i)`, `self.apply(self.apply(i))`, ... up to the
    /// first repetition.
    pub fn orbit(&self, i: usize) -> Vec<usize> {
        let mut orbit = vec![i];
        let mut j = self.apply(i);
        while j != i {
            orbit.push(j);
            j = self.apply(j);
        }
        orbit
    }

    /// The orbit of the smallest moved index, or `None` for the identity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::permutation::Permutation;
    /// let p = Permutation::define(vec![0, 3, 2, 4, 1]).unwrap();
    /// assert_eq!(p.find_cycle(), Some(vec![1, 3, 4]));
    /// assert_eq!(Permutation::identity().find_cycle(), None);
    /// ```
    pub fn find_cycle(&self) -> Option<Vec<usize>> {
        let (start, _) = self.ranking.iter().enumerate().find(|&(i, &r)| i != r)?;
        Some(self.orbit(start))
    }

    /// Whether at most one index cycle has length two or more.
    pub fn is_cycle(&self) -> bool {
        self.to_cycles().num_cycles() <= 1
    }

    /// `1` for even permutations and `-1` for odd ones.
    pub fn signature(&self) -> i8 {
        self.to_cycles().signature()
    }

    /// Whether this reverses every input of length `n`.
    ///
    /// The test is on inputs, not on the stored ranking: `reverse(5)` does not
    /// reverse inputs of length 4, and the identity reverses inputs of length
    /// 0 and 1.
    pub fn reverses(&self, n: usize) -> bool {
        self.length() <= n && (0..n).all(|i| self.apply(i) == n - 1 - i)
    }

    /// Whether applying this to `data` leaves it sorted.
    pub fn sorts<T: Ord>(&self, data: &[T]) -> Result<bool, PermutationError> {
        ranking::sorts(&self.ranking, data)
    }

    pub fn sorts_by<T, F>(&self, data: &[T], cmp: F) -> Result<bool, PermutationError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        ranking::sorts_by(&self.ranking, data, cmp)
    }
}

/// Ranking of a cycle of distinct indices.
fn cycle_ranking(cycle: &[usize]) -> Vec<usize> {
    if cycle.len() < 2 {
        return Vec::new();
    }
    let len = cycle.iter().max().map_or(0, |&max| max + 1);
    let mut ranking = range(len);
    for (&from, &to) in cycle.iter().zip(cycle.iter().cycle().skip(1)) {
        ranking[from] = to;
    }
    ranking
}

/// Builder returned by [`Permutation::taking`].
#[derive(Debug, Clone, Copy)]
pub struct Taking<'a, T> {
    source: &'a [T],
}

impl<T> Taking<'_, T> {
    /// The permutation that turns the source into `target`, or `None` if
    /// `target` is not a rearrangement of it. Equal elements keep their
    /// relative order.
    pub fn to(self, target: &[T]) -> Option<Permutation>
    where
        T: Ord,
    {
        self.to_by(target, T::cmp)
    }

    /// Like [`Taking::to`], for element types without a natural order.
    pub fn to_by<F>(self, target: &[T], cmp: F) -> Option<Permutation>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        ranking::from_by(self.source, target, cmp).map(Permutation::define_trusted)
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = PermutationError;

    fn try_from(ranking: Vec<usize>) -> Result<Self, Self::Error> {
        Permutation::define(ranking)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.ranking
    }
}

impl<'a> Product<&'a Permutation> for Permutation {
    fn product<I: Iterator<Item = &'a Permutation>>(iter: I) -> Self {
        Permutation::product(iter)
    }
}

impl Product for Permutation {
    fn product<I: Iterator<Item = Permutation>>(iter: I) -> Self {
        iter.fold(Permutation::identity(), |acc, p| acc.compose(&p))
    }
}

/// One-based cycle notation, `()` for the identity.
impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_cycles(), f)
    }
}

#[cfg(test)]
mod tests {
    use ahash::AHashSet;
    use insta::assert_snapshot;
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;

    #[test]
    fn test_define() {
        let p = Permutation::define(vec![2, 0, 1, 3]).unwrap();
        assert_eq!(p.ranking(), &[2, 0, 1]);
        assert_eq!(p.length(), 3);
        assert_eq!(Permutation::define(vec![0, 1, 2]).unwrap(), Permutation::identity());
        assert_eq!(
            Permutation::define(vec![0, 2]),
            Err(PermutationError::InvalidRanking { len: 2 })
        );
        assert_eq!(Permutation::try_from(vec![1, 0]), Permutation::define([1, 0]));
        assert_eq!(Vec::from(p.clone()), p.to_ranking());
    }

    #[test]
    fn test_cycle_notation() {
        assert_eq!(
            Permutation::cycle([1, 2, 3]).unwrap(),
            Permutation::from_cycle([0, 1, 2]).unwrap()
        );
        assert_eq!(Permutation::cycle([2, 4]).unwrap().ranking(), &[0, 3, 2, 1]);
        assert_eq!(Permutation::cycle([0, 2]), Err(PermutationError::NegativeIndex(-1)));
        assert_eq!(
            Permutation::cycle([3, 1, 3]),
            Err(PermutationError::DuplicateIndex(3))
        );
        assert_eq!(
            Permutation::from_cycle([3, 1, 3]),
            Err(PermutationError::DuplicateIndex(3))
        );
        assert!(Permutation::from_cycle([]).unwrap().is_identity());
        assert!(Permutation::from_cycle([0]).unwrap().is_identity());
        assert!(Permutation::from_cycle([5]).unwrap().is_identity());
        assert!(Permutation::from_cycle([usize::MAX]).unwrap().is_identity());
        assert_eq!(
            Permutation::from_cycle([usize::MAX, usize::MAX]),
            Err(PermutationError::DuplicateIndex(usize::MAX))
        );
        assert!(Permutation::cycle([]).unwrap().is_identity());
    }

    #[test]
    fn test_example_cab() {
        let p = Permutation::cycle([1, 2, 3]).unwrap();
        assert_eq!(p.apply_str("abc").unwrap(), "cab");
        let q = Permutation::cycle([1, 2])
            .unwrap()
            .compose(&Permutation::cycle([2, 3]).unwrap());
        assert_eq!(q.apply_str("abc").unwrap(), "cab");
        assert_snapshot!(q, @"(1 2 3)");
    }

    #[test]
    fn test_hello_world() {
        let c0 = Permutation::from_cycle([7, 9]).unwrap();
        let c1 = Permutation::from_cycle([1, 4, 8, 10, 3, 6, 11]).unwrap();
        let c2 = Permutation::from_cycle([0, 2, 5]).unwrap();
        let p = Permutation::product([&c0, &c1, &c2]).invert();
        assert_eq!(p.apply_str(" !Hdellloorw").unwrap(), "Hello world!");
        let q: Permutation = [c0, c1, c2].iter().product();
        assert_eq!(q.invert(), p);
    }

    #[test]
    fn test_display() {
        assert_snapshot!(Permutation::identity(), @"()");
        assert_snapshot!(Permutation::define(vec![3, 4, 0, 2, 1]).unwrap(), @"(1 4 3) (2 5)");
        assert_snapshot!(Permutation::reverse(4), @"(1 4) (2 3)");
    }

    #[test]
    fn test_compose_unequal_lengths() {
        let p = Permutation::cycle([1, 2]).unwrap();
        let q = Permutation::cycle([4, 5]).unwrap();
        let pq = p.compose(&q);
        assert_eq!(pq.ranking(), &[1, 0, 2, 4, 3]);
        assert_eq!(pq, q.compose(&p));
        assert_eq!(p.compose(&Permutation::identity()), p);
        assert_eq!(Permutation::identity().compose(&p), p);
    }

    #[test]
    fn test_pow() {
        let p = Permutation::define(vec![1, 2, 3, 0, 5, 4]).unwrap();
        assert_eq!(p.order(), 4);
        assert!(p.pow(0).is_identity());
        assert!(Permutation::identity().pow(-7).is_identity());
        let mut manual = Permutation::identity();
        for n in 0..10 {
            assert_eq!(p.pow(n), manual, "n = {n}");
            assert_eq!(p.pow(-n), manual.invert(), "n = -{n}");
            manual = manual.compose(&p);
        }
        assert!(p.pow(4).is_identity());
        assert_eq!(p.pow(i64::MIN), Permutation::identity());
    }

    #[test]
    fn test_order() {
        assert_eq!(Permutation::identity().order(), 1);
        assert_eq!(Permutation::cycle([1, 2]).unwrap().order(), 2);
        let p = Permutation::cycle([1, 2, 3])
            .unwrap()
            .compose(&Permutation::cycle([4, 5]).unwrap());
        assert_eq!(p.order(), 6);
    }

    #[test]
    fn test_apply_variants() {
        let p = Permutation::define(vec![2, 0, 1]).unwrap();
        let data = vec![10, 20, 30, 40];
        let expected = vec![20, 30, 10, 40];
        assert_eq!(p.apply_slice(&data).unwrap(), expected);
        assert_eq!(p.apply_iter(data.clone()).unwrap(), expected);
        assert_eq!(p.apply_array([10, 20, 30, 40]).unwrap().to_vec(), expected);
        assert_eq!(p.to_cycles().apply(&data).unwrap(), expected);

        let strings = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        assert_eq!(p.apply_iter(strings).unwrap(), vec!["y", "z", "x"]);

        let short = [1, 2];
        let mismatch = PermutationError::LengthMismatch {
            required: 3,
            actual: 2,
        };
        assert_eq!(p.apply_slice(&short), Err(mismatch.clone()));
        assert_eq!(p.apply_iter(short), Err(mismatch.clone()));
        assert_eq!(p.apply_array(short), Err(mismatch));
        assert!(p.apply_str("ab").is_err());
        assert_eq!(p.apply(7), 7);
    }

    #[test]
    fn test_sorting() {
        let data = ["pear", "fig", "apple", "fig"];
        let p = Permutation::sorting(&data);
        assert_eq!(p.apply_slice(&data).unwrap(), vec!["apple", "fig", "fig", "pear"]);
        assert!(p.sorts(&data).unwrap());
        assert!(!Permutation::identity().sorts(&data).unwrap());

        let by_len = Permutation::sorting_by_key(&data, |s| s.len());
        assert_eq!(by_len.apply_slice(&data).unwrap(), vec!["fig", "fig", "pear", "apple"]);
        assert!(by_len.sorts_by(&data, |a, b| a.len().cmp(&b.len())).unwrap());

        let desc = Permutation::sorting_by(&data, |a, b| b.cmp(a));
        assert_eq!(desc.apply_slice(&data).unwrap(), vec!["pear", "fig", "fig", "apple"]);
        assert!(Permutation::sorting(&[3, 3, 3, 3, 3, 3, 3]).is_identity());
    }

    #[test]
    fn test_taking() {
        let a = [5, 1, 5, 2];
        let b = [1, 5, 2, 5];
        let p = Permutation::taking(&a).to(&b).unwrap();
        assert_eq!(p.apply_slice(&a).unwrap(), b);

        let lower = ["B", "a"];
        let upper = ["A", "b"];
        let q = Permutation::taking(&lower)
            .to_by(&upper, |x, y| x.to_lowercase().cmp(&y.to_lowercase()))
            .unwrap();
        assert_eq!(q, Permutation::cycle([1, 2]).unwrap());
        assert_eq!(Permutation::taking(&a).to(&[1, 5, 2, 2]), None);
        assert_eq!(Permutation::taking(&a).to(&[1, 5, 2]), None);
    }

    #[test]
    fn test_shift_reverse_move() {
        let p = Permutation::reverse(3).shift(3);
        assert_eq!(p.apply_str("abcabc").unwrap(), "abccba");
        assert_eq!(p.apply(1), 1);
        assert_eq!(p.apply(3), 5);
        assert!(Permutation::identity().shift(4).is_identity());

        assert_eq!(Permutation::reverse(5).apply_str("12345").unwrap(), "54321");
        assert!(Permutation::reverse(5).reverses(5));
        assert!(!Permutation::reverse(5).reverses(4));
        assert!(Permutation::identity().reverses(1));
        assert!(!Permutation::identity().reverses(2));

        assert_eq!(Permutation::move_index(0, 2).apply_str("12345").unwrap(), "23145");
        assert_eq!(Permutation::move_index(3, 1).apply_str("12345").unwrap(), "14235");
        assert!(Permutation::move_index(2, 2).is_identity());
    }

    #[test]
    fn test_orbit_and_cycles() {
        let p = Permutation::define(vec![3, 4, 0, 2, 1]).unwrap();
        assert_eq!(p.orbit(0), vec![0, 3, 2]);
        assert_eq!(p.orbit(4), vec![4, 1]);
        assert_eq!(p.orbit(9), vec![9]);
        assert!(!p.is_cycle());
        assert!(Permutation::cycle([2, 5, 3]).unwrap().is_cycle());
        assert!(Permutation::identity().is_cycle());
        assert_eq!(p.signature(), -1);
        assert_eq!(p.find_cycle(), Some(vec![0, 3, 2]));
        assert_eq!(Permutation::cycle([3, 5]).unwrap().find_cycle(), Some(vec![2, 4]));
        assert_eq!(Permutation::identity().find_cycle(), None);
    }

    #[test]
    fn test_ordering() {
        let mut all: Vec<_> = Permutation::symmetric_group(3).collect();
        all.sort();
        let rankings: Vec<_> = all.iter().map(|p| p.to_ranking()).collect();
        assert_eq!(
            rankings,
            vec![
                vec![],
                vec![1, 0],
                vec![0, 2, 1],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_symmetric_group() {
        let factorials = [1, 1, 2, 6, 24, 120, 720, 5040];
        for (n, &count) in factorials.iter().enumerate() {
            let all: AHashSet<_> = Permutation::symmetric_group(n).collect();
            assert_eq!(all.len(), count);
            assert!(all.iter().all(|p| p.length() <= n));
        }
    }

    #[test]
    fn test_signature_sum() {
        let sum: i32 = Permutation::symmetric_group(5)
            .map(|p| i32::from(p.signature()))
            .sum();
        assert_eq!(sum, 0);
        let even = Permutation::symmetric_group(5)
            .filter(|p| p.signature() == 1)
            .count();
        assert_eq!(even, 60);
    }

    #[test]
    fn test_random() {
        let mut rng = SmallRng::seed_from_u64(42);
        for length in 0..12 {
            let p = Permutation::random(&mut rng, length);
            assert!(p.length() <= length);
            assert!(p.compose(&p.invert()).is_identity());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates() {
        use serde::de::{value::SeqDeserializer, value::Error, IntoDeserializer};
        use serde::Deserialize;

        let ok: SeqDeserializer<_, Error> = vec![1usize, 0, 2].into_deserializer();
        assert_eq!(
            Permutation::deserialize(ok).unwrap(),
            Permutation::cycle([1, 2]).unwrap()
        );
        let bad: SeqDeserializer<_, Error> = vec![1usize, 1].into_deserializer();
        assert!(Permutation::deserialize(bad).is_err());
    }
}
