//! # Cycle decompositions
//!
//! [`Cycles`] is the second encoding of a permutation: a list of disjoint
//! index cycles. Unlike a ranking, it can be applied to a buffer in place with
//! nothing but swaps, see [`Cycles::clobber`].

use std::fmt;

use bitvec::vec::BitVec;
use itertools::Itertools;

use crate::{
    array_util::{check_length, first_duplicate, range},
    error::PermutationError,
    permutation::Permutation,
    swap::Swap,
};

/// A permutation written as disjoint cycles.
///
/// In a cycle `[a, b, c]` the element at position `a` moves to `b`, the one at
/// `b` moves to `c` and the one at `c` moves back to `a`. Fixed points are
/// left out, so every cycle has at least two entries.
///
/// # Examples
///
/// ```
/// # use cycloid::cycles::Cycles;
/// let cycles = Cycles::create(vec![vec![0, 1, 2], vec![3, 4]]);
/// assert_eq!(cycles.length(), 5);
/// assert_eq!(cycles.to_string(), "(1 2 3) (4 5)");
///
/// let mut buf = vec!['a', 'b', 'c', 'd', 'e'];
/// cycles.clobber(&mut buf).unwrap();
/// assert_eq!(buf, vec!['c', 'a', 'b', 'e', 'd']);
/// cycles.unclobber(&mut buf).unwrap();
/// assert_eq!(buf, vec!['a', 'b', 'c', 'd', 'e']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<usize>>", into = "Vec<Vec<usize>>")
)]
pub struct Cycles {
    cycles: Vec<Vec<usize>>,
    length: usize,
}

impl Cycles {
    /// The empty decomposition.
    pub fn identity() -> Self {
        Cycles::default()
    }

    /// Builds a decomposition from explicit cycles.
    ///
    /// Nothing is checked: the caller promises that the cycles are pairwise
    /// disjoint and contain no repeated index. Cycles with fewer than two
    /// entries are dropped. Use `Cycles::try_from` for unchecked input.
    pub fn create(cycles: Vec<Vec<usize>>) -> Self {
        let cycles: Vec<Vec<usize>> = cycles.into_iter().filter(|c| c.len() >= 2).collect();
        let length = cycles
            .iter()
            .flatten()
            .max()
            .map_or(0, |&max| max + 1);
        Cycles { cycles, length }
    }

    /// The orbits of a valid ranking, smallest element first.
    pub(crate) fn from_ranking(ranking: &[usize]) -> Self {
        let mut visited: BitVec = BitVec::repeat(false, ranking.len());
        let mut cycles = Vec::new();
        for start in 0..ranking.len() {
            if visited[start] || ranking[start] == start {
                continue;
            }
            let mut cycle = Vec::new();
            let mut i = start;
            while !visited.replace(i, true) {
                cycle.push(i);
                i = ranking[i];
            }
            cycles.push(cycle);
        }
        Cycles::create(cycles)
    }

    /// Applies the permutation to `buf` in place.
    ///
    /// Each cycle is realized by swapping neighbouring cycle positions, last
    /// pair first. Positions past [`Cycles::length`] are untouched.
    ///
    /// # Errors
    ///
    /// [`PermutationError::LengthMismatch`] if `buf` is shorter than
    /// [`Cycles::length`]. The buffer is not modified in that case.
    pub fn clobber<B: Swap + ?Sized>(&self, buf: &mut B) -> Result<(), PermutationError> {
        check_length(self.length, buf.len())?;
        self.clobber_unchecked(buf);
        Ok(())
    }

    /// Undoes [`Cycles::clobber`] in place.
    pub fn unclobber<B: Swap + ?Sized>(&self, buf: &mut B) -> Result<(), PermutationError> {
        check_length(self.length, buf.len())?;
        self.unclobber_unchecked(buf);
        Ok(())
    }

    fn clobber_unchecked<B: Swap + ?Sized>(&self, buf: &mut B) {
        for cycle in &self.cycles {
            for j in (0..cycle.len() - 1).rev() {
                buf.swap(cycle[j], cycle[j + 1]);
            }
        }
    }

    fn unclobber_unchecked<B: Swap + ?Sized>(&self, buf: &mut B) {
        for cycle in &self.cycles {
            for j in 0..cycle.len() - 1 {
                buf.swap(cycle[j], cycle[j + 1]);
            }
        }
    }

    /// A permuted copy of `input`.
    pub fn apply<T: Clone>(&self, input: &[T]) -> Result<Vec<T>, PermutationError> {
        check_length(self.length, input.len())?;
        let mut result = input.to_vec();
        self.clobber_unchecked(&mut result);
        Ok(result)
    }

    /// Like [`Cycles::apply`], reusing the given vector.
    pub fn apply_vec<T>(&self, mut input: Vec<T>) -> Result<Vec<T>, PermutationError> {
        self.clobber(&mut input)?;
        Ok(input)
    }

    /// Permutes the characters of `s`.
    pub fn apply_str(&self, s: &str) -> Result<String, PermutationError> {
        let chars = self.apply_vec(s.chars().collect())?;
        Ok(chars.into_iter().collect())
    }

    /// Where index `i` is sent.
    pub fn apply_index(&self, i: usize) -> usize {
        self.neighbour(i, true)
    }

    /// Where index `i` comes from.
    pub fn unapply_index(&self, i: usize) -> usize {
        self.neighbour(i, false)
    }

    fn neighbour(&self, i: usize, forward: bool) -> usize {
        self.cycles
            .iter()
            .find_map(|cycle| {
                let k = cycle.iter().position(|&x| x == i)?;
                let len = cycle.len();
                let next = if forward { k + 1 } else { k + len - 1 };
                Some(cycle[next % len])
            })
            .unwrap_or(i)
    }

    /// The same permutation as a ranking.
    pub fn to_permutation(&self) -> Permutation {
        let mut ranking = range(self.length);
        self.unclobber_unchecked(&mut ranking);
        Permutation::define_trusted(ranking)
    }

    /// Applying the result is the same as applying `other` first and `self`
    /// second.
    pub fn compose(&self, other: &Cycles) -> Cycles {
        self.to_permutation()
            .compose(&other.to_permutation())
            .to_cycles()
    }

    /// Composition of all given decompositions, leftmost outermost.
    pub fn product<'a>(cycles: impl IntoIterator<Item = &'a Cycles>) -> Cycles {
        cycles
            .into_iter()
            .map(Cycles::to_permutation)
            .product::<Permutation>()
            .to_cycles()
    }

    /// `1` for even permutations and `-1` for odd ones.
    pub fn signature(&self) -> i8 {
        let even_cycles = self.cycles.iter().filter(|c| c.len() % 2 == 0).count();
        if even_cycles % 2 == 0 {
            1
        } else {
            -1
        }
    }

    pub fn is_even(&self) -> bool {
        self.signature() == 1
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// One plus the largest index in any cycle, or `0` for the identity.
    /// Buffers passed to [`Cycles::clobber`] must be at least this long.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn num_cycles(&self) -> usize {
        self.cycles.len()
    }

    pub fn cycle(&self, n: usize) -> Option<&[usize]> {
        self.cycles.get(n).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.cycles.iter().map(Vec::as_slice)
    }

    pub fn is_identity(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Validating counterpart of [`Cycles::create`].
///
/// # Errors
///
/// [`PermutationError::DuplicateIndex`] if an index occurs twice, within one
/// cycle or across two.
impl TryFrom<Vec<Vec<usize>>> for Cycles {
    type Error = PermutationError;

    fn try_from(cycles: Vec<Vec<usize>>) -> Result<Self, Self::Error> {
        let kept: Vec<usize> = cycles
            .iter()
            .filter(|c| c.len() >= 2)
            .flatten()
            .copied()
            .collect();
        match first_duplicate(&kept) {
            Some(duplicate) => Err(PermutationError::DuplicateIndex(duplicate)),
            None => Ok(Cycles::create(cycles)),
        }
    }
}

impl From<Cycles> for Vec<Vec<usize>> {
    fn from(cycles: Cycles) -> Self {
        cycles.cycles
    }
}

impl From<&Permutation> for Cycles {
    fn from(permutation: &Permutation) -> Self {
        permutation.to_cycles()
    }
}

/// One-based cycle notation, `()` for the identity.
impl fmt::Display for Cycles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cycles.is_empty() {
            return write!(f, "()");
        }
        let rendered = self
            .cycles
            .iter()
            .map(|cycle| format!("({})", cycle.iter().map(|i| i + 1).join(" ")))
            .join(" ");
        write!(f, "{rendered}")
    }
}
