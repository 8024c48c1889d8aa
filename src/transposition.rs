use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use rand::Rng;
use tracing::debug;

use crate::{
    array_util::{check_length, range},
    error::PermutationError,
    permutation::Permutation,
    swap::Swap,
};

/// A permutation that exchanges exactly two indices `j > k`.
///
/// # Examples
///
/// ```
/// # use cycloid::transposition::Transposition;
/// let t = Transposition::swap(0, 2).unwrap();
/// assert_eq!(t.to_string(), "(1 3)");
/// assert_eq!(t.apply_slice(&['a', 'b', 'c']).unwrap(), vec!['c', 'b', 'a']);
/// assert!(Transposition::swap(1, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(usize, usize)", into = "(usize, usize)")
)]
pub struct Transposition {
    j: usize,
    k: usize,
}

impl Transposition {
    /// The transposition of `j` and `k`, in either order.
    pub fn swap(j: usize, k: usize) -> Result<Self, PermutationError> {
        match j.cmp(&k) {
            std::cmp::Ordering::Equal => Err(PermutationError::EqualIndices(j)),
            std::cmp::Ordering::Greater => Ok(Transposition { j, k }),
            std::cmp::Ordering::Less => Ok(Transposition { j: k, k: j }),
        }
    }

    /// A uniformly random transposition of two indices below `length`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Result<Self, PermutationError> {
        if length < 2 {
            return Err(PermutationError::TooShort { length });
        }
        let j = rng.gen_range(0..length);
        let mut k = rng.gen_range(0..length - 1);
        if k >= j {
            k += 1;
        }
        Transposition::swap(j, k)
    }

    /// The larger index.
    pub fn j(&self) -> usize {
        self.j
    }

    /// The smaller index.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn apply(&self, i: usize) -> usize {
        if i == self.j {
            self.k
        } else if i == self.k {
            self.j
        } else {
            i
        }
    }

    /// Swaps the two positions of `buf`.
    pub fn clobber<B: Swap + ?Sized>(&self, buf: &mut B) -> Result<(), PermutationError> {
        check_length(self.length(), buf.len())?;
        buf.swap(self.j, self.k);
        Ok(())
    }

    pub fn apply_slice<T: Clone>(&self, input: &[T]) -> Result<Vec<T>, PermutationError> {
        check_length(self.length(), input.len())?;
        let mut result = input.to_vec();
        result.swap(self.j, self.k);
        Ok(result)
    }

    /// Whether the two transpositions can be applied in either order with the
    /// same result, that is, they are equal or share no index.
    pub fn commutes_with(&self, other: &Transposition) -> bool {
        self == other
            || (self.j != other.j && self.j != other.k && self.k != other.j && self.k != other.k)
    }

    /// Minimum buffer length.
    pub fn length(&self) -> usize {
        self.j + 1
    }

    pub fn to_permutation(&self) -> Permutation {
        let mut ranking = range(self.length());
        ranking.swap(self.j, self.k);
        Permutation::define_trusted(ranking)
    }

    /// The composition `t1 ∘ t2 ∘ ...`: the last transposition is applied
    /// first.
    pub fn product<'a>(transpositions: impl IntoIterator<Item = &'a Transposition>) -> Permutation {
        let mut ranking = Vec::new();
        for t in transpositions {
            if ranking.len() < t.length() {
                ranking.extend(ranking.len()..t.length());
            }
            ranking.swap(t.j, t.k);
        }
        Permutation::define_trusted(ranking)
    }
}

impl TryFrom<(usize, usize)> for Transposition {
    type Error = PermutationError;

    fn try_from((j, k): (usize, usize)) -> Result<Self, Self::Error> {
        Transposition::swap(j, k)
    }
}

impl From<Transposition> for (usize, usize) {
    fn from(t: Transposition) -> Self {
        (t.j, t.k)
    }
}

impl From<Transposition> for Permutation {
    fn from(t: Transposition) -> Self {
        t.to_permutation()
    }
}

/// One-based, like the equivalent two-cycle.
impl fmt::Display for Transposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.k + 1, self.j + 1)
    }
}

/// Shared transposition instances for all pairs of indices below
/// `max_cached_length`.
///
/// Slots are filled on first use. Concurrent first uses of the same pair may
/// both build a value, but only one gets stored and every caller sees that
/// one.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use cycloid::transposition::TranspositionCache;
/// let cache = TranspositionCache::new(8);
/// let a = cache.swap(3, 1).unwrap();
/// let b = cache.swap(1, 3).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug)]
pub struct TranspositionCache {
    max_cached_length: usize,
    slots: Vec<OnceLock<Arc<Transposition>>>,
}

impl TranspositionCache {
    pub fn new(max_cached_length: usize) -> Self {
        let slot_count = max_cached_length * max_cached_length.saturating_sub(1) / 2;
        debug!(max_cached_length, slot_count, "creating transposition cache");
        TranspositionCache {
            max_cached_length,
            slots: std::iter::repeat_with(OnceLock::new)
                .take(slot_count)
                .collect(),
        }
    }

    pub fn max_cached_length(&self) -> usize {
        self.max_cached_length
    }

    /// Like [`Transposition::swap`]. Pairs with both indices below
    /// [`TranspositionCache::max_cached_length`] always return the same
    /// instance; other pairs get a fresh one.
    pub fn swap(&self, j: usize, k: usize) -> Result<Arc<Transposition>, PermutationError> {
        let t = Transposition::swap(j, k)?;
        if t.j >= self.max_cached_length {
            return Ok(Arc::new(t));
        }
        match self.slots.get(Self::slot(&t)) {
            Some(slot) => Ok(Arc::clone(slot.get_or_init(|| Arc::new(t)))),
            None => Ok(Arc::new(t)),
        }
    }

    /// Like [`Transposition::random`], drawing through the cache.
    pub fn random<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<Arc<Transposition>, PermutationError> {
        let t = Transposition::random(rng, length)?;
        self.swap(t.j, t.k)
    }

    /// Row-major lower triangle, `j > k`. Only called for `j < max_cached_length`.
    fn slot(t: &Transposition) -> usize {
        t.j * (t.j - 1) / 2 + t.k
    }
}

impl Default for TranspositionCache {
    fn default() -> Self {
        TranspositionCache::new(16)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use insta::assert_snapshot;
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;

    #[test]
    fn normalized() {
        let t = Transposition::swap(2, 5).unwrap();
        assert_eq!((t.j(), t.k()), (5, 2));
        assert_eq!(t, Transposition::swap(5, 2).unwrap());
        assert_eq!(Transposition::swap(4, 4), Err(PermutationError::EqualIndices(4)));
        assert_eq!(Transposition::try_from((0, 3)), Transposition::swap(3, 0));
        assert_eq!(<(usize, usize)>::from(t), (5, 2));
    }

    #[test]
    fn application() {
        let t = Transposition::swap(1, 3).unwrap();
        assert_eq!(t.length(), 4);
        let images: Vec<_> = (0..5).map(|i| t.apply(i)).collect();
        assert_eq!(images, vec![0, 3, 2, 1, 4]);
        assert_eq!(t.apply_slice(&[1, 2, 3, 4, 5]).unwrap(), vec![1, 4, 3, 2, 5]);
        assert!(t.apply_slice(&[1, 2, 3]).is_err());

        let mut buf = vec!['a', 'b', 'c', 'd'];
        t.clobber(&mut buf).unwrap();
        assert_eq!(buf, vec!['a', 'd', 'c', 'b']);
        assert_eq!(
            t.clobber(&mut buf[..2]),
            Err(PermutationError::LengthMismatch {
                required: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn matches_two_cycle() {
        let t = Transposition::swap(0, 2).unwrap();
        assert_eq!(t.to_permutation(), Permutation::cycle([1, 3]).unwrap());
        assert_eq!(Permutation::from(t).to_string(), t.to_string());
        assert_snapshot!(t, @"(1 3)");
    }

    #[test]
    fn commuting() {
        let t = |j, k| Transposition::swap(j, k).unwrap();
        assert!(t(0, 1).commutes_with(&t(2, 3)));
        assert!(t(0, 1).commutes_with(&t(1, 0)));
        assert!(!t(0, 1).commutes_with(&t(1, 2)));
        for (a, b) in [(t(0, 1), t(2, 3)), (t(0, 1), t(1, 2)), (t(0, 4), t(4, 2))] {
            let ab = a.to_permutation().compose(&b.to_permutation());
            let ba = b.to_permutation().compose(&a.to_permutation());
            assert_eq!(a.commutes_with(&b), ab == ba);
        }
    }

    #[test]
    fn product_of_transpositions() {
        let ts = [
            Transposition::swap(0, 1).unwrap(),
            Transposition::swap(1, 2).unwrap(),
        ];
        let expected = ts[0].to_permutation().compose(&ts[1].to_permutation());
        assert_eq!(Transposition::product(&ts), expected);
        assert_snapshot!(Transposition::product(&ts), @"(1 2 3)");
        assert!(Transposition::product([]).is_identity());
    }

    #[test]
    fn random() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let t = Transposition::random(&mut rng, 5).unwrap();
            assert!(t.j() < 5);
            assert!(t.k() < t.j());
        }
        assert_eq!(
            Transposition::random(&mut rng, 1),
            Err(PermutationError::TooShort { length: 1 })
        );
    }

    #[test]
    fn cache_shares_instances() {
        let cache = TranspositionCache::new(4);
        let first = cache.swap(0, 3).unwrap();
        assert!(Arc::ptr_eq(&first, &cache.swap(3, 0).unwrap()));
        assert!(!Arc::ptr_eq(&first, &cache.swap(0, 2).unwrap()));

        // above the threshold every call builds a new one
        let big = cache.swap(4, 0).unwrap();
        assert!(!Arc::ptr_eq(&big, &cache.swap(4, 0).unwrap()));
        assert_eq!(*big, Transposition::swap(0, 4).unwrap());

        assert!(cache.swap(2, 2).is_err());
    }

    #[test]
    fn cache_accepts_huge_indices() {
        let cache = TranspositionCache::new(4);
        let far = cache.swap(1usize << 33, 0).unwrap();
        assert_eq!((far.j(), far.k()), (1usize << 33, 0));
        let top = cache.swap(usize::MAX, usize::MAX - 1).unwrap();
        assert_eq!(top.k(), usize::MAX - 1);
    }

    #[test]
    fn cache_draws_random_pairs() {
        let cache = TranspositionCache::new(5);
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            let t = cache.random(&mut rng, 5).unwrap();
            assert!(t.k() < t.j() && t.j() < 5);
            assert!(Arc::ptr_eq(&t, &cache.swap(t.k(), t.j()).unwrap()));
        }
        assert_eq!(
            cache.random(&mut rng, 0),
            Err(PermutationError::TooShort { length: 0 })
        );
    }

    #[test]
    fn cache_covers_every_pair() {
        let cache = TranspositionCache::new(6);
        for j in 0..6 {
            for k in 0..j {
                let t = cache.swap(j, k).unwrap();
                assert_eq!((t.j(), t.k()), (j, k));
                assert!(Arc::ptr_eq(&t, &cache.swap(k, j).unwrap()));
            }
        }
    }

    #[test]
    fn cache_is_shared_across_threads() {
        let cache = TranspositionCache::default();
        let instances: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| cache.swap(7, 2).unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
