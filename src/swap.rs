use std::collections::VecDeque;

use duplicate::duplicate;

use crate::{error::PermutationError, permutation::Permutation};

/// A caller-owned buffer that can exchange two of its positions in place.
///
/// This is the only thing [`Cycles::clobber`](crate::cycles::Cycles::clobber)
/// and friends need to rearrange a buffer without allocating.
pub trait Swap {
    fn swap(&mut self, i: usize, j: usize);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool;

    /// Rearranges `self` in place so that it ends up equal to `perm.apply_slice(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycloid::{permutation::Permutation, swap::Swap};
    /// let p = Permutation::cycle([1, 2, 3]).unwrap();
    /// let mut data = vec!['a', 'b', 'c'];
    /// data.permute(&p).unwrap();
    /// assert_eq!(data, vec!['c', 'a', 'b']);
    /// ```
    fn permute(&mut self, perm: &Permutation) -> Result<(), PermutationError> {
        perm.to_cycles().clobber(self)
    }

    /// Undoes [`Swap::permute`].
    fn unpermute(&mut self, perm: &Permutation) -> Result<(), PermutationError> {
        perm.to_cycles().unclobber(self)
    }
}

duplicate! {
    [buffer swap_fn len_fn;
        [[T]] [<[T]>::swap] [<[T]>::len];
        [Vec<T>] [<[T]>::swap] [Vec::len];
        [VecDeque<T>] [VecDeque::swap] [VecDeque::len];
    ]

    impl<T> Swap for buffer {
        fn swap(&mut self, i: usize, j: usize) {
            swap_fn(self, i, j)
        }

        fn len(&self) -> usize {
            len_fn(self)
        }

        fn is_empty(&self) -> bool {
            len_fn(self) == 0
        }
    }
}
