use thiserror::Error;

/// Everything that can go wrong when building or applying a permutation.
///
/// All of these indicate bad input on the caller's side. Nothing here is
/// transient, so there is no point in retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("argument is not a ranking: every index below {len} must appear exactly once")]
    InvalidRanking { len: usize },

    #[error("not enough input: minimum input length is {required}, but input length is {actual}")]
    LengthMismatch { required: usize, actual: usize },

    #[error("negative number not allowed: {0}")]
    NegativeIndex(i64),

    #[error("repeated index {0} is not allowed in a cycle")]
    DuplicateIndex(usize),

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("a transposition needs two different indices, got {0} twice")]
    EqualIndices(usize),

    #[error("minimum length of a transposition is 2, got {length}")]
    TooShort { length: usize },
}
