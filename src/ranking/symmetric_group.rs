use std::iter::FusedIterator;

use tracing::trace;

use crate::array_util::paste_into;

/// A stack of partial rankings ("frames") of varying length, all stored in
/// one flat buffer with a fixed slot width.
///
/// Expanding the top frame of length `k` replaces it by the `k + 1` frames of
/// length `k + 1` obtained by inserting `k` at every position. Starting from a
/// single empty frame and always expanding the top, the height never exceeds
/// `1 + width * (width - 1) / 2`.
#[derive(Debug, Clone)]
pub(crate) struct FrameStack {
    width: usize,
    buffer: Vec<usize>,
    lengths: Vec<usize>,
}

impl FrameStack {
    pub(crate) fn max_height(width: usize) -> usize {
        1 + width * width.saturating_sub(1) / 2
    }

    /// A stack holding one empty frame.
    pub(crate) fn new(width: usize) -> Self {
        let max_height = Self::max_height(width);
        let mut lengths = Vec::with_capacity(max_height);
        lengths.push(0);
        FrameStack {
            width,
            buffer: vec![0; max_height * width],
            lengths,
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.lengths.len()
    }

    fn frame(&self, level: usize) -> &[usize] {
        let start = level * self.width;
        &self.buffer[start..start + self.lengths[level]]
    }

    pub(crate) fn top(&self) -> Option<&[usize]> {
        let level = self.height().checked_sub(1)?;
        Some(self.frame(level))
    }

    pub(crate) fn pop(&mut self) -> Option<Vec<usize>> {
        let frame = self.top()?.to_vec();
        self.lengths.pop();
        Some(frame)
    }

    /// Replaces the top frame by its `k + 1` extensions. `scratch` holds a
    /// copy of the old top while the new frames are written over it.
    pub(crate) fn expand_last(&mut self, scratch: &mut Vec<usize>) {
        let Some(level) = self.height().checked_sub(1) else {
            return;
        };
        let k = self.lengths[level];
        debug_assert!(k < self.width);
        scratch.clear();
        scratch.extend_from_slice(self.frame(level));

        for i in 0..=k {
            let start = (level + i) * self.width;
            paste_into(&mut self.buffer[start..start + k + 1], &scratch[..], i, k);
        }
        self.lengths[level] = k + 1;
        self.lengths.extend(std::iter::repeat(k + 1).take(k));
    }
}

/// Iterator over all `n!` rankings of length `n`.
///
/// Runs without recursion off a private [`FrameStack`]. The order is fixed
/// (the identity comes first) but otherwise unspecified.
///
/// # Examples
///
/// ```
/// # use cycloid::ranking::symmetric_group;
/// let all: Vec<_> = symmetric_group(3).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricGroup {
    n: usize,
    stack: FrameStack,
    scratch: Vec<usize>,
    remaining: Option<usize>,
}

impl SymmetricGroup {
    pub(crate) fn new(n: usize) -> Self {
        let remaining = (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k));
        trace!(n, ?remaining, "enumerating symmetric group");
        SymmetricGroup {
            n,
            stack: FrameStack::new(n),
            scratch: Vec::with_capacity(n),
            remaining,
        }
    }
}

impl Iterator for SymmetricGroup {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stack.top()?.len() == self.n {
                let ranking = self.stack.pop();
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining = remaining.saturating_sub(1);
                }
                return ranking;
            }
            self.stack.expand_last(&mut self.scratch);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (0, None),
        }
    }
}

impl FusedIterator for SymmetricGroup {}
