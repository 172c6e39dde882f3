use std::iter::FusedIterator;

use crate::Bounds;
use crate::IndexError;
use crate::Layout;
use crate::Order;

/// Iterates over the flat offsets of a strided view of a dense array.
///
/// The traversal is an odometer over the view's dimensions: the
/// fastest varying dimension (the last one in row-major order, the
/// first in column-major order) is advanced by its stride on every
/// step, and when it runs past its end it is reset to its start and
/// the carry moves on to the next slower dimension. The running
/// offset is updated incrementally rather than recomputed from the
/// coordinate.
///
/// The iterator owns a private copy of the bounds, so any number of
/// iterators over the same view can run independently.
///
/// ```
/// # use ndindex::Layout;
/// let mut iter = Layout::row_major(vec![2, 2]).iter_all();
/// assert_eq!(iter.len(), 4);
/// assert_eq!(iter.advance().unwrap(), 0);
/// assert_eq!(iter.coord(), vec![0, 1]);
/// assert_eq!(iter.by_ref().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert!(!iter.has_next());
/// assert!(iter.advance().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct IndexIterator {
    order: Order,
    starts: Vec<usize>,
    ends: Vec<usize>,
    strides: Vec<usize>,
    weights: Vec<usize>,
    /// The actual coordinate of the next element.
    counters: Vec<usize>,
    /// The flat offset of the next element.
    offset: usize,
    remaining: usize,
}

impl IndexIterator {
    /// Bounds must already be validated against the layout.
    pub(crate) fn new(layout: &Layout, bounds: &Bounds) -> Self {
        let weights = layout.weights().to_vec();
        let offset = bounds
            .starts()
            .iter()
            .zip(&weights)
            .map(|(start, weight)| start * weight)
            .sum();
        let remaining = bounds.len();
        tracing::trace!(
            order = %layout.order(),
            rank = layout.rank(),
            len = remaining,
            "index iterator over {}",
            bounds,
        );
        Self {
            order: layout.order(),
            starts: bounds.starts().to_vec(),
            ends: bounds.ends().to_vec(),
            strides: bounds.strides().to_vec(),
            weights,
            counters: bounds.starts().to_vec(),
            offset,
            remaining,
        }
    }

    /// Whether another offset is available.
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// Return the next offset, failing with [`IndexError::Exhausted`]
    /// once the view has been fully traversed.
    pub fn advance(&mut self) -> Result<usize, IndexError> {
        self.next().ok_or(IndexError::Exhausted)
    }

    /// The logical position, relative to the view's starts and in
    /// units of its strides, of the element the next call yields.
    /// Meaningless once the iterator is exhausted.
    pub fn coord(&self) -> Vec<usize> {
        self.counters
            .iter()
            .zip(&self.starts)
            .zip(&self.strides)
            .map(|((counter, start), stride)| (counter - start) / stride)
            .collect()
    }

    fn step(&mut self) {
        let rank = self.counters.len();
        for k in 0..rank {
            let dim = self.order.axis(rank, k);
            self.counters[dim] += self.strides[dim];
            self.offset += self.strides[dim] * self.weights[dim];
            if self.counters[dim] < self.ends[dim] {
                return;
            }
            // Carry: rewind this dimension and advance the next slower one.
            self.offset -= (self.counters[dim] - self.starts[dim]) * self.weights[dim];
            self.counters[dim] = self.starts[dim];
        }
    }
}

impl Iterator for IndexIterator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.offset;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.step();
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IndexIterator {}

impl FusedIterator for IndexIterator {}
