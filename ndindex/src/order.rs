use std::fmt;

use itertools::izip;
use serde::Deserialize;
use serde::Serialize;

use crate::Bounds;
use crate::IndexError;
use crate::IndexIterator;
use crate::Layout;

/// The linearization order of a dense n-dimensional array.
///
/// The order decides how much each dimension weighs in a flat offset:
///
/// ```text
/// RowMajor:    weight[d] = ∏ dimensions[j] for j > d
/// ColumnMajor: weight[d] = ∏ dimensions[j] for j < d
/// ```
///
/// so the last (row-major) or the first (column-major) dimension has
/// weight 1 and varies fastest during traversal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    /// C order: the last dimension is contiguous.
    #[default]
    RowMajor,
    /// Fortran order: the first dimension is contiguous.
    ColumnMajor,
}

impl Order {
    /// The weight of each dimension of `dimensions` under this order.
    ///
    /// ```
    /// # use ndindex::Order;
    /// assert_eq!(Order::RowMajor.weights(&[2, 3, 4]), vec![12, 4, 1]);
    /// assert_eq!(Order::ColumnMajor.weights(&[2, 3, 4]), vec![1, 2, 6]);
    /// ```
    pub fn weights(&self, dimensions: &[usize]) -> Vec<usize> {
        let mut weights = dimensions.to_vec();
        let fold = |acc: usize, n: &mut usize| {
            let next = *n * acc;
            *n = acc;
            next
        };
        match self {
            Order::RowMajor => {
                let _ = weights.iter_mut().rev().fold(1, fold);
            }
            Order::ColumnMajor => {
                let _ = weights.iter_mut().fold(1, fold);
            }
        }
        weights
    }

    /// The dimension that is `k`-th fastest varying in a rank-`rank`
    /// traversal: `k == 0` is the innermost loop, `k == rank - 1` the
    /// outermost.
    pub(crate) fn axis(&self, rank: usize, k: usize) -> usize {
        match self {
            Order::RowMajor => rank - 1 - k,
            Order::ColumnMajor => k,
        }
    }

    /// The flat offset of logical position `indices` within the view
    /// described by `starts` and `strides` over a dense array of shape
    /// `dimensions`. The actual coordinate along dimension `d` is
    /// `starts[d] + indices[d] * strides[d]`.
    ///
    /// No bounds checking is performed; see [`Layout::location`] for
    /// a checked lookup.
    ///
    /// ```
    /// # use ndindex::Order;
    /// // Element (1, 2) of a 2x3 array.
    /// assert_eq!(Order::RowMajor.index(&[2, 3], &[0, 0], &[1, 1], &[1, 2]), 5);
    /// assert_eq!(Order::ColumnMajor.index(&[2, 3], &[0, 0], &[1, 1], &[1, 2]), 5);
    /// // Element (1, 0) of the same array.
    /// assert_eq!(Order::ColumnMajor.index(&[2, 3], &[0, 0], &[1, 1], &[1, 0]), 1);
    /// ```
    pub fn index(
        &self,
        dimensions: &[usize],
        starts: &[usize],
        strides: &[usize],
        indices: &[usize],
    ) -> usize {
        weighted_sum(&self.weights(dimensions), starts, strides, indices)
    }

    /// A lazy traversal of the flat offsets of every element in the
    /// strided view `starts..ends` (stepping by `strides`) of a dense
    /// array of shape `dimensions`.
    ///
    /// The bounds are validated up front: all arrays must have the
    /// same length, `starts[d] <= ends[d] <= dimensions[d]` and
    /// `strides[d] >= 1`.
    ///
    /// ```
    /// # use ndindex::Order;
    /// let iter = Order::RowMajor.index_iter(&[4], &[1], &[4], &[2]).unwrap();
    /// assert_eq!(iter.collect::<Vec<_>>(), vec![1, 3]);
    /// ```
    pub fn index_iter(
        &self,
        dimensions: &[usize],
        starts: &[usize],
        ends: &[usize],
        strides: &[usize],
    ) -> Result<IndexIterator, IndexError> {
        let bounds = Bounds::new(starts.to_vec(), ends.to_vec(), strides.to_vec())?;
        Layout::new(*self, dimensions.to_vec()).iter(&bounds)
    }
}

/// `Σ weights[d] * (starts[d] + indices[d] * strides[d])`.
pub(crate) fn weighted_sum(
    weights: &[usize],
    starts: &[usize],
    strides: &[usize],
    indices: &[usize],
) -> usize {
    izip!(weights, starts, strides, indices)
        .map(|(weight, start, stride, index)| weight * (start + index * stride))
        .sum()
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::RowMajor => write!(f, "row-major"),
            Order::ColumnMajor => write!(f, "column-major"),
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_weights() {
        assert_eq!(Order::RowMajor.weights(&[4, 4, 4]), vec![16, 4, 1]);
        assert_eq!(Order::ColumnMajor.weights(&[4, 4, 4]), vec![1, 4, 16]);
        assert_eq!(Order::RowMajor.weights(&[5]), vec![1]);
        assert_eq!(Order::ColumnMajor.weights(&[5]), vec![1]);
        assert!(Order::RowMajor.weights(&[]).is_empty());
        // A zero extent zeroes the weights of the dimensions it dominates.
        assert_eq!(Order::RowMajor.weights(&[3, 0, 2]), vec![0, 2, 1]);
    }

    #[test]
    fn test_axis() {
        assert_eq!(
            (0..3).map(|k| Order::RowMajor.axis(3, k)).collect::<Vec<_>>(),
            vec![2, 1, 0]
        );
        assert_eq!(
            (0..3).map(|k| Order::ColumnMajor.axis(3, k)).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_index_dense() {
        let dims = [2, 3, 4];
        let row_major = (0..2)
            .flat_map(|i| (0..3).flat_map(move |j| (0..4).map(move |k| [i, j, k])))
            .map(|coord| Order::RowMajor.index(&dims, &[0; 3], &[1; 3], &coord));
        assert!(row_major.eq(0..24));

        let column_major = (0..4)
            .flat_map(|k| (0..3).flat_map(move |j| (0..2).map(move |i| [i, j, k])))
            .map(|coord| Order::ColumnMajor.index(&dims, &[0; 3], &[1; 3], &coord));
        assert!(column_major.eq(0..24));
    }

    #[test]
    fn test_index_strided() {
        // Rows 1 and 3 of a 4x5 array, every other column starting at 1.
        let dims = [4, 5];
        let starts = [1, 1];
        let strides = [2, 2];
        let offsets = (0..2)
            .cartesian_product(0..2)
            .map(|(i, j)| Order::RowMajor.index(&dims, &starts, &strides, &[i, j]))
            .collect::<Vec<_>>();
        assert_eq!(offsets, vec![6, 8, 16, 18]);

        let offsets = (0..2)
            .cartesian_product(0..2)
            .map(|(j, i)| Order::ColumnMajor.index(&dims, &starts, &strides, &[i, j]))
            .collect::<Vec<_>>();
        assert_eq!(offsets, vec![5, 7, 13, 15]);
    }

    #[test]
    fn test_index_scalar() {
        assert_eq!(Order::RowMajor.index(&[], &[], &[], &[]), 0);
        assert_eq!(Order::ColumnMajor.index(&[], &[], &[], &[]), 0);
    }

    #[test]
    fn test_index_iter_concrete() {
        let iter = Order::RowMajor
            .index_iter(&[2, 3], &[0, 0], &[2, 3], &[1, 1])
            .unwrap();
        assert_eq!(iter.collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);

        let iter = Order::ColumnMajor
            .index_iter(&[2, 3], &[0, 0], &[2, 3], &[1, 1])
            .unwrap();
        assert_eq!(iter.collect::<Vec<_>>(), vec![0, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_index_iter_rejects_bad_bounds() {
        assert!(matches!(
            Order::RowMajor.index_iter(&[2, 3], &[0], &[2, 3], &[1, 1]),
            Err(IndexError::InvalidDims {
                expected: 1,
                got: 2
            })
        ));
        assert!(matches!(
            Order::RowMajor.index_iter(&[2, 3], &[0, 0], &[2, 3], &[1, 0]),
            Err(IndexError::ZeroStride { dim: 1 })
        ));
        assert!(matches!(
            Order::ColumnMajor.index_iter(&[2, 3], &[0, 0], &[2, 4], &[1, 1]),
            Err(IndexError::InvalidRange {
                dim: 1,
                start: 0,
                end: 4,
                size: 3
            })
        ));
        assert!(matches!(
            Order::RowMajor.index_iter(&[2, 3], &[0, 0], &[2], &[1, 1]),
            Err(IndexError::InvalidDims { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Order::RowMajor.to_string(), "row-major");
        assert_eq!(Order::ColumnMajor.to_string(), "column-major");
        assert_eq!(Order::default(), Order::RowMajor);
    }
}
