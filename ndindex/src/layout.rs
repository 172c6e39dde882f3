use std::fmt;

use itertools::Itertools;
use itertools::izip;
use serde::Deserialize;
use serde::Serialize;

use crate::Bounds;
use crate::IndexIterator;
use crate::Order;
use crate::order::weighted_sum;

/// The type of error for index operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IndexError {
    #[error("invalid dims: expected {expected}, got {got}")]
    InvalidDims { expected: usize, got: usize },

    #[error("stride of dimension {dim} must be at least 1")]
    ZeroStride { dim: usize },

    #[error("range {start}..{end} of dimension {dim} does not fit in size {size}")]
    InvalidRange {
        dim: usize,
        start: usize,
        end: usize,
        size: usize,
    },

    #[error("index {index} out of range for dimension {dim} of size {size}")]
    IndexOutOfRange {
        dim: usize,
        index: usize,
        size: usize,
    },

    #[error("value {value} not in layout")]
    ValueNotInLayout { value: usize },

    #[error("index iterator exhausted")]
    Exhausted,
}

/// The memory layout of a dense n-dimensional array: its shape and
/// linearization [`Order`], with the weight of every dimension
/// computed once up front.
///
/// ```
/// # use ndindex::Bounds;
/// # use ndindex::Layout;
/// let layout = Layout::column_major(vec![2, 3]);
/// assert_eq!(layout.weights(), &[1, 2]);
/// assert_eq!(layout.location(&[1, 2]).unwrap(), 5);
/// assert_eq!(layout.coordinates(5).unwrap(), vec![1, 2]);
///
/// let bounds = Bounds::new(vec![0, 1], vec![2, 3], vec![1, 1]).unwrap();
/// let offsets: Vec<_> = layout.iter(&bounds).unwrap().collect();
/// assert_eq!(offsets, vec![2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawLayout")]
pub struct Layout {
    order: Order,
    dimensions: Vec<usize>,
    /// Always derived from `order` and `dimensions`.
    #[serde(skip_serializing)]
    weights: Vec<usize>,
}

#[derive(Deserialize)]
struct RawLayout {
    order: Order,
    dimensions: Vec<usize>,
}

impl From<RawLayout> for Layout {
    fn from(raw: RawLayout) -> Self {
        Layout::new(raw.order, raw.dimensions)
    }
}

impl Layout {
    /// Create a new layout of shape `dimensions` in the given order.
    pub fn new(order: Order, dimensions: impl Into<Vec<usize>>) -> Self {
        let dimensions = dimensions.into();
        let weights = order.weights(&dimensions);
        Self {
            order,
            dimensions,
            weights,
        }
    }

    pub fn row_major(dimensions: impl Into<Vec<usize>>) -> Self {
        Self::new(Order::RowMajor, dimensions)
    }

    pub fn column_major(dimensions: impl Into<Vec<usize>>) -> Self {
        Self::new(Order::ColumnMajor, dimensions)
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// The extent of each dimension.
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// The flat distance between neighbouring elements along each
    /// dimension.
    pub fn weights(&self) -> &[usize] {
        &self.weights
    }

    /// The number of dimensions.
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// The number of elements in the dense array.
    pub fn len(&self) -> usize {
        self.dimensions.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The flat offset of the element at coordinate `coord`. Unlike
    /// [`Layout::index`], the coordinate is checked against the shape.
    pub fn location(&self, coord: &[usize]) -> Result<usize, IndexError> {
        if coord.len() != self.rank() {
            return Err(IndexError::InvalidDims {
                expected: self.rank(),
                got: coord.len(),
            });
        }
        for (dim, (&index, &size)) in coord.iter().zip(&self.dimensions).enumerate() {
            if index >= size {
                return Err(IndexError::IndexOutOfRange { dim, index, size });
            }
        }
        Ok(coord
            .iter()
            .zip(&self.weights)
            .map(|(pos, weight)| pos * weight)
            .sum())
    }

    /// The flat offset of logical position `indices` within the view
    /// described by `bounds`; see [`Order::index`]. Unchecked.
    pub fn index(&self, bounds: &Bounds, indices: &[usize]) -> usize {
        weighted_sum(&self.weights, bounds.starts(), bounds.strides(), indices)
    }

    /// Return the coordinate of the element stored at flat offset
    /// `value`. This is the inverse of [`Layout::location`].
    pub fn coordinates(&self, value: usize) -> Result<Vec<usize>, IndexError> {
        if value >= self.len() {
            return Err(IndexError::ValueNotInLayout { value });
        }
        let mut pos = value;
        let mut result = vec![0; self.rank()];
        for k in (0..self.rank()).rev() {
            let dim = self.order.axis(self.rank(), k);
            let weight = self.weights[dim];
            result[dim] = pos / weight;
            pos %= weight;
        }
        Ok(result)
    }

    /// A traversal of the flat offsets of every element in the view
    /// described by `bounds`, which are validated against this layout.
    pub fn iter(&self, bounds: &Bounds) -> Result<IndexIterator, IndexError> {
        bounds.validate(&self.dimensions)?;
        Ok(IndexIterator::new(self, bounds))
    }

    /// A traversal of every element of the dense array, in storage
    /// order.
    pub fn iter_all(&self) -> IndexIterator {
        IndexIterator::new(self, &Bounds::full(&self.dimensions))
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.order,
            izip!(&self.dimensions, &self.weights)
                .map(|(size, weight)| format!("{size}:{weight}"))
                .format(", ")
        )
    }
}
