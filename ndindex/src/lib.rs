//! Index arithmetic for strided views of dense n-dimensional arrays.
//!
//! A dense array of shape `dimensions` is stored in a flat buffer in
//! either row-major or column-major [`Order`]. A strided view of that
//! array is described by [`Bounds`]: per dimension, a half-open range
//! `starts[d]..ends[d]` visited every `strides[d]` elements.
//!
//! This crate translates between the two worlds:
//!
//! - [`Order::index`] maps a logical position within a view to its
//!   flat offset in the buffer.
//! - [`Order::index_iter`] lazily yields the flat offset of every
//!   element of a view, in the order's natural nesting (the last
//!   dimension varies fastest in row-major order, the first in
//!   column-major order).
//!
//! ```
//! use ndindex::Order;
//!
//! let offsets: Vec<_> = Order::ColumnMajor
//!     .index_iter(&[2, 3], &[0, 0], &[2, 3], &[1, 1])
//!     .unwrap()
//!     .collect();
//! assert_eq!(offsets, vec![0, 2, 4, 1, 3, 5]);
//! ```
//!
//! [`Layout`] caches the per-dimension weights of a shape so repeated
//! lookups and traversals over the same shape avoid recomputing them.

mod bounds;
mod iter;
mod layout;
mod order;

pub use bounds::Bounds;
pub use bounds::Range;
pub use iter::IndexIterator;
pub use layout::IndexError;
pub use layout::Layout;
pub use order::Order;

/// Property-based generators for randomized test input.
#[cfg(test)]
pub(crate) mod strategy;
