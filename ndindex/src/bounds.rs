use std::fmt;

use itertools::Itertools;
use itertools::izip;
use serde::Deserialize;
use serde::Serialize;

use crate::IndexError;

/// Per-dimension bounds of a strided view: along dimension `d` the
/// view covers `starts[d]..ends[d]`, visiting every `strides[d]`-th
/// element.
///
/// ```
/// # use ndindex::Bounds;
/// let b = Bounds::new(vec![1, 0], vec![4, 3], vec![2, 1]).unwrap();
/// assert_eq!(b.sizes(), vec![2, 3]);
/// assert_eq!(b.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    starts: Vec<usize>,
    ends: Vec<usize>,
    strides: Vec<usize>,
}

/// The unchecked wire form of [`Bounds`]; deserialized values are
/// validated through [`Bounds::new`].
#[derive(Deserialize)]
struct RawBounds {
    starts: Vec<usize>,
    ends: Vec<usize>,
    strides: Vec<usize>,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = IndexError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Bounds::new(raw.starts, raw.ends, raw.strides)
    }
}

/// Equal lengths and strides of at least 1.
fn check_parts(starts: &[usize], ends: &[usize], strides: &[usize]) -> Result<(), IndexError> {
    for got in [ends.len(), strides.len()] {
        if got != starts.len() {
            tracing::debug!(rank = starts.len(), got, "mismatched bounds lengths");
            return Err(IndexError::InvalidDims {
                expected: starts.len(),
                got,
            });
        }
    }
    if let Some(dim) = strides.iter().position(|&stride| stride == 0) {
        tracing::debug!(dim, "zero stride");
        return Err(IndexError::ZeroStride { dim });
    }
    Ok(())
}

impl Bounds {
    /// Create new bounds. `starts`, `ends` and `strides` must have the
    /// same length, and every stride must be at least 1.
    pub fn new(
        starts: Vec<usize>,
        ends: Vec<usize>,
        strides: Vec<usize>,
    ) -> Result<Self, IndexError> {
        check_parts(&starts, &ends, &strides)?;
        Ok(Self {
            starts,
            ends,
            strides,
        })
    }

    /// Bounds covering every element of a dense array of shape
    /// `dimensions` with unit stride.
    pub fn full(dimensions: &[usize]) -> Self {
        Self {
            starts: vec![0; dimensions.len()],
            ends: dimensions.to_vec(),
            strides: vec![1; dimensions.len()],
        }
    }

    /// Resolve one [`Range`] per dimension against `dimensions`. Open
    /// or overlong ends are clamped to the extent of their dimension,
    /// and a begin past the end yields an empty dimension.
    ///
    /// ```
    /// # use ndindex::Bounds;
    /// # use ndindex::Range;
    /// let b = Bounds::from_ranges(&[4, 6], [Range::from(1..), Range::from(..).with_step(4)]).unwrap();
    /// assert_eq!(b, Bounds::new(vec![1, 0], vec![4, 6], vec![1, 4]).unwrap());
    /// ```
    pub fn from_ranges(
        dimensions: &[usize],
        ranges: impl IntoIterator<Item = Range>,
    ) -> Result<Self, IndexError> {
        let ranges: Vec<Range> = ranges.into_iter().collect();
        if ranges.len() != dimensions.len() {
            return Err(IndexError::InvalidDims {
                expected: dimensions.len(),
                got: ranges.len(),
            });
        }
        let (mut starts, mut ends, mut strides) = (Vec::new(), Vec::new(), Vec::new());
        for (range, &size) in ranges.iter().zip(dimensions) {
            let (begin, end, step) = range.resolve(size);
            starts.push(begin.min(end));
            ends.push(end);
            strides.push(step);
        }
        Self::new(starts, ends, strides)
    }

    /// Check that these bounds describe a view of a dense array of
    /// shape `dimensions`: the ranks agree, every stride is at least 1
    /// and, for every dimension, `starts[d] <= ends[d] <= dimensions[d]`.
    pub fn validate(&self, dimensions: &[usize]) -> Result<(), IndexError> {
        check_parts(&self.starts, &self.ends, &self.strides)?;
        if dimensions.len() != self.rank() {
            tracing::debug!(
                rank = dimensions.len(),
                got = self.rank(),
                "bounds rank does not match shape"
            );
            return Err(IndexError::InvalidDims {
                expected: dimensions.len(),
                got: self.rank(),
            });
        }
        for (dim, (&start, &end, &size)) in izip!(&self.starts, &self.ends, dimensions).enumerate()
        {
            if start > end || end > size {
                tracing::debug!(dim, start, end, size, "bounds out of range");
                return Err(IndexError::InvalidRange {
                    dim,
                    start,
                    end,
                    size,
                });
            }
        }
        Ok(())
    }

    /// The number of dimensions.
    pub fn rank(&self) -> usize {
        self.starts.len()
    }

    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The number of elements along each dimension:
    /// `⌈(ends[d] - starts[d]) / strides[d]⌉`, or 0 for an inverted
    /// range.
    pub fn sizes(&self) -> Vec<usize> {
        izip!(&self.starts, &self.ends, &self.strides)
            .map(|(&start, &end, &stride)| end.saturating_sub(start).div_ceil(stride))
            .collect()
    }

    /// The total number of elements in the view. A rank-0 view holds a
    /// single element.
    pub fn len(&self) -> usize {
        self.sizes().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            izip!(&self.starts, &self.ends, &self.strides)
                .map(|(start, end, stride)| Range(*start, Some(*end), *stride))
                .format(", ")
        )
    }
}

/// A range of indices, with a stride. Ranges are convertible from
/// native Rust ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range(pub usize, pub Option<usize>, pub usize);

impl Range {
    /// The same range, visiting every `step`-th index.
    pub fn with_step(self, step: usize) -> Self {
        Range(self.0, self.1, step)
    }

    pub(crate) fn resolve(&self, size: usize) -> (usize, usize, usize) {
        match self {
            Range(begin, Some(end), stride) => (*begin, std::cmp::min(size, *end), *stride),
            Range(begin, None, stride) => (*begin, size, *stride),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range(begin, None, stride) => write!(f, "{}::{}", begin, stride),
            Range(begin, Some(end), stride) => write!(f, "{}:{}:{}", begin, end, stride),
        }
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self(r.start, Some(r.end), 1)
    }
}

impl From<std::ops::RangeInclusive<usize>> for Range {
    fn from(r: std::ops::RangeInclusive<usize>) -> Self {
        Self(*r.start(), Some(r.end().saturating_add(1)), 1)
    }
}

impl From<std::ops::RangeFrom<usize>> for Range {
    fn from(r: std::ops::RangeFrom<usize>) -> Self {
        Self(r.start, None, 1)
    }
}

impl From<std::ops::RangeFull> for Range {
    fn from(_: std::ops::RangeFull) -> Self {
        Self(0, None, 1)
    }
}

impl From<usize> for Range {
    fn from(idx: usize) -> Self {
        Self(idx, Some(idx.saturating_add(1)), 1)
    }
}
