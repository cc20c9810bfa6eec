//! Grid point primitives.
//!
//! - [`ChangeState`]: accumulated edit state of a curve since its last update
//! - [`StridedSlice`]: borrowed (start, stride, length) view into a numeric buffer
//! - [`GridPoint`]: a (label, argument, value) triple used for bulk input
//! - [`GridPointLabel`]: bound for caller-chosen grid point labels

use super::error::CurveError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Edits accumulated on a curve since the last successful update.
///
/// Fitters use this to pick a cheaper refit when only values moved
/// (knot positions unchanged).
///
/// # Example
///
/// ```
/// use curve_core::types::ChangeState;
///
/// let state = ChangeState::ValueChanged | ChangeState::ArgumentChanged;
/// assert_eq!(state, ChangeState::BothChanged);
/// assert!(state.is_changed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChangeState {
    /// Curve is in sync with its fitters.
    #[default]
    NoChange,
    /// Only grid point values were edited.
    ValueChanged,
    /// Only grid point arguments were edited.
    ArgumentChanged,
    /// Arguments and values were edited, or points were added/removed.
    BothChanged,
}

impl ChangeState {
    /// Returns true if any edit is pending.
    #[inline]
    pub fn is_changed(self) -> bool {
        self != ChangeState::NoChange
    }

    /// Returns true if argument positions may have moved.
    #[inline]
    pub fn arguments_changed(self) -> bool {
        matches!(
            self,
            ChangeState::ArgumentChanged | ChangeState::BothChanged
        )
    }

    /// Returns true if values may have moved.
    #[inline]
    pub fn values_changed(self) -> bool {
        matches!(self, ChangeState::ValueChanged | ChangeState::BothChanged)
    }

    fn from_flags(arguments: bool, values: bool) -> Self {
        match (arguments, values) {
            (false, false) => ChangeState::NoChange,
            (false, true) => ChangeState::ValueChanged,
            (true, false) => ChangeState::ArgumentChanged,
            (true, true) => ChangeState::BothChanged,
        }
    }
}

impl BitOr for ChangeState {
    type Output = ChangeState;

    fn bitor(self, rhs: ChangeState) -> ChangeState {
        ChangeState::from_flags(
            self.arguments_changed() || rhs.arguments_changed(),
            self.values_changed() || rhs.values_changed(),
        )
    }
}

impl BitOrAssign for ChangeState {
    fn bitor_assign(&mut self, rhs: ChangeState) {
        *self = *self | rhs;
    }
}

/// Borrowed strided view into a numeric buffer.
///
/// Element `i` is `data[start + i * stride]`. Used to feed one row or column
/// of a larger matrix into a fitter without an intermediate copy.
///
/// # Example
///
/// ```
/// use curve_core::types::StridedSlice;
///
/// // 2 x 3 row-major matrix, take column 1
/// let matrix = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let column = StridedSlice::new(&matrix, 1, 3, 2).unwrap();
/// assert_eq!(column.to_vec(), vec![2.0, 5.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StridedSlice<'a> {
    data: &'a [f64],
    start: usize,
    stride: usize,
    len: usize,
}

impl<'a> StridedSlice<'a> {
    /// Create a strided view of `len` elements.
    ///
    /// # Errors
    ///
    /// * `CurveError::InvalidInput` - zero stride, or the view runs past the buffer
    pub fn new(
        data: &'a [f64],
        start: usize,
        stride: usize,
        len: usize,
    ) -> Result<Self, CurveError> {
        if stride == 0 {
            return Err(CurveError::InvalidInput(
                "stride must be at least 1".to_string(),
            ));
        }
        if len > 0 {
            let last = (len - 1)
                .checked_mul(stride)
                .and_then(|offset| offset.checked_add(start));
            match last {
                Some(last) if last < data.len() => {}
                _ => {
                    return Err(CurveError::InvalidInput(format!(
                        "strided view (start {}, stride {}, len {}) exceeds buffer of length {}",
                        start,
                        stride,
                        len,
                        data.len()
                    )))
                }
            }
        }
        Ok(Self {
            data,
            start,
            stride,
            len,
        })
    }

    /// View an entire contiguous slice.
    #[inline]
    pub fn contiguous(data: &'a [f64]) -> Self {
        Self {
            data,
            start: 0,
            stride: 1,
            len: data.len(),
        }
    }

    /// Number of elements in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `index` of the view, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        if index < self.len {
            Some(self.data[self.start + index * self.stride])
        } else {
            None
        }
    }

    /// Iterate over the viewed elements in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        let data = self.data;
        let (start, stride) = (self.start, self.stride);
        (0..self.len).map(move |i| data[start + i * stride])
    }

    /// Deep-copy the viewed elements.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

impl<'a> From<&'a [f64]> for StridedSlice<'a> {
    fn from(data: &'a [f64]) -> Self {
        StridedSlice::contiguous(data)
    }
}

impl<'a> From<&'a Vec<f64>> for StridedSlice<'a> {
    fn from(data: &'a Vec<f64>) -> Self {
        StridedSlice::contiguous(data.as_slice())
    }
}

/// A single (label, argument, value) sample.
///
/// Curves do not store grid points as objects; this type only carries bulk
/// input into [`crate::curves::GridCurve::add_range`] and iteration output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint<L> {
    /// Caller-chosen identifier, used only for lookup by name
    pub label: L,
    /// Numeric x-coordinate used for ordering and all math
    pub argument: f64,
    /// Sampled value at `argument`
    pub value: f64,
}

impl<L> GridPoint<L> {
    /// Create a grid point.
    pub fn new(label: L, argument: f64, value: f64) -> Self {
        Self {
            label,
            argument,
            value,
        }
    }
}

impl GridPoint<f64> {
    /// Create an unlabelled grid point; the argument doubles as label.
    pub fn unlabeled(argument: f64, value: f64) -> Self {
        Self::new(argument, argument, value)
    }
}

/// Bound for grid point labels.
///
/// `from_argument` tells a curve whether a label can be recovered from the
/// argument alone. When it can (as for `f64`), curves whose labels coincide
/// with their arguments keep a single array instead of two.
pub trait GridPointLabel: Clone + PartialEq + fmt::Debug + Send + Sync {
    /// The label an unlabelled grid point at `argument` carries, if any.
    fn from_argument(_argument: f64) -> Option<Self> {
        None
    }
}

impl GridPointLabel for f64 {
    #[inline]
    fn from_argument(argument: f64) -> Option<Self> {
        Some(argument)
    }
}

impl GridPointLabel for String {}
impl GridPointLabel for &'static str {}
impl GridPointLabel for i32 {}
impl GridPointLabel for i64 {}
impl GridPointLabel for u32 {}
impl GridPointLabel for usize {}
impl GridPointLabel for NaiveDate {}
