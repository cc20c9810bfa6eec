//! Cell lookup in sorted argument arrays.

use crate::types::CurveError;
use num_traits::Float;

/// Index of the cell `[sorted[i], sorted[i + 1]]` containing `value`.
///
/// Binary search over strictly ascending `sorted`. The result is always a
/// valid left endpoint of a cell:
/// - `value == sorted[0]` gives `0`
/// - `value == sorted[k]` for an interior `k` gives `k`
/// - `value == sorted[n - 1]` gives `n - 2`
/// - otherwise the `i` with `sorted[i] < value < sorted[i + 1]`
///
/// # Errors
///
/// * `CurveError::OutOfDomain` - `value` below the first or above the last element (or NaN)
/// * `CurveError::InsufficientData` - `sorted` is empty
///
/// # Example
///
/// ```
/// use curve_core::math::search::non_last_nearest_index;
///
/// let xs = [1.0, 2.0, 3.0];
/// assert_eq!(non_last_nearest_index(1.0, &xs).unwrap(), 0);
/// assert_eq!(non_last_nearest_index(2.5, &xs).unwrap(), 1);
/// assert_eq!(non_last_nearest_index(3.0, &xs).unwrap(), 1);
/// assert!(non_last_nearest_index(0.5, &xs).is_err());
/// ```
pub fn non_last_nearest_index<T: Float>(value: T, sorted: &[T]) -> Result<usize, CurveError> {
    let n = sorted.len();
    if n == 0 {
        return Err(CurveError::InsufficientData { got: 0, need: 1 });
    }

    let first = sorted[0];
    let last = sorted[n - 1];

    if value == first {
        return Ok(0);
    }
    if value.is_nan() || value < first || value > last {
        return Err(CurveError::OutOfDomain {
            x: value.to_f64().unwrap_or(f64::NAN),
            min: first.to_f64().unwrap_or(f64::NAN),
            max: last.to_f64().unwrap_or(f64::NAN),
        });
    }
    if value == last {
        // n >= 2 here: a single-element array only matches via `first`
        return Ok(n - 2);
    }

    // partition_point returns the number of elements <= value, at least 1 here
    let pos = sorted.partition_point(|&x| x <= value);
    Ok(pos - 1)
}
