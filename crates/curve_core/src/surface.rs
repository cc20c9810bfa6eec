//! Row-major value grids read through read-only curves.
//!
//! A [`GridSurface`] holds one value per (row argument, column argument)
//! pair. Each row or column is exposed as a [`ReadOnlyCurveView`] built from
//! a strided view into the shared value buffer, without copying the matrix.

use crate::curves::{GridCurve, ReadOnlyCurveView};
use crate::fitting::CurveStrategies;
use crate::types::{CurveError, StridedSlice};

/// Values on a rectangular grid, stored row-major.
///
/// # Example
///
/// ```
/// use curve_core::curves::GridCurve;
/// use curve_core::fitting::{ConstantExtrapolation, CurveStrategies, LinearInterpolation};
/// use curve_core::surface::GridSurface;
/// use std::sync::Arc;
///
/// let strategies = CurveStrategies::new(
///     Arc::new(LinearInterpolation),
///     Arc::new(ConstantExtrapolation::left()),
///     Arc::new(ConstantExtrapolation::right()),
/// )
/// .unwrap();
/// let surface = GridSurface::new(
///     strategies,
///     vec![1.0, 2.0],
///     vec![10.0, 20.0, 30.0],
///     vec![1.0, 2.0, 3.0,
///          2.0, 4.0, 6.0],
/// )
/// .unwrap();
///
/// assert_eq!(surface.row_curve(1).unwrap().value(25.0).unwrap(), 5.0);
/// assert_eq!(surface.column_curve(2).unwrap().value(1.5).unwrap(), 4.5);
/// ```
#[derive(Debug, Clone)]
pub struct GridSurface {
    strategies: CurveStrategies,
    row_arguments: Vec<f64>,
    column_arguments: Vec<f64>,
    values: Vec<f64>,
}

impl GridSurface {
    /// Create a surface from row-major `values`.
    ///
    /// # Errors
    ///
    /// * `CurveError::InvalidInput` - `values.len()` is not rows x columns
    pub fn new(
        strategies: CurveStrategies,
        row_arguments: Vec<f64>,
        column_arguments: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, CurveError> {
        let expected = row_arguments
            .len()
            .checked_mul(column_arguments.len())
            .ok_or_else(|| CurveError::InvalidInput("surface dimensions overflow".to_string()))?;
        if values.len() != expected {
            return Err(CurveError::InvalidInput(format!(
                "{} x {} surface needs {} values, got {}",
                row_arguments.len(),
                column_arguments.len(),
                expected,
                values.len()
            )));
        }
        Ok(Self {
            strategies,
            row_arguments,
            column_arguments,
            values,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.row_arguments.len()
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.column_arguments.len()
    }

    /// Row arguments.
    pub fn row_arguments(&self) -> &[f64] {
        &self.row_arguments
    }

    /// Column arguments.
    pub fn column_arguments(&self) -> &[f64] {
        &self.column_arguments
    }

    /// Grid value at (`row`, `column`).
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.rows() && column < self.columns() {
            self.values.get(row * self.columns() + column).copied()
        } else {
            None
        }
    }

    /// Curve along row `row`, over the column arguments.
    ///
    /// # Errors
    ///
    /// * `CurveError::IndexOutOfRange` - no such row
    /// * any fitting error of the row data
    pub fn row_curve(&self, row: usize) -> Result<ReadOnlyCurveView<'static, f64>, CurveError> {
        if row >= self.rows() {
            return Err(CurveError::IndexOutOfRange {
                index: row,
                len: self.rows(),
            });
        }
        let columns = self.columns();
        ReadOnlyCurveView::unlabeled(
            self.strategies.clone(),
            StridedSlice::contiguous(&self.column_arguments),
            StridedSlice::new(&self.values, row * columns, 1, columns)?,
        )
    }

    /// Curve along column `column`, over the row arguments.
    ///
    /// # Errors
    ///
    /// * `CurveError::IndexOutOfRange` - no such column
    /// * any fitting error of the column data
    pub fn column_curve(
        &self,
        column: usize,
    ) -> Result<ReadOnlyCurveView<'static, f64>, CurveError> {
        if column >= self.columns() {
            return Err(CurveError::IndexOutOfRange {
                index: column,
                len: self.columns(),
            });
        }
        ReadOnlyCurveView::unlabeled(
            self.strategies.clone(),
            StridedSlice::contiguous(&self.row_arguments),
            StridedSlice::new(&self.values, column, self.columns(), self.rows())?,
        )
    }

    /// Curves along every row.
    pub fn row_curves(&self) -> Result<Vec<ReadOnlyCurveView<'static, f64>>, CurveError> {
        (0..self.rows()).map(|row| self.row_curve(row)).collect()
    }

    /// Curves along every row, fitted in parallel.
    #[cfg(feature = "parallel")]
    pub fn row_curves_par(&self) -> Result<Vec<ReadOnlyCurveView<'static, f64>>, CurveError> {
        use rayon::prelude::*;

        (0..self.rows())
            .into_par_iter()
            .map(|row| self.row_curve(row))
            .collect()
    }

    /// Sequential fallback when the `parallel` feature is disabled.
    #[cfg(not(feature = "parallel"))]
    pub fn row_curves_par(&self) -> Result<Vec<ReadOnlyCurveView<'static, f64>>, CurveError> {
        self.row_curves()
    }

    /// Value at an arbitrary (row argument, column argument) point.
    ///
    /// Each row curve is evaluated at `column_argument`; the results are
    /// then fitted across the row arguments and evaluated at `row_argument`.
    pub fn value(&self, row_argument: f64, column_argument: f64) -> Result<f64, CurveError> {
        let section = self
            .row_curves()?
            .iter()
            .map(|curve| curve.value(column_argument))
            .collect::<Result<Vec<f64>, CurveError>>()?;
        ReadOnlyCurveView::unlabeled(
            self.strategies.clone(),
            StridedSlice::contiguous(&self.row_arguments),
            StridedSlice::contiguous(&section),
        )?
        .value(row_argument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::{ConstantExtrapolation, LinearInterpolation};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn surface() -> GridSurface {
        let strategies = CurveStrategies::new(
            Arc::new(LinearInterpolation),
            Arc::new(ConstantExtrapolation::left()),
            Arc::new(ConstantExtrapolation::right()),
        )
        .unwrap();
        // value = row * column
        GridSurface::new(
            strategies,
            vec![1.0, 2.0, 3.0],
            vec![1.0, 2.0],
            vec![1.0, 2.0, 2.0, 4.0, 3.0, 6.0],
        )
        .unwrap()
    }

    #[test]
    fn test_dimension_mismatch() {
        let strategies = surface().strategies;
        assert!(
            GridSurface::new(strategies, vec![1.0, 2.0], vec![1.0, 2.0], vec![0.0; 3]).is_err()
        );
    }

    #[test]
    fn test_rows_and_columns() {
        let surface = surface();
        assert_eq!(surface.get(2, 1), Some(6.0));
        assert_eq!(surface.get(3, 0), None);

        let row = surface.row_curve(1).unwrap();
        assert_eq!(row.values(), &[2.0, 4.0]);
        assert_relative_eq!(row.value(1.5).unwrap(), 3.0, epsilon = 1e-12);

        let column = surface.column_curve(1).unwrap();
        assert_eq!(column.values(), &[2.0, 4.0, 6.0]);
        assert_relative_eq!(column.value(2.5).unwrap(), 5.0, epsilon = 1e-12);

        assert!(matches!(
            surface.column_curve(2),
            Err(CurveError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_row_curves_parallel_matches_sequential() {
        let surface = surface();
        let sequential = surface.row_curves().unwrap();
        let parallel = surface.row_curves_par().unwrap();
        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(a.values(), b.values());
        }
    }

    #[test]
    fn test_value_between_rows_and_columns() {
        let surface = surface();
        // Bilinear on row * column
        assert_relative_eq!(surface.value(1.5, 1.5).unwrap(), 2.25, epsilon = 1e-12);
        // Beyond the last column: constant extrapolation of each row
        assert_relative_eq!(surface.value(2.0, 5.0).unwrap(), 4.0, epsilon = 1e-12);
    }
}
