//! Private grid point storage shared by the fitter implementations.

use crate::math::search::non_last_nearest_index;
use crate::types::{ChangeState, CurveError, StridedSlice};

/// Validated copy of incoming grid points, not yet committed to a fitter.
///
/// `arguments` is `None` on the value-only path: the fitter's committed
/// arguments stay valid.
#[derive(Debug)]
pub(crate) struct StagedGrid {
    pub(crate) arguments: Option<Vec<f64>>,
    pub(crate) values: Vec<f64>,
}

/// Committed grid point copy plus the operable flag.
#[derive(Debug, Clone, Default)]
pub(crate) struct GridData {
    arguments: Vec<f64>,
    values: Vec<f64>,
    operable: bool,
}

impl GridData {
    #[inline]
    pub(crate) fn arguments(&self) -> &[f64] {
        &self.arguments
    }

    #[inline]
    pub(crate) fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub(crate) fn is_operable(&self) -> bool {
        self.operable
    }

    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.operable = false;
    }

    pub(crate) fn ensure_operable(&self, fitter: &str) -> Result<(), CurveError> {
        if self.operable {
            Ok(())
        } else {
            Err(CurveError::NotOperable(format!(
                "{} fitter has no successful update",
                fitter
            )))
        }
    }

    /// Left endpoint of the cell containing `x`.
    #[inline]
    pub(crate) fn cell(&self, x: f64) -> Result<usize, CurveError> {
        non_last_nearest_index(x, &self.arguments)
    }

    /// Check that `left_index` starts a cell.
    #[inline]
    pub(crate) fn check_cell(&self, left_index: usize) -> Result<(), CurveError> {
        if left_index + 1 < self.arguments.len() {
            Ok(())
        } else {
            Err(CurveError::IndexOutOfRange {
                index: left_index,
                len: self.arguments.len(),
            })
        }
    }

    /// First argument, NaN before the first update.
    #[inline]
    pub(crate) fn first_argument(&self) -> f64 {
        self.arguments.first().copied().unwrap_or(f64::NAN)
    }

    /// Last argument, NaN before the first update.
    #[inline]
    pub(crate) fn last_argument(&self) -> f64 {
        self.arguments.last().copied().unwrap_or(f64::NAN)
    }

    /// Validate and copy incoming data without touching the committed state.
    pub(crate) fn stage(
        &self,
        arguments: StridedSlice<'_>,
        values: StridedSlice<'_>,
        state: ChangeState,
        minimal_count: usize,
    ) -> Result<StagedGrid, CurveError> {
        let count = arguments.len();
        if values.len() != count {
            return Err(CurveError::InvalidInput(format!(
                "arguments and values must have same length: got {} and {}",
                count,
                values.len()
            )));
        }
        if count < minimal_count {
            return Err(CurveError::InsufficientData {
                got: count,
                need: minimal_count,
            });
        }

        let values = values.to_vec();
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(CurveError::InvalidInput(format!(
                "value at index {} is not finite",
                index
            )));
        }

        let value_only = state == ChangeState::ValueChanged
            && !self.arguments.is_empty()
            && self.arguments.len() == count;
        if value_only {
            return Ok(StagedGrid {
                arguments: None,
                values,
            });
        }

        let arguments = arguments.to_vec();
        if let Some(index) = arguments.iter().position(|a| !a.is_finite()) {
            return Err(CurveError::InvalidInput(format!(
                "argument at index {} is not finite",
                index
            )));
        }
        if let Some(index) = arguments.windows(2).position(|w| w[0] >= w[1]) {
            return Err(CurveError::NonMonotonicData { index: index + 1 });
        }

        Ok(StagedGrid {
            arguments: Some(arguments),
            values,
        })
    }

    /// Arguments a staged update will carry once committed.
    #[inline]
    pub(crate) fn staged_arguments<'a>(&'a self, staged: &'a StagedGrid) -> &'a [f64] {
        staged.arguments.as_deref().unwrap_or(&self.arguments)
    }

    /// Install staged data and mark operable.
    pub(crate) fn commit(&mut self, staged: StagedGrid) {
        if let Some(arguments) = staged.arguments {
            self.arguments = arguments;
        }
        self.values = staged.values;
        self.operable = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(data: &[f64]) -> StridedSlice<'_> {
        StridedSlice::contiguous(data)
    }

    #[test]
    fn test_stage_and_commit() {
        let mut grid = GridData::default();
        assert!(!grid.is_operable());
        assert!(grid.first_argument().is_nan());

        let staged = grid
            .stage(view(&[0.0, 1.0]), view(&[2.0, 3.0]), ChangeState::BothChanged, 2)
            .unwrap();
        assert!(staged.arguments.is_some());
        grid.commit(staged);

        assert!(grid.is_operable());
        assert_eq!(grid.arguments(), &[0.0, 1.0]);
        assert_eq!(grid.values(), &[2.0, 3.0]);
        assert_eq!(grid.last_argument(), 1.0);
    }

    #[test]
    fn test_value_only_path_keeps_arguments() {
        let mut grid = GridData::default();
        let staged = grid
            .stage(view(&[0.0, 1.0]), view(&[2.0, 3.0]), ChangeState::BothChanged, 2)
            .unwrap();
        grid.commit(staged);

        let staged = grid
            .stage(view(&[0.0, 1.0]), view(&[5.0, 6.0]), ChangeState::ValueChanged, 2)
            .unwrap();
        assert!(staged.arguments.is_none());
        assert_eq!(grid.staged_arguments(&staged), &[0.0, 1.0]);
        grid.commit(staged);
        assert_eq!(grid.values(), &[5.0, 6.0]);
    }

    #[test]
    fn test_value_only_on_fresh_grid_copies_arguments() {
        let grid = GridData::default();
        let staged = grid
            .stage(view(&[0.0, 1.0]), view(&[2.0, 3.0]), ChangeState::ValueChanged, 2)
            .unwrap();
        assert!(staged.arguments.is_some());
    }

    #[test]
    fn test_stage_rejects_unsorted() {
        let grid = GridData::default();
        let err = grid
            .stage(view(&[0.0, 2.0, 1.0]), view(&[0.0, 0.0, 0.0]), ChangeState::BothChanged, 2)
            .unwrap_err();
        assert_eq!(err, CurveError::NonMonotonicData { index: 2 });
    }

    #[test]
    fn test_stage_rejects_too_few_points() {
        let grid = GridData::default();
        let err = grid
            .stage(view(&[0.0]), view(&[1.0]), ChangeState::BothChanged, 2)
            .unwrap_err();
        assert_eq!(err, CurveError::InsufficientData { got: 1, need: 2 });
    }

    #[test]
    fn test_stage_rejects_length_mismatch_and_nan() {
        let grid = GridData::default();
        assert!(grid
            .stage(view(&[0.0, 1.0]), view(&[1.0]), ChangeState::BothChanged, 1)
            .is_err());
        assert!(grid
            .stage(view(&[0.0, 1.0]), view(&[1.0, f64::NAN]), ChangeState::BothChanged, 1)
            .is_err());
    }

    #[test]
    fn test_failed_stage_leaves_committed_state() {
        let mut grid = GridData::default();
        let staged = grid
            .stage(view(&[0.0, 1.0]), view(&[2.0, 3.0]), ChangeState::BothChanged, 2)
            .unwrap();
        grid.commit(staged);

        assert!(grid
            .stage(view(&[1.0, 0.0]), view(&[9.0, 9.0]), ChangeState::BothChanged, 2)
            .is_err());
        assert_eq!(grid.arguments(), &[0.0, 1.0]);
        assert_eq!(grid.values(), &[2.0, 3.0]);
    }
}
