//! Immutable curve over borrowed labels.

use super::routing::Regions;
use super::traits::GridCurve;
use crate::fitting::{CurveStrategies, Extrapolator, Fitter};
use crate::types::{ChangeState, CurveError, GridPoint, GridPointLabel, StridedSlice};
use std::sync::Arc;
use tracing::trace;

/// Label source of a [`ReadOnlyCurveView`].
#[derive(Debug, PartialEq)]
pub enum ViewLabels<'a, L> {
    /// Labels are recovered from the arguments (e.g. `f64` labels).
    Arguments,
    /// Caller-owned labels, one per grid point; never copied.
    Explicit(&'a [L]),
}

// Derives would require `L: Copy`
impl<L> Clone for ViewLabels<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for ViewLabels<'_, L> {}

/// Curve built once from a caller-supplied buffer and never edited.
///
/// The labels stay in the caller's buffer; only the numeric arguments and
/// values are copied, into the fitters. Several views may share one interior
/// fitter through [`with_shared_interior`](Self::with_shared_interior).
///
/// Every mutating [`GridCurve`] operation fails with
/// [`CurveError::ImmutableViolation`] and `update` is a no-op.
///
/// # Example
///
/// ```
/// use curve_core::curves::{GridCurve, ReadOnlyCurveView, ViewLabels};
/// use curve_core::fitting::{ConstantExtrapolation, CurveStrategies, LinearInterpolation};
/// use std::sync::Arc;
///
/// let strategies = CurveStrategies::new(
///     Arc::new(LinearInterpolation),
///     Arc::new(ConstantExtrapolation::left()),
///     Arc::new(ConstantExtrapolation::right()),
/// )
/// .unwrap();
///
/// // Row 1 of a 2 x 3 row-major matrix
/// let matrix = [0.0, 0.0, 0.0, 1.0, 2.0, 4.0];
/// let tenors = ["1Y", "2Y", "3Y"];
/// let mut view = ReadOnlyCurveView::from_shared_buffer(
///     strategies,
///     ViewLabels::Explicit(&tenors),
///     3,
///     &[1.0, 2.0, 3.0],
///     &matrix,
///     0,
///     3,
///     1,
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(view.value(2.5).unwrap(), 3.0);
/// assert_eq!(view.index_of(&"3Y"), Some(2));
/// assert!(view.update().is_ok());
/// ```
#[derive(Debug)]
pub struct ReadOnlyCurveView<'a, L: GridPointLabel = f64> {
    strategies: CurveStrategies,
    labels: ViewLabels<'a, L>,
    interior: Arc<dyn Fitter>,
    tails: Option<(Box<dyn Extrapolator>, Box<dyn Extrapolator>)>,
}

impl<'a, L: GridPointLabel> ReadOnlyCurveView<'a, L> {
    /// Fit the given grid points eagerly.
    ///
    /// # Errors
    ///
    /// * `CurveError::InvalidInput` - label count differs from the argument count,
    ///   or `ViewLabels::Arguments` with a label type that cannot be derived
    /// * any error of the interior fitter or extrapolator updates
    pub fn new(
        strategies: CurveStrategies,
        labels: ViewLabels<'a, L>,
        arguments: StridedSlice<'_>,
        values: StridedSlice<'_>,
    ) -> Result<Self, CurveError> {
        let mut interior = strategies.create_fitter();
        interior.update(arguments, values, ChangeState::BothChanged)?;
        Self::with_shared_interior(strategies, labels, Arc::from(interior))
    }

    /// Fit `count` grid points read from strided positions of larger buffers.
    ///
    /// Argument `i` is `arguments[argument_start + i * argument_increment]`,
    /// value `i` is `values[value_start + i * value_increment]`.
    ///
    /// # Errors
    ///
    /// * `CurveError::InvalidInput` - a strided view runs past its buffer
    /// * see [`new`](Self::new)
    #[allow(clippy::too_many_arguments)]
    pub fn from_shared_buffer(
        strategies: CurveStrategies,
        labels: ViewLabels<'a, L>,
        count: usize,
        arguments: &[f64],
        values: &[f64],
        argument_start: usize,
        value_start: usize,
        argument_increment: usize,
        value_increment: usize,
    ) -> Result<Self, CurveError> {
        let arguments = StridedSlice::new(arguments, argument_start, argument_increment, count)?;
        let values = StridedSlice::new(values, value_start, value_increment, count)?;
        Self::new(strategies, labels, arguments, values)
    }

    /// Wrap an already updated interior fitter.
    ///
    /// Fresh extrapolators are anchored at the shared fitter; the fitter
    /// itself is not refit.
    ///
    /// # Errors
    ///
    /// * `CurveError::NotOperable` - `interior` has no successful update
    /// * `CurveError::Configuration` - `interior` was not created by the
    ///   interior strategy of `strategies`
    /// * `CurveError::InvalidInput` - label count mismatch
    pub fn with_shared_interior(
        strategies: CurveStrategies,
        labels: ViewLabels<'a, L>,
        interior: Arc<dyn Fitter>,
    ) -> Result<Self, CurveError> {
        if !interior.is_operable() {
            return Err(CurveError::NotOperable(format!(
                "shared {} fitter has no successful update",
                interior.strategy().name()
            )));
        }
        let expected = strategies.fitting();
        let actual = interior.strategy();
        let same_strategy = actual.name() == expected.name()
            && actual.kind() == expected.kind()
            && actual.minimal_required_grid_points() == expected.minimal_required_grid_points()
            && actual.quality() == expected.quality()
            && actual.is_local_approach() == expected.is_local_approach()
            && actual.is_differentiable() == expected.is_differentiable();
        if !same_strategy {
            return Err(CurveError::Configuration(format!(
                "shared fitter was built by {}, strategies expect {}",
                actual.name(),
                expected.name()
            )));
        }
        Self::check_labels(&labels, interior.arguments())?;

        let mut tails = strategies.create_extrapolators();
        if let Some((left, right)) = tails.as_mut() {
            left.update(interior.as_ref())?;
            right.update(interior.as_ref())?;
        }

        trace!(
            count = interior.arguments().len(),
            fitting = expected.name(),
            shared = Arc::strong_count(&interior) > 1,
            "read-only curve built"
        );
        Ok(Self {
            strategies,
            labels,
            interior,
            tails,
        })
    }

    fn check_labels(labels: &ViewLabels<'a, L>, arguments: &[f64]) -> Result<(), CurveError> {
        match labels {
            ViewLabels::Explicit(labels) if labels.len() != arguments.len() => {
                Err(CurveError::InvalidInput(format!(
                    "{} labels for {} grid points",
                    labels.len(),
                    arguments.len()
                )))
            }
            ViewLabels::Arguments
                if arguments
                    .first()
                    .is_some_and(|&a| L::from_argument(a).is_none()) =>
            {
                Err(CurveError::InvalidInput(
                    "labels of this type cannot be derived from arguments".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Shared handle to the interior fitter, for building sibling views.
    pub fn shared_interior(&self) -> Arc<dyn Fitter> {
        Arc::clone(&self.interior)
    }

    /// Label source of the view.
    pub fn labels(&self) -> ViewLabels<'a, L> {
        self.labels
    }

    /// Iterate over the grid points in argument order.
    pub fn points(&self) -> impl Iterator<Item = GridPoint<L>> + '_ {
        (0..self.len()).filter_map(move |i| {
            self.label(i).ok().map(|label| {
                GridPoint::new(
                    label,
                    self.interior.arguments()[i],
                    self.interior.values()[i],
                )
            })
        })
    }

    fn regions(&self) -> Regions<'_> {
        Regions::new(self.interior.as_ref(), self.tails.as_ref())
    }

    fn immutable<T>(operation: &'static str) -> Result<T, CurveError> {
        Err(CurveError::ImmutableViolation { operation })
    }
}

impl<'a> ReadOnlyCurveView<'a, f64> {
    /// Fit grid points whose labels are their arguments.
    ///
    /// # Errors
    ///
    /// * see [`new`](Self::new)
    pub fn unlabeled(
        strategies: CurveStrategies,
        arguments: StridedSlice<'_>,
        values: StridedSlice<'_>,
    ) -> Result<Self, CurveError> {
        Self::new(strategies, ViewLabels::Arguments, arguments, values)
    }
}

impl<'a, L: GridPointLabel> GridCurve<L> for ReadOnlyCurveView<'a, L> {
    fn strategies(&self) -> &CurveStrategies {
        &self.strategies
    }

    fn len(&self) -> usize {
        self.interior.arguments().len()
    }

    fn arguments(&self) -> &[f64] {
        self.interior.arguments()
    }

    fn values(&self) -> &[f64] {
        self.interior.values()
    }

    fn label(&self, index: usize) -> Result<L, CurveError> {
        let out_of_range = CurveError::IndexOutOfRange {
            index,
            len: self.len(),
        };
        match self.labels {
            ViewLabels::Arguments => self
                .interior
                .arguments()
                .get(index)
                .and_then(|&a| L::from_argument(a))
                .ok_or(out_of_range),
            ViewLabels::Explicit(labels) => labels.get(index).cloned().ok_or(out_of_range),
        }
    }

    fn index_of(&self, label: &L) -> Option<usize> {
        match self.labels {
            ViewLabels::Arguments => self
                .interior
                .arguments()
                .iter()
                .position(|&a| L::from_argument(a).as_ref() == Some(label)),
            ViewLabels::Explicit(labels) => labels.iter().position(|l| l == label),
        }
    }

    fn change_state(&self) -> ChangeState {
        ChangeState::NoChange
    }

    fn is_operable(&self) -> bool {
        true
    }

    fn add(&mut self, _label: L, _argument: f64, _value: f64) -> Result<usize, CurveError> {
        Self::immutable("add")
    }

    fn add_range(
        &mut self,
        _points: Vec<GridPoint<L>>,
        _is_sorted: bool,
    ) -> Result<(), CurveError> {
        Self::immutable("add_range")
    }

    fn remove_at(&mut self, _index: usize) -> Result<GridPoint<L>, CurveError> {
        Self::immutable("remove_at")
    }

    fn try_remove(&mut self, _label: &L) -> Result<bool, CurveError> {
        Self::immutable("try_remove")
    }

    fn set_grid_point_argument(
        &mut self,
        _index: usize,
        _argument: f64,
    ) -> Result<usize, CurveError> {
        Self::immutable("set_grid_point_argument")
    }

    fn set_value(&mut self, _index: usize, _value: f64) -> Result<(), CurveError> {
        Self::immutable("set_value")
    }

    fn clear(&mut self) -> Result<(), CurveError> {
        Self::immutable("clear")
    }

    fn update(&mut self) -> Result<(), CurveError> {
        Ok(())
    }

    fn lower_bound(&self) -> f64 {
        self.regions().lower_bound()
    }

    fn upper_bound(&self) -> f64 {
        self.regions().upper_bound()
    }

    fn value(&self, x: f64) -> Result<f64, CurveError> {
        self.regions().value(x)
    }

    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.regions().derivative(x)
    }

    fn integral(&self, lower: f64, upper: f64) -> Result<f64, CurveError> {
        self.regions().integral(lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::GridPointCurve;
    use crate::fitting::{
        ConstantExtrapolation, FittingStrategy, LinearInterpolation, LogLinearInterpolation,
        NoExtrapolation, PolynomialLeastSquares,
    };
    use approx::assert_relative_eq;

    fn strategies() -> CurveStrategies {
        CurveStrategies::new(
            Arc::new(LinearInterpolation),
            Arc::new(ConstantExtrapolation::left()),
            Arc::new(ConstantExtrapolation::right()),
        )
        .unwrap()
    }

    fn unlabeled_view() -> ReadOnlyCurveView<'static, f64> {
        ReadOnlyCurveView::unlabeled(
            strategies(),
            StridedSlice::contiguous(&[0.0, 1.0, 2.0]),
            StridedSlice::contiguous(&[0.0, 10.0, 20.0]),
        )
        .unwrap()
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_unlabeled_view_evaluates() {
        let view = unlabeled_view();
        assert!(view.is_operable());
        assert_eq!(view.len(), 3);
        assert_eq!(view.label(1).unwrap(), 1.0);
        assert_relative_eq!(view.value(-5.0).unwrap(), 0.0);
        assert_relative_eq!(view.value(0.5).unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(view.integral(2.0, 0.0).unwrap(), -20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_column_of_shared_buffer() {
        // 3 x 2 row-major, column 1 holds the values
        let matrix = [0.0, 1.0, 0.0, 2.0, 0.0, 4.0];
        let labels = ["a", "b", "c"];
        let view = ReadOnlyCurveView::from_shared_buffer(
            strategies(),
            ViewLabels::Explicit(&labels),
            3,
            &[1.0, 2.0, 3.0],
            &matrix,
            0,
            1,
            1,
            2,
        )
        .unwrap();
        assert_eq!(view.values(), &[1.0, 2.0, 4.0]);
        assert_eq!(view.label(2).unwrap(), "c");
        assert_relative_eq!(view.value(2.5).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shared_buffer_out_of_range() {
        let result = ReadOnlyCurveView::<f64>::from_shared_buffer(
            strategies(),
            ViewLabels::Arguments,
            3,
            &[1.0, 2.0, 3.0],
            &[1.0, 2.0, 3.0, 4.0],
            0,
            1,
            1,
            2,
        );
        assert!(matches!(result, Err(CurveError::InvalidInput(_))));
    }

    #[test]
    fn test_label_count_mismatch() {
        let labels = ["a", "b"];
        let result = ReadOnlyCurveView::new(
            strategies(),
            ViewLabels::Explicit(&labels),
            StridedSlice::contiguous(&[0.0, 1.0, 2.0]),
            StridedSlice::contiguous(&[0.0, 1.0, 2.0]),
        );
        assert!(matches!(result, Err(CurveError::InvalidInput(_))));
    }

    #[test]
    fn test_fit_errors_propagate() {
        let strategies = CurveStrategies::new(
            Arc::new(LogLinearInterpolation),
            Arc::new(NoExtrapolation::left()),
            Arc::new(NoExtrapolation::right()),
        )
        .unwrap();
        let result = ReadOnlyCurveView::unlabeled(
            strategies,
            StridedSlice::contiguous(&[0.0, 1.0]),
            StridedSlice::contiguous(&[1.0, -1.0]),
        );
        assert!(matches!(result, Err(CurveError::InvalidInput(_))));
    }

    // ========================================
    // Immutability Tests
    // ========================================

    #[test]
    fn test_mutators_rejected() {
        let mut view = unlabeled_view();
        assert!(view.add(5.0, 5.0, 0.0).unwrap_err().is_immutable_violation());
        assert!(view
            .add_range(vec![GridPoint::unlabeled(5.0, 0.0)], true)
            .unwrap_err()
            .is_immutable_violation());
        assert!(view.remove_at(0).unwrap_err().is_immutable_violation());
        assert!(view.try_remove(&0.0).unwrap_err().is_immutable_violation());
        assert!(view
            .set_grid_point_argument(0, 0.5)
            .unwrap_err()
            .is_immutable_violation());
        assert!(view.set_value(0, 1.0).unwrap_err().is_immutable_violation());
        assert!(view.clear().unwrap_err().is_immutable_violation());

        assert!(view.update().is_ok());
        assert_eq!(view.len(), 3);
        assert_eq!(view.change_state(), ChangeState::NoChange);
    }

    // ========================================
    // Sharing Tests
    // ========================================

    #[test]
    fn test_views_share_one_interior() {
        let first = unlabeled_view();
        let labels = ["x", "y", "z"];
        let second = ReadOnlyCurveView::with_shared_interior(
            strategies(),
            ViewLabels::Explicit(&labels),
            first.shared_interior(),
        )
        .unwrap();

        assert!(Arc::ptr_eq(&first.shared_interior(), &second.shared_interior()));
        assert_eq!(second.index_of(&"y"), Some(1));
        assert_relative_eq!(second.value(1.5).unwrap(), first.value(1.5).unwrap());
    }

    #[test]
    fn test_shared_interior_must_match_strategy() {
        let first = unlabeled_view();
        let other = CurveStrategies::new(
            Arc::new(LogLinearInterpolation),
            Arc::new(ConstantExtrapolation::left()),
            Arc::new(ConstantExtrapolation::right()),
        )
        .unwrap();
        let result = ReadOnlyCurveView::<f64>::with_shared_interior(
            other,
            ViewLabels::Arguments,
            first.shared_interior(),
        );
        assert!(matches!(result, Err(CurveError::Configuration(_))));
    }

    #[test]
    fn test_shared_interior_must_match_strategy_parameters() {
        let mut fitter = PolynomialLeastSquares::new(1).create();
        fitter
            .update(
                StridedSlice::contiguous(&[0.0, 1.0, 2.0, 3.0]),
                StridedSlice::contiguous(&[1.0, 3.0, 5.0, 7.0]),
                ChangeState::BothChanged,
            )
            .unwrap();
        let fitter: Arc<dyn Fitter> = Arc::from(fitter);

        let cubic =
            CurveStrategies::parametrized(Arc::new(PolynomialLeastSquares::new(3))).unwrap();
        let result = ReadOnlyCurveView::<f64>::with_shared_interior(
            cubic,
            ViewLabels::Arguments,
            Arc::clone(&fitter),
        );
        assert!(matches!(result, Err(CurveError::Configuration(_))));

        let linear =
            CurveStrategies::parametrized(Arc::new(PolynomialLeastSquares::new(1))).unwrap();
        let view =
            ReadOnlyCurveView::<f64>::with_shared_interior(linear, ViewLabels::Arguments, fitter)
                .unwrap();
        assert_relative_eq!(view.value(10.0).unwrap(), 21.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shared_interior_must_be_operable() {
        let fitter: Arc<dyn Fitter> = Arc::from(strategies().create_fitter());
        let result = ReadOnlyCurveView::<f64>::with_shared_interior(
            strategies(),
            ViewLabels::Arguments,
            fitter,
        );
        assert!(matches!(result, Err(CurveError::NotOperable(_))));
    }

    #[test]
    fn test_as_read_only_with_explicit_labels() {
        let mut curve: GridPointCurve<String> = GridPointCurve::new(strategies());
        curve.add("short".to_string(), 0.5, 1.0).unwrap();
        curve.add("long".to_string(), 5.0, 2.0).unwrap();
        assert!(curve.as_read_only().is_err());

        curve.update().unwrap();
        let view = curve.as_read_only().unwrap();
        assert_eq!(view.label(1).unwrap(), "long");
        assert_relative_eq!(view.value(10.0).unwrap(), curve.value(10.0).unwrap());
        assert_relative_eq!(view.integral(0.0, 6.0).unwrap(), curve.integral(0.0, 6.0).unwrap());
    }

    #[test]
    fn test_as_read_only_with_argument_labels() {
        let mut curve: GridPointCurve = GridPointCurve::new(strategies());
        curve.add(1.0, 1.0, 1.0).unwrap();
        curve.add(2.0, 2.0, 3.0).unwrap();
        curve.update().unwrap();

        let view = curve.as_read_only().unwrap();
        assert_eq!(view.labels(), ViewLabels::Arguments);
        assert_eq!(view.index_of(&2.0), Some(1));
        assert_eq!(view.points().count(), 2);
    }
}
