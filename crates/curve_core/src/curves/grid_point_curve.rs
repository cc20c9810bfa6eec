//! Mutable grid point curve.

use super::labels::LabelStore;
use super::read_only::{ReadOnlyCurveView, ViewLabels};
use super::routing::Regions;
use super::traits::GridCurve;
use crate::fitting::{
    CurveStrategies, ExtrapolationStrategy, Extrapolator, Fitter, FittingStrategy,
};
use crate::types::{ChangeState, CurveError, GridPoint, GridPointLabel, StridedSlice};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, trace};

/// Curve over a mutable, sorted sequence of grid points.
///
/// Owns the grid points (arguments, values and, only when they differ from
/// the arguments, labels), one interior fitter and, for interpolations, a
/// left and a right extrapolator. Edits are accumulated in a
/// [`ChangeState`]; the curve can only be evaluated after
/// [`update`](GridCurve::update) has pushed the latest grid points into its
/// fitters.
///
/// # Example
///
/// ```
/// use curve_core::curves::{GridCurve, GridPointCurve};
/// use curve_core::fitting::{ConstantExtrapolation, LinearInterpolation};
/// use std::sync::Arc;
///
/// let mut curve: GridPointCurve = GridPointCurve::interpolated(
///     Arc::new(LinearInterpolation),
///     Arc::new(ConstantExtrapolation::left()),
///     Arc::new(ConstantExtrapolation::right()),
/// )
/// .unwrap();
/// curve.add(0.0, 0.0, 0.0).unwrap();
/// curve.add(2.0, 2.0, 20.0).unwrap();
/// curve.add(1.0, 1.0, 10.0).unwrap();
/// curve.update().unwrap();
///
/// assert_eq!(curve.value(-5.0).unwrap(), 0.0);
/// assert_eq!(curve.value(0.5).unwrap(), 5.0);
/// assert_eq!(curve.value(2.5).unwrap(), 20.0);
/// assert_eq!(curve.integral(0.0, 2.0).unwrap(), 20.0);
/// ```
#[derive(Debug)]
pub struct GridPointCurve<L: GridPointLabel = f64> {
    strategies: CurveStrategies,
    labels: LabelStore<L>,
    arguments: Vec<f64>,
    values: Vec<f64>,
    interior: Box<dyn Fitter>,
    tails: Option<(Box<dyn Extrapolator>, Box<dyn Extrapolator>)>,
    state: ChangeState,
}

impl<L: GridPointLabel> GridPointCurve<L> {
    /// Create an empty curve.
    pub fn new(strategies: CurveStrategies) -> Self {
        let interior = strategies.create_fitter();
        let tails = strategies.create_extrapolators();
        Self {
            strategies,
            labels: LabelStore::default(),
            arguments: Vec::new(),
            values: Vec::new(),
            interior,
            tails,
            state: ChangeState::NoChange,
        }
    }

    /// Create an empty interpolated curve.
    ///
    /// # Errors
    ///
    /// * `CurveError::Configuration` - see [`CurveStrategies::new`]
    pub fn interpolated(
        interpolation: Arc<dyn FittingStrategy>,
        left: Arc<dyn ExtrapolationStrategy>,
        right: Arc<dyn ExtrapolationStrategy>,
    ) -> Result<Self, CurveError> {
        Ok(Self::new(CurveStrategies::new(interpolation, left, right)?))
    }

    /// Create an empty parametrized curve.
    ///
    /// # Errors
    ///
    /// * `CurveError::Configuration` - see [`CurveStrategies::parametrized`]
    pub fn parametrized(parametrization: Arc<dyn FittingStrategy>) -> Result<Self, CurveError> {
        Ok(Self::new(CurveStrategies::parametrized(parametrization)?))
    }

    /// Iterate over the grid points in argument order.
    pub fn points(&self) -> impl Iterator<Item = GridPoint<L>> + '_ {
        (0..self.arguments.len()).filter_map(move |i| {
            self.labels
                .get(i, &self.arguments)
                .map(|label| GridPoint::new(label, self.arguments[i], self.values[i]))
        })
    }

    /// Interior fitter.
    pub fn fitter(&self) -> &dyn Fitter {
        self.interior.as_ref()
    }

    /// Immutable snapshot of the current grid points.
    ///
    /// The view borrows the curve's labels and builds its own fitters, so
    /// the curve cannot be edited while the view is alive.
    ///
    /// # Errors
    ///
    /// * `CurveError::NotOperable` - edits pending or never updated
    pub fn as_read_only(&self) -> Result<ReadOnlyCurveView<'_, L>, CurveError> {
        self.ensure_operable()?;
        let labels = match &self.labels {
            LabelStore::Arguments => ViewLabels::Arguments,
            LabelStore::Explicit(labels) => ViewLabels::Explicit(labels.as_slice()),
        };
        ReadOnlyCurveView::new(
            self.strategies.clone(),
            labels,
            StridedSlice::contiguous(&self.arguments),
            StridedSlice::contiguous(&self.values),
        )
    }

    fn regions(&self) -> Regions<'_> {
        Regions::new(self.interior.as_ref(), self.tails.as_ref())
    }

    fn ensure_operable(&self) -> Result<(), CurveError> {
        if self.is_operable() {
            return Ok(());
        }
        let reason = if self.state.is_changed() {
            format!("grid points changed ({:?}), call update first", self.state)
        } else if self.arguments.len() < self.strategies.minimal_required_grid_points() {
            format!(
                "{} grid points, {} needs at least {}",
                self.arguments.len(),
                self.strategies.fitting().name(),
                self.strategies.minimal_required_grid_points()
            )
        } else {
            "last update failed".to_string()
        };
        Err(CurveError::NotOperable(reason))
    }

    fn check_index(&self, index: usize) -> Result<(), CurveError> {
        if index < self.arguments.len() {
            Ok(())
        } else {
            Err(CurveError::IndexOutOfRange {
                index,
                len: self.arguments.len(),
            })
        }
    }

    fn check_finite(argument: f64, value: f64) -> Result<(), CurveError> {
        if !argument.is_finite() {
            return Err(CurveError::InvalidInput(format!(
                "grid point argument {} is not finite",
                argument
            )));
        }
        if !value.is_finite() {
            return Err(CurveError::InvalidInput(format!(
                "grid point value {} is not finite",
                value
            )));
        }
        Ok(())
    }

    /// Sorted insertion position of `argument`.
    ///
    /// Arguments are finite, so `partial_cmp` is total here and `-0.0`
    /// collides with `0.0`.
    fn insertion_index(&self, argument: f64) -> Result<usize, CurveError> {
        match self
            .arguments
            .binary_search_by(|existing| existing.partial_cmp(&argument).unwrap_or(Ordering::Less))
        {
            Ok(_) => Err(CurveError::DuplicateArgument { argument }),
            Err(index) => Ok(index),
        }
    }

    /// Reject a batch that would produce duplicate arguments.
    fn check_batch(&self, points: &[GridPoint<L>]) -> Result<(), CurveError> {
        for point in points {
            Self::check_finite(point.argument, point.value)?;
            self.insertion_index(point.argument)?;
        }
        let mut batch: Vec<f64> = points.iter().map(|p| p.argument).collect();
        batch.sort_by(f64::total_cmp);
        match batch.windows(2).find(|w| w[0] == w[1]) {
            Some(w) => Err(CurveError::DuplicateArgument { argument: w[0] }),
            None => Ok(()),
        }
    }

    fn append_sorted(&mut self, points: Vec<GridPoint<L>>) {
        trace!(count = points.len(), "appending pre-sorted grid points");
        let implicit = points
            .iter()
            .all(|p| L::from_argument(p.argument).as_ref() == Some(&p.label));
        let mut labels = Vec::with_capacity(if implicit { 0 } else { points.len() });
        self.arguments.reserve(points.len());
        self.values.reserve(points.len());
        for point in points {
            self.arguments.push(point.argument);
            self.values.push(point.value);
            if !implicit {
                labels.push(point.label);
            }
        }
        self.labels = if implicit {
            LabelStore::Arguments
        } else {
            LabelStore::Explicit(labels)
        };
    }
}

impl<L: GridPointLabel> GridCurve<L> for GridPointCurve<L> {
    fn strategies(&self) -> &CurveStrategies {
        &self.strategies
    }

    fn len(&self) -> usize {
        self.arguments.len()
    }

    fn arguments(&self) -> &[f64] {
        &self.arguments
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn label(&self, index: usize) -> Result<L, CurveError> {
        self.check_index(index)?;
        self.labels
            .get(index, &self.arguments)
            .ok_or(CurveError::IndexOutOfRange {
                index,
                len: self.arguments.len(),
            })
    }

    fn index_of(&self, label: &L) -> Option<usize> {
        self.labels.position(label, &self.arguments)
    }

    fn change_state(&self) -> ChangeState {
        self.state
    }

    fn is_operable(&self) -> bool {
        !self.state.is_changed()
            && self.arguments.len() >= self.strategies.minimal_required_grid_points()
            && self.interior.is_operable()
            && self
                .tails
                .as_ref()
                .map_or(true, |(left, right)| left.is_operable() && right.is_operable())
    }

    fn add(&mut self, label: L, argument: f64, value: f64) -> Result<usize, CurveError> {
        Self::check_finite(argument, value)?;
        let index = self.insertion_index(argument)?;
        self.labels.prepare(&label, argument, &self.arguments)?;

        self.labels.insert(index, label);
        self.arguments.insert(index, argument);
        self.values.insert(index, value);
        self.state |= ChangeState::BothChanged;
        Ok(index)
    }

    /// Insert several grid points, all or nothing.
    ///
    /// The trusted path (`is_sorted` on an empty curve) appends the points
    /// as given; unsorted or duplicate arguments then corrupt the curve.
    /// Every other call checks the whole batch before inserting anything.
    fn add_range(&mut self, points: Vec<GridPoint<L>>, is_sorted: bool) -> Result<(), CurveError> {
        if points.is_empty() {
            return Ok(());
        }
        if is_sorted && self.arguments.is_empty() {
            self.append_sorted(points);
        } else {
            self.check_batch(&points)?;
            for point in points {
                self.add(point.label, point.argument, point.value)?;
            }
        }
        self.state |= ChangeState::BothChanged;
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<GridPoint<L>, CurveError> {
        let label = self.label(index)?;
        self.labels.remove(index);
        let argument = self.arguments.remove(index);
        let value = self.values.remove(index);
        self.state |= ChangeState::BothChanged;
        Ok(GridPoint::new(label, argument, value))
    }

    fn try_remove(&mut self, label: &L) -> Result<bool, CurveError> {
        match self.index_of(label) {
            Some(index) => {
                self.remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move grid point `index` to `argument`, keeping its value.
    ///
    /// Inside the bracket of its neighbours the point moves in place.
    /// Otherwise it is re-inserted at its new sorted position; an existing
    /// grid point at `argument` fails with [`CurveError::DuplicateArgument`]
    /// and leaves the curve untouched. While labels are derived from the
    /// arguments, the label follows the argument.
    fn set_grid_point_argument(
        &mut self,
        index: usize,
        argument: f64,
    ) -> Result<usize, CurveError> {
        self.check_index(index)?;
        Self::check_finite(argument, self.values[index])?;
        if self.arguments[index] == argument {
            return Ok(index);
        }

        let lower = if index > 0 {
            self.arguments[index - 1]
        } else {
            f64::NEG_INFINITY
        };
        let upper = self
            .arguments
            .get(index + 1)
            .copied()
            .unwrap_or(f64::INFINITY);
        if lower < argument && argument < upper {
            self.arguments[index] = argument;
            self.state |= ChangeState::ArgumentChanged;
            return Ok(index);
        }

        self.insertion_index(argument)?;
        let label = match (self.labels.is_implicit(), L::from_argument(argument)) {
            (true, Some(label)) => label,
            _ => self.label(index)?,
        };

        self.labels.remove(index);
        self.arguments.remove(index);
        let value = self.values.remove(index);
        let target = self.arguments.partition_point(|&a| a < argument);
        self.labels.insert(target, label);
        self.arguments.insert(target, argument);
        self.values.insert(target, value);
        self.state |= ChangeState::BothChanged;

        debug!(from = index, to = target, argument, "grid point re-inserted");
        Ok(target)
    }

    fn set_value(&mut self, index: usize, value: f64) -> Result<(), CurveError> {
        self.check_index(index)?;
        Self::check_finite(self.arguments[index], value)?;
        if self.values[index] != value {
            self.values[index] = value;
            self.state |= ChangeState::ValueChanged;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CurveError> {
        self.labels.clear();
        self.arguments.clear();
        self.values.clear();
        self.state |= ChangeState::BothChanged;
        Ok(())
    }

    /// Refit interior first, then the extrapolators that read from it.
    ///
    /// On failure the change state is kept and the curve stays non-operable.
    fn update(&mut self) -> Result<(), CurveError> {
        if self.is_operable() {
            return Ok(());
        }
        debug!(
            count = self.arguments.len(),
            state = ?self.state,
            fitting = self.strategies.fitting().name(),
            "updating curve"
        );

        self.interior.update(
            StridedSlice::contiguous(&self.arguments),
            StridedSlice::contiguous(&self.values),
            self.state,
        )?;
        if let Some((left, right)) = self.tails.as_mut() {
            left.update(self.interior.as_ref())?;
            right.update(self.interior.as_ref())?;
        }

        self.state = ChangeState::NoChange;
        trace!(
            lower = self.lower_bound(),
            upper = self.upper_bound(),
            "curve operable"
        );
        Ok(())
    }

    fn lower_bound(&self) -> f64 {
        self.regions().lower_bound()
    }

    fn upper_bound(&self) -> f64 {
        self.regions().upper_bound()
    }

    fn value(&self, x: f64) -> Result<f64, CurveError> {
        self.ensure_operable()?;
        self.regions().value(x)
    }

    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.ensure_operable()?;
        self.regions().derivative(x)
    }

    fn integral(&self, lower: f64, upper: f64) -> Result<f64, CurveError> {
        self.ensure_operable()?;
        self.regions().integral(lower, upper)
    }
}
