//! Polymorphic curve interface.

use crate::fitting::CurveStrategies;
use crate::types::{ChangeState, CurveError, GridPoint, GridPointLabel};

/// Operations shared by [`GridPointCurve`](crate::curves::GridPointCurve)
/// and [`ReadOnlyCurveView`](crate::curves::ReadOnlyCurveView).
///
/// Mutators exist on both so callers can treat curves uniformly; a view
/// rejects them with [`CurveError::ImmutableViolation`].
pub trait GridCurve<L: GridPointLabel> {
    /// Strategies the curve was built from.
    fn strategies(&self) -> &CurveStrategies;

    /// Number of grid points.
    fn len(&self) -> usize;

    /// Returns true if the curve has no grid points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted grid point arguments.
    fn arguments(&self) -> &[f64];

    /// Grid point values, aligned with [`arguments`](Self::arguments).
    fn values(&self) -> &[f64];

    /// Label of grid point `index`.
    fn label(&self, index: usize) -> Result<L, CurveError>;

    /// Argument of grid point `index`.
    fn argument(&self, index: usize) -> Result<f64, CurveError> {
        self.arguments()
            .get(index)
            .copied()
            .ok_or(CurveError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Value of grid point `index`.
    fn grid_value(&self, index: usize) -> Result<f64, CurveError> {
        self.values()
            .get(index)
            .copied()
            .ok_or(CurveError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Index of the first grid point carrying `label`.
    fn index_of(&self, label: &L) -> Option<usize>;

    /// Edits accumulated since the last successful update.
    fn change_state(&self) -> ChangeState;

    /// True if the curve can be evaluated.
    fn is_operable(&self) -> bool;

    /// Insert a grid point at its sorted position and return that position.
    fn add(&mut self, label: L, argument: f64, value: f64) -> Result<usize, CurveError>;

    /// Insert several grid points.
    ///
    /// With `is_sorted` on an empty curve, the points are taken as strictly
    /// ascending without checking.
    fn add_range(&mut self, points: Vec<GridPoint<L>>, is_sorted: bool) -> Result<(), CurveError>;

    /// Remove and return grid point `index`.
    fn remove_at(&mut self, index: usize) -> Result<GridPoint<L>, CurveError>;

    /// Remove the grid point carrying `label`; `Ok(false)` if there is none.
    fn try_remove(&mut self, label: &L) -> Result<bool, CurveError>;

    /// Move grid point `index` to `argument`, keeping its value.
    ///
    /// Returns the new index of the point.
    fn set_grid_point_argument(&mut self, index: usize, argument: f64) -> Result<usize, CurveError>;

    /// Replace the value of grid point `index`.
    fn set_value(&mut self, index: usize, value: f64) -> Result<(), CurveError>;

    /// Remove all grid points.
    fn clear(&mut self) -> Result<(), CurveError>;

    /// Refit the interior and both tails.
    fn update(&mut self) -> Result<(), CurveError>;

    /// Lower bound of the domain of definition.
    fn lower_bound(&self) -> f64;

    /// Upper bound of the domain of definition.
    fn upper_bound(&self) -> f64;

    /// Curve value at `x`.
    fn value(&self, x: f64) -> Result<f64, CurveError>;

    /// First derivative at `x`.
    fn derivative(&self, x: f64) -> Result<f64, CurveError>;

    /// Definite integral from `lower` to `upper`; reversed bounds flip the sign.
    fn integral(&self, lower: f64, upper: f64) -> Result<f64, CurveError>;

    /// Points to the left of `index` whose fit changes with grid point `index`.
    fn left_localness_level(&self, index: usize) -> usize {
        self.strategies()
            .fitting()
            .left_localness_level(index, self.len())
    }

    /// Points to the right of `index` whose fit changes with grid point `index`.
    fn right_localness_level(&self, index: usize) -> usize {
        self.strategies()
            .fitting()
            .right_localness_level(index, self.len())
    }
}
