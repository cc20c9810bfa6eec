//! Strategy, fitter and extrapolator contracts.
//!
//! A *strategy* is a stateless, shareable descriptor. Each `create()` call
//! yields an independent *fitter* (interior) or *extrapolator* (tails) that
//! holds a private copy of the grid point data it was last updated with.

use crate::math::search::non_last_nearest_index;
use crate::types::{ChangeState, CurveError, StridedSlice};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a fitted curve reproduces every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FittingQuality {
    /// The curve passes through every grid point.
    Exact,
    /// The curve only approximates the grid points (e.g. least squares).
    Best,
}

/// Interpolation versus parametrization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Piecewise scheme defined on `[first argument, last argument]`, extended by extrapolators.
    Interpolation,
    /// Global closed-form function defined on the whole real line.
    Parametrization,
}

/// Side of the grid an extrapolator is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingDirection {
    /// Extends the curve to the left of the first grid point.
    FromFirstGridPoint,
    /// Extends the curve to the right of the last grid point.
    FromLastGridPoint,
}

impl fmt::Display for BuildingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildingDirection::FromFirstGridPoint => write!(f, "from first grid point"),
            BuildingDirection::FromLastGridPoint => write!(f, "from last grid point"),
        }
    }
}

/// Directional dependency width of a global approach.
///
/// Capped by the distance to the respective end of the series:
/// `left = min(count - 1, index)`, `right = min(count - 1, count - 1 - index)`.
#[inline]
pub fn global_localness_levels(index: usize, count: usize) -> (usize, usize) {
    let cap = count.saturating_sub(1);
    let left = index.min(cap);
    let right = cap.saturating_sub(index).min(cap);
    (left, right)
}

/// Window of a local approach: at most `width` points on either side.
#[inline]
pub fn local_localness_levels(index: usize, count: usize, width: usize) -> (usize, usize) {
    let (left, right) = global_localness_levels(index, count);
    (left.min(width), right.min(width))
}

/// Interpolation or parametrization descriptor.
///
/// Implementations are immutable values safe to share across threads;
/// all per-curve state lives in the [`Fitter`] returned by [`create`](Self::create).
pub trait FittingStrategy: fmt::Debug + Send + Sync {
    /// Short display name, also the registry key (e.g. `"Linear"`).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn long_name(&self) -> &str;

    /// Interpolation or parametrization.
    fn kind(&self) -> StrategyKind;

    /// Minimum number of grid points an update needs.
    fn minimal_required_grid_points(&self) -> usize;

    /// Exact or best fit.
    fn quality(&self) -> FittingQuality;

    /// Whether changing one point only affects a bounded neighbourhood.
    fn is_local_approach(&self) -> bool;

    /// Whether produced fitters expose [`DifferentiableFitter`].
    fn is_differentiable(&self) -> bool;

    /// How many points to the left of `index` are affected when it changes.
    fn left_localness_level(&self, index: usize, count: usize) -> usize {
        global_localness_levels(index, count).0
    }

    /// How many points to the right of `index` are affected when it changes.
    fn right_localness_level(&self, index: usize, count: usize) -> usize {
        global_localness_levels(index, count).1
    }

    /// Free-text annotation, the one attribute that may change on a shared strategy.
    ///
    /// Plain strategies carry none; see [`AnnotatedStrategy`](super::AnnotatedStrategy).
    fn annotation(&self) -> Option<String> {
        None
    }

    /// Allocate a new, not yet updated fitter.
    fn create(&self) -> Box<dyn Fitter>;
}

/// Stateful numerical engine for the interior region.
///
/// States: not yet updated, operable, invalid. `update` either fully succeeds
/// (operable) or fails leaving the fitter non-operable; it never half-applies.
pub trait Fitter: fmt::Debug + Send + Sync {
    /// Originating strategy.
    fn strategy(&self) -> &dyn FittingStrategy;

    /// True after a successful update.
    fn is_operable(&self) -> bool;

    /// Lower bound of the domain of definition.
    fn lower_bound(&self) -> f64;

    /// Upper bound of the domain of definition.
    fn upper_bound(&self) -> f64;

    /// Private copy of the arguments of the last successful update.
    fn arguments(&self) -> &[f64];

    /// Private copy of the values of the last successful update.
    fn values(&self) -> &[f64];

    /// Deep-copy and fit the given grid points.
    ///
    /// `state` lets the fitter skip work that only depends on the arguments
    /// when only values changed.
    fn update(
        &mut self,
        arguments: StridedSlice<'_>,
        values: StridedSlice<'_>,
        state: ChangeState,
    ) -> Result<(), CurveError>;

    /// Value at `x` in `[lower_bound, upper_bound]`.
    fn value(&self, x: f64) -> Result<f64, CurveError>;

    /// Integral over `[a, b]` where both lie in the cell starting at grid point `left_index`.
    fn integral(&self, a: f64, b: f64, left_index: usize) -> Result<f64, CurveError>;

    /// Integral over an arbitrary `[a, b]` inside the domain, `a <= b`.
    ///
    /// The default walks the cells between `a` and `b` and sums the per-cell
    /// integrals; fitters with a closed-form antiderivative override it.
    fn integral_over(&self, a: f64, b: f64) -> Result<f64, CurveError> {
        if a == b {
            return Ok(0.0);
        }
        let args = self.arguments();
        let i = non_last_nearest_index(a, args)?;
        let j = non_last_nearest_index(b, args)?;
        if i == j {
            return self.integral(a, b, i);
        }

        let mut total = self.integral(a, args[i + 1], i)?;
        for k in i + 1..j {
            total += self.integral(args[k], args[k + 1], k)?;
        }
        total += self.integral(args[j], b, j)?;
        Ok(total)
    }

    /// Derivative capability, if the strategy declares it.
    fn as_differentiable(&self) -> Option<&dyn DifferentiableFitter> {
        None
    }
}

/// Fitters whose fitted function has a first derivative.
pub trait DifferentiableFitter: Fitter {
    /// First derivative at `x` in `[lower_bound, upper_bound]`.
    fn derivative(&self, x: f64) -> Result<f64, CurveError>;
}

/// Extrapolation descriptor for one side of the curve.
pub trait ExtrapolationStrategy: fmt::Debug + Send + Sync {
    /// Short display name, also the registry key (e.g. `"Constant"`).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn long_name(&self) -> &str;

    /// Side this extrapolator extends.
    fn direction(&self) -> BuildingDirection;

    /// Whether the interior fitter must be differentiable.
    fn requires_differentiable_interior(&self) -> bool {
        false
    }

    /// Allocate a new extrapolator; it binds to an interior fitter on update.
    fn create(&self) -> Box<dyn Extrapolator>;
}

/// Stateful tail of a curve.
///
/// Reads the boundary value (and slope, where needed) from the already
/// updated interior fitter on every [`update`](Self::update).
pub trait Extrapolator: fmt::Debug + Send + Sync {
    /// Originating strategy.
    fn strategy(&self) -> &dyn ExtrapolationStrategy;

    /// Side this extrapolator extends.
    fn direction(&self) -> BuildingDirection {
        self.strategy().direction()
    }

    /// True after a successful update.
    fn is_operable(&self) -> bool;

    /// Lower bound of the extrapolation domain.
    fn lower_bound(&self) -> f64;

    /// Upper bound of the extrapolation domain.
    fn upper_bound(&self) -> f64;

    /// Re-read boundary data from the interior fitter.
    fn update(&mut self, interior: &dyn Fitter) -> Result<(), CurveError>;

    /// Value at `x` in the extrapolation domain.
    fn value(&self, x: f64) -> Result<f64, CurveError>;

    /// First derivative at `x` in the extrapolation domain.
    fn derivative(&self, x: f64) -> Result<f64, CurveError>;

    /// Integral over `[a, b]` inside the extrapolation domain.
    fn integral(&self, a: f64, b: f64) -> Result<f64, CurveError>;
}
