//! Region routing shared by mutable curves and read-only views.
//!
//! A curve is made of up to three regions: left tail, interior, right tail.
//! Queries below the interior domain go to the left extrapolator, queries
//! above it to the right one, everything else (both interior bounds
//! included) to the interior fitter.

use crate::fitting::{Extrapolator, Fitter};
use crate::types::CurveError;

/// Borrowed view of the three regions of an operable curve.
#[derive(Clone, Copy)]
pub(crate) struct Regions<'a> {
    pub(crate) interior: &'a dyn Fitter,
    pub(crate) tails: Option<(&'a dyn Extrapolator, &'a dyn Extrapolator)>,
}

impl<'a> Regions<'a> {
    pub(crate) fn new(
        interior: &'a dyn Fitter,
        tails: Option<&'a (Box<dyn Extrapolator>, Box<dyn Extrapolator>)>,
    ) -> Self {
        Self {
            interior,
            tails: tails.map(|(left, right)| {
                let pair: (&'a dyn Extrapolator, &'a dyn Extrapolator) =
                    (left.as_ref(), right.as_ref());
                pair
            }),
        }
    }

    pub(crate) fn lower_bound(&self) -> f64 {
        match self.tails {
            Some((left, _)) => left.lower_bound(),
            None => self.interior.lower_bound(),
        }
    }

    pub(crate) fn upper_bound(&self) -> f64 {
        match self.tails {
            Some((_, right)) => right.upper_bound(),
            None => self.interior.upper_bound(),
        }
    }

    fn check_query(x: f64) -> Result<(), CurveError> {
        if x.is_nan() {
            Err(CurveError::InvalidInput("query point is NaN".to_string()))
        } else {
            Ok(())
        }
    }

    /// Replace a tail's own domain error by one naming the curve domain.
    fn widen(&self, x: f64, err: CurveError) -> CurveError {
        if err.is_out_of_domain() {
            CurveError::out_of_domain(x, self.lower_bound(), self.upper_bound())
        } else {
            err
        }
    }

    fn left(&self, x: f64) -> Result<&'a dyn Extrapolator, CurveError> {
        self.tails
            .map(|(left, _)| left)
            .ok_or_else(|| CurveError::out_of_domain(x, self.lower_bound(), self.upper_bound()))
    }

    fn right(&self, x: f64) -> Result<&'a dyn Extrapolator, CurveError> {
        self.tails
            .map(|(_, right)| right)
            .ok_or_else(|| CurveError::out_of_domain(x, self.lower_bound(), self.upper_bound()))
    }

    pub(crate) fn value(&self, x: f64) -> Result<f64, CurveError> {
        Self::check_query(x)?;
        if x < self.interior.lower_bound() {
            self.left(x)?.value(x).map_err(|e| self.widen(x, e))
        } else if x > self.interior.upper_bound() {
            self.right(x)?.value(x).map_err(|e| self.widen(x, e))
        } else {
            self.interior.value(x)
        }
    }

    pub(crate) fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        Self::check_query(x)?;
        if x < self.interior.lower_bound() {
            self.left(x)?.derivative(x).map_err(|e| self.widen(x, e))
        } else if x > self.interior.upper_bound() {
            self.right(x)?.derivative(x).map_err(|e| self.widen(x, e))
        } else {
            self.interior
                .as_differentiable()
                .ok_or_else(|| {
                    CurveError::NotDifferentiable(format!(
                        "{} fitter provides no derivative",
                        self.interior.strategy().name()
                    ))
                })?
                .derivative(x)
        }
    }

    /// Integral over `[lower, upper]` in either order.
    ///
    /// Reversed bounds negate the result. The ordered interval is split at
    /// the interior bounds and each piece goes to the region owning it.
    pub(crate) fn integral(&self, lower: f64, upper: f64) -> Result<f64, CurveError> {
        Self::check_query(lower)?;
        Self::check_query(upper)?;
        if lower > upper {
            return Ok(-self.ordered_integral(upper, lower)?);
        }
        self.ordered_integral(lower, upper)
    }

    fn ordered_integral(&self, a: f64, b: f64) -> Result<f64, CurveError> {
        let (lower, upper) = (self.lower_bound(), self.upper_bound());
        if a < lower {
            return Err(CurveError::out_of_domain(a, lower, upper));
        }
        if b > upper {
            return Err(CurveError::out_of_domain(b, lower, upper));
        }
        if a == b {
            return Ok(0.0);
        }
        let inner_lower = self.interior.lower_bound();
        let inner_upper = self.interior.upper_bound();
        let mut total = 0.0;

        if a < inner_lower {
            let end = b.min(inner_lower);
            total += self.left(a)?.integral(a, end).map_err(|e| self.widen(a, e))?;
        }

        let start = a.max(inner_lower);
        let end = b.min(inner_upper);
        if start < end {
            total += self.interior.integral_over(start, end)?;
        }

        if b > inner_upper {
            let start = a.max(inner_upper);
            total += self.right(b)?.integral(start, b).map_err(|e| self.widen(b, e))?;
        }

        Ok(total)
    }
}
