//! Error types for structured error handling.
//!
//! This module provides:
//! - `CurveError`: Errors from curve construction, mutation, fitting and evaluation
//! - `LinearAlgebraError`: Errors from the linear system solvers used by global fitters

use thiserror::Error;

/// Linear system solver errors.
///
/// Raised by the tridiagonal and Cholesky solvers in
/// [`crate::math::linear_algebra`].
///
/// # Examples
/// ```
/// use curve_core::types::LinearAlgebraError;
///
/// let err = LinearAlgebraError::Singular { row: 2 };
/// assert!(format!("{}", err).contains("row 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinearAlgebraError {
    /// The system matrix is singular (or not positive definite) at the given row.
    #[error("Singular system: zero or negative pivot at row {row}")]
    Singular {
        /// Row where elimination broke down
        row: usize,
    },

    /// Operand dimensions do not agree.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },
}

/// Curve engine errors.
///
/// Every failure is synchronous and local; the caller fixes the input and
/// retries. Failing operations leave the curve unchanged, except that a
/// failed `update` keeps the curve non-operable.
///
/// # Variants
/// - `Configuration`: Invalid strategy combination (wrong direction, missing capability)
/// - `DuplicateArgument`: Grid point argument already present
/// - `OutOfDomain`: Query outside the domain of definition
/// - `NotOperable`: Evaluation requested before a successful `update`
/// - `ImmutableViolation`: Mutation attempted on a read-only view
/// - `SingularSystem`: Linear solver failure inside a global fitter
///
/// # Examples
/// ```
/// use curve_core::types::CurveError;
///
/// let err = CurveError::OutOfDomain { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Invalid strategy combination, detected at construction time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A grid point with this argument already exists.
    #[error("Duplicate grid point argument: {argument}")]
    DuplicateArgument {
        /// The rejected argument
        argument: f64,
    },

    /// Query point outside the domain of definition.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfDomain {
        /// The query point
        x: f64,
        /// Lower bound of the domain
        min: f64,
        /// Upper bound of the domain
        max: f64,
    },

    /// Curve or fitter does not reflect the latest grid point edits.
    #[error("Not operable: {0}")]
    NotOperable(String),

    /// Mutating call on an immutable view.
    #[error("Immutable violation: '{operation}' is not supported by a read-only curve")]
    ImmutableViolation {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// Failure propagated from the linear solver.
    #[error("Singular system: {0}")]
    SingularSystem(#[from] LinearAlgebraError),

    /// Not enough grid points for the fitting strategy.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Arguments are not strictly ascending.
    #[error("Arguments are not strictly ascending at index {index}")]
    NonMonotonicData {
        /// Index of the first offending argument
        index: usize,
    },

    /// Grid point index outside the current sequence.
    #[error("Index {index} out of range for {len} grid points")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of grid points
        len: usize,
    },

    /// Derivative requested from a fitter without that capability.
    #[error("Not differentiable: {0}")]
    NotDifferentiable(String),

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration document could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl CurveError {
    /// Build an [`CurveError::OutOfDomain`] for `x` against `[min, max]`.
    #[inline]
    pub fn out_of_domain(x: f64, min: f64, max: f64) -> Self {
        CurveError::OutOfDomain { x, min, max }
    }

    /// Check if the error is a domain violation.
    pub fn is_out_of_domain(&self) -> bool {
        matches!(self, CurveError::OutOfDomain { .. })
    }

    /// Check if the error is a rejected mutation of a read-only view.
    pub fn is_immutable_violation(&self) -> bool {
        matches!(self, CurveError::ImmutableViolation { .. })
    }
}
