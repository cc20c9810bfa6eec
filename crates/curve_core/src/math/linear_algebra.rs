//! Linear system solvers used by global fitters.
//!
//! - [`TridiagonalFactorization`]: Thomas algorithm, factorise once and solve
//!   for several right-hand sides (spline refits after value-only edits)
//! - [`CholeskyFactorization`]: dense symmetric positive definite systems
//!   (least-squares normal equations)
//!
//! Both report breakdown as [`LinearAlgebraError::Singular`].

use crate::types::LinearAlgebraError;
use num_traits::Float;

/// LU factorisation of a tridiagonal matrix (Thomas algorithm).
///
/// Row `i` of the system reads
/// `sub[i] * x[i-1] + diag[i] * x[i] + sup[i] * x[i+1] = rhs[i]`,
/// with `sub[0]` and `sup[n-1]` ignored.
///
/// # Example
///
/// ```
/// use curve_core::math::linear_algebra::TridiagonalFactorization;
///
/// // [2 1 0; 1 2 1; 0 1 2] x = [3, 4, 3]  =>  x = [1, 1, 1]
/// let lu = TridiagonalFactorization::<f64>::factorize(
///     &[0.0, 1.0, 1.0],
///     &[2.0, 2.0, 2.0],
///     &[1.0, 1.0, 0.0],
/// ).unwrap();
/// let x = lu.solve(&[3.0, 4.0, 3.0]).unwrap();
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TridiagonalFactorization<T: Float> {
    /// Sub-diagonal of the original matrix
    sub: Vec<T>,
    /// Pivots of the forward elimination
    pivots: Vec<T>,
    /// Normalised super-diagonal (c' in the usual notation)
    upper: Vec<T>,
}

impl<T: Float> TridiagonalFactorization<T> {
    /// Factorise the tridiagonal matrix given by its three diagonals.
    ///
    /// # Errors
    ///
    /// * `LinearAlgebraError::DimensionMismatch` - diagonals of unequal length
    /// * `LinearAlgebraError::Singular` - a pivot vanishes relative to its diagonal
    pub fn factorize(sub: &[T], diag: &[T], sup: &[T]) -> Result<Self, LinearAlgebraError> {
        let n = diag.len();
        if sub.len() != n {
            return Err(LinearAlgebraError::DimensionMismatch {
                expected: n,
                got: sub.len(),
            });
        }
        if sup.len() != n {
            return Err(LinearAlgebraError::DimensionMismatch {
                expected: n,
                got: sup.len(),
            });
        }

        let mut pivots = Vec::with_capacity(n);
        let mut upper = Vec::with_capacity(n);

        for i in 0..n {
            let pivot = if i == 0 {
                diag[0]
            } else {
                diag[i] - sub[i] * upper[i - 1]
            };
            if !pivot.is_finite() || pivot.abs() <= T::epsilon() * diag[i].abs() {
                return Err(LinearAlgebraError::Singular { row: i });
            }
            let sup_i = if i + 1 < n { sup[i] } else { T::zero() };
            pivots.push(pivot);
            upper.push(sup_i / pivot);
        }

        let mut sub = sub.to_vec();
        if let Some(first) = sub.first_mut() {
            *first = T::zero();
        }

        Ok(Self { sub, pivots, upper })
    }

    /// Dimension of the factorised system.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.pivots.len()
    }

    /// Solve the system for one right-hand side.
    pub fn solve(&self, rhs: &[T]) -> Result<Vec<T>, LinearAlgebraError> {
        let n = self.dimension();
        if rhs.len() != n {
            return Err(LinearAlgebraError::DimensionMismatch {
                expected: n,
                got: rhs.len(),
            });
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        // Forward elimination
        let mut x = Vec::with_capacity(n);
        x.push(rhs[0] / self.pivots[0]);
        for i in 1..n {
            let prev = x[i - 1];
            x.push((rhs[i] - self.sub[i] * prev) / self.pivots[i]);
        }

        // Back substitution
        for i in (0..n - 1).rev() {
            let next = x[i + 1];
            x[i] = x[i] - self.upper[i] * next;
        }

        Ok(x)
    }
}

/// Cholesky factorisation `A = L * L^T` of a symmetric positive definite matrix.
///
/// # Example
///
/// ```
/// use curve_core::math::linear_algebra::CholeskyFactorization;
///
/// let a = [4.0_f64, 2.0, 2.0, 3.0];
/// let chol = CholeskyFactorization::factorize(&a, 2).unwrap();
/// let x = chol.solve(&[6.0, 5.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CholeskyFactorization<T: Float> {
    n: usize,
    /// Row-major lower triangular factor
    lower: Vec<T>,
}

impl<T: Float> CholeskyFactorization<T> {
    /// Factorise the row-major `n x n` matrix. Only the lower triangle is read.
    ///
    /// # Errors
    ///
    /// * `LinearAlgebraError::DimensionMismatch` - `matrix.len() != n * n`
    /// * `LinearAlgebraError::Singular` - matrix is not positive definite
    pub fn factorize(matrix: &[T], n: usize) -> Result<Self, LinearAlgebraError> {
        if matrix.len() != n * n {
            return Err(LinearAlgebraError::DimensionMismatch {
                expected: n * n,
                got: matrix.len(),
            });
        }

        let mut lower = vec![T::zero(); n * n];
        for j in 0..n {
            let mut diag = matrix[j * n + j];
            for k in 0..j {
                diag = diag - lower[j * n + k] * lower[j * n + k];
            }
            if !diag.is_finite() || diag <= T::epsilon() * matrix[j * n + j].abs() {
                return Err(LinearAlgebraError::Singular { row: j });
            }
            let l_jj = diag.sqrt();
            lower[j * n + j] = l_jj;

            for i in j + 1..n {
                let mut s = matrix[i * n + j];
                for k in 0..j {
                    s = s - lower[i * n + k] * lower[j * n + k];
                }
                lower[i * n + j] = s / l_jj;
            }
        }

        Ok(Self { n, lower })
    }

    /// Dimension of the factorised system.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Solve `A x = rhs`.
    pub fn solve(&self, rhs: &[T]) -> Result<Vec<T>, LinearAlgebraError> {
        let n = self.n;
        if rhs.len() != n {
            return Err(LinearAlgebraError::DimensionMismatch {
                expected: n,
                got: rhs.len(),
            });
        }

        // L y = rhs
        let mut y = vec![T::zero(); n];
        for i in 0..n {
            let mut s = rhs[i];
            for k in 0..i {
                s = s - self.lower[i * n + k] * y[k];
            }
            y[i] = s / self.lower[i * n + i];
        }

        // L^T x = y
        let mut x = vec![T::zero(); n];
        for i in (0..n).rev() {
            let mut s = y[i];
            for k in i + 1..n {
                s = s - self.lower[k * n + i] * x[k];
            }
            x[i] = s / self.lower[i * n + i];
        }

        Ok(x)
    }
}
