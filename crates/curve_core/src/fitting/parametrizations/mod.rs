//! Parametrization strategies: global closed-form fits defined on the whole real line.

mod polynomial;

pub use polynomial::{PolynomialLeastSquares, PolynomialLeastSquaresFitter};
