//! Numerical building blocks for the curve engine.
//!
//! - [`search`]: cell lookup in sorted argument arrays
//! - [`linear_algebra`]: tridiagonal and Cholesky solvers for global fitters
//!
//! Both are generic over `T: num_traits::Float`.

pub mod linear_algebra;
pub mod search;
