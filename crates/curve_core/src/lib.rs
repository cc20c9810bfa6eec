//! # curve_core: Grid-Point Curve Engine
//!
//! Builds continuous real functions from sorted (argument, value) samples
//! ("grid points"), with pluggable fitting for the sampled interior and
//! pluggable extrapolation for the tails.
//!
//! ## Layout
//!
//! - `types`: errors, change tracking, strided buffer views, grid point labels
//! - `math`: cell search and the linear solvers used by global fitters
//! - `fitting`: strategy and fitter contracts, the concrete interpolations,
//!   parametrizations and extrapolations, and a name-based registry
//! - `curves`: the mutable [`GridPointCurve`](curves::GridPointCurve) and the
//!   immutable [`ReadOnlyCurveView`](curves::ReadOnlyCurveView)
//! - `surface`: row and column curves over a row-major value matrix
//! - `config`: TOML description of a curve's strategies
//!
//! ## Lifecycle
//!
//! Strategies are stateless and shared. A curve creates its own fitters from
//! them, records every edit of its grid points, and refits lazily on
//! `update()`. Evaluation before a successful update fails with
//! [`CurveError::NotOperable`](types::CurveError::NotOperable).
//!
//! ## Usage Examples
//!
//! ```rust
//! use curve_core::curves::{GridCurve, GridPointCurve};
//! use curve_core::fitting::{
//!     ConstantExtrapolation, LinearExtrapolation, NaturalCubicSplineInterpolation,
//! };
//! use curve_core::types::GridPoint;
//! use std::sync::Arc;
//!
//! let mut curve: GridPointCurve = GridPointCurve::interpolated(
//!     Arc::new(NaturalCubicSplineInterpolation),
//!     Arc::new(ConstantExtrapolation::left()),
//!     Arc::new(LinearExtrapolation::right()),
//! )
//! .unwrap();
//!
//! let points = (0..5).map(|i| GridPoint::unlabeled(i as f64, (i * i) as f64)).collect();
//! curve.add_range(points, true).unwrap();
//! curve.update().unwrap();
//!
//! // Exact at the grid points
//! assert!((curve.value(3.0).unwrap() - 9.0).abs() < 1e-12);
//! // Reversed bounds flip the sign
//! let forward = curve.integral(-1.0, 6.0).unwrap();
//! assert!((curve.integral(6.0, -1.0).unwrap() + forward).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: fit all row curves of a surface with rayon

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod curves;
pub mod fitting;
pub mod math;
pub mod surface;
pub mod types;
