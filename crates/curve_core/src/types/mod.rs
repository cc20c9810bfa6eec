//! Core types shared across the curve engine.
//!
//! This module provides:
//! - `error`: Structured error types for curve and linear algebra operations
//! - `grid`: Grid point primitives (change tracking, strided views, labels)
//!
//! # Re-exports
//!
//! - [`CurveError`], [`LinearAlgebraError`] from `error`
//! - [`ChangeState`], [`GridPoint`], [`GridPointLabel`], [`StridedSlice`] from `grid`

pub mod error;
pub mod grid;

pub use error::{CurveError, LinearAlgebraError};
pub use grid::{ChangeState, GridPoint, GridPointLabel, StridedSlice};
