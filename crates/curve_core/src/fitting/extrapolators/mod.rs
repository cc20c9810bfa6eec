//! Extrapolation strategies.
//!
//! Every strategy is tagged with the [`BuildingDirection`](crate::fitting::BuildingDirection)
//! of the side it extends. Extrapolators re-read the boundary value (and,
//! for [`LinearExtrapolation`], the boundary slope) from the interior fitter
//! on each update.

mod anchor;
mod constant;
mod linear;
mod none;

pub use constant::{ConstantExtrapolation, ConstantExtrapolator};
pub use linear::{LinearExtrapolation, LinearExtrapolator};
pub use none::{NoExtrapolation, NoExtrapolator};
