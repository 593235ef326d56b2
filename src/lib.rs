//! Free-end cubic Bézier interpolation of 2D point sequences.
//!
//! [`BezierInterpolator`] turns `N + 1` points into `4 * N` control points, four
//! per segment, with consecutive segments sharing their anchor points.

pub mod curve;
mod error;
pub mod linear;
pub mod points;

pub use curve::{BezierCurve, BezierInterpolator, CubicBezier};
pub use error::{Error, InvalidInput, Result, Singularity};
pub use linear::{Mode, SolverSettings};
