//! Free-end cubic Bézier interpolation through an ordered sequence of 2D points.
//!
//! The curve is parametrised by chord length. A linear system couples the
//! auxiliary vectors `Q` (one per interior point), which carry the curvature
//! continuity at the shared anchors. The ends are left free, so no tangent is
//! imposed on the first and last point.

use glam::DVec2;

use crate::error::{InvalidInput, Result, Singularity};
use crate::linear::{Job, LinearSolver, SolverSettings};

/// Fewest points the interpolation accepts.
pub const MIN_POINTS: usize = 4;

/// One cubic Bézier piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl CubicBezier {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the point at parameter `t` in [0, 1].
    pub fn point(&self, t: f64) -> DVec2 {
        let s = 1.0 - t;
        s * s * s * self.p0 + 3.0 * s * s * t * self.p1 + 3.0 * s * t * t * self.p2 + t * t * t * self.p3
    }

    /// First derivative with respect to `t`.
    pub fn derivative(&self, t: f64) -> DVec2 {
        let s = 1.0 - t;
        3.0 * (s * s * (self.p1 - self.p0) + 2.0 * s * t * (self.p2 - self.p1) + t * t * (self.p3 - self.p2))
    }
}

/// Control points of an interpolating curve, four per segment.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    control_points: Vec<DVec2>,
}

impl BezierCurve {
    /// Number of segments.
    pub fn len(&self) -> usize {
        self.control_points.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    pub fn control_points(&self) -> &[DVec2] {
        &self.control_points
    }

    pub fn into_control_points(self) -> Vec<DVec2> {
        self.control_points
    }

    pub fn segments(&self) -> impl Iterator<Item = CubicBezier> + '_ {
        self.control_points
            .chunks_exact(4)
            .map(|c| CubicBezier::new(c[0], c[1], c[2], c[3]))
    }

    /// Sample every segment uniformly in `t`.
    ///
    /// The polyline starts at the first anchor and ends exactly at the last one;
    /// inner anchors appear once.
    pub fn generate(&self, samples_per_segment: usize) -> Vec<DVec2> {
        let samples = samples_per_segment.max(1);
        let mut result = Vec::with_capacity(self.len() * samples + 1);
        for segment in self.segments() {
            result.push(segment.p0);
            for i in 1..samples {
                result.push(segment.point(i as f64 / samples as f64));
            }
        }
        if let Some(last) = self.control_points.last() {
            result.push(*last);
        }
        result
    }
}

pub struct BezierInterpolator;

impl BezierInterpolator {
    /// Interpolate `points` with the default solver settings (LU).
    pub fn interpolate(points: &[DVec2]) -> Result<BezierCurve> {
        Self::interpolate_with(points, &SolverSettings::default())
    }

    pub fn interpolate_with(points: &[DVec2], settings: &SolverSettings) -> Result<BezierCurve> {
        Self::validate(points)?;

        // Assemble in coordinates of magnitude at most 2 so the chord products
        // in the right-hand side neither overflow nor underflow.
        let scale = Self::coordinate_scale(points);
        let scaled: Vec<DVec2> = points.iter().map(|&p| p / scale).collect();

        let delta = Self::chord_lengths(&scaled);
        if let Some(index) = delta.iter().position(|&d| !(d > 0.0)) {
            return Err(Singularity::ZeroChord { index }.into());
        }
        log::debug!("chord lengths: {:?} (scale {:e})", delta, scale);

        let dim = delta.len() - 1;
        let job = Job::new(
            dim,
            Self::system_matrix(&delta),
            Self::right_hand_side(&scaled, &delta),
        )?;
        let q = LinearSolver::solve(job, settings)?;

        let control_points = Self::control_points(points, &delta, &q, scale);
        if let Some(index) = control_points.iter().position(|p| !p.is_finite()) {
            return Err(Singularity::NonFiniteControlPoint { segment: index / 4 }.into());
        }
        Ok(BezierCurve { control_points })
    }

    /// Power of two that brings every coordinate into `[-2, 2]`.
    ///
    /// Dividing by a power of two is exact, so the scaled system gives the same
    /// control points as the unscaled one whenever the latter stays in range.
    fn coordinate_scale(points: &[DVec2]) -> f64 {
        let largest = points
            .iter()
            .fold(0.0_f64, |acc, p| acc.max(p.x.abs()).max(p.y.abs()));
        if largest == 0.0 {
            return 1.0;
        }
        let exponent = (largest.log2().ceil() as i32).clamp(f64::MIN_EXP - 1, f64::MAX_EXP - 1);
        2.0_f64.powi(exponent)
    }

    fn validate(points: &[DVec2]) -> Result<()> {
        if points.len() < MIN_POINTS {
            return Err(InvalidInput::TooFewPoints(points.len()).into());
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(InvalidInput::NonFinite { index }.into());
        }
        Ok(())
    }

    /// Distances between consecutive points.
    pub fn chord_lengths(points: &[DVec2]) -> Vec<f64> {
        points.windows(2).map(|w| w[0].distance(w[1])).collect()
    }

    /// Row-major `(N-1)x(N-1)` matrix coupling the auxiliary vectors, `N = delta.len()`.
    ///
    /// Row `i` belongs to the interior point `i + 1`. The first row has no
    /// sub-entry and the last row has no super-entry.
    pub fn system_matrix(delta: &[f64]) -> Vec<f64> {
        let dim = delta.len().saturating_sub(1);
        let mut mat = vec![0.0; dim * dim];
        for i in 0..dim {
            let w = 2.0 * (delta[i] + delta[i + 1]);
            if i > 0 {
                mat[i * dim + i - 1] = delta[i] / w;
            }
            mat[i * dim + i] = 1.0;
            if i + 1 < dim {
                mat[i * dim + i + 1] = delta[i + 1] / w;
            }
        }
        mat
    }

    /// Scaled second difference of every three consecutive points.
    pub fn right_hand_side(points: &[DVec2], delta: &[f64]) -> Vec<DVec2> {
        (0..delta.len().saturating_sub(1))
            .map(|i| {
                let (d0, d1) = (delta[i], delta[i + 1]);
                3.0 / d0 / (d0 + d1) * points[i] - 3.0 / d0 / d1 * points[i + 1]
                    + 3.0 / d1 / (d0 + d1) * points[i + 2]
            })
            .collect()
    }

    /// Rebuild the four control points of every segment from the solved `q`.
    ///
    /// `delta` and `q` belong to the points divided by `scale`; pass `1.0` when
    /// they were computed from `points` directly. Anchors are copied from
    /// `points`, so neighbouring segments share them exactly.
    pub fn control_points(points: &[DVec2], delta: &[f64], q: &[DVec2], scale: f64) -> Vec<DVec2> {
        let n = delta.len();
        let mut bezier = Vec::with_capacity(4 * n);
        for seg in 0..n {
            let (a, b) = (points[seg], points[seg + 1]);
            let d2 = delta[seg] * delta[seg];
            // Free ends have a zero auxiliary vector, which turns the general
            // weights into the one-sided first and last segment forms.
            let q_start = if seg == 0 { DVec2::ZERO } else { q[seg - 1] };
            let q_end = if seg == n - 1 { DVec2::ZERO } else { q[seg] };

            let c1 = (2.0 / 3.0) * a + (1.0 / 3.0) * b
                - scale * (d2 / 9.0 * q_start)
                - scale * (d2 / 18.0 * q_end);
            let c2 = (1.0 / 3.0) * a + (2.0 / 3.0) * b
                - scale * (d2 / 18.0 * q_start)
                - scale * (d2 / 9.0 * q_end);

            bezier.extend([a, c1, c2, b]);
        }
        bezier
    }
}
