//! Dense linear solves `A x = b` where every entry of `b` and `x` is a 2D vector.
//!
//! Two strategies are available: a direct LU decomposition with partial
//! pivoting, and the Jacobi method. The Jacobi method is a simple iterative
//! method that is guaranteed to converge if the matrix is diagonally dominant,
//! which holds for the interpolation systems built in [`crate::curve`].

use glam::DVec2;

use crate::error::{InvalidInput, Result, Singularity};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Lu,
    Jacobi,
}

/// Tuning knobs for [`LinearSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub mode: Mode,
    /// Maximum number of Jacobi iterations. Sweeps run in pairs, so an odd value
    /// is rounded down.
    pub max: usize,
    /// Jacobi stops once the summed residual drops below this value.
    pub eps: f64,
    /// LU treats a pivot as zero when `|pivot| <= pivot_tol * max|a_ij|`.
    pub pivot_tol: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Lu,
            max: 1000,
            eps: 1e-12,
            pivot_tol: 1e-12,
        }
    }
}

/// A square system in row-major order.
#[derive(Debug, Clone)]
pub struct Job {
    dim: usize,
    mat: Vec<f64>,
    rhs: Vec<DVec2>,
}

impl Job {
    pub fn new(dim: usize, mat: Vec<f64>, rhs: Vec<DVec2>) -> Result<Self> {
        if mat.len() != dim * dim {
            return Err(InvalidInput::DimensionMismatch {
                expected: dim * dim,
                found: mat.len(),
            }
            .into());
        }
        if rhs.len() != dim {
            return Err(InvalidInput::DimensionMismatch {
                expected: dim,
                found: rhs.len(),
            }
            .into());
        }
        Ok(Self { dim, mat, rhs })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn mat(&self) -> &[f64] {
        &self.mat
    }

    pub fn rhs(&self) -> &[DVec2] {
        &self.rhs
    }
}

pub struct LinearSolver;

impl LinearSolver {
    /// Solve the given job. Delegate to the appropriate method based on the mode.
    pub fn solve(job: Job, settings: &SolverSettings) -> Result<Vec<DVec2>> {
        match settings.mode {
            Mode::Lu => Self::solve_lu(job, settings.pivot_tol),
            Mode::Jacobi => Self::solve_jacobi(job, settings.max, settings.eps),
        }
    }

    fn solve_lu(job: Job, pivot_tol: f64) -> Result<Vec<DVec2>> {
        let n = job.dim;
        let mut a = job.mat;
        let mut b = job.rhs;

        let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let threshold = pivot_tol * scale;

        // Factorise in place, applying the row swaps to b as we go
        for k in 0..n {
            let mut pivot_row = k;
            let mut pivot_val = a[k * n + k].abs();
            for i in (k + 1)..n {
                let val = a[i * n + k].abs();
                if val > pivot_val {
                    pivot_val = val;
                    pivot_row = i;
                }
            }
            if !(pivot_val > threshold) {
                return Err(Singularity::ZeroPivot {
                    column: k,
                    pivot: pivot_val,
                }
                .into());
            }
            if pivot_row != k {
                for j in 0..n {
                    a.swap(k * n + j, pivot_row * n + j);
                }
                b.swap(k, pivot_row);
            }

            let akk = a[k * n + k];
            for i in (k + 1)..n {
                let factor = a[i * n + k] / akk;
                a[i * n + k] = factor;
                for j in (k + 1)..n {
                    a[i * n + j] -= factor * a[k * n + j];
                }
            }
        }

        // Ly = Pb
        for i in 0..n {
            let mut sum = b[i];
            for k in 0..i {
                sum -= a[i * n + k] * b[k];
            }
            b[i] = sum;
        }
        // Ux = y
        for i in (0..n).rev() {
            let mut sum = b[i];
            for k in (i + 1)..n {
                sum -= a[i * n + k] * b[k];
            }
            b[i] = sum / a[i * n + i];
        }

        log::debug!("LU - dim {}", n);
        log::debug!("x: {:?}", b);

        Ok(b)
    }

    fn solve_jacobi(job: Job, max: usize, eps: f64) -> Result<Vec<DVec2>> {
        if let Some(row) = (0..job.dim).find(|&i| job.mat[i * job.dim + i] == 0.0) {
            return Err(Singularity::ZeroDiagonal { row }.into());
        }

        let mut x = vec![DVec2::ZERO; job.dim];
        let mut y = vec![DVec2::ZERO; job.dim];
        let mut residuals = vec![0.0; job.dim];
        let mut residual = f64::INFINITY;
        let mut iterations = 0;

        for _ in 0..(max / 2) {
            Self::jacobi_step(job.dim, &job.mat, &job.rhs, &x, &mut y, &mut residuals);
            Self::jacobi_step(job.dim, &job.mat, &job.rhs, &y, &mut x, &mut residuals);
            iterations += 2;
            residual = Self::residual_step(&residuals);

            if residual < eps {
                break;
            }
        }

        log::debug!("Jacobi - Iteration {}", iterations);
        log::debug!("x: {:?}", x);
        log::debug!("residuals: {:?}", residuals);
        log::debug!("residual: {:?}", residual);

        if !(residual < eps) {
            return Err(Error::NotConverged {
                iterations,
                residual,
            });
        }

        Ok(x)
    }

    fn jacobi_step(
        dim: usize,
        mat: &[f64],
        b: &[DVec2],
        x: &[DVec2],
        y: &mut [DVec2],
        residuals: &mut [f64],
    ) {
        for i in 0..dim {
            let mut sum = DVec2::ZERO;
            for j in 0..dim {
                if i != j {
                    sum += mat[i * dim + j] * x[j];
                }
            }
            y[i] = (b[i] - sum) / mat[i * dim + i];
            residuals[i] = y[i].distance(x[i]);
        }
    }

    fn residual_step(residuals: &[f64]) -> f64 {
        residuals.iter().sum()
    }
}
