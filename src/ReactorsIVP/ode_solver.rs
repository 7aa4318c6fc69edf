//! # IVP solver
//!
//! Integration of the kinetic ODE system with the Dormand–Prince 5(4) stepper of the
//! `ode_solvers` crate. The stepper's dense output is collected on an evenly spaced grid:
//! the step sequence itself is an implementation detail, the sampled grid is the result.
//!
//! ## Main items
//! - [`State`]: the state vector, `nalgebra::DVector<f64>` so any number of substances fits
//! - [`SolverParams`]: tolerances (serde, defaults `rtol = 1e-3`, `atol = 1e-6`)
//! - [`uniform_grid`]: `n` evenly spaced points, both ends included
//! - [`solve_ivp`]: integrate over a time span and sample it at `n_points` points
//! - [`OdeSolution`]: `t` vector and `y` matrix (one row per time point, one column per unknown)
//!
//! Any system implementing `ode_solvers::System<f64, State>` can be solved:
//! ```
//! use KiReact::ReactorsIVP::ode_solver::{SolverParams, State, solve_ivp};
//! use ode_solvers::System;
//! struct Decay;
//! impl System<f64, State> for Decay {
//!     fn system(&self, _t: f64, y: &State, dy: &mut State) { dy[0] = -y[0]; }
//! }
//! let y0 = State::from_vec(vec![1.0]);
//! let sol = solve_ivp(Decay, y0, (0.0, 1.0), 3, &SolverParams::default()).unwrap();
//! assert!((sol.y[(2, 0)] - (-1.0f64).exp()).abs() < 1e-3);
//! ```
use super::reactor_IVP_utils::ReactorError;
use log::info;
use nalgebra::{DMatrix, DVector};
use ode_solvers::System;
use ode_solvers::dopri5::Dopri5;
use serde::{Deserialize, Serialize};

/// Concentration vector in the order of the species registry
pub type State = DVector<f64>;

/// Tolerances of the adaptive integrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
        }
    }
}

impl SolverParams {
    pub fn validate(&self) -> Result<(), ReactorError> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(ReactorError::InvalidConfiguration(
                "rtol must be finite and > 0".to_string(),
            ));
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(ReactorError::InvalidConfiguration(
                "atol must be finite and > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Solution sampled on the requested grid
#[derive(Debug, Clone)]
pub struct OdeSolution {
    pub t: DVector<f64>,
    /// rows - time points, columns - unknowns
    pub y: DMatrix<f64>,
    pub n_accepted: usize,
    pub n_rejected: usize,
    pub n_fev: usize,
}

/// `n` evenly spaced points from `t0` to `t1`; the last one is exactly `t1`
pub fn uniform_grid(t0: f64, t1: f64, n: usize) -> DVector<f64> {
    let dt = if n > 1 { (t1 - t0) / (n - 1) as f64 } else { 0.0 };
    DVector::from_fn(n, |i, _| if i + 1 == n { t1 } else { t0 + i as f64 * dt })
}

/// Integrate `system` over `t_span` starting at `y0` and sample the solution at `n_points`
/// evenly spaced times, both ends included.
pub fn solve_ivp<S: System<f64, State>>(
    system: S,
    y0: State,
    t_span: (f64, f64),
    n_points: usize,
    params: &SolverParams,
) -> Result<OdeSolution, ReactorError> {
    params.validate()?;
    let (t0, t1) = t_span;
    if !t0.is_finite() || !t1.is_finite() || t1 <= t0 {
        return Err(ReactorError::InvalidConfiguration(format!(
            "time span must be finite and increasing, got ({}, {})",
            t0, t1
        )));
    }
    if n_points < 2 {
        return Err(ReactorError::InvalidConfiguration(format!(
            "at least 2 output points are needed, got {}",
            n_points
        )));
    }
    if y0.iter().any(|y| !y.is_finite()) {
        return Err(ReactorError::InvalidConfiguration(
            "initial state must be finite".to_string(),
        ));
    }
    let n = y0.len();
    let t = uniform_grid(t0, t1, n_points);
    let dx = t[1] - t[0];
    // the stepper accumulates the output time, so the end is moved half a sample past t1
    // to keep the last sample from being lost to rounding
    let mut stepper = Dopri5::new(system, t0, t1 + 0.5 * dx, dx, y0, params.rtol, params.atol);
    let stats = stepper
        .integrate()
        .map_err(|e| ReactorError::Integration(e.to_string()))?;
    let y_out = stepper.y_out();
    if y_out.len() < n_points {
        return Err(ReactorError::Integration(format!(
            "the stepper produced {} of {} output points",
            y_out.len(),
            n_points
        )));
    }
    let samples = &y_out[..n_points];
    if samples.iter().any(|y| y.iter().any(|v| !v.is_finite())) {
        return Err(ReactorError::Integration(
            "solution is not finite".to_string(),
        ));
    }
    let y = DMatrix::from_fn(n_points, n, |i, j| samples[i][j]);
    info!(
        "Dormand-Prince: {} accepted steps, {} rejected, {} function evaluations",
        stats.accepted_steps, stats.rejected_steps, stats.num_eval
    );
    Ok(OdeSolution {
        t,
        y,
        n_accepted: stats.accepted_steps as usize,
        n_rejected: stats.rejected_steps as usize,
        n_fev: stats.num_eval as usize,
    })
}
