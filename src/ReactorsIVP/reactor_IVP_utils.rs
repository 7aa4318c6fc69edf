//! # Reactor IVP Utilities Module
//!
//! Error type and configuration layer of the kinetic IVP.
//!
//! ## Main Structures
//!
//! - **`ReactorError`**: every fatal condition of the pipeline, from the input validation
//!   (cardinality of rate constants, malformed equations, missing initial concentrations)
//!   to numerical failure of the integrator and failure of the chart backend.
//! - **`SimulationConfig`**: time horizon, number of output points, steady-state tolerance,
//!   integrator parameters and chart settings. Defaults reproduce the reference setup:
//!   `t ∈ [0, 10]`, 1000 evenly spaced samples, tolerance `1e-4`.
//!
//! `SimulationConfig` is `serde`-(de)serializable with `#[serde(default)]`, so a task document
//! may give only the fields it wants to change:
//! ```
//! use KiReact::ReactorsIVP::reactor_IVP_utils::SimulationConfig;
//! let config: SimulationConfig = serde_json::from_str(r#"{"t_final": 5.0}"#).unwrap();
//! assert_eq!(config.t_final, 5.0);
//! assert_eq!(config.n_points, 1000);
//! ```
use super::ode_solver::SolverParams;
use crate::Kinetics::reaction_parser::ParseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default time horizon of the simulation
pub const T_FINAL: f64 = 10.0;
/// Default number of evenly spaced output points
pub const N_POINTS: usize = 1000;
/// Default threshold of the steady-state detector
pub const STEADY_STATE_TOLERANCE: f64 = 1e-4;

/// error types of the kinetic IVP
#[derive(Debug, Error)]
pub enum ReactorError {
    #[error("number of rate constants ({rate_constants}) does not match number of reactions ({reactions})")]
    CardinalityMismatch {
        reactions: usize,
        rate_constants: usize,
    },
    #[error("parsing error: {0}")]
    Parse(#[from] ParseError),
    #[error("the following species are missing in initial concentrations: {0:?}")]
    MissingSpecies(Vec<String>),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("missing data: {0}")]
    MissingData(String),
    #[error("integration failed: {0}")]
    Integration(String),
    #[error("chart rendering failed: {0}")]
    Render(String),
    #[error("task file error: {0}")]
    TaskFile(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// end of the time interval [0, t_final]
    pub t_final: f64,
    /// number of evenly spaced output points, both ends included
    pub n_points: usize,
    /// absolute change per sample below which a species counts as settled
    pub steady_state_tolerance: f64,
    /// parameters of the Dormand-Prince integrator
    pub solver: SolverParams,
    /// chart file, SVG only
    pub output_path: String,
    pub title: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            t_final: T_FINAL,
            n_points: N_POINTS,
            steady_state_tolerance: STEADY_STATE_TOLERANCE,
            solver: SolverParams::default(),
            output_path: "concentrations.svg".to_string(),
            title: "Concentration vs. Time".to_string(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ReactorError> {
        if !self.t_final.is_finite() || self.t_final <= 0.0 {
            return Err(ReactorError::InvalidConfiguration(format!(
                "t_final must be finite and positive, got {}",
                self.t_final
            )));
        }
        if self.n_points < 2 {
            return Err(ReactorError::InvalidConfiguration(format!(
                "n_points must be at least 2, got {}",
                self.n_points
            )));
        }
        if !self.steady_state_tolerance.is_finite() || self.steady_state_tolerance <= 0.0 {
            return Err(ReactorError::InvalidConfiguration(format!(
                "steady_state_tolerance must be finite and positive, got {}",
                self.steady_state_tolerance
            )));
        }
        if !is_svg_path(&self.output_path) {
            return Err(ReactorError::InvalidConfiguration(format!(
                "chart file must have the .svg extension, got {}",
                self.output_path
            )));
        }
        self.solver.validate()
    }
}

/// does the file name end with the `.svg` extension (any case)
pub fn is_svg_path(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}
