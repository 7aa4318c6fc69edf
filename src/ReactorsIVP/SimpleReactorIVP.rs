//! # Simple Reactor IVP Module
//!
//! Time evolution of concentrations in an isothermal closed reactor of ideal mixing where a set of
//! elementary reactions runs with mass-action kinetics.
//!
//! ## Main Structures
//!
//! - **`SimpleReactorTask`**: aggregates the reactions, rate constants, initial concentrations and
//!   simulation settings and drives the whole workflow
//! - **`IVPSolver`**: integration grid, unknowns, solution and its statistics
//!
//! ## Workflow
//!
//! 1. `check_task`: number of rate constants vs number of reactions (before any parsing),
//!    settings, finiteness of the rate constants
//! 2. `kinetic_processing`: parsing of equations, species registry, stoichiometric matrix
//! 3. initial concentrations are checked against the registry
//! 4. `create_IVP_equations`: mass-action right-hand side
//! 5. `solve`: Dormand-Prince integration (`ode_solvers`) over `t_range = [0, t_final]`,
//!    sampled at `n_points` points, followed by steady-state detection
//! 6. `plot`: one curve per substance, time axis clipped to the steady-state time
//!
//! Any failure aborts the workflow, there is no partial result.
//!
//! ## Mathematical Model
//!
//! dCi/dt = Σj νij·kj·∏l Cl^νlj, Ci(0) = C0i
//!
//! where νij is the net stoichiometric coefficient of substance i in reaction j and the product
//! runs over the reactants of reaction j.
use super::createIVP::MassActionRates;
use super::ode_solver::solve_ivp;
use super::reactor_IVP_utils::{ReactorError, SimulationConfig};
use super::steady_state::detect_steady_state;
use crate::Kinetics::User_reactions::KinData;
use crate::Utils::load_from_file::KineticTask;
use crate::Utils::plots::PlottersRenderer;

use log::info;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

/// Integration statistics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolverStats {
    pub n_accepted: usize,
    pub n_rejected: usize,
    /// number of right-hand side evaluations
    pub n_fev: usize,
}

/// Initial value problem wrapper
#[derive(Debug, Clone)]
pub struct IVPSolver {
    /// Independent variable name
    pub arg_name: String,
    /// Time range of the integration, (0, t_final) after `setup_IVP`
    pub t_range: (f64, f64),
    /// Names of unknown variables = substances in registry order
    pub unknowns: Vec<String>,
    /// Initial values aligned with `unknowns`
    pub y0: Option<DVector<f64>>,
    /// Solution matrix (time points × unknowns)
    pub solution: Option<DMatrix<f64>>,
    /// Output time grid
    pub t_mesh: Option<DVector<f64>>,
    pub stats: SolverStats,
    /// first output time after which no unknown changes by more than the tolerance per sample
    pub steady_state_time: Option<f64>,
}

impl Default for IVPSolver {
    fn default() -> Self {
        Self {
            arg_name: "t".to_string(),
            t_range: (0.0, super::reactor_IVP_utils::T_FINAL),
            unknowns: Vec::new(),
            y0: None,
            solution: None,
            t_mesh: None,
            stats: SolverStats::default(),
            steady_state_time: None,
        }
    }
}

impl IVPSolver {
    /// Solution matrix together with its time grid, or `MissingData` before `solve`
    pub fn solution_and_mesh(&self) -> Result<(&DVector<f64>, &DMatrix<f64>), ReactorError> {
        match (&self.t_mesh, &self.solution) {
            (Some(t), Some(y)) => Ok((t, y)),
            _ => Err(ReactorError::MissingData(
                "the task has not been solved yet".to_string(),
            )),
        }
    }

    /// Debug print solution summary
    pub fn debug_solution(&self) {
        if let Some(solution) = &self.solution {
            println!("\n=== SOLUTION DEBUG ===");
            println!(
                "Solution matrix shape: {} x {}",
                solution.nrows(),
                solution.ncols()
            );
            println!("Unknowns: {:?}", self.unknowns);
            let n = solution.nrows();
            for (i, var_name) in self.unknowns.iter().enumerate() {
                if i < solution.ncols() && n > 0 {
                    let col = solution.column(i);
                    println!(
                        "{}: [first: {:.6}, {:.6}, ... last: {:.6}, {:.6}]",
                        var_name,
                        col[0],
                        col[1.min(n - 1)],
                        col[n.saturating_sub(2)],
                        col[n - 1]
                    );
                }
            }
            println!("=== END DEBUG ===\n");
        }
    }
}

/// Main reactor modeling structure
#[derive(Debug, Clone)]
pub struct SimpleReactorTask {
    /// Optional problem identifier
    pub problem_name: Option<String>,
    /// Optional problem description
    pub problem_description: Option<String>,
    /// Kinetic data (reactions, substances, stoichiometry)
    pub kindata: KinData,
    /// Rate constant of each reaction, same order as the reactions
    pub rate_constants: Vec<f64>,
    /// Initial concentration of each substance
    pub initial_concentrations: HashMap<String, f64>,
    /// time horizon, output grid, tolerances, chart settings
    pub config: SimulationConfig,
    /// right-hand sides in readable form: (substance, expression)
    pub map_of_equations: Vec<(String, String)>,
    /// mass-action right-hand side ready for the integrator
    pub rates: Option<MassActionRates>,
    /// IVP solver instance
    pub solver: IVPSolver,
}

impl Default for SimpleReactorTask {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleReactorTask {
    /// Create new reactor task with default values
    pub fn new() -> Self {
        Self {
            problem_name: None,
            problem_description: None,
            kindata: KinData::new(),
            rate_constants: Vec::new(),
            initial_concentrations: HashMap::new(),
            config: SimulationConfig::default(),
            map_of_equations: Vec::new(),
            rates: None,
            solver: IVPSolver::default(),
        }
    }

    /// Task as read from a task document
    pub fn from_task(task: KineticTask) -> Self {
        let mut reactor = Self::new();
        reactor.problem_name = task.problem_name;
        reactor.set_reactions(task.reactions);
        reactor.rate_constants = task.rate_constants;
        reactor.initial_concentrations = task.initial_concentrations;
        reactor.config = task.settings;
        reactor
    }
    /////////////////////////////////SETTERS////////////////////////////////////////////////////////////////////////////////
    /// Set problem name for identification
    pub fn set_problem_name(&mut self, name: &str) {
        self.problem_name = Some(name.to_string());
    }

    /// Set problem description
    pub fn set_problem_description(&mut self, description: &str) {
        self.problem_description = Some(description.to_string());
    }

    /// Set reaction equations, e.g. "2A+B=C". Everything derived from previous equations is dropped
    pub fn set_reactions(&mut self, reactions: Vec<String>) {
        self.kindata.set_reactions_directly(reactions);
        self.map_of_equations.clear();
        self.rates = None;
        self.solver = IVPSolver::default();
    }

    /// Set rate constants, one per reaction
    pub fn set_rate_constants(&mut self, rate_constants: Vec<f64>) {
        self.rate_constants = rate_constants;
    }

    /// Set initial concentrations; substances that take no part in the reactions are ignored
    pub fn set_initial_concentrations(&mut self, initial_concentrations: HashMap<String, f64>) {
        self.initial_concentrations = initial_concentrations;
    }

    /// Set simulation settings
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), ReactorError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Set all task data at once
    pub fn set_parameters(
        &mut self,
        reactions: Vec<String>,
        rate_constants: Vec<f64>,
        initial_concentrations: HashMap<String, f64>,
    ) {
        self.set_reactions(reactions);
        self.rate_constants = rate_constants;
        self.initial_concentrations = initial_concentrations;
    }
    ///////////////////////////////////////////VALIDATION////////////////////////////////////////////////
    /// Validate reactor task configuration
    ///
    /// Checks:
    /// - number of rate constants matches number of reactions (no equation is parsed before this)
    /// - at least one reaction is given
    /// - settings are valid
    /// - rate constants are finite
    pub fn check_task(&self) -> Result<(), ReactorError> {
        let n_reactions = self.kindata.vec_of_equations.len();
        if self.rate_constants.len() != n_reactions {
            return Err(ReactorError::CardinalityMismatch {
                reactions: n_reactions,
                rate_constants: self.rate_constants.len(),
            });
        }
        if n_reactions == 0 {
            return Err(ReactorError::MissingData("no reactions given".to_string()));
        }
        self.config.validate()?;
        for (eq, k) in self.kindata.vec_of_equations.iter().zip(&self.rate_constants) {
            if !k.is_finite() {
                return Err(ReactorError::InvalidConfiguration(format!(
                    "rate constant of reaction {} must be finite, got {}",
                    eq, k
                )));
            }
        }
        Ok(())
    }

    /// Validate system before solving
    pub fn check_before_solution(&self) -> Result<(), ReactorError> {
        let n_substances = self.kindata.substances.len();
        let rates = self
            .rates
            .as_ref()
            .ok_or_else(|| ReactorError::MissingData("equations are not created".to_string()))?;
        if rates.n_reactions() != self.kindata.reactions.len() {
            return Err(ReactorError::InvalidConfiguration(format!(
                "rate law has {} reactions, kinetic data {}",
                rates.n_reactions(),
                self.kindata.reactions.len()
            )));
        }
        if self.solver.unknowns.len() != n_substances {
            return Err(ReactorError::InvalidConfiguration(format!(
                "unknowns length {} != number of substances {}",
                self.solver.unknowns.len(),
                n_substances
            )));
        }
        match &self.solver.y0 {
            Some(y0) if y0.len() == n_substances => Ok(()),
            _ => Err(ReactorError::MissingData(
                "initial values are not set".to_string(),
            )),
        }
    }
    ///////////////////////////////////////////KINETICS PREPROCESSING////////////////////////////////////////////////
    /// Parse equations, build the species registry and the stoichiometric matrix
    pub fn kinetic_processing(&mut self) -> Result<(), ReactorError> {
        self.kindata.analyze_reactions()?;
        Ok(())
    }

    /// Initial values aligned with the species registry
    pub fn set_initial_values(&mut self) -> Result<(), ReactorError> {
        let y0 = self.kindata.initial_vector(&self.initial_concentrations)?;
        self.solver.unknowns = self.kindata.substances.clone();
        self.solver.y0 = Some(y0);
        Ok(())
    }

    /// Complete IVP setup workflow
    ///
    /// 1. Task validation
    /// 2. Kinetic preprocessing
    /// 3. Initial values
    /// 4. Equation system assembly
    pub fn setup_IVP(&mut self) -> Result<(), ReactorError> {
        self.check_task()?;
        info!("task checked!");
        self.kinetic_processing()?;
        info!("kinetics processed!");
        self.set_initial_values()?;
        info!("initial values set!");
        self.create_IVP_equations()?;
        info!("IVP equations created");
        self.solver.t_range = (0.0, self.config.t_final);
        self.check_before_solution()?;
        info!("IVP setup completed!");
        Ok(())
    }
    ///////////////////////////////////////////SOLUTION////////////////////////////////////////////////
    /// Integrate the system over `solver.t_range` and detect the steady state
    pub fn solve(&mut self) -> Result<(), ReactorError> {
        self.check_before_solution()?;
        let rates = self
            .rates
            .clone()
            .ok_or_else(|| ReactorError::MissingData("equations are not created".to_string()))?;
        let y0 = self
            .solver
            .y0
            .clone()
            .ok_or_else(|| ReactorError::MissingData("initial values are not set".to_string()))?;
        let sol = solve_ivp(
            rates,
            y0,
            self.solver.t_range,
            self.config.n_points,
            &self.config.solver,
        )?;
        self.solver.stats = SolverStats {
            n_accepted: sol.n_accepted,
            n_rejected: sol.n_rejected,
            n_fev: sol.n_fev,
        };
        let t_steady = detect_steady_state(&sol.t, &sol.y, self.config.steady_state_tolerance)
            .ok_or_else(|| ReactorError::Integration("empty output grid".to_string()))?;
        info!("steady state reached at t = {}", t_steady);
        self.solver.steady_state_time = Some(t_steady);
        self.solver.t_mesh = Some(sol.t);
        self.solver.solution = Some(sol.y);
        Ok(())
    }

    /// setup, solve and plot with the default renderer
    pub fn solve_and_plot(&mut self) -> Result<(), ReactorError> {
        self.setup_IVP()?;
        self.solve()?;
        let renderer = PlottersRenderer::new(&self.config.output_path);
        self.plot_with(&renderer)
    }

    pub fn steady_state_time(&self) -> Option<f64> {
        self.solver.steady_state_time
    }
}

/// Simulate a network of elementary reactions with the given settings and return the solved task
pub fn simulate(
    reactions: &[&str],
    rate_constants: &[f64],
    initial_concentrations: &HashMap<String, f64>,
    config: SimulationConfig,
) -> Result<SimpleReactorTask, ReactorError> {
    let mut reactor = SimpleReactorTask::new();
    reactor.set_parameters(
        reactions.iter().map(|s| s.to_string()).collect(),
        rate_constants.to_vec(),
        initial_concentrations.clone(),
    );
    reactor.set_config(config)?;
    reactor.setup_IVP()?;
    reactor.solve()?;
    Ok(reactor)
}

/// Simulate a network of elementary reactions on `[0, 10]` and draw the concentrations up to the
/// steady-state time into the default chart file
/// # Examples
/// ```no_run
/// use KiReact::ReactorsIVP::SimpleReactorIVP::simulate_and_plot;
/// use std::collections::HashMap;
/// let c0 = HashMap::from([
///     ("A".to_string(), 1.0),
///     ("B".to_string(), 1.0),
///     ("C".to_string(), 0.0),
///     ("D".to_string(), 0.0),
/// ]);
/// simulate_and_plot(&["A+B=C", "B+C=D"], &[1.0, 1.5], &c0).unwrap();
/// ```
pub fn simulate_and_plot(
    reactions: &[&str],
    rate_constants: &[f64],
    initial_concentrations: &HashMap<String, f64>,
) -> Result<(), ReactorError> {
    let config = SimulationConfig::default();
    let renderer = PlottersRenderer::new(&config.output_path);
    let reactor = simulate(reactions, rate_constants, initial_concentrations, config)?;
    reactor.plot_with(&renderer)
}
