//! # Reactor Initial Value Problem (IVP) Module
//!
//! Kinetics of a closed isothermal reactor of ideal mixing with a network of elementary
//! reactions.
//!
//! ## Mathematical Model
//!
//! ### Nomenclature
//!
//! | Symbol | Description |
//! |--------|-------------|
//! | `Cᵢ` | concentration of substance i |
//! | `kⱼ` | rate constant of reaction j |
//! | `νᵢⱼ` | stoichiometric coefficient of substance i in reaction j |
//! | `T` | time horizon (default 10) |
//!
//! ### Model Assumptions
//!
//! - Every reaction is elementary: the order with respect to a reactant equals its
//!   stoichiometric coefficient (law of mass action)
//! - Rate constants do not depend on time
//! - The reactor is closed: no inflow or outflow of substances
//!
//! ### Governing Equations
//!
//! ```text
//! wⱼ = kⱼ·∏ Cₗ^νₗⱼ          (product over the reactants of reaction j)
//! dCᵢ/dt = Σⱼ (νᵢⱼ(products) − νᵢⱼ(reactants))·wⱼ
//! Cᵢ(0) = C0ᵢ,  t ∈ [0, T]
//! ```
//!
//! ## Numerical Solution
//!
//! The system is integrated with the explicit Dormand–Prince 5(4) method of `ode_solvers`
//! (adaptive step) and sampled on an evenly spaced grid of `n_points` points (default 1000). The steady-state
//! time is the first grid point where every concentration changed by less than the tolerance
//! (default `1e-4`) since the previous one; it limits the time axis of the chart.
//!
//! ## Usage
//!
//! ```no_run
//! use KiReact::ReactorsIVP::SimpleReactorIVP::SimpleReactorTask;
//! use std::collections::HashMap;
//! let mut reactor = SimpleReactorTask::new();
//! reactor.set_parameters(
//!     vec!["A+B=C".to_string(), "B+C=D".to_string()],
//!     vec![1.0, 1.5],
//!     HashMap::from([
//!         ("A".to_string(), 1.0),
//!         ("B".to_string(), 1.0),
//!         ("C".to_string(), 0.0),
//!         ("D".to_string(), 0.0),
//!     ]),
//! );
//! reactor.setup_IVP().unwrap();
//! reactor.solve().unwrap();
//! reactor.pretty_print_result();
//! reactor.plot().unwrap();
//! ```

pub mod SimpleReactorIVP;
pub mod SimpleReactorIVP2;
pub mod SimpleReactorIVP3;
pub mod createIVP;
pub mod ode_solver;
pub mod reactor_IVP_utils;
pub mod steady_state;
