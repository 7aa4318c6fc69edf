//! # IVP Equation Creation Module
//!
//! Builds the right-hand side of the kinetic ODE system from the parsed reactions and the
//! rate constants, using the law of mass action for elementary reactions.
//!
//! ## Mathematical Model
//!
//! For reaction `j` with rate constant `kⱼ`:
//! - **Rate**: `Rⱼ = kⱼ·∏ᵢ Cᵢ^νᵢⱼ` over the reactants of `j`, the exponent is the stoichiometric
//!   coefficient (elementary reaction assumption)
//! - **Reactant i**: `dCᵢ/dt -= νᵢⱼ·Rⱼ`
//! - **Product i**: `dCᵢ/dt += νᵢⱼ·Rⱼ`
//!
//! A substance that is both reactant and product of one reaction receives both contributions.
//! Time does not enter the rates but the signature keeps it for the integrator.
//! Concentrations are used as they are: nothing is clamped, so a too aggressive step may
//! produce slightly negative values.
//!
//! ## Implementation
//!
//! Species names are resolved into registry positions once, when [`MassActionRates`] is
//! built. The evaluation itself is index arithmetic only, without lookups or allocations.
//! [`MassActionRates`] implements `ode_solvers::System`, so it goes to the integrator as is.
use super::SimpleReactorIVP::SimpleReactorTask;
use super::ode_solver::State;
use super::reactor_IVP_utils::ReactorError;
use crate::Kinetics::User_reactions::KinData;
use crate::Kinetics::reaction_parser::Term;
use log::info;
use nalgebra::DVector;
use ode_solvers::System;

/// one reaction with species names resolved into positions of the concentration vector
#[derive(Debug, Clone, PartialEq)]
struct IndexedReaction {
    k: f64,
    /// (species index, stoichiometric coefficient)
    reactants: Vec<(usize, i32)>,
    products: Vec<(usize, i32)>,
}

/// Mass-action right-hand side `f(t, C) -> dC/dt` of a network of elementary reactions
#[derive(Debug, Clone, PartialEq)]
pub struct MassActionRates {
    n_species: usize,
    reactions: Vec<IndexedReaction>,
}

impl MassActionRates {
    /// Resolve the reactions of `kindata` against its species registry.
    ///
    /// `kindata` must be analyzed (`KinData::analyze_reactions`) and `rate_constants` must be
    /// positionally aligned with its reactions.
    pub fn new(kindata: &KinData, rate_constants: &[f64]) -> Result<Self, ReactorError> {
        if rate_constants.len() != kindata.reactions.len() {
            return Err(ReactorError::CardinalityMismatch {
                reactions: kindata.reactions.len(),
                rate_constants: rate_constants.len(),
            });
        }
        let resolve = |terms: &[Term]| -> Result<Vec<(usize, i32)>, ReactorError> {
            terms
                .iter()
                .map(|term| {
                    let idx = kindata.index_of(&term.species).ok_or_else(|| {
                        ReactorError::MissingData(format!(
                            "substance {} is not in the registry",
                            term.species
                        ))
                    })?;
                    // the coefficient is also the exponent of the rate law
                    let nu = i32::try_from(term.coefficient).map_err(|_| {
                        ReactorError::InvalidConfiguration(format!(
                            "stoichiometric coefficient {} of {} is too large",
                            term.coefficient, term.species
                        ))
                    })?;
                    Ok((idx, nu))
                })
                .collect()
        };
        let mut reactions = Vec::with_capacity(rate_constants.len());
        for (reaction, &k) in kindata.reactions.iter().zip(rate_constants) {
            if !k.is_finite() {
                return Err(ReactorError::InvalidConfiguration(format!(
                    "rate constant of reaction {} must be finite, got {}",
                    reaction.equation, k
                )));
            }
            reactions.push(IndexedReaction {
                k,
                reactants: resolve(&reaction.reactants)?,
                products: resolve(&reaction.products)?,
            });
        }
        Ok(Self {
            n_species: kindata.substances.len(),
            reactions,
        })
    }

    pub fn n_reactions(&self) -> usize {
        self.reactions.len()
    }

    pub fn n_species(&self) -> usize {
        self.n_species
    }

    /// rate of every reaction at concentrations `y`
    pub fn reaction_rates(&self, y: &[f64], rates: &mut [f64]) {
        for (rate, reaction) in rates.iter_mut().zip(&self.reactions) {
            *rate = reaction
                .reactants
                .iter()
                .fold(reaction.k, |acc, &(i, nu)| acc * y[i].powi(nu));
        }
    }

    /// owned version of `rhs` for one-off evaluations
    pub fn derivative(&self, t: f64, y: &DVector<f64>) -> DVector<f64> {
        let mut dydt = DVector::zeros(self.n_species);
        self.rhs(t, y.as_slice(), dydt.as_mut_slice());
        dydt
    }

    /// `dC/dt` at concentrations `y` written into `dydt`; both slices have `n_species` entries
    pub fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt.fill(0.0);
        for reaction in &self.reactions {
            let rate = reaction
                .reactants
                .iter()
                .fold(reaction.k, |acc, &(i, nu)| acc * y[i].powi(nu));
            for &(i, nu) in &reaction.reactants {
                dydt[i] -= rate * nu as f64;
            }
            for &(i, nu) in &reaction.products {
                dydt[i] += rate * nu as f64;
            }
        }
    }
}

impl System<f64, State> for MassActionRates {
    fn system(&self, t: f64, y: &State, dy: &mut State) {
        self.rhs(t, y.as_slice(), dy.as_mut_slice());
    }
}

impl SimpleReactorTask {
    /////////////////////////CREATING EQUATIONS///////////////////////////////////
    /// Create the right-hand side of the kinetic ODE system
    ///
    /// Requires parsed reactions (see `kinetic_processing`); validates the number of rate
    /// constants against the number of reactions and stores the result in `self.rates`.
    pub fn create_IVP_equations(&mut self) -> Result<(), ReactorError> {
        let rates = MassActionRates::new(&self.kindata, &self.rate_constants)?;
        info!(
            "mass-action system: {} reactions, {} substances",
            rates.n_reactions(),
            rates.n_species()
        );
        self.map_of_equations = self.equations_as_strings();
        self.rates = Some(rates);
        Ok(())
    }

    /// human-readable right-hand sides: substance -> "dA/dt = -k0*A*B + ..."
    pub fn equations_as_strings(&self) -> Vec<(String, String)> {
        let substances = &self.kindata.substances;
        let mut rhs: Vec<Vec<String>> = vec![Vec::new(); substances.len()];
        for (j, reaction) in self.kindata.reactions.iter().enumerate() {
            let rate = std::iter::once(format!("k{}", j))
                .chain(reaction.reactants.iter().map(|term| {
                    if term.coefficient == 1 {
                        term.species.clone()
                    } else {
                        format!("{}^{}", term.species, term.coefficient)
                    }
                }))
                .collect::<Vec<_>>()
                .join("*");
            let mut push = |term: &Term, sign: &str| {
                if let Some(i) = self.kindata.index_of(&term.species) {
                    let coeff = if term.coefficient == 1 {
                        String::new()
                    } else {
                        format!("{}*", term.coefficient)
                    };
                    rhs[i].push(format!("{} {}{}", sign, coeff, rate));
                }
            };
            for term in &reaction.reactants {
                push(term, "-");
            }
            for term in &reaction.products {
                push(term, "+");
            }
        }
        substances
            .iter()
            .zip(rhs)
            .map(|(s, terms)| {
                let eq = if terms.is_empty() {
                    "0".to_string()
                } else {
                    terms.join(" ").trim_start_matches("+ ").to_string()
                };
                (s.clone(), eq)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn rates_for(reactions: &[&str], ks: &[f64]) -> (KinData, MassActionRates) {
        let mut kd = KinData::new();
        kd.set_reactions_directly(reactions.iter().map(|s| s.to_string()).collect());
        kd.analyze_reactions().unwrap();
        let rates = MassActionRates::new(&kd, ks).unwrap();
        (kd, rates)
    }

    #[test]
    fn test_bimolecular_derivative() {
        let (kd, rates) = rates_for(&["A+B=C"], &[2.0]);
        let c0 = HashMap::from([
            ("A".to_string(), 1.0),
            ("B".to_string(), 1.0),
            ("C".to_string(), 0.0),
        ]);
        let y0 = kd.initial_vector(&c0).unwrap();
        let dy = rates.derivative(0.0, &y0);
        assert_relative_eq!(dy[0], -2.0);
        assert_relative_eq!(dy[1], -2.0);
        assert_relative_eq!(dy[2], 2.0);
    }

    #[test]
    fn test_coefficients_are_orders_and_multipliers() {
        // rate = 0.5 * A^2 * B = 0.5 * 9 * 2 = 9
        let (_, rates) = rates_for(&["2A+B=3C"], &[0.5]);
        let y = DVector::from_vec(vec![3.0, 2.0, 1.0]);
        let dy = rates.derivative(0.0, &y);
        assert_relative_eq!(dy[0], -18.0);
        assert_relative_eq!(dy[1], -9.0);
        assert_relative_eq!(dy[2], 27.0);
    }

    #[test]
    fn test_species_on_both_sides_gets_net_effect() {
        // autocatalysis A + B = 2B: rate = k*A*B, dB = -rate + 2*rate
        let (_, rates) = rates_for(&["A+B=2B"], &[1.5]);
        let y = DVector::from_vec(vec![2.0, 4.0]);
        let dy = rates.derivative(0.0, &y);
        assert_relative_eq!(dy[0], -12.0);
        assert_relative_eq!(dy[1], 12.0);
    }

    #[test]
    fn test_time_is_ignored_and_calls_are_repeatable() {
        let (_, rates) = rates_for(&["A+B=C", "B+C=D"], &[1.0, 1.5]);
        let y = DVector::from_vec(vec![0.3, 0.7, 0.2, 0.1]);
        let d0 = rates.derivative(0.0, &y);
        let d1 = rates.derivative(123.0, &y);
        let d2 = rates.derivative(0.0, &y);
        assert_eq!(d0, d1);
        assert_eq!(d0, d2);
    }

    #[test]
    fn test_negative_concentrations_are_not_clamped() {
        let (_, rates) = rates_for(&["A=B"], &[1.0]);
        let y = DVector::from_vec(vec![-0.1, 0.0]);
        let dy = rates.derivative(0.0, &y);
        assert_relative_eq!(dy[0], 0.1);
        assert_relative_eq!(dy[1], -0.1);
    }

    #[test]
    fn test_reaction_rates() {
        let (_, rates) = rates_for(&["A+B=C", "2C=D"], &[2.0, 3.0]);
        let y = [1.0, 0.5, 2.0, 0.0];
        let mut r = [0.0; 2];
        rates.reaction_rates(&y, &mut r);
        assert_relative_eq!(r[0], 1.0);
        assert_relative_eq!(r[1], 12.0);
    }

    #[test]
    fn test_plugs_into_the_integrator() {
        let (_, rates) = rates_for(&["A+B=C"], &[2.0]);
        let y = State::from_vec(vec![1.0, 1.0, 0.0]);
        let mut dy = State::zeros(3);
        rates.system(0.0, &y, &mut dy);
        assert_eq!(dy, rates.derivative(0.0, &y));
    }

    #[test]
    fn test_coefficient_beyond_exponent_range_rejected() {
        let mut kd = KinData::new();
        kd.set_reactions_directly(vec!["A=B".to_string()]);
        kd.analyze_reactions().unwrap();
        kd.reactions[0].reactants[0] = Term::new("A", i32::MAX as u32 + 1);
        assert!(matches!(
            MassActionRates::new(&kd, &[1.0]),
            Err(ReactorError::InvalidConfiguration(_))
        ));
        kd.reactions[0].reactants[0] = Term::new("A", 3);
        let rates = MassActionRates::new(&kd, &[1.0]).unwrap();
        let dy = rates.derivative(0.0, &DVector::from_vec(vec![0.5, 0.0]));
        assert_relative_eq!(dy[0], -3.0 * 0.125);
    }

    #[test]
    fn test_cardinality_mismatch() {
        let mut kd = KinData::new();
        kd.set_reactions_directly(vec!["A=B".to_string(), "B=C".to_string()]);
        kd.analyze_reactions().unwrap();
        assert!(matches!(
            MassActionRates::new(&kd, &[1.0]),
            Err(ReactorError::CardinalityMismatch {
                reactions: 2,
                rate_constants: 1
            })
        ));
        assert!(matches!(
            MassActionRates::new(&kd, &[1.0, f64::NAN]),
            Err(ReactorError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_equations_as_strings() {
        let mut task = SimpleReactorTask::new();
        task.set_reactions(vec!["2A+B=C".to_string(), "C=A".to_string()]);
        task.kinetic_processing().unwrap();
        let eqs = task.equations_as_strings();
        assert_eq!(eqs[0], ("A".to_string(), "- 2*k0*A^2*B + k1*C".to_string()));
        assert_eq!(eqs[1], ("B".to_string(), "- k0*A^2*B".to_string()));
        assert_eq!(eqs[2], ("C".to_string(), "k0*A^2*B - k1*C".to_string()));
    }
}
