use crate::ReactorsIVP::reactor_IVP_utils::ReactorError;
use log::info;
use std::collections::HashMap;

/// reference network: two consecutive bimolecular steps
pub fn reference_task() -> (Vec<&'static str>, Vec<f64>, HashMap<String, f64>) {
    let reactions = vec!["A+B=C", "B+C=D"];
    let rate_constants = vec![1.0, 1.5];
    let initial_concentrations = HashMap::from([
        ("A".to_string(), 1.0),
        ("B".to_string(), 1.0),
        ("C".to_string(), 0.0),
        ("D".to_string(), 0.0),
    ]);
    (reactions, rate_constants, initial_concentrations)
}

pub fn kin_examples(kintask: usize) -> Result<(), ReactorError> {
    match kintask {
        0 => {
            // REACTION PARSING AND STOICHIOMETRY
            use crate::Kinetics::User_reactions::KinData;
            let mut kd = KinData::new();
            let reactions: Vec<String> = vec!["2A + B = C", "C=2*A+B", "A+B=2B"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            kd.set_reactions_directly(reactions);
            kd.analyze_reactions()?;
            println!("substances: {:?}", kd.substances);
            println!("stecheo_matrx {:?}", kd.stecheo_matrx);
            for reaction in &kd.reactions {
                println!("{}  (order {})", reaction, reaction.order());
            }
            kd.pretty_print_kindata(Some(&[1.0, 0.1, 2.0]));
        }
        1 => {
            // RATE LAW: derivative at t = 0
            use crate::Kinetics::User_reactions::KinData;
            use crate::ReactorsIVP::createIVP::MassActionRates;
            let mut kd = KinData::new();
            kd.set_reactions_directly(vec!["A+B=C".to_string()]);
            kd.analyze_reactions()?;
            let c0 = HashMap::from([
                ("A".to_string(), 1.0),
                ("B".to_string(), 1.0),
                ("C".to_string(), 0.0),
            ]);
            let y0 = kd.initial_vector(&c0)?;
            let rates = MassActionRates::new(&kd, &[2.0])?;
            let dydt = rates.derivative(0.0, &y0);
            for (substance, d) in kd.substances.iter().zip(dydt.iter()) {
                println!("d{}/dt = {}", substance, d);
            }
        }
        2 => {
            // ONE-CALL SIMULATION: the chart goes to concentrations.svg
            use crate::ReactorsIVP::SimpleReactorIVP::simulate_and_plot;
            let (reactions, rate_constants, initial_concentrations) = reference_task();
            simulate_and_plot(&reactions, &rate_constants, &initial_concentrations)?;
        }
        3 => {
            // STEP BY STEP WORKFLOW
            use crate::ReactorsIVP::SimpleReactorIVP::SimpleReactorTask;
            let (reactions, rate_constants, initial_concentrations) = reference_task();
            let mut reactor = SimpleReactorTask::new();
            reactor.set_problem_name("A+B=C, B+C=D");
            reactor.set_parameters(
                reactions.iter().map(|s| s.to_string()).collect(),
                rate_constants,
                initial_concentrations,
            );
            reactor.setup_IVP()?;
            reactor.pretty_print_task();
            reactor.pretty_print_equations();
            reactor.solve()?;
            reactor.pretty_print_result();
            let a_units = HashMap::from([
                ("A".to_string(), 1.0),
                ("C".to_string(), 1.0),
                ("D".to_string(), 1.0),
            ]);
            info!(
                "mass balance error of A units: {:.3e}",
                reactor.conservation_error(&a_units)?
            );
            reactor.save_result("concentrations.csv")?;
            reactor.plot()?;
        }
        _ => {
            return Err(ReactorError::InvalidConfiguration(format!(
                "no kinetics example with number {}",
                kintask
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_examples() {
        kin_examples(0).unwrap();
        kin_examples(1).unwrap();
        assert!(kin_examples(42).is_err());
    }

    #[test]
    fn test_reference_task_is_consistent() {
        let (reactions, rate_constants, c0) = reference_task();
        assert_eq!(reactions.len(), rate_constants.len());
        assert_eq!(c0.len(), 4);
    }
}
