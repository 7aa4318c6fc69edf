/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Kinetics::User_reactions::KinData;
    use crate::Kinetics::reaction_parser::{ParseError, Term};
    use crate::ReactorsIVP::reactor_IVP_utils::ReactorError;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn kindata(reactions: &[&str]) -> KinData {
        let mut kd = KinData::new();
        kd.set_reactions_directly(reactions.iter().map(|s| s.to_string()).collect());
        kd.analyze_reactions().unwrap();
        kd
    }

    #[test]
    fn test_registry_first_appearance_order() {
        let kd = kindata(&["D+B=C", "A+B=C+E", "2E=A"]);
        assert_eq!(kd.substances, vec!["D", "B", "C", "A", "E"]);
        assert_eq!(kd.index_of("D"), Some(0));
        assert_eq!(kd.index_of("E"), Some(4));
        assert_eq!(kd.index_of("X"), None);
    }

    #[test]
    fn test_registry_reactants_before_products() {
        let kd = kindata(&["Z=Y+X", "X+W=V"]);
        assert_eq!(kd.substances, vec!["Z", "Y", "X", "W", "V"]);
    }

    #[test]
    fn test_registry_strips_coefficients() {
        let kd = kindata(&["2A+B=C", "3C=2A"]);
        assert_eq!(kd.substances, vec!["A", "B", "C"]);
        assert_eq!(kd.reactions[1].reactants, vec![Term::new("C", 3)]);
    }

    #[test]
    fn test_stoichiometric_matrix() {
        let kd = kindata(&["2A+B=C", "C=2A+B", "A+B=A+2B"]);
        let expected = vec![
            vec![-2.0, -1.0, 1.0],
            vec![2.0, 1.0, -1.0],
            vec![0.0, 1.0, 0.0],
        ];
        assert_eq!(kd.stecheo_matrx, expected);
    }

    #[test]
    fn test_set_reactions_resets_state() {
        let mut kd = kindata(&["A=B"]);
        kd.set_reactions_directly(vec!["C=D".to_string()]);
        assert!(kd.substances.is_empty());
        kd.analyze_reactions().unwrap();
        assert_eq!(kd.substances, vec!["C", "D"]);
    }

    #[test]
    fn test_malformed_reaction_is_reported() {
        let mut kd = KinData::new();
        kd.set_reactions_directly(vec!["A+B=C".to_string(), "A+#=C".to_string()]);
        let err = kd.analyze_reactions().unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSpecies {
                reaction: "A+#=C".to_string(),
                term: "#".to_string()
            }
        );
    }

    #[test]
    fn test_missing_species_named_all_at_once() {
        let kd = kindata(&["A+B=C", "C+D=E"]);
        let c0 = HashMap::from([("A".to_string(), 1.0), ("C".to_string(), 0.0)]);
        match kd.check_initial_concentrations(&c0) {
            Err(ReactorError::MissingSpecies(missing)) => {
                assert_eq!(missing, vec!["B", "D", "E"]);
            }
            other => panic!("expected MissingSpecies, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_initial_concentrations_are_ignored() {
        let kd = kindata(&["B=A"]);
        let c0 = HashMap::from([
            ("A".to_string(), 0.5),
            ("B".to_string(), 2.0),
            ("Ar".to_string(), 7.0),
        ]);
        let y0 = kd.initial_vector(&c0).unwrap();
        assert_eq!(y0.len(), 2);
        assert_relative_eq!(y0[0], 2.0);
        assert_relative_eq!(y0[1], 0.5);
    }

    #[test]
    fn test_negative_initial_concentration_rejected() {
        let kd = kindata(&["A=B"]);
        let c0 = HashMap::from([("A".to_string(), -1.0), ("B".to_string(), 0.0)]);
        assert!(matches!(
            kd.initial_vector(&c0),
            Err(ReactorError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_pretty_print_does_not_panic_on_short_k() {
        let kd = kindata(&["A+B=C", "B+C=D"]);
        kd.pretty_print_kindata(Some(&[1.0]));
        kd.pretty_print_kindata(None);
    }
}
