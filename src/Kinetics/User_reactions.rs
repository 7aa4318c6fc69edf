use crate::Kinetics::reaction_parser::{ParseError, Reaction, parse_reactions};
use crate::ReactorsIVP::reactor_IVP_utils::ReactorError;
use log::info;
use nalgebra::DVector;
use prettytable::{Cell, Row, Table};
use std::collections::{BTreeSet, HashMap};
/// THE STRUCT KinData COLLECTS ALL THE INFORMATION ABOUT USER REACTIONS, WHICH IS NEEDED FOR FURTHER CALCULATIONS.
///
/// 1) vector of reaction equations in the compact notation ("2A+B=C")
/// 2) parsed reactions: ordered reactant and product terms with stoichiometric coefficients
/// 3) species registry: every species exactly once, in order of first appearance
///    (reactions in list order, reactants before products)
/// 4) table species name -> position in the concentration vector
/// 5) matrix of stoichiometric coefficients (reactions × species), products positive, reactants negative
///
/// # Examples
/// ```
/// use KiReact::Kinetics::User_reactions::KinData;
/// let mut kd = KinData::new();
/// kd.set_reactions_directly(vec!["A+B=C".to_string(), "B+C=D".to_string()]);
/// kd.analyze_reactions().unwrap();
/// assert_eq!(kd.substances, vec!["A", "B", "C", "D"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KinData {
    pub vec_of_equations: Vec<String>,   // vector of equations of reactions
    pub reactions: Vec<Reaction>,        // parsed equations
    pub substances: Vec<String>,         // vector of substance names (species registry)
    pub substance_index: HashMap<String, usize>, // substance name -> position in the registry
    pub stecheo_matrx: Vec<Vec<f64>>,    // matrix of stoichiometric coefficients
}

impl KinData {
    pub fn new() -> Self {
        Self::default()
    }
    /////////////////////////////////SETTING REACTIONS///////////////////////////////////////////
    /// set reactions directly
    pub fn set_reactions_directly(&mut self, reactions: Vec<String>) {
        self.vec_of_equations = reactions;
        self.reactions.clear();
        self.substances.clear();
        self.substance_index.clear();
        self.stecheo_matrx.clear();
    }
    /// parses the equations, builds the species registry and the stoichiometric matrix
    pub fn analyze_reactions(&mut self) -> Result<(), ParseError> {
        self.reactions = parse_reactions(&self.vec_of_equations)?;
        info!("{} reactions parsed", self.reactions.len());
        self.search_substances();
        self.create_stecheo_matrx();
        Ok(())
    }
    /// append-if-absent pass over all terms: the registry never depends on hash order
    pub fn search_substances(&mut self) {
        let mut substances: Vec<String> = Vec::new();
        let mut substance_index: HashMap<String, usize> = HashMap::new();
        for reaction in &self.reactions {
            for species in reaction.species() {
                if !substance_index.contains_key(species) {
                    substance_index.insert(species.to_string(), substances.len());
                    substances.push(species.to_string());
                }
            }
        }
        info!("substances found: {:?}", substances);
        self.substances = substances;
        self.substance_index = substance_index;
    }

    fn create_stecheo_matrx(&mut self) {
        let n = self.substances.len();
        let mut matrix = Vec::with_capacity(self.reactions.len());
        for reaction in &self.reactions {
            let mut row = vec![0.0; n];
            for term in &reaction.reactants {
                row[self.substance_index[&term.species]] -= term.coefficient as f64;
            }
            for term in &reaction.products {
                row[self.substance_index[&term.species]] += term.coefficient as f64;
            }
            matrix.push(row);
        }
        self.stecheo_matrx = matrix;
    }
    /// position of the substance in the concentration vector
    pub fn index_of(&self, substance: &str) -> Option<usize> {
        self.substance_index.get(substance).copied()
    }
    ///////////////////////////////VALIDATION/////////////////////////////////////////////////////
    /// every substance of the registry must have an initial concentration,
    /// the error names all the absent ones at once
    pub fn check_initial_concentrations(
        &self,
        initial_concentrations: &HashMap<String, f64>,
    ) -> Result<(), ReactorError> {
        let missing: BTreeSet<&String> = self
            .substances
            .iter()
            .filter(|s| !initial_concentrations.contains_key(*s))
            .collect();
        if !missing.is_empty() {
            return Err(ReactorError::MissingSpecies(
                missing.into_iter().cloned().collect(),
            ));
        }
        for substance in &self.substances {
            let c = initial_concentrations[substance];
            if !c.is_finite() || c < 0.0 {
                return Err(ReactorError::InvalidConfiguration(format!(
                    "initial concentration of {} must be finite and non-negative, got {}",
                    substance, c
                )));
            }
        }
        Ok(())
    }
    /// initial concentrations aligned with the species registry
    pub fn initial_vector(
        &self,
        initial_concentrations: &HashMap<String, f64>,
    ) -> Result<DVector<f64>, ReactorError> {
        self.check_initial_concentrations(initial_concentrations)?;
        Ok(DVector::from_iterator(
            self.substances.len(),
            self.substances
                .iter()
                .map(|s| initial_concentrations[s]),
        ))
    }
    ///////////////////////////INPUT/OUTPUT/////////////////////////////////////////////////////////
    /// table of reactions, their order and (if given) rate constants
    pub fn pretty_print_kindata(&self, rate_constants: Option<&[f64]>) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("#"),
            Cell::new("equation"),
            Cell::new("order"),
            Cell::new("k"),
        ]));
        for (i, reaction) in self.reactions.iter().enumerate() {
            let k = rate_constants
                .and_then(|ks| ks.get(i))
                .map(|k| format!("{}", k))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(Row::new(vec![
                Cell::new(&i.to_string()),
                Cell::new(&reaction.to_string()),
                Cell::new(&reaction.order().to_string()),
                Cell::new(&k),
            ]));
        }
        table.printstd();
        println!("substances: {:?}", self.substances);
    }
}
