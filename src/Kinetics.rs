/// eng
/// The module takes as input a reaction equation in the compact notation
/// `term(+term)*=term(+term)*`, where a term is an optional integer coefficient followed by the
/// species name (e.g. "2A+B=C"), and produces the parsed reaction: ordered reactant and product
/// terms with their stoichiometric coefficients. Malformed input is reported as a typed error,
/// naming the offending term.
///  # Examples
/// ```
/// use KiReact::Kinetics::reaction_parser::parse_reaction;
/// let reaction = parse_reaction("2A+B=C").unwrap();
/// assert_eq!(reaction.order(), 3);
/// ```
pub mod reaction_parser;
/// processing of user-chosen reactions.
/// KinData parses the vector of equations, collects the ordered registry of substances
/// (order of first appearance), the table substance -> index and the matrix of stoichiometric coefficients,
/// and checks that initial concentrations are given for every substance.
#[allow(non_snake_case)]
pub mod User_reactions;
#[allow(non_snake_case)]
mod User_reactions_tests;
