//! # Reaction Notation Parser
//!
//! Turns a compact reaction string such as `"2A+B=C"` into a [`Reaction`]:
//! an ordered list of reactant [`Term`]s and an ordered list of product [`Term`]s.
//!
//! ## Grammar
//!
//! ```text
//! reaction := side "=" side
//! side     := term ("+" term)*
//! term     := digits? "*"? identifier
//! ```
//! `digits` default to 1 when absent and must fit into `1..=i32::MAX`, since the coefficient is
//! also the exponent of the rate law. `identifier` is one or more word characters (Unicode
//! letters and digits or `_`). Whitespace around terms is ignored, so `"A + B = C"` is the same
//! reaction as `"A+B=C"`.
//!
//! The parser is a hand-written tokenizer: every failure is reported as a [`ParseError`]
//! naming the reaction and the offending term.
//!
//! # Examples
//! ```
//! use KiReact::Kinetics::reaction_parser::{parse_reaction, Term};
//! let reaction = parse_reaction("2A+B=C").unwrap();
//! assert_eq!(reaction.reactants, vec![Term::new("A", 2), Term::new("B", 1)]);
//! assert_eq!(reaction.products, vec![Term::new("C", 1)]);
//! ```
use std::fmt;
use thiserror::Error;

/// errors of the reaction notation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("reaction '{0}' has no '=' separator")]
    MissingSeparator(String),
    #[error("reaction '{0}' has more than one '=' separator")]
    MultipleSeparators(String),
    #[error("reaction '{reaction}' contains an empty term")]
    EmptyTerm { reaction: String },
    #[error("invalid stoichiometric coefficient in term '{term}' of reaction '{reaction}'")]
    InvalidCoefficient { reaction: String, term: String },
    #[error("malformed species in term '{term}' of reaction '{reaction}'")]
    InvalidSpecies { reaction: String, term: String },
}

/// one participant of a reaction: species name and its stoichiometric coefficient
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub species: String,
    pub coefficient: u32,
}

impl Term {
    pub fn new(species: &str, coefficient: u32) -> Self {
        Self {
            species: species.to_string(),
            coefficient,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient == 1 {
            write!(f, "{}", self.species)
        } else {
            write!(f, "{}{}", self.coefficient, self.species)
        }
    }
}

/// Elementary reaction parsed from the notation. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    /// equation exactly as it was given
    pub equation: String,
    pub reactants: Vec<Term>,
    pub products: Vec<Term>,
}

impl Reaction {
    /// species names in order of appearance: reactants first, then products
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .map(|term| term.species.as_str())
    }
    /// overall reaction order, which for an elementary reaction is the sum of reactant coefficients
    pub fn order(&self) -> u32 {
        self.reactants.iter().map(|term| term.coefficient).sum()
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |terms: &[Term]| {
            terms
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" + ")
        };
        write!(f, "{} => {}", side(&self.reactants[..]), side(&self.products[..]))
    }
}

/// is the character allowed inside a species identifier
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse one term: optional leading digits, optional '*', then an identifier.
pub fn parse_term(term: &str, reaction: &str) -> Result<Term, ParseError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(ParseError::EmptyTerm {
            reaction: reaction.to_string(),
        });
    }
    let digits_end = term
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(term.len());
    let (digits, rest) = term.split_at(digits_end);

    let coefficient = if digits.is_empty() {
        1
    } else {
        match digits.parse::<i32>() {
            Ok(c) if c > 0 => c.unsigned_abs(),
            _ => {
                return Err(ParseError::InvalidCoefficient {
                    reaction: reaction.to_string(),
                    term: term.to_string(),
                });
            }
        }
    };
    // "2*A" is the same as "2A"
    let species = if !digits.is_empty() {
        let rest = rest.trim_start();
        rest.strip_prefix('*').unwrap_or(rest).trim_start()
    } else {
        rest
    };

    if species.is_empty() || !species.chars().all(is_word_char) {
        return Err(ParseError::InvalidSpecies {
            reaction: reaction.to_string(),
            term: term.to_string(),
        });
    }
    Ok(Term {
        species: species.to_string(),
        coefficient,
    })
}

/// parse one side of the equation ("A+2B")
fn parse_side(side: &str, reaction: &str) -> Result<Vec<Term>, ParseError> {
    side.split('+')
        .map(|term| parse_term(term, reaction))
        .collect()
}

/// Parse a reaction string of the form `term(+term)*=term(+term)*`.
pub fn parse_reaction(equation: &str) -> Result<Reaction, ParseError> {
    let mut sides = equation.split('=');
    let (reactants, products) = match (sides.next(), sides.next(), sides.next()) {
        (Some(left), Some(right), None) => (left, right),
        (Some(_), None, _) => return Err(ParseError::MissingSeparator(equation.to_string())),
        _ => return Err(ParseError::MultipleSeparators(equation.to_string())),
    };
    Ok(Reaction {
        equation: equation.to_string(),
        reactants: parse_side(reactants, equation)?,
        products: parse_side(products, equation)?,
    })
}

/// parse a vector of reactions, stops at the first malformed one
pub fn parse_reactions(equations: &[String]) -> Result<Vec<Reaction>, ParseError> {
    equations.iter().map(|eq| parse_reaction(eq)).collect()
}
