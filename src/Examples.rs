/// worked examples of the kinetic toolkit: parsing, rate law, simulation and charts
pub mod kinetics_examples;
