//! Numerical quadrature on the reference triangle

pub mod simplex_rule_definitions;
pub mod simplex_rules;
pub mod types;

pub use simplex_rules::{available_rules, simplex_rule};
pub use types::{NumericalQuadratureDefinition, QuadratureRule};
