//! Get rules on the reference triangle.

use crate::quadrature::simplex_rule_definitions::TRIANGLE_RULE_DEFINITIONS;
use crate::quadrature::types::NumericalQuadratureDefinition;
use crate::types::{BemppError, BemppResult};

/// Return a triangle rule for a given number of points.
///
/// If the rule does not exist [BemppError::RuleNotFound] is returned.
pub fn simplex_rule(npoints: usize) -> BemppResult<NumericalQuadratureDefinition> {
    if let Some((order, points, weights)) = TRIANGLE_RULE_DEFINITIONS.get(&npoints) {
        Ok(NumericalQuadratureDefinition {
            dim: 2,
            order: *order,
            npoints,
            weights: weights.to_vec(),
            points: points.to_vec(),
        })
    } else {
        Err(BemppError::RuleNotFound { npoints })
    }
}

/// Return the numbers of points for which triangle rules are available, in increasing order.
pub fn available_rules() -> Vec<usize> {
    let mut rules = TRIANGLE_RULE_DEFINITIONS.keys().copied().collect::<Vec<_>>();
    rules.sort_unstable();
    rules
}
