//! Type definitions.

use crate::types::{BemppError, BemppResult, RealScalar};

/// Definition of a numerical quadrature rule.
pub struct NumericalQuadratureDefinition {
    /// The dimension d of a single point.
    pub dim: usize,

    /// The order of the quadrature rule.
    pub order: usize,

    /// The number of points of the quadrature rule.
    pub npoints: usize,

    /// The weights of the quadrature rule.
    pub weights: Vec<f64>,
    /// The point coordinates of the quadrature rule.
    ///
    /// A single point has the coordinates p_1, p_2, ..., p_d,
    /// with d being the dimension of the point.
    /// The vector points stores all points in consecutive order.
    pub points: Vec<f64>,
}

/// A validated quadrature rule on the reference triangle, cast to the working precision.
///
/// The rule is read-only once created and shared by all evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureRule<T: RealScalar> {
    points: Vec<[T; 2]>,
    weights: Vec<T>,
}

impl<T: RealScalar> QuadratureRule<T> {
    /// Create a rule from points `[s_0, t_0, s_1, t_1, ...]` and weights.
    pub fn new(points: &[T], weights: &[T]) -> BemppResult<Self> {
        if weights.is_empty() {
            return Err(BemppError::EmptyQuadratureRule);
        }
        if points.len() != 2 * weights.len() {
            return Err(BemppError::DimensionMismatch {
                what: "quadrature points",
                expected: 2 * weights.len(),
                actual: points.len(),
            });
        }
        if points.iter().chain(weights.iter()).any(|v| !v.is_finite()) {
            return Err(BemppError::InvalidQuadratureRule(
                "points and weights must be finite".to_string(),
            ));
        }
        Ok(Self {
            points: points.chunks_exact(2).map(|p| [p[0], p[1]]).collect(),
            weights: weights.to_vec(),
        })
    }

    /// Cast a rule definition to the working precision.
    pub fn from_definition(definition: &NumericalQuadratureDefinition) -> BemppResult<Self> {
        if definition.dim != 2 {
            return Err(BemppError::InvalidQuadratureRule(format!(
                "expected a rule on a 2D reference cell, got dimension {}",
                definition.dim
            )));
        }
        let points = definition
            .points
            .iter()
            .map(|p| T::from_f64(*p))
            .collect::<Vec<_>>();
        let weights = definition
            .weights
            .iter()
            .map(|w| T::from_f64(*w))
            .collect::<Vec<_>>();
        Self::new(&points, &weights)
    }

    /// The built-in triangle rule with `npoints` points.
    pub fn triangle(npoints: usize) -> BemppResult<Self> {
        Self::from_definition(&super::simplex_rule(npoints)?)
    }

    /// Number of points
    pub fn npoints(&self) -> usize {
        self.weights.len()
    }

    /// The points
    pub fn points(&self) -> &[[T; 2]] {
        &self.points
    }

    /// The weights
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Iterate over `(point, weight)` pairs in rule order.
    pub fn iter(&self) -> impl Iterator<Item = ([T; 2], T)> + '_ {
        self.points.iter().copied().zip(self.weights.iter().copied())
    }

    /// The same points and weights visited in a different order.
    ///
    /// `order[i]` is the index of the node that becomes node `i`.
    pub fn permuted(&self, order: &[usize]) -> BemppResult<Self> {
        let mut seen = vec![false; self.npoints()];
        if order.len() != self.npoints() {
            return Err(BemppError::DimensionMismatch {
                what: "quadrature permutation",
                expected: self.npoints(),
                actual: order.len(),
            });
        }
        for i in order {
            if *i >= self.npoints() || seen[*i] {
                return Err(BemppError::InvalidQuadratureRule(format!(
                    "{order:?} is not a permutation"
                )));
            }
            seen[*i] = true;
        }
        Ok(Self {
            points: order.iter().map(|i| self.points[*i]).collect(),
            weights: order.iter().map(|i| self.weights[*i]).collect(),
        })
    }
}
