//! Options for potential evaluation

use crate::lanes::VectorWidth;
use crate::types::{BemppError, BemppResult};

/// Options for a batched potential evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOptions {
    /// Number of elements processed together in one batch
    vector_width: VectorWidth,
    /// Number of batches cooperating in one reduction unit
    batches_per_unit: usize,
    /// Number of points of the triangle rule used by the operator layer
    quadrature_npoints: usize,
    /// Elements with an area below this fraction of the largest area trigger a warning
    small_element_tolerance: f64,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            vector_width: VectorWidth::W4,
            batches_per_unit: 4,
            quadrature_npoints: 6,
            small_element_tolerance: 1e-10,
        }
    }
}

impl EvaluationOptions {
    /// Set the vector width
    pub fn set_vector_width(&mut self, width: VectorWidth) {
        self.vector_width = width;
    }

    /// Set the vector width from a number of lanes
    pub fn set_vector_width_lanes(&mut self, lanes: usize) -> BemppResult<()> {
        self.vector_width = VectorWidth::try_from(lanes)?;
        Ok(())
    }

    /// Set the number of batches per reduction unit
    pub fn set_batches_per_unit(&mut self, batches: usize) -> BemppResult<()> {
        if batches == 0 {
            return Err(BemppError::InvalidUnitSize);
        }
        self.batches_per_unit = batches;
        Ok(())
    }

    /// Set the number of points of the triangle rule used by the operator layer
    pub fn set_quadrature_npoints(&mut self, npoints: usize) {
        self.quadrature_npoints = npoints;
    }

    /// Set the relative area below which elements are reported as very small
    pub fn set_small_element_tolerance(&mut self, tolerance: f64) {
        self.small_element_tolerance = tolerance;
    }

    /// The vector width
    pub fn vector_width(&self) -> VectorWidth {
        self.vector_width
    }

    /// Number of batches per reduction unit
    pub fn batches_per_unit(&self) -> usize {
        self.batches_per_unit
    }

    /// Number of points of the triangle rule used by the operator layer
    pub fn quadrature_npoints(&self) -> usize {
        self.quadrature_npoints
    }

    /// Relative area below which elements are reported as very small
    pub fn small_element_tolerance(&self) -> f64 {
        self.small_element_tolerance
    }
}
