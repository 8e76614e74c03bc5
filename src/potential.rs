//! Potential operators
//!
//! A potential operator maps the coefficients of a function on the grid to the values
//! of a potential at a fixed set of evaluation points.

use crate::assembly::{evaluate, EvaluationOptions, PotentialEvaluation};
use crate::element::BasisFamily;
use crate::grid::{NormalSigns, TriangleGrid};
use crate::kernel::{KernelParameters, KernelVariant};
use crate::quadrature::QuadratureRule;
use crate::types::{BemppError, BemppResult, RealScalar, ValueTypes};
use log::debug;

/// A potential operator evaluated over every element of a grid
pub struct PotentialOperator<'a, T: RealScalar> {
    grid: &'a TriangleGrid<T>,
    elements: Vec<usize>,
    basis: BasisFamily,
    points: Vec<T>,
    quadrature_rule: QuadratureRule<T>,
    kernel: KernelVariant,
    kernel_parameters: KernelParameters<T>,
    options: EvaluationOptions,
}

impl<'a, T: RealScalar> PotentialOperator<'a, T> {
    /// Create a potential operator.
    ///
    /// `points` has three consecutive coordinates per evaluation point. The triangle
    /// rule with [EvaluationOptions::quadrature_npoints] points is used.
    pub fn new(
        grid: &'a TriangleGrid<T>,
        basis: BasisFamily,
        points: &[T],
        kernel: KernelVariant,
        options: &EvaluationOptions,
    ) -> BemppResult<Self> {
        if points.len() % 3 != 0 {
            return Err(BemppError::DimensionMismatch {
                what: "evaluation points",
                expected: 3 * (points.len() / 3),
                actual: points.len(),
            });
        }
        let kernel_parameters = KernelParameters::empty();
        kernel_parameters.check(kernel)?;
        let quadrature_rule = QuadratureRule::triangle(options.quadrature_npoints())?;
        debug!(
            "Created {} potential for {} points with a {} point rule",
            kernel,
            points.len() / 3,
            quadrature_rule.npoints()
        );
        Ok(Self {
            grid,
            elements: (0..grid.number_of_cells()).collect(),
            basis,
            points: points.to_vec(),
            quadrature_rule,
            kernel,
            kernel_parameters,
            options: options.clone(),
        })
    }

    /// Identifier of the operator
    pub fn identifier(&self) -> String {
        format!("{}_potential", self.kernel.identifier())
    }

    /// Number of values per evaluation point
    pub fn component_count(&self) -> usize {
        self.kernel.component_count()
    }

    /// Number of evaluation points
    pub fn number_of_points(&self) -> usize {
        self.points.len() / 3
    }

    /// The quadrature rule used on every element
    pub fn quadrature_rule(&self) -> &QuadratureRule<T> {
        &self.quadrature_rule
    }

    /// Evaluate the potential.
    ///
    /// `coefficients` holds `basis.dim()` values per grid element. Returns
    /// [PotentialOperator::component_count] values per evaluation point, with the
    /// component index varying fastest.
    pub fn evaluate(&self, coefficients: &[T], normal_signs: &NormalSigns) -> BemppResult<Vec<T>> {
        let evaluation = PotentialEvaluation {
            grid: self.grid,
            elements: &self.elements,
            normal_signs,
            evaluation_points: &self.points,
            coefficients,
            basis: self.basis,
            quadrature_rule: &self.quadrature_rule,
            kernel_parameters: self.kernel_parameters,
            kernel: self.kernel,
            value_types: ValueTypes::real(),
        };
        Ok(evaluate(&evaluation, &self.options)?.sum_groups())
    }

    /// Evaluate the potential for coefficients given in a lower precision.
    ///
    /// The coefficients are converted to `T` before evaluation, e.g. `f32`
    /// coefficients for an `f64` operator.
    pub fn evaluate_promoted<C: Copy + Into<T>>(
        &self,
        coefficients: &[C],
        normal_signs: &NormalSigns,
    ) -> BemppResult<Vec<T>> {
        let promoted = coefficients.iter().map(|c| (*c).into()).collect::<Vec<T>>();
        self.evaluate(&promoted, normal_signs)
    }
}

/// Laplace potential operators
pub mod laplace {
    use super::PotentialOperator;
    use crate::assembly::EvaluationOptions;
    use crate::element::BasisFamily;
    use crate::grid::TriangleGrid;
    use crate::kernel::KernelVariant;
    use crate::types::{BemppResult, RealScalar};

    /// Laplace single layer potential
    pub fn single_layer<'a, T: RealScalar>(
        grid: &'a TriangleGrid<T>,
        basis: BasisFamily,
        points: &[T],
        options: &EvaluationOptions,
    ) -> BemppResult<PotentialOperator<'a, T>> {
        PotentialOperator::new(
            grid,
            basis,
            points,
            KernelVariant::LaplaceSingleLayer,
            options,
        )
    }

    /// Gradient of the Laplace single layer potential
    pub fn single_layer_gradient<'a, T: RealScalar>(
        grid: &'a TriangleGrid<T>,
        basis: BasisFamily,
        points: &[T],
        options: &EvaluationOptions,
    ) -> BemppResult<PotentialOperator<'a, T>> {
        PotentialOperator::new(
            grid,
            basis,
            points,
            KernelVariant::LaplaceSingleLayerGradient,
            options,
        )
    }
}
