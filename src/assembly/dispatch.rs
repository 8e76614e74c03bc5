//! Partitioning of work into reduction units and writing of unit results

use super::batched::{accumulate_batch, ElementBatch};
use super::buffer::PotentialBuffer;
use super::options::EvaluationOptions;
use crate::element::BasisFamily;
use crate::grid::{NormalSigns, TriangleGrid};
use crate::kernel::{
    KernelParameters, KernelVariant, LaplaceSingleLayerGradientKernel, LaplaceSingleLayerKernel,
    PotentialKernel,
};
use crate::lanes::{Lanes, VectorWidth};
use crate::quadrature::QuadratureRule;
use crate::types::{BemppError, BemppResult, RealScalar, ValueTypes};
use log::{debug, warn};
use rayon::prelude::*;

/// All inputs of a potential evaluation.
///
/// Everything is read-only for the duration of the evaluation.
pub struct PotentialEvaluation<'a, T: RealScalar> {
    /// The grid
    pub grid: &'a TriangleGrid<T>,
    /// Source elements to integrate over, in order
    pub elements: &'a [usize],
    /// Normal orientation of every grid element
    pub normal_signs: &'a NormalSigns,
    /// Evaluation points as `[x_0, y_0, z_0, x_1, ...]`
    pub evaluation_points: &'a [T],
    /// `basis.dim()` coefficients for every grid element
    pub coefficients: &'a [T],
    /// The basis the coefficients refer to
    pub basis: BasisFamily,
    /// Quadrature rule on the reference triangle
    pub quadrature_rule: &'a QuadratureRule<T>,
    /// Kernel parameters
    pub kernel_parameters: KernelParameters<T>,
    /// The kernel
    pub kernel: KernelVariant,
    /// Value types of coefficients, kernel and result
    pub value_types: ValueTypes,
}

impl<'a, T: RealScalar> PotentialEvaluation<'a, T> {
    /// Number of evaluation points
    pub fn npoints(&self) -> usize {
        self.evaluation_points.len() / 3
    }

    /// Number of result components per evaluation point
    pub fn component_count(&self) -> usize {
        self.kernel.component_count()
    }

    /// Number of reduction groups the element list is split into
    pub fn ngroups(&self, options: &EvaluationOptions) -> usize {
        let nbatches = self
            .elements
            .len()
            .div_ceil(options.vector_width().lanes());
        nbatches.div_ceil(options.batches_per_unit())
    }

    /// Check the configuration.
    ///
    /// This runs before any work is dispatched; an evaluation that passes can only
    /// fail on degenerate geometry.
    pub fn validate(&self) -> BemppResult<()> {
        self.value_types.check_supported()?;

        if self.quadrature_rule.npoints() == 0 {
            return Err(BemppError::EmptyQuadratureRule);
        }
        if self.evaluation_points.len() % 3 != 0 {
            return Err(BemppError::DimensionMismatch {
                what: "evaluation points",
                expected: 3 * self.npoints(),
                actual: self.evaluation_points.len(),
            });
        }

        let ncells = self.grid.number_of_cells();
        if self.coefficients.len() != ncells * self.basis.dim() {
            return Err(BemppError::DimensionMismatch {
                what: "coefficients",
                expected: ncells * self.basis.dim(),
                actual: self.coefficients.len(),
            });
        }
        if self.normal_signs.len() != ncells {
            return Err(BemppError::DimensionMismatch {
                what: "normal signs",
                expected: ncells,
                actual: self.normal_signs.len(),
            });
        }
        for element in self.elements {
            self.grid.check_cell(*element)?;
        }

        self.kernel_parameters.check(self.kernel)
    }

    fn target(&self, point: usize) -> [T; 3] {
        [
            self.evaluation_points[3 * point],
            self.evaluation_points[3 * point + 1],
            self.evaluation_points[3 * point + 2],
        ]
    }

    fn report_small_elements(&self, tolerance: f64) {
        let threshold = self.grid.max_volume() * T::from_f64(tolerance);
        let nsmall = self
            .elements
            .iter()
            .map(|e| self.grid.volume(*e))
            .filter(|v| *v > T::zero() && *v < threshold)
            .count();
        if nsmall > 0 {
            warn!(
                "{} of {} source elements have an area below {} times the largest element area",
                nsmall,
                self.elements.len(),
                tolerance
            );
        }
    }
}

/// Evaluate a potential into a new, zero initialised buffer.
///
/// The returned buffer has shape `[npoints, ncomponents, ngroups]`; call
/// [PotentialBuffer::sum_groups] for the final values.
pub fn evaluate<T: RealScalar>(
    evaluation: &PotentialEvaluation<T>,
    options: &EvaluationOptions,
) -> BemppResult<PotentialBuffer<T>> {
    let mut buffer = PotentialBuffer::new(
        evaluation.npoints(),
        evaluation.component_count(),
        evaluation.ngroups(options),
    );
    evaluate_into(evaluation, options, &mut buffer)?;
    Ok(buffer)
}

/// Evaluate a potential and add the result of every reduction unit into `buffer`.
///
/// All units are computed before any cell is written. If the configuration is
/// invalid or an element is degenerate, an error is returned and `buffer` is left
/// unchanged.
pub fn evaluate_into<T: RealScalar>(
    evaluation: &PotentialEvaluation<T>,
    options: &EvaluationOptions,
    buffer: &mut PotentialBuffer<T>,
) -> BemppResult<()> {
    evaluation.validate()?;

    let expected_shape = [
        evaluation.npoints(),
        evaluation.component_count(),
        evaluation.ngroups(options),
    ];
    for (what, expected, actual) in itertools::izip!(
        ["buffer points", "buffer components", "buffer groups"],
        expected_shape,
        buffer.shape()
    ) {
        if expected != actual {
            return Err(BemppError::DimensionMismatch {
                what,
                expected,
                actual,
            });
        }
    }

    evaluation.report_small_elements(options.small_element_tolerance());

    match evaluation.kernel {
        KernelVariant::LaplaceSingleLayer => {
            dispatch_width(&LaplaceSingleLayerKernel, evaluation, options, buffer)
        }
        KernelVariant::LaplaceSingleLayerGradient => {
            dispatch_width(&LaplaceSingleLayerGradientKernel, evaluation, options, buffer)
        }
    }
}

fn dispatch_width<T: RealScalar, K: PotentialKernel<T>>(
    kernel: &K,
    evaluation: &PotentialEvaluation<T>,
    options: &EvaluationOptions,
    buffer: &mut PotentialBuffer<T>,
) -> BemppResult<()> {
    let batches_per_unit = options.batches_per_unit();
    match options.vector_width() {
        VectorWidth::W1 => dispatch::<T, K, 1>(kernel, evaluation, batches_per_unit, buffer),
        VectorWidth::W4 => dispatch::<T, K, 4>(kernel, evaluation, batches_per_unit, buffer),
        VectorWidth::W8 => dispatch::<T, K, 8>(kernel, evaluation, batches_per_unit, buffer),
        VectorWidth::W16 => dispatch::<T, K, 16>(kernel, evaluation, batches_per_unit, buffer),
    }
}

fn dispatch<T: RealScalar, K: PotentialKernel<T>, const W: usize>(
    kernel: &K,
    evaluation: &PotentialEvaluation<T>,
    batches_per_unit: usize,
    buffer: &mut PotentialBuffer<T>,
) -> BemppResult<()> {
    if batches_per_unit == 0 {
        return Err(BemppError::InvalidUnitSize);
    }

    let batches = ElementBatch::<W>::split(evaluation.elements);
    if let Some(last) = batches.last() {
        if last.active() < W {
            warn!(
                "Padding the last batch with {} zero-coefficient lanes",
                W - last.active()
            );
        }
    }
    if batches_per_unit > batches.len() && !batches.is_empty() {
        warn!(
            "Requested {} batches per unit, but only {} batches exist",
            batches_per_unit,
            batches.len()
        );
    }

    let units = batches.chunks(batches_per_unit).collect::<Vec<_>>();
    let ngroups = units.len();
    let npoints = evaluation.npoints();
    let ncomponents = K::COMPONENTS;

    debug!(
        "Evaluating {} at {} points over {} elements: {} batches of width {} in {} groups",
        evaluation.kernel,
        npoints,
        evaluation.elements.len(),
        batches.len(),
        W,
        ngroups
    );

    if ngroups == 0 {
        return Ok(());
    }

    let parameters = evaluation.kernel_parameters.as_slice();

    // Task `t` is the unit for point `t / ngroups` and group `t % ngroups`.
    let unit_values = (0..npoints * ngroups)
        .into_par_iter()
        .map(|task| {
            let target = evaluation.target(task / ngroups);
            run_unit(kernel, evaluation, units[task % ngroups], &target, parameters)
        })
        .collect::<BemppResult<Vec<_>>>()?;

    buffer
        .data_mut()
        .par_chunks_mut(ncomponents * ngroups)
        .zip(unit_values.par_chunks(ngroups))
        .for_each(|(cells, values)| {
            for (group, value) in values.iter().enumerate() {
                for (component, v) in value.iter().enumerate().take(ncomponents) {
                    let cell = &mut cells[component * ngroups + group];
                    *cell = *cell + *v;
                }
            }
        });

    Ok(())
}

/// Run one reduction unit.
///
/// Each batch of the unit is accumulated as its own task into unit-local storage.
/// Collecting the tasks is the join point: only after every batch has finished is
/// the storage reduced, first across batches and then across lanes.
fn run_unit<T: RealScalar, K: PotentialKernel<T>, const W: usize>(
    kernel: &K,
    evaluation: &PotentialEvaluation<T>,
    batches: &[ElementBatch<W>],
    target: &[T; 3],
    parameters: &[T],
) -> BemppResult<[T; 3]> {
    let partials = batches
        .par_iter()
        .map(|batch| {
            accumulate_batch(
                kernel,
                evaluation.grid,
                evaluation.normal_signs,
                batch,
                evaluation.coefficients,
                evaluation.basis,
                evaluation.quadrature_rule,
                target,
                parameters,
            )
        })
        .collect::<BemppResult<Vec<_>>>()?;

    let mut result = [T::zero(); 3];
    for (component, value) in result.iter_mut().enumerate().take(K::COMPONENTS) {
        let mut lanes = Lanes::<T, W>::zero();
        for partial in &partials {
            lanes += partial[component];
        }
        *value = lanes.reduce_sum();
    }
    Ok(result)
}
