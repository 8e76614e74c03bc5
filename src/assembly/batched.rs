//! Integration over a batch of elements for one evaluation point

use crate::element::{BasisFamily, MAX_BASIS_SIZE};
use crate::grid::{BatchGeometry, NormalSigns, TriangleGrid};
use crate::kernel::PotentialKernel;
use crate::lanes::Lanes;
use crate::quadrature::QuadratureRule;
use crate::types::{BemppResult, RealScalar};

/// `W` elements processed together.
///
/// If fewer than `W` elements remain at the end of an element list, the batch is
/// padded by repeating its last element. Padding lanes see the same geometry and
/// control flow as all other lanes but use zero coefficients, so they contribute
/// exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementBatch<const W: usize> {
    elements: [usize; W],
    active: usize,
}

impl<const W: usize> ElementBatch<W> {
    /// Create a batch from up to `W` elements.
    ///
    /// Returns `None` if `elements` is empty or longer than `W`.
    pub fn new(elements: &[usize]) -> Option<Self> {
        let last = *elements.last()?;
        if elements.len() > W {
            return None;
        }
        let mut padded = [last; W];
        padded[..elements.len()].copy_from_slice(elements);
        Some(Self {
            elements: padded,
            active: elements.len(),
        })
    }

    /// Split an element list into consecutive batches.
    pub fn split(elements: &[usize]) -> Vec<Self> {
        elements
            .chunks(W)
            .filter_map(|chunk| Self::new(chunk))
            .collect()
    }

    /// The element of each lane, including padding lanes
    pub fn elements(&self) -> &[usize; W] {
        &self.elements
    }

    /// Number of lanes holding real elements
    pub fn active(&self) -> usize {
        self.active
    }

    /// Gather the coefficients of shape function `basis_index` for all lanes.
    fn coefficients<T: RealScalar>(
        &self,
        coefficients: &[T],
        basis_dim: usize,
        basis_index: usize,
    ) -> Lanes<T, W> {
        Lanes::from_fn(|lane| {
            if lane < self.active {
                coefficients[basis_dim * self.elements[lane] + basis_index]
            } else {
                T::zero()
            }
        })
    }
}

/// Integrate `kernel` times the basis expansion over every element of a batch.
///
/// Returns one partial sum per lane for each of the kernel's components; entries
/// beyond [PotentialKernel::COMPONENTS] are zero. `coefficients` holds
/// `basis.dim()` consecutive values per grid element.
///
/// Quadrature nodes are visited sequentially in rule order. For each node the
/// contribution `(sum_j c_j phi_j) * w * k` is added to the running sums, which are
/// scaled by the integration element at the end.
#[allow(clippy::too_many_arguments)]
pub fn accumulate_batch<T: RealScalar, K: PotentialKernel<T>, const W: usize>(
    kernel: &K,
    grid: &TriangleGrid<T>,
    normal_signs: &NormalSigns,
    batch: &ElementBatch<W>,
    coefficients: &[T],
    basis: BasisFamily,
    rule: &QuadratureRule<T>,
    target: &[T; 3],
    parameters: &[T],
) -> BemppResult<[Lanes<T, W>; 3]> {
    let geometry = BatchGeometry::new(grid, normal_signs, batch.elements())?;

    let basis_dim = basis.dim();
    let local_coefficients: [Lanes<T, W>; MAX_BASIS_SIZE] = std::array::from_fn(|j| {
        if j < basis_dim {
            batch.coefficients(coefficients, basis_dim, j)
        } else {
            Lanes::zero()
        }
    });

    let mut sums = [Lanes::<T, W>::zero(); 3];
    let mut kernel_values = [Lanes::<T, W>::zero(); 3];

    for (point, weight) in rule.iter() {
        let basis_values = basis.tabulate(point);
        let mut local_value = Lanes::<T, W>::zero();
        for (c, phi) in local_coefficients.iter().zip(basis_values.iter()).take(basis_dim) {
            local_value += *c * *phi;
        }
        let factor = local_value * weight;

        let sources = geometry.map_point(point);
        kernel.evaluate_lanes(
            target,
            &sources,
            &geometry.normal,
            parameters,
            &mut kernel_values[..K::COMPONENTS],
        );

        for (sum, k) in sums.iter_mut().zip(kernel_values.iter()).take(K::COMPONENTS) {
            *sum += *k * factor;
        }
    }

    for sum in sums.iter_mut().take(K::COMPONENTS) {
        *sum *= geometry.integration_element;
    }

    Ok(sums)
}
