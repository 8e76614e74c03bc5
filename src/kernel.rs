//! Green's function kernels for potential evaluation

pub mod laplace_3d;
pub mod types;

use crate::lanes::Lanes;
use crate::types::RealScalar;

pub use laplace_3d::{LaplaceSingleLayerGradientKernel, LaplaceSingleLayerKernel};
pub use types::{KernelParameters, KernelVariant, MAX_KERNEL_PARAMETERS};

/// A kernel evaluated between one target point and the source points of an element batch.
///
/// Every kernel is written once against [Lanes]. The scalar path is the width 1
/// instance of the same formula.
pub trait PotentialKernel<T: RealScalar>: Sync {
    /// Number of result components per target (1 for values, 3 for gradients)
    const COMPONENTS: usize;

    /// Evaluate the kernel for all lanes.
    ///
    /// - `target`: the evaluation point.
    /// - `sources`: source points, indexed by dimension.
    /// - `normals`: unit normals at the sources, indexed by dimension.
    /// - `parameters`: kernel parameters, see [KernelVariant::expected_parameter_count].
    /// - `result`: [PotentialKernel::COMPONENTS] entries.
    fn evaluate_lanes<const W: usize>(
        &self,
        target: &[T; 3],
        sources: &[Lanes<T, W>; 3],
        normals: &[Lanes<T, W>; 3],
        parameters: &[T],
        result: &mut [Lanes<T, W>],
    );

    /// Evaluate the kernel for a single source point.
    fn greens_fct(
        &self,
        target: &[T; 3],
        source: &[T; 3],
        normal: &[T; 3],
        parameters: &[T],
        result: &mut [T],
    ) {
        let sources = source.map(Lanes::<T, 1>::splat);
        let normals = normal.map(Lanes::<T, 1>::splat);
        let mut lanes = [Lanes::<T, 1>::zero(); 3];
        self.evaluate_lanes(
            target,
            &sources,
            &normals,
            parameters,
            &mut lanes[..Self::COMPONENTS],
        );
        for (r, l) in result.iter_mut().zip(lanes.iter()).take(Self::COMPONENTS) {
            *r = l[0];
        }
    }
}
