//! Implementation of the Laplace single layer kernels
//!
//! Coincident target and source points are regularised by setting the inverse
//! distance to zero, so self-interaction terms contribute nothing instead of
//! producing infinities.

use super::PotentialKernel;
use crate::lanes::Lanes;
use crate::types::RealScalar;

#[inline(always)]
fn inverse_distance<T: RealScalar, const W: usize>(
    target: &[T; 3],
    sources: &[Lanes<T, W>; 3],
) -> ([Lanes<T, W>; 3], Lanes<T, W>) {
    let diff = [
        sources[0] - target[0],
        sources[1] - target[1],
        sources[2] - target[2],
    ];
    let dist = (diff[0] * diff[0] + diff[1] * diff[1] + diff[2] * diff[2]).sqrt();
    (diff, dist.recip_or_zero())
}

fn m_inv_4pi<T: RealScalar>() -> T {
    T::from_f64(0.25) * T::FRAC_1_PI()
}

/// Laplace single layer kernel, g(x, y) = 1 / (4 pi |x - y|)
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceSingleLayerKernel;

impl<T: RealScalar> PotentialKernel<T> for LaplaceSingleLayerKernel {
    const COMPONENTS: usize = 1;

    #[inline(always)]
    fn evaluate_lanes<const W: usize>(
        &self,
        target: &[T; 3],
        sources: &[Lanes<T, W>; 3],
        _normals: &[Lanes<T, W>; 3],
        _parameters: &[T],
        result: &mut [Lanes<T, W>],
    ) {
        let (_, inv_dist) = inverse_distance(target, sources);
        result[0] = inv_dist * m_inv_4pi::<T>();
    }
}

/// Gradient of the Laplace single layer kernel with respect to the target x,
/// grad_x g(x, y) = (y - x) / (4 pi |x - y|^3)
///
/// The kernel does not depend on the source normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceSingleLayerGradientKernel;

impl<T: RealScalar> PotentialKernel<T> for LaplaceSingleLayerGradientKernel {
    const COMPONENTS: usize = 3;

    #[inline(always)]
    fn evaluate_lanes<const W: usize>(
        &self,
        target: &[T; 3],
        sources: &[Lanes<T, W>; 3],
        _normals: &[Lanes<T, W>; 3],
        _parameters: &[T],
        result: &mut [Lanes<T, W>],
    ) {
        let (diff, inv_dist) = inverse_distance(target, sources);
        let factor = inv_dist * inv_dist * inv_dist * m_inv_4pi::<T>();
        result[0] = diff[0] * factor;
        result[1] = diff[1] * factor;
        result[2] = diff[2] * factor;
    }
}
