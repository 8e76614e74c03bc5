//! Basis functions on the reference triangle
//!
//! The reference triangle has the vertices `(0, 0)`, `(1, 0)` and `(0, 1)`.

use crate::types::RealScalar;

/// Maximum number of shape functions of any supported family.
pub const MAX_BASIS_SIZE: usize = 3;

/// Family of discontinuous Lagrange basis functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasisFamily {
    /// Piecewise constant: one shape function equal to one.
    Constant,
    /// Piecewise linear: the three barycentric coordinates.
    Linear,
}

impl BasisFamily {
    /// The number of shape functions on each element.
    pub fn dim(&self) -> usize {
        match self {
            BasisFamily::Constant => 1,
            BasisFamily::Linear => 3,
        }
    }

    /// Evaluate all shape functions at a point of the reference triangle.
    ///
    /// Only the first [BasisFamily::dim] entries of the result are meaningful; the
    /// remaining entries are zero.
    pub fn tabulate<T: RealScalar>(&self, point: [T; 2]) -> [T; MAX_BASIS_SIZE] {
        match self {
            BasisFamily::Constant => [T::one(), T::zero(), T::zero()],
            BasisFamily::Linear => [T::one() - point[0] - point[1], point[0], point[1]],
        }
    }

    /// Tabulate the shape functions at a set of points.
    ///
    /// `points` has the layout `[s_0, t_0, s_1, t_1, ...]`. The result has
    /// [BasisFamily::dim] consecutive values per point.
    pub fn tabulate_points<T: RealScalar>(&self, points: &[T]) -> Vec<T> {
        let dim = self.dim();
        let mut table = Vec::with_capacity(dim * points.len() / 2);
        for point in points.chunks_exact(2) {
            table.extend_from_slice(&self.tabulate([point[0], point[1]])[..dim]);
        }
        table
    }
}
