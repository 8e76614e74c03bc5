//! Global result buffer

use crate::types::{BemppError, BemppResult, RealScalar};

/// Result buffer indexed by (evaluation point, component, group).
///
/// Each reduction unit owns the cells of one (point, group) pair and adds its value
/// into them exactly once. The final value for a point and component is the sum over
/// the group axis, see [PotentialBuffer::sum_groups].
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialBuffer<T: RealScalar> {
    data: Vec<T>,
    npoints: usize,
    ncomponents: usize,
    ngroups: usize,
}

impl<T: RealScalar> PotentialBuffer<T> {
    /// Create a zero initialised buffer
    pub fn new(npoints: usize, ncomponents: usize, ngroups: usize) -> Self {
        Self {
            data: vec![T::zero(); npoints * ncomponents * ngroups],
            npoints,
            ncomponents,
            ngroups,
        }
    }

    /// Number of evaluation points
    pub fn npoints(&self) -> usize {
        self.npoints
    }

    /// Number of components per point
    pub fn ncomponents(&self) -> usize {
        self.ncomponents
    }

    /// Number of groups
    pub fn ngroups(&self) -> usize {
        self.ngroups
    }

    /// Shape as `[npoints, ncomponents, ngroups]`
    pub fn shape(&self) -> [usize; 3] {
        [self.npoints, self.ncomponents, self.ngroups]
    }

    /// The raw data, with the group index varying fastest
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn index(&self, point: usize, component: usize, group: usize) -> usize {
        debug_assert!(point < self.npoints);
        debug_assert!(component < self.ncomponents);
        debug_assert!(group < self.ngroups);
        (point * self.ncomponents + component) * self.ngroups + group
    }

    /// Value of one cell
    pub fn get(&self, point: usize, component: usize, group: usize) -> T {
        self.data[self.index(point, component, group)]
    }

    /// Mutable reference to one cell
    pub fn get_mut(&mut self, point: usize, component: usize, group: usize) -> &mut T {
        let index = self.index(point, component, group);
        &mut self.data[index]
    }

    /// Reset all cells to zero
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = T::zero());
    }

    /// Sum over the group axis.
    ///
    /// Returns `npoints * ncomponents` values with the component index varying fastest.
    pub fn sum_groups(&self) -> Vec<T> {
        if self.ngroups == 0 {
            return vec![T::zero(); self.npoints * self.ncomponents];
        }
        self.data
            .chunks_exact(self.ngroups)
            .map(|groups| groups.iter().fold(T::zero(), |acc, v| acc + *v))
            .collect()
    }

    /// Sum over the group axis, visiting the groups in the given order.
    pub fn sum_groups_in_order(&self, order: &[usize]) -> BemppResult<Vec<T>> {
        if order.len() != self.ngroups {
            return Err(BemppError::DimensionMismatch {
                what: "group order",
                expected: self.ngroups,
                actual: order.len(),
            });
        }
        if let Some(group) = order.iter().find(|g| **g >= self.ngroups) {
            return Err(BemppError::DimensionMismatch {
                what: "group index",
                expected: self.ngroups,
                actual: *group,
            });
        }
        if self.ngroups == 0 {
            return Ok(vec![T::zero(); self.npoints * self.ncomponents]);
        }
        Ok(self
            .data
            .chunks_exact(self.ngroups)
            .map(|groups| order.iter().fold(T::zero(), |acc, g| acc + groups[*g]))
            .collect())
    }
}
