//! Geometry of individual elements and of element batches
//!
//! For a flat triangle with corners `v0`, `v1`, `v2` the map from the reference
//! triangle is `x(s, t) = v0 + s (v1 - v0) + t (v2 - v0)`. The two Jacobian columns
//! are therefore `v1 - v0` and `v2 - v0`, and the integration element is the norm of
//! their cross product, i.e. twice the area of the triangle.

use super::normal_signs::NormalSigns;
use super::triangle_grid::{cross, norm, sub, TriangleGrid};
use crate::lanes::Lanes;
use crate::types::{BemppError, BemppResult, RealScalar};

/// Geometry of a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementGeometry<T: RealScalar> {
    /// Corner coordinates
    pub corners: [[T; 3]; 3],
    /// Columns of the Jacobian of the reference map
    pub jacobian: [[T; 3]; 2],
    /// Cross product of the Jacobian columns, not normalised and not sign corrected
    pub raw_normal: [T; 3],
    /// Norm of `raw_normal`
    pub integration_element: T,
    /// Unit normal with the element's normal sign applied
    pub normal: [T; 3],
}

impl<T: RealScalar> ElementGeometry<T> {
    /// Extract the geometry of `element`.
    pub fn new(
        grid: &TriangleGrid<T>,
        normal_signs: &NormalSigns,
        element: usize,
    ) -> BemppResult<Self> {
        let corners = grid.corners(element)?;
        let jacobian = [sub(&corners[1], &corners[0]), sub(&corners[2], &corners[0])];
        let raw_normal = cross(&jacobian[0], &jacobian[1]);
        let integration_element = norm(&raw_normal);

        check_integration_element(element, integration_element)?;

        let scale = T::from_f64(f64::from(normal_signs.sign(element)?)) / integration_element;
        let normal = raw_normal.map(|v| v * scale);

        Ok(Self {
            corners,
            jacobian,
            raw_normal,
            integration_element,
            normal,
        })
    }

    /// Map a point on the reference triangle to the physical element.
    pub fn map_point(&self, local: [T; 2]) -> [T; 3] {
        std::array::from_fn(|i| {
            self.corners[0][i] + local[0] * self.jacobian[0][i] + local[1] * self.jacobian[1][i]
        })
    }
}

/// Geometry of a batch of `W` elements, stored lane-wise.
#[derive(Debug, Clone)]
pub struct BatchGeometry<T: RealScalar, const W: usize> {
    /// Corner coordinates, indexed by `[corner][dimension]`
    pub corners: [[Lanes<T, W>; 3]; 3],
    /// Jacobian columns, indexed by `[column][dimension]`
    pub jacobian: [[Lanes<T, W>; 3]; 2],
    /// Integration elements
    pub integration_element: Lanes<T, W>,
    /// Sign corrected unit normals, indexed by dimension
    pub normal: [Lanes<T, W>; 3],
}

impl<T: RealScalar, const W: usize> BatchGeometry<T, W> {
    /// Extract the geometry of all elements of a batch.
    ///
    /// Corners are gathered per lane; every subsequent operation is lane-wise and
    /// identical for all lanes.
    pub fn new(
        grid: &TriangleGrid<T>,
        normal_signs: &NormalSigns,
        elements: &[usize; W],
    ) -> BemppResult<Self> {
        let mut gathered = [[[T::zero(); 3]; 3]; W];
        let mut signs = Lanes::<T, W>::zero();
        for (lane, element) in elements.iter().enumerate() {
            gathered[lane] = grid.corners(*element)?;
            signs.0[lane] = T::from_f64(f64::from(normal_signs.sign(*element)?));
        }
        let corners: [[Lanes<T, W>; 3]; 3] = std::array::from_fn(|corner| {
            std::array::from_fn(|dim| Lanes::from_fn(|lane| gathered[lane][corner][dim]))
        });

        let jacobian: [[Lanes<T, W>; 3]; 2] = [
            std::array::from_fn(|dim| corners[1][dim] - corners[0][dim]),
            std::array::from_fn(|dim| corners[2][dim] - corners[0][dim]),
        ];
        let [a, b] = &jacobian;
        let raw_normal = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        let integration_element = (raw_normal[0] * raw_normal[0]
            + raw_normal[1] * raw_normal[1]
            + raw_normal[2] * raw_normal[2])
            .sqrt();

        for (lane, element) in elements.iter().enumerate() {
            check_integration_element(*element, integration_element[lane])?;
        }

        let scale = signs / integration_element;
        let normal = raw_normal.map(|component| component * scale);

        Ok(Self {
            corners,
            jacobian,
            integration_element,
            normal,
        })
    }

    /// Map a point on the reference triangle to the physical elements of all lanes.
    #[inline(always)]
    pub fn map_point(&self, local: [T; 2]) -> [Lanes<T, W>; 3] {
        std::array::from_fn(|dim| {
            self.corners[0][dim]
                + self.jacobian[0][dim] * local[0]
                + self.jacobian[1][dim] * local[1]
        })
    }
}

fn check_integration_element<T: RealScalar>(element: usize, value: T) -> BemppResult<()> {
    // Also rejects NaN.
    if value > T::zero() {
        Ok(())
    } else {
        Err(BemppError::DegenerateElement {
            element,
            integration_element: value.to_f64().unwrap_or(f64::NAN),
        })
    }
}
