//! Flat triangle grid

use crate::types::{BemppError, BemppResult, RealScalar};
use itertools::izip;

/// A grid of flat triangles in 3D.
///
/// Vertices are stored as `[x_0, y_0, z_0, x_1, y_1, z_1, ...]` and cells as
/// `[v0_0, v1_0, v2_0, v0_1, ...]`, i.e. three consecutive entries per point or cell.
pub struct TriangleGrid<T: RealScalar> {
    vertices: Vec<T>,
    cells: Vec<usize>,
    midpoints: Vec<T>,
    volumes: Vec<T>,
    diameters: Vec<T>,
}

impl<T: RealScalar> TriangleGrid<T> {
    /// Create a flat triangle grid
    ///
    /// Fails if the arrays are not a multiple of three long or if a cell refers to a
    /// vertex that does not exist. Degenerate cells are accepted here and reported
    /// when their geometry is extracted.
    pub fn new(vertices: &[T], cells: &[usize]) -> BemppResult<Self> {
        if vertices.len() % 3 != 0 {
            return Err(BemppError::DimensionMismatch {
                what: "vertices",
                expected: 3 * (vertices.len() / 3),
                actual: vertices.len(),
            });
        }
        if cells.len() % 3 != 0 {
            return Err(BemppError::DimensionMismatch {
                what: "cells",
                expected: 3 * (cells.len() / 3),
                actual: cells.len(),
            });
        }
        let nvertices = vertices.len() / 3;
        let ncells = cells.len() / 3;

        for (cell_index, cell) in cells.chunks_exact(3).enumerate() {
            if let Some(v) = cell.iter().find(|v| **v >= nvertices) {
                return Err(BemppError::VertexOutOfRange {
                    element: cell_index,
                    vertex: *v,
                    nvertices,
                });
            }
        }

        let mut midpoints = vec![T::zero(); 3 * ncells];
        let mut volumes = vec![T::zero(); ncells];
        let mut diameters = vec![T::zero(); ncells];

        let third = T::from_f64(1.0 / 3.0);
        let half = T::from_f64(0.5);

        for (midpoint, volume, diameter, cell) in izip!(
            midpoints.chunks_exact_mut(3),
            volumes.iter_mut(),
            diameters.iter_mut(),
            cells.chunks_exact(3),
        ) {
            let v0 = point(vertices, cell[0]);
            let v1 = point(vertices, cell[1]);
            let v2 = point(vertices, cell[2]);

            for i in 0..3 {
                midpoint[i] = (v0[i] + v1[i] + v2[i]) * third;
            }

            let a = sub(&v1, &v0);
            let b = sub(&v2, &v0);
            *volume = norm(&cross(&a, &b)) * half;
            *diameter = compute_diameter_triangle(&v0, &v1, &v2);
        }

        Ok(Self {
            vertices: vertices.to_vec(),
            cells: cells.to_vec(),
            midpoints,
            volumes,
            diameters,
        })
    }

    /// Number of vertices
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of cells
    pub fn number_of_cells(&self) -> usize {
        self.cells.len() / 3
    }

    /// Coordinates of a vertex
    pub fn vertex(&self, index: usize) -> [T; 3] {
        point(&self.vertices, index)
    }

    /// The three vertex indices of a cell
    pub fn cell_vertices(&self, cell: usize) -> [usize; 3] {
        [
            self.cells[3 * cell],
            self.cells[3 * cell + 1],
            self.cells[3 * cell + 2],
        ]
    }

    /// The corner coordinates of a cell
    pub fn corners(&self, cell: usize) -> BemppResult<[[T; 3]; 3]> {
        self.check_cell(cell)?;
        let [v0, v1, v2] = self.cell_vertices(cell);
        Ok([self.vertex(v0), self.vertex(v1), self.vertex(v2)])
    }

    /// Midpoint of a cell
    pub fn midpoint(&self, cell: usize) -> [T; 3] {
        point(&self.midpoints, cell)
    }

    /// Area of a cell
    pub fn volume(&self, cell: usize) -> T {
        self.volumes[cell]
    }

    /// Diameter of the inscribed circle of a cell
    pub fn diameter(&self, cell: usize) -> T {
        self.diameters[cell]
    }

    /// Largest cell area in the grid
    pub fn max_volume(&self) -> T {
        self.volumes.iter().fold(T::zero(), |acc, v| acc.max(*v))
    }

    /// Return an error if `cell` is not a cell of this grid
    pub fn check_cell(&self, cell: usize) -> BemppResult<()> {
        if cell < self.number_of_cells() {
            Ok(())
        } else {
            Err(BemppError::ElementOutOfRange {
                element: cell,
                nelements: self.number_of_cells(),
            })
        }
    }
}

fn point<T: RealScalar>(data: &[T], index: usize) -> [T; 3] {
    [data[3 * index], data[3 * index + 1], data[3 * index + 2]]
}

pub(crate) fn sub<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn cross<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm<T: RealScalar>(a: &[T; 3]) -> T {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

fn compute_diameter_triangle<T: RealScalar>(v0: &[T; 3], v1: &[T; 3], v2: &[T; 3]) -> T {
    let a = norm(&sub(v0, v1));
    let b = norm(&sub(v0, v2));
    let c = norm(&sub(v1, v2));
    ((b + c - a) * (a + c - b) * (a + b - c) / (a + b + c))
        .max(T::zero())
        .sqrt()
}
