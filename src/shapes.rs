//! Definition of various test shapes.

use std::collections::HashMap;

use crate::grid::TriangleGrid;
use crate::types::{BemppResult, RealScalar};

/// Create a regular sphere
///
/// A regular sphere is created by starting with a regular octahedron. The shape is then refined `refinement_level` times.
/// Each time the grid is refined, each triangle is split into four triangles (by adding lines connecting the midpoints of
/// each edge). The new points are then scaled so that they are a distance of 1 from the origin.
///
/// All cells are oriented so that their normals point outwards.
pub fn regular_sphere<T: RealScalar>(refinement_level: u32) -> BemppResult<TriangleGrid<T>> {
    let zero = T::zero();
    let one = T::one();
    let half = T::from_f64(0.5);

    let mut points = Vec::<[T; 3]>::with_capacity(2 + usize::pow(4, refinement_level + 1));
    points.push([zero, zero, one]);
    points.push([one, zero, zero]);
    points.push([zero, one, zero]);
    points.push([-one, zero, zero]);
    points.push([zero, -one, zero]);
    points.push([zero, zero, -one]);

    let mut cells = vec![
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 4],
        [0, 4, 1],
        [5, 2, 1],
        [5, 3, 2],
        [5, 4, 3],
        [5, 1, 4],
    ];

    for _ in 0..refinement_level {
        let mut edge_points = HashMap::new();
        let mut new_cells = Vec::with_capacity(4 * cells.len());
        for c in &cells {
            let edges = [[1, 2], [0, 2], [0, 1]].map(|[i, j]| {
                let key = (c[i].min(c[j]), c[i].max(c[j]));
                *edge_points.entry(key).or_insert_with(|| {
                    let v_i = points[c[i]];
                    let v_j = points[c[j]];
                    let mut new_pt = [
                        half * (v_i[0] + v_j[0]),
                        half * (v_i[1] + v_j[1]),
                        half * (v_i[2] + v_j[2]),
                    ];
                    let size = new_pt.iter().map(|&x| x * x).sum::<T>().sqrt();
                    for x in new_pt.iter_mut() {
                        *x = *x / size;
                    }
                    points.push(new_pt);
                    points.len() - 1
                })
            });
            new_cells.push([c[0], edges[2], edges[1]]);
            new_cells.push([c[1], edges[0], edges[2]]);
            new_cells.push([c[2], edges[1], edges[0]]);
            new_cells.push([edges[0], edges[1], edges[2]]);
        }
        cells = new_cells;
    }

    TriangleGrid::new(&points.concat(), &cells.concat())
}

/// Create a square screen
///
/// The unit square `[0, 1] x [0, 1]` in the plane `z = 0`, split into `n` by `n`
/// squares which are each split into two triangles. All normals point in the
/// positive `z` direction.
pub fn screen<T: RealScalar>(n: usize) -> BemppResult<TriangleGrid<T>> {
    let h = T::one() / T::from_f64(n as f64);
    let mut points = Vec::with_capacity(3 * (n + 1) * (n + 1));
    for y in 0..=n {
        for x in 0..=n {
            points.extend_from_slice(&[
                T::from_f64(x as f64) * h,
                T::from_f64(y as f64) * h,
                T::zero(),
            ]);
        }
    }
    let mut cells = Vec::with_capacity(6 * n * n);
    for y in 0..n {
        for x in 0..n {
            let v = y * (n + 1) + x;
            cells.extend_from_slice(&[v, v + 1, v + n + 2]);
            cells.extend_from_slice(&[v, v + n + 2, v + n + 1]);
        }
    }
    TriangleGrid::new(&points, &cells)
}
