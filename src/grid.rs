//! Grid storage and element geometry

pub mod geometry;
pub mod normal_signs;
pub mod triangle_grid;

pub use geometry::{BatchGeometry, ElementGeometry};
pub use normal_signs::NormalSigns;
pub use triangle_grid::TriangleGrid;
