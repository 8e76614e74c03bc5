//! Batched evaluation of boundary element potential operators
//!
//! Given a flat triangle grid, a discontinuous Lagrange basis and a set of
//! coefficients, the potential of the resulting function is evaluated at arbitrary
//! points in space. Source elements are integrated in batches of a fixed vector
//! width; partial sums are reduced in a fixed order and written into a result buffer
//! indexed by evaluation point, component and group.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;

pub mod assembly;
pub mod element;
pub mod grid;
pub mod kernel;
pub mod lanes;
pub mod potential;
pub mod quadrature;
pub mod shapes;
pub mod types;

pub use potential::{laplace, PotentialOperator};
