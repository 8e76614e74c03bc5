//! Types specific to bempp-potential

use num::traits::FloatConst;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Real scalar type used for geometry, kernels and results.
pub trait RealScalar:
    num::Float + FloatConst + Sum + Debug + Display + Default + Send + Sync + 'static
{
    /// Convert an `f64` constant into this type.
    fn from_f64(value: f64) -> Self;
}

impl RealScalar for f32 {
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl RealScalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Value type of coefficients, kernel values or results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Real valued data
    Real,
    /// Complex valued data
    Complex,
}

/// The value types of a potential evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTypes {
    /// Value type of the coefficients
    pub coefficients: ValueType,
    /// Value type of the kernel
    pub kernel: ValueType,
    /// Value type of the result
    pub result: ValueType,
}

impl ValueTypes {
    /// All data real valued.
    pub fn real() -> Self {
        Self {
            coefficients: ValueType::Real,
            kernel: ValueType::Real,
            result: ValueType::Real,
        }
    }

    /// Check that the combination has an accumulation path.
    ///
    /// Only the all-real combination is implemented. Every combination involving
    /// complex values is rejected.
    pub fn check_supported(&self) -> BemppResult<()> {
        match (self.coefficients, self.kernel, self.result) {
            (ValueType::Real, ValueType::Real, ValueType::Real) => Ok(()),
            (c, k, r) => Err(BemppError::UnsupportedVariant(format!(
                "coefficients: {c:?}, kernel: {k:?}, result: {r:?}"
            ))),
        }
    }
}

impl Default for ValueTypes {
    fn default() -> Self {
        Self::real()
    }
}

/// Error type
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BemppError {
    /// An input array has the wrong length
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Name of the input
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },
    /// Quadrature rule without points
    #[error("Quadrature rule has no points")]
    EmptyQuadratureRule,
    /// Malformed quadrature rule
    #[error("Invalid quadrature rule: {0}")]
    InvalidQuadratureRule(String),
    /// No built-in rule with this number of points
    #[error("No quadrature rule with {npoints} points available")]
    RuleNotFound {
        /// Requested number of points
        npoints: usize,
    },
    /// Vector width not in {1, 4, 8, 16}
    #[error("Invalid vector width {0}: must be one of 1, 4, 8, 16")]
    InvalidVectorWidth(usize),
    /// A reduction unit must contain at least one batch
    #[error("A reduction unit must contain at least one batch")]
    InvalidUnitSize,
    /// Value type or kernel combination without implementation
    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),
    /// Normal sign not in {+1, -1}
    #[error("Invalid normal sign {sign} for element {element}")]
    InvalidNormalSign {
        /// Element index
        element: usize,
        /// Offending sign
        sign: i8,
    },
    /// Element index not in grid
    #[error("Element {element} out of range for a grid with {nelements} elements")]
    ElementOutOfRange {
        /// Element index
        element: usize,
        /// Number of elements in the grid
        nelements: usize,
    },
    /// Vertex index not in grid
    #[error("Element {element} references vertex {vertex}, but the grid has {nvertices} vertices")]
    VertexOutOfRange {
        /// Element index
        element: usize,
        /// Vertex index
        vertex: usize,
        /// Number of vertices in the grid
        nvertices: usize,
    },
    /// Zero or negative integration element
    #[error("Degenerate element {element} with integration element {integration_element}")]
    DegenerateElement {
        /// Element index
        element: usize,
        /// Computed integration element
        integration_element: f64,
    },
}

/// Result type
pub type BemppResult<T> = std::result::Result<T, BemppError>;
