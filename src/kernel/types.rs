//! Kernel selection and parameters

use crate::types::{BemppError, BemppResult, RealScalar};
use std::fmt;

/// Maximum number of kernel parameters.
pub const MAX_KERNEL_PARAMETERS: usize = 4;

/// The kernel of a potential evaluation, selected once at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelVariant {
    /// Laplace single layer potential, g(x, y) = 1 / (4 pi |x - y|)
    LaplaceSingleLayer,
    /// Gradient of the Laplace single layer potential with respect to the evaluation point
    LaplaceSingleLayerGradient,
}

impl KernelVariant {
    /// Parse an operator identifier such as `laplace_single_layer_gradient`.
    ///
    /// Identifiers of kernels without an implementation, such as the double layer or
    /// Helmholtz kernels, give [BemppError::UnsupportedVariant].
    pub fn from_identifier(identifier: &str) -> BemppResult<Self> {
        match identifier {
            "laplace_single_layer" => Ok(KernelVariant::LaplaceSingleLayer),
            "laplace_single_layer_gradient" => Ok(KernelVariant::LaplaceSingleLayerGradient),
            other => Err(BemppError::UnsupportedVariant(format!("kernel {other}"))),
        }
    }

    /// The operator identifier
    pub fn identifier(&self) -> &'static str {
        match self {
            KernelVariant::LaplaceSingleLayer => "laplace_single_layer",
            KernelVariant::LaplaceSingleLayerGradient => "laplace_single_layer_gradient",
        }
    }

    /// Number of result components per evaluation point
    pub fn component_count(&self) -> usize {
        match self {
            KernelVariant::LaplaceSingleLayer => 1,
            KernelVariant::LaplaceSingleLayerGradient => 3,
        }
    }

    /// Number of parameters the kernel expects
    pub fn expected_parameter_count(&self) -> usize {
        match self {
            KernelVariant::LaplaceSingleLayer | KernelVariant::LaplaceSingleLayerGradient => 0,
        }
    }
}

impl fmt::Display for KernelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// A small fixed-size array of real kernel parameters, such as a wavenumber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelParameters<T: RealScalar> {
    values: [T; MAX_KERNEL_PARAMETERS],
    len: usize,
}

impl<T: RealScalar> KernelParameters<T> {
    /// No parameters
    pub fn empty() -> Self {
        Self {
            values: [T::zero(); MAX_KERNEL_PARAMETERS],
            len: 0,
        }
    }

    /// Create from a slice
    pub fn new(values: &[T]) -> BemppResult<Self> {
        if values.len() > MAX_KERNEL_PARAMETERS {
            return Err(BemppError::DimensionMismatch {
                what: "kernel parameters",
                expected: MAX_KERNEL_PARAMETERS,
                actual: values.len(),
            });
        }
        let mut parameters = Self::empty();
        parameters.values[..values.len()].copy_from_slice(values);
        parameters.len = values.len();
        Ok(parameters)
    }

    /// The parameter values
    pub fn as_slice(&self) -> &[T] {
        &self.values[..self.len]
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check that the number of parameters matches what `variant` expects.
    pub fn check(&self, variant: KernelVariant) -> BemppResult<()> {
        if self.len == variant.expected_parameter_count() {
            Ok(())
        } else {
            Err(BemppError::DimensionMismatch {
                what: "kernel parameters",
                expected: variant.expected_parameter_count(),
                actual: self.len,
            })
        }
    }
}

impl<T: RealScalar> Default for KernelParameters<T> {
    fn default() -> Self {
        Self::empty()
    }
}
