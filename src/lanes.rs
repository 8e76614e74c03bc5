//! Fixed width vector lanes
//!
//! A [Lanes] value holds one scalar per element of an element batch. All arithmetic
//! is lane-wise, so a width 1 batch runs exactly the same sequence of operations as
//! a width 16 batch.

use crate::types::RealScalar;
use std::ops::{Add, AddAssign, Div, Index, Mul, MulAssign, Neg, Sub};

/// Supported vector widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VectorWidth {
    /// Scalar evaluation
    #[default]
    W1,
    /// Four lanes
    W4,
    /// Eight lanes
    W8,
    /// Sixteen lanes
    W16,
}

impl VectorWidth {
    /// Number of lanes
    pub fn lanes(&self) -> usize {
        match self {
            VectorWidth::W1 => 1,
            VectorWidth::W4 => 4,
            VectorWidth::W8 => 8,
            VectorWidth::W16 => 16,
        }
    }
}

impl TryFrom<usize> for VectorWidth {
    type Error = crate::types::BemppError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VectorWidth::W1),
            4 => Ok(VectorWidth::W4),
            8 => Ok(VectorWidth::W8),
            16 => Ok(VectorWidth::W16),
            _ => Err(crate::types::BemppError::InvalidVectorWidth(value)),
        }
    }
}

/// One value per lane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Lanes<T: RealScalar, const W: usize>(pub [T; W]);

impl<T: RealScalar, const W: usize> Lanes<T, W> {
    /// Same value in every lane
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self([value; W])
    }

    /// All lanes zero
    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    /// Build from a function of the lane index
    #[inline(always)]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Lane-wise square root
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self(self.0.map(|v| v.sqrt()))
    }

    /// Lane-wise reciprocal, with lanes that are exactly zero mapped to zero.
    #[inline(always)]
    pub fn recip_or_zero(self) -> Self {
        Self(self.0.map(|v| if v == T::zero() { T::zero() } else { T::one() / v }))
    }

    /// Sum over all lanes, in lane order.
    #[inline(always)]
    pub fn reduce_sum(&self) -> T {
        self.0.iter().fold(T::zero(), |acc, v| acc + *v)
    }

    /// The lane values
    #[inline(always)]
    pub fn as_array(&self) -> &[T; W] {
        &self.0
    }
}

impl<T: RealScalar, const W: usize> Default for Lanes<T, W> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: RealScalar, const W: usize> Index<usize> for Lanes<T, W> {
    type Output = T;

    #[inline(always)]
    fn index(&self, lane: usize) -> &T {
        &self.0[lane]
    }
}

macro_rules! lanewise_binop {
    ($trait:ident, $fn:ident, $op:tt) => {
        impl<T: RealScalar, const W: usize> $trait for Lanes<T, W> {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self {
                Self(std::array::from_fn(|i| self.0[i] $op rhs.0[i]))
            }
        }

        impl<T: RealScalar, const W: usize> $trait<T> for Lanes<T, W> {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: T) -> Self {
                Self(self.0.map(|v| v $op rhs))
            }
        }
    };
}

lanewise_binop!(Add, add, +);
lanewise_binop!(Sub, sub, -);
lanewise_binop!(Mul, mul, *);
lanewise_binop!(Div, div, /);

impl<T: RealScalar, const W: usize> AddAssign for Lanes<T, W> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = *a + *b;
        }
    }
}

impl<T: RealScalar, const W: usize> MulAssign for Lanes<T, W> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = *a * *b;
        }
    }
}

impl<T: RealScalar, const W: usize> Neg for Lanes<T, W> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self(self.0.map(|v| -v))
    }
}
