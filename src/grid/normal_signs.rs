//! Orientation corrections for element normals

use crate::types::{BemppError, BemppResult};

/// Per-element sign in {+1, -1} applied to the computed normal.
///
/// The sign is applied after the normal is computed from the corners. The stored
/// geometry of the grid is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalSigns {
    signs: Vec<i8>,
}

impl NormalSigns {
    /// Keep the orientation given by the corner ordering for all elements.
    pub fn all_positive(nelements: usize) -> Self {
        Self {
            signs: vec![1; nelements],
        }
    }

    /// Create from a vector of signs.
    pub fn from_vec(signs: Vec<i8>) -> BemppResult<Self> {
        if let Some((element, sign)) = signs
            .iter()
            .enumerate()
            .find(|(_, s)| **s != 1 && **s != -1)
        {
            return Err(BemppError::InvalidNormalSign {
                element,
                sign: *sign,
            });
        }
        Ok(Self { signs })
    }

    /// Number of elements covered
    pub fn len(&self) -> usize {
        self.signs.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }

    /// The sign of an element
    pub fn sign(&self, element: usize) -> BemppResult<i8> {
        self.signs
            .get(element)
            .copied()
            .ok_or(BemppError::ElementOutOfRange {
                element,
                nelements: self.signs.len(),
            })
    }

    /// Reverse the orientation of an element
    pub fn flip(&mut self, element: usize) -> BemppResult<()> {
        let nelements = self.signs.len();
        let sign = self
            .signs
            .get_mut(element)
            .ok_or(BemppError::ElementOutOfRange { element, nelements })?;
        *sign = -*sign;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flip() {
        let mut signs = NormalSigns::all_positive(3);
        signs.flip(1).unwrap();
        assert_eq!(signs.sign(0), Ok(1));
        assert_eq!(signs.sign(1), Ok(-1));
        signs.flip(1).unwrap();
        assert_eq!(signs.sign(1), Ok(1));
    }

    #[test]
    fn test_out_of_range() {
        let mut signs = NormalSigns::all_positive(2);
        assert_eq!(
            signs.sign(2),
            Err(BemppError::ElementOutOfRange {
                element: 2,
                nelements: 2
            })
        );
        assert!(signs.flip(5).is_err());
        assert_eq!(signs, NormalSigns::all_positive(2));
    }

    #[test]
    fn test_invalid_sign() {
        assert_eq!(
            NormalSigns::from_vec(vec![1, -1, 0]),
            Err(BemppError::InvalidNormalSign {
                element: 2,
                sign: 0
            })
        );
    }
}
