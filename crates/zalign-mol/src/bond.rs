//! Bond data structure
//!
//! A `Bond` mirrors one PDB `CONECT` record: an atom serial number and
//! the serials it is bonded to. Bonds are carried through alignment
//! verbatim and never consulted by it.

/// Connectivity record for one atom
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bond {
    /// Serial number of the central atom
    pub index: i32,
    /// Serial numbers of bonded partners, in record order
    pub bonded: Vec<i32>,
}

impl Bond {
    /// Create a bond record owning its own partner list
    pub fn new(index: i32, bonded: impl Into<Vec<i32>>) -> Self {
        Bond {
            index,
            bonded: bonded.into(),
        }
    }

    /// Number of bonded partners
    #[inline]
    pub fn partner_count(&self) -> usize {
        self.bonded.len()
    }

    /// Check whether `serial` is listed as a partner
    #[inline]
    pub fn is_bonded_to(&self, serial: i32) -> bool {
        self.bonded.contains(&serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_lists_are_independent() {
        let mut a = Bond::new(1, Vec::new());
        let b = Bond::new(2, Vec::new());
        a.bonded.push(5);

        assert_eq!(a.partner_count(), 1);
        assert_eq!(b.partner_count(), 0);
        assert!(a.is_bonded_to(5));
        assert!(!b.is_bonded_to(5));
    }

    #[test]
    fn test_from_slice() {
        let bond = Bond::new(3, [4, 7, 9]);
        assert_eq!(bond.bonded, vec![4, 7, 9]);
    }
}
