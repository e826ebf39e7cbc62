//! Structure collection
//!
//! A `Structure` is the ordered atom list of one molecular structure plus
//! its bond records. Atom order is significant: the Nth atom of one
//! structure is assumed to correspond to the Nth atom of another.

use std::fmt;

use lin_alg::f64::Vec3;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::error::{MolError, MolResult};
use crate::filter::ElementFilter;

/// Ordered atoms and passthrough bond records of one structure
///
/// Atoms cannot be added, removed or reordered once built; only their
/// coordinates can change, via [`Structure::apply_coords`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    title: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Structure {
    /// Create a structure from already-ordered atoms and bond records
    pub fn new(title: impl Into<String>, atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        Structure {
            title: title.into(),
            atoms,
            bonds,
        }
    }

    /// Start building a structure
    pub fn builder(title: impl Into<String>) -> StructureBuilder {
        StructureBuilder::new(title)
    }

    /// Title line carried by the source file (may be empty)
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Total number of atoms
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Check if the structure has no atoms
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Atoms in source order
    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Get an atom by position
    #[inline]
    pub fn atom(&self, position: usize) -> Option<&Atom> {
        self.atoms.get(position)
    }

    /// Bond records in source order
    #[inline]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Number of bond records
    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Count atoms passing `filter` (all atoms when `None`)
    pub fn count(&self, filter: Option<&ElementFilter>) -> usize {
        self.atoms.iter().filter(|a| a.matches(filter)).count()
    }

    /// Count atoms whose element is exactly `element`
    pub fn count_element(&self, element: &str) -> usize {
        self.atoms.iter().filter(|a| a.element() == element).count()
    }

    /// Check if at least one atom has element `element`
    pub fn contains_element(&self, element: &str) -> bool {
        self.atoms.iter().any(|a| a.element() == element)
    }

    /// Positions of the atoms passing `filter`, one per atom, in source order
    ///
    /// Yields an empty vector when nothing passes.
    pub fn coords(&self, filter: Option<&ElementFilter>) -> Vec<Vec3> {
        self.atoms
            .iter()
            .filter(|a| a.matches(filter))
            .map(Atom::coord)
            .collect()
    }

    /// Positions of every atom, in source order
    pub fn all_coords(&self) -> Vec<Vec3> {
        self.coords(None)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Overwrite every atom's position, in order
    ///
    /// `coords` must hold exactly one position per atom; otherwise nothing
    /// is written and `CoordinateMismatch` is returned.
    pub fn apply_coords(&mut self, coords: &[Vec3]) -> MolResult<()> {
        if coords.len() != self.atoms.len() {
            return Err(MolError::CoordinateMismatch {
                expected: self.atoms.len(),
                actual: coords.len(),
            });
        }
        for (atom, &coord) in self.atoms.iter_mut().zip(coords) {
            atom.set_coord(coord);
        }
        Ok(())
    }

    /// Translate every atom by `delta`
    pub fn translate(&mut self, delta: Vec3) {
        for atom in &mut self.atoms {
            atom.set_coord(atom.coord() + delta);
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.title.is_empty() {
            "structure"
        } else {
            &self.title
        };
        write!(
            f,
            "{}: {} atoms, {} bonds",
            title,
            self.atoms.len(),
            self.bonds.len()
        )
    }
}

/// Builder used by readers to assemble a [`Structure`] in order
#[derive(Debug, Default)]
pub struct StructureBuilder {
    structure: Structure,
}

impl StructureBuilder {
    /// Create a new builder
    pub fn new(title: impl Into<String>) -> Self {
        StructureBuilder {
            structure: Structure {
                title: title.into(),
                ..Default::default()
            },
        }
    }

    /// Create a builder with reserved atom capacity
    pub fn with_capacity(title: impl Into<String>, atoms: usize) -> Self {
        StructureBuilder {
            structure: Structure {
                title: title.into(),
                atoms: Vec::with_capacity(atoms),
                bonds: Vec::new(),
            },
        }
    }

    /// Append an atom
    pub fn atom(mut self, atom: Atom) -> Self {
        self.structure.atoms.push(atom);
        self
    }

    /// Append a bond record
    pub fn bond(mut self, bond: Bond) -> Self {
        self.structure.bonds.push(bond);
        self
    }

    /// Append an atom in place (for reader loops)
    pub fn push_atom(&mut self, atom: Atom) {
        self.structure.atoms.push(atom);
    }

    /// Append a bond record in place (for reader loops)
    pub fn push_bond(&mut self, bond: Bond) {
        self.structure.bonds.push(bond);
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.structure.title = title.into();
        self
    }

    /// Number of atoms pushed so far
    pub fn atom_count(&self) -> usize {
        self.structure.atoms.len()
    }

    /// Build the structure
    pub fn build(self) -> Structure {
        self.structure
    }
}
