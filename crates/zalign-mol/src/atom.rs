//! Atom data structure
//!
//! Provides the `Atom` record: identity fields fixed at construction,
//! a position that the alignment core may overwrite, and auxiliary
//! mass/charge values.

use lin_alg::f64::Vec3;

use crate::filter::ElementFilter;

/// Sentinel written by readers for a mass or charge the format does not carry
pub const UNKNOWN_PROPERTY: f64 = -1.0;

/// A single atom of a [`Structure`](crate::Structure)
///
/// Only the position is mutable after construction (see [`Atom::set_coord`]).
/// Everything else is set through [`Atom::new`] or [`AtomBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    index: i32,
    element: String,
    res_name: String,
    res_index: i32,
    chain: String,
    coord: [f64; 3],
    mass: f64,
    charge: f64,
}

impl Atom {
    /// Create an atom with default residue data (`"NaN"`, -1, chain `"A"`)
    /// and zero mass/charge
    pub fn new(index: i32, element: impl Into<String>, coord: Vec3) -> Self {
        AtomBuilder::new(index, element).coord(coord).build()
    }

    /// Start building an atom with the given index and element/atom name
    pub fn builder(index: i32, element: impl Into<String>) -> AtomBuilder {
        AtomBuilder::new(index, element)
    }

    /// Source-format serial number (1-based, not necessarily contiguous)
    #[inline]
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Element symbol or atom name as written in the source file
    #[inline]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Residue name
    #[inline]
    pub fn res_name(&self) -> &str {
        &self.res_name
    }

    /// Residue sequence number
    #[inline]
    pub fn res_index(&self) -> i32 {
        self.res_index
    }

    /// Chain identifier
    #[inline]
    pub fn chain(&self) -> &str {
        &self.chain
    }

    /// Position in angstrom
    #[inline]
    pub fn coord(&self) -> Vec3 {
        let [x, y, z] = self.coord;
        Vec3::new(x, y, z)
    }

    /// Position as a plain array
    #[inline]
    pub fn xyz(&self) -> [f64; 3] {
        self.coord
    }

    /// Overwrite the position (angstrom)
    #[inline]
    pub fn set_coord(&mut self, coord: Vec3) {
        self.coord = [coord.x, coord.y, coord.z];
    }

    /// Raw mass value, possibly a sentinel
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Raw charge value, possibly a sentinel
    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// Mass, or `None` when the reader stored a sentinel (-1.0 or 0.0)
    pub fn known_mass(&self) -> Option<f64> {
        known(self.mass)
    }

    /// Charge, or `None` when the reader stored the -1.0 sentinel
    pub fn known_charge(&self) -> Option<f64> {
        (self.charge != UNKNOWN_PROPERTY).then_some(self.charge)
    }

    /// Whether this atom passes `filter` (every atom passes when there is none)
    #[inline]
    pub fn matches(&self, filter: Option<&ElementFilter>) -> bool {
        filter.map_or(true, |f| f.contains(&self.element))
    }
}

fn known(value: f64) -> Option<f64> {
    if value == UNKNOWN_PROPERTY || value == 0.0 {
        None
    } else {
        Some(value)
    }
}

/// Builder for [`Atom`]
#[derive(Debug, Clone)]
pub struct AtomBuilder {
    atom: Atom,
}

impl AtomBuilder {
    /// Create a builder with default residue data
    pub fn new(index: i32, element: impl Into<String>) -> Self {
        AtomBuilder {
            atom: Atom {
                index,
                element: element.into(),
                res_name: "NaN".to_string(),
                res_index: -1,
                chain: "A".to_string(),
                coord: [0.0; 3],
                mass: 0.0,
                charge: 0.0,
            },
        }
    }

    /// Set residue name and sequence number
    pub fn residue(mut self, name: impl Into<String>, index: i32) -> Self {
        self.atom.res_name = name.into();
        self.atom.res_index = index;
        self
    }

    /// Set the chain identifier
    pub fn chain(mut self, chain: impl Into<String>) -> Self {
        self.atom.chain = chain.into();
        self
    }

    /// Set the position (angstrom)
    pub fn coord(self, coord: Vec3) -> Self {
        self.xyz(coord.x, coord.y, coord.z)
    }

    /// Set the position from components (angstrom)
    pub fn xyz(mut self, x: f64, y: f64, z: f64) -> Self {
        self.atom.coord = [x, y, z];
        self
    }

    /// Set mass
    pub fn mass(mut self, mass: f64) -> Self {
        self.atom.mass = mass;
        self
    }

    /// Set charge
    pub fn charge(mut self, charge: f64) -> Self {
        self.atom.charge = charge;
        self
    }

    /// Build the atom
    pub fn build(self) -> Atom {
        self.atom
    }
}
