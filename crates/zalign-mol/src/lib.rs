//! Molecular data structures for zalign
//!
//! This crate provides the in-memory representation handed between the
//! format readers/writers and the alignment core:
//!
//! - [`Atom`] - One atom: identity fields, position and auxiliary data
//! - [`Bond`] - A CONECT-style connectivity record (passthrough metadata)
//! - [`Structure`] - Ordered atoms plus bond records
//! - [`ElementFilter`] - Set of element names restricting which atoms participate
//!
//! # Example
//!
//! ```rust
//! use zalign_mol::{Atom, ElementFilter, Structure};
//! use lin_alg::f64::Vec3;
//!
//! let structure = Structure::builder("water")
//!     .atom(Atom::new(1, "O", Vec3::new(0.0, 0.0, 0.0)))
//!     .atom(Atom::new(2, "H", Vec3::new(0.96, 0.0, 0.0)))
//!     .atom(Atom::new(3, "H", Vec3::new(-0.24, 0.93, 0.0)))
//!     .build();
//!
//! let hydrogens: ElementFilter = "H".parse().unwrap();
//! assert_eq!(structure.atom_count(), 3);
//! assert_eq!(structure.count(Some(&hydrogens)), 2);
//! ```

mod atom;
mod bond;
mod error;
mod filter;
mod structure;

pub use atom::{Atom, AtomBuilder, UNKNOWN_PROPERTY};
pub use bond::Bond;
pub use error::{MolError, MolResult};
pub use filter::ElementFilter;
pub use structure::{Structure, StructureBuilder};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::atom::{Atom, AtomBuilder};
    pub use crate::bond::Bond;
    pub use crate::error::{MolError, MolResult};
    pub use crate::filter::ElementFilter;
    pub use crate::structure::{Structure, StructureBuilder};
}
