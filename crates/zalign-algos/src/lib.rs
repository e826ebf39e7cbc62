//! Computational algorithms for zalign
//!
//! This crate implements the alignment core:
//! - Analytical 3×3 SVD decomposition
//! - Kabsch algorithm for the least-squares rigid-body superposition
//! - Compatibility validation of two structures under an element filter
//! - RMSD evaluation
//! - [`align`], which composes all of the above
//!
//! # Example
//!
//! ```rust
//! use zalign_algos::{align, AlignOptions};
//! use zalign_mol::{Atom, Structure};
//! use lin_alg::f64::Vec3;
//!
//! let reference = Structure::builder("ref")
//!     .atom(Atom::new(1, "C", Vec3::new(5.0, 5.0, 5.0)))
//!     .atom(Atom::new(2, "O", Vec3::new(5.0, 6.0, 5.0)))
//!     .atom(Atom::new(3, "N", Vec3::new(4.0, 5.0, 5.0)))
//!     .build();
//! let mut movable = Structure::builder("mov")
//!     .atom(Atom::new(1, "C", Vec3::new(0.0, 0.0, 0.0)))
//!     .atom(Atom::new(2, "O", Vec3::new(1.0, 0.0, 0.0)))
//!     .atom(Atom::new(3, "N", Vec3::new(0.0, 1.0, 0.0)))
//!     .build();
//!
//! let outcome = align(&mut movable, &reference, &AlignOptions::default())?;
//! let report = outcome.rmsd.unwrap();
//! assert_eq!(report.count, 3);
//! assert!(report.value < 1e-6);
//! # Ok::<(), zalign_algos::AlignError>(())
//! ```
//!
//! # Known limitation
//!
//! The rotation is taken straight from the SVD without a determinant sign
//! correction. Mirror-related point sets can therefore yield an improper
//! rotation (det = -1); [`Superposition::is_proper_rotation`] reports it.

pub mod linalg;

mod align;
mod kabsch;
mod rmsd;
mod validate;

use std::fmt;

use zalign_mol::MolError;

pub use align::{align, AlignOptions, AlignOutcome};
pub use kabsch::{kabsch, Superposition};
pub use linalg::{svd3, Mat3, Svd3};
pub use rmsd::{rmsd, rmsd_coords, RmsdReport};
pub use validate::validate;

/// Which of the two structures an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The structure being moved
    Movable,
    /// The fixed structure
    Reference,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Movable => write!(f, "Movable"),
            Side::Reference => write!(f, "Reference"),
        }
    }
}

/// Errors from validation and alignment
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlignError {
    #[error("Movable and Reference structures don't have the same number of atoms ({movable} vs {reference})")]
    CountMismatch { movable: usize, reference: usize },

    #[error("Movable and Reference structures do not have the same element order (position {position}: {movable} vs {reference})")]
    OrderMismatch {
        position: usize,
        movable: String,
        reference: String,
    },

    #[error("Atom element {element} not found in {side} structure")]
    FilterElementNotFound { element: String, side: Side },

    #[error("No atoms selected; centroid and RMSD are undefined")]
    DegenerateInput,

    #[error("Coordinate arrays have different lengths: {0} vs {1}")]
    LengthMismatch(usize, usize),

    #[error(transparent)]
    Mol(#[from] MolError),
}
