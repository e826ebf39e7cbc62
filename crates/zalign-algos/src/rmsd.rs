//! Root-mean-square deviation between matched point sets

use std::fmt;

use lin_alg::f64::Vec3;
use zalign_mol::{ElementFilter, Structure};

use crate::AlignError;

/// Fit quality after alignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsdReport {
    /// Number of atom pairs compared
    pub count: usize,
    /// RMSD in angstrom
    pub value: f64,
}

impl fmt::Display for RmsdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RMSD: {:6.3} angstrom ({:3} atoms)", self.value, self.count)
    }
}

/// RMSD between two matched coordinate sets
///
/// `sqrt(Σ |b_i - a_i|² / n)`, where `n` is the number of rows.
pub fn rmsd_coords(a: &[Vec3], b: &[Vec3]) -> Result<f64, AlignError> {
    if a.len() != b.len() {
        return Err(AlignError::LengthMismatch(a.len(), b.len()));
    }
    if a.is_empty() {
        return Err(AlignError::DegenerateInput);
    }

    let sum_sq: f64 = a
        .iter()
        .zip(b)
        .map(|(p, q)| {
            let d = *q - *p;
            d.x * d.x + d.y * d.y + d.z * d.z
        })
        .sum();

    Ok((sum_sq / a.len() as f64).sqrt())
}

/// RMSD between the atoms of `movable` and `reference` selected by `filter`
///
/// Does not validate element order; callers that need that guarantee run
/// [`validate`](crate::validate) first. Selected sets of different size are
/// reported as `LengthMismatch`.
pub fn rmsd(
    movable: &Structure,
    reference: &Structure,
    filter: Option<&ElementFilter>,
) -> Result<RmsdReport, AlignError> {
    let m = movable.coords(filter);
    let r = reference.coords(filter);
    let value = rmsd_coords(&m, &r)?;
    Ok(RmsdReport {
        count: r.len(),
        value,
    })
}
