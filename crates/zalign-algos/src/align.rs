//! Top-level alignment of one structure onto another

use zalign_mol::{ElementFilter, Structure};

use crate::kabsch::{kabsch, Superposition};
use crate::rmsd::{rmsd, RmsdReport};
use crate::validate::validate;
use crate::AlignError;

/// Options for [`align`]
#[derive(Debug, Clone)]
pub struct AlignOptions {
    /// Elements whose atoms drive the fit and the reported RMSD.
    /// `None` uses every atom.
    pub filter: Option<ElementFilter>,
    /// Compute the post-alignment RMSD
    pub report: bool,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            filter: None,
            report: true,
        }
    }
}

impl AlignOptions {
    /// Default options restricted to `filter`
    pub fn with_filter(filter: ElementFilter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }
}

/// Result of a successful [`align`]
#[derive(Debug, Clone)]
pub struct AlignOutcome {
    /// The transform that was applied to the movable structure
    pub superposition: Superposition,
    /// Fit quality, present when [`AlignOptions::report`] is set
    pub rmsd: Option<RmsdReport>,
}

/// Superimpose `movable` onto `reference` in place.
///
/// The filtered atoms determine the rotation; the resulting transform is
/// then applied to every atom of `movable`. On error `movable` is left
/// untouched.
pub fn align(
    movable: &mut Structure,
    reference: &Structure,
    options: &AlignOptions,
) -> Result<AlignOutcome, AlignError> {
    let filter = options.filter.as_ref();

    validate(movable, reference, filter)?;

    let p = movable.coords(filter);
    let q = reference.coords(filter);
    let superposition = kabsch(&p, &q)?;

    let transformed = superposition.transform_points(&movable.all_coords());
    movable.apply_coords(&transformed)?;

    log::info!(
        "Aligned {} onto {} using {} of {} atoms",
        movable.title(),
        reference.title(),
        superposition.n_atoms,
        movable.atom_count()
    );

    let rmsd = if options.report {
        Some(rmsd(movable, reference, filter)?)
    } else {
        None
    };

    Ok(AlignOutcome {
        superposition,
        rmsd,
    })
}
