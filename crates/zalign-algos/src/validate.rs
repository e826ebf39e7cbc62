//! Compatibility checks run before any coordinate is touched

use zalign_mol::{ElementFilter, Structure};

use crate::{AlignError, Side};

/// Check that `movable` and `reference` can be aligned under `filter`.
///
/// Checks, in order:
/// 1. both sides select the same number of atoms;
/// 2. walking both atom lists by position, every position where *both*
///    atoms pass the filter carries the same element (positions where only
///    one side passes are skipped);
/// 3. every filter element occurs at least once on each side, movable first.
///
/// Never mutates either structure.
pub fn validate(
    movable: &Structure,
    reference: &Structure,
    filter: Option<&ElementFilter>,
) -> Result<(), AlignError> {
    let n_movable = movable.count(filter);
    let n_reference = reference.count(filter);
    if n_movable != n_reference {
        return Err(AlignError::CountMismatch {
            movable: n_movable,
            reference: n_reference,
        });
    }

    for (position, (a, b)) in movable.atoms().iter().zip(reference.atoms()).enumerate() {
        if a.matches(filter) && b.matches(filter) && a.element() != b.element() {
            return Err(AlignError::OrderMismatch {
                position,
                movable: a.element().to_string(),
                reference: b.element().to_string(),
            });
        }
    }

    if let Some(filter) = filter {
        for element in filter.elements() {
            for (side, structure) in [(Side::Movable, movable), (Side::Reference, reference)] {
                if !structure.contains_element(element) {
                    return Err(AlignError::FilterElementNotFound {
                        element: element.to_string(),
                        side,
                    });
                }
            }
        }
    }

    log::debug!(
        "Validated {} selected atoms per side ({} filter)",
        n_movable,
        filter.map_or_else(|| "no".to_string(), |f| format!("'{}'", f))
    );
    Ok(())
}
