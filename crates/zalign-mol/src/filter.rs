//! Element filter
//!
//! Names the elements (or atom names) whose atoms determine the best-fit
//! rotation and the reported RMSD. The transform itself always applies
//! to every atom.

use std::fmt;
use std::str::FromStr;

use crate::error::{MolError, MolResult};

/// Non-empty, ordered set of element names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementFilter {
    elements: Vec<String>,
}

impl ElementFilter {
    /// Build a filter from element names. Duplicates are dropped, first
    /// occurrence order is kept.
    pub fn new<I, S>(elements: I) -> MolResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for element in elements {
            let element = element.into();
            if !unique.contains(&element) {
                unique.push(element);
            }
        }
        if unique.is_empty() {
            return Err(MolError::EmptyFilter);
        }
        Ok(ElementFilter { elements: unique })
    }

    /// Check whether `element` is named by this filter (exact, case-sensitive)
    #[inline]
    pub fn contains(&self, element: &str) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    /// Named elements in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(String::as_str)
    }

    /// Number of distinct elements named
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false; a filter names at least one element
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromStr for ElementFilter {
    type Err = MolError;

    /// Parse a comma- and/or whitespace-separated list, e.g. `"C, N CA"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementFilter::new(
            s.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty()),
        )
    }
}

impl fmt::Display for ElementFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elements.join(" "))
    }
}
