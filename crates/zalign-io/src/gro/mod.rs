//! GROMACS GRO file format parser and writer
//!
//! Coordinates are stored in nanometers and converted to/from angstrom.

mod parser;
mod writer;

pub use parser::GroReader;
pub use writer::GroWriter;

use std::io::Read;
use std::path::Path;

use zalign_mol::Structure;

use crate::error::IoResult;
use crate::traits::StructureReader;

/// Nanometers to angstrom conversion factor
pub const NM_TO_ANGSTROM: f64 = 10.0;

/// Angstrom to nanometers conversion factor
pub const ANGSTROM_TO_NM: f64 = 0.1;

/// Read a GRO file from a path
pub fn read_gro(path: &Path) -> IoResult<Structure> {
    let file = crate::compress::open_file(path)?;
    let mut reader = GroReader::new(file);
    reader.read()
}

/// Read a GRO file from a string
pub fn read_gro_str(content: &str) -> IoResult<Structure> {
    let mut reader = GroReader::new(content.as_bytes());
    reader.read()
}

/// Read a GRO file from a reader
pub fn read_gro_from<R: Read>(reader: R) -> IoResult<Structure> {
    let mut reader = GroReader::new(reader);
    reader.read()
}
