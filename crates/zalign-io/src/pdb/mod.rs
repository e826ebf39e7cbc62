//! PDB file format parser and writer
//!
//! Provides reading and writing of Protein Data Bank (PDB) format files.
//! Only the first model is read; `CONECT` records are kept verbatim.

mod parser;
mod writer;

pub use parser::PdbReader;
pub use writer::PdbWriter;

use std::io::Read;
use std::path::Path;

use zalign_mol::Structure;

use crate::error::IoResult;
use crate::traits::StructureReader;

/// Read a PDB file from a path
pub fn read_pdb(path: &Path) -> IoResult<Structure> {
    let file = crate::compress::open_file(path)?;
    let mut reader = PdbReader::new(file);
    reader.read()
}

/// Read a PDB file from a string
pub fn read_pdb_str(content: &str) -> IoResult<Structure> {
    let mut reader = PdbReader::new(content.as_bytes());
    reader.read()
}

/// Read a PDB file from a reader
pub fn read_pdb_from<R: Read>(reader: R) -> IoResult<Structure> {
    let mut reader = PdbReader::new(reader);
    reader.read()
}
