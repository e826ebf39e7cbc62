//! GRO format writer (GROMACS structure file)
//!
//! Coordinates are converted from angstrom to nanometers. The box line is
//! always zero; bond records have no GRO representation and are dropped.

use std::io::Write;

use zalign_mol::Structure;

use super::ANGSTROM_TO_NM;
use crate::error::IoResult;
use crate::traits::{StructureWriter, WriteOptions};

/// GRO file writer
pub struct GroWriter<W> {
    writer: W,
    options: WriteOptions,
}

impl<W: Write> GroWriter<W> {
    /// Create a new GRO writer
    pub fn new(writer: W, options: WriteOptions) -> Self {
        GroWriter { writer, options }
    }

    fn write_frame(&mut self, structure: &Structure) -> IoResult<()> {
        writeln!(self.writer, "{}", self.options.title())?;
        writeln!(self.writer, "{:5}", structure.atom_count())?;

        // %5d%-5s%5s%5d%8.3f%8.3f%8.3f
        for atom in structure.atoms() {
            let [x, y, z] = atom.xyz();
            writeln!(
                self.writer,
                "{:5}{:<5}{:>5}{:5}{:8.3}{:8.3}{:8.3}",
                atom.res_index(),
                truncate(atom.res_name(), 5),
                truncate(atom.element(), 5),
                atom.index() % 100_000,
                x * ANGSTROM_TO_NM,
                y * ANGSTROM_TO_NM,
                z * ANGSTROM_TO_NM,
            )?;
        }

        writeln!(self.writer, "{:10.5}{:10.5}{:10.5}", 0.0, 0.0, 0.0)?;

        if structure.bond_count() > 0 {
            log::debug!(
                "GRO output drops {} bond records",
                structure.bond_count()
            );
        }
        Ok(())
    }
}

impl<W: Write> StructureWriter for GroWriter<W> {
    fn write(&mut self, structure: &Structure) -> IoResult<()> {
        self.write_frame(structure)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Truncate a string to at most `max` characters
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
