//! XYZ file writer

use std::io::Write;

use zalign_mol::Structure;

use crate::error::IoResult;
use crate::traits::{StructureWriter, WriteOptions};

/// XYZ file writer
pub struct XyzWriter<W> {
    writer: W,
    options: WriteOptions,
}

impl<W: Write> XyzWriter<W> {
    /// Create a new XYZ writer
    pub fn new(writer: W, options: WriteOptions) -> Self {
        XyzWriter { writer, options }
    }
}

impl<W: Write> StructureWriter for XyzWriter<W> {
    fn write(&mut self, structure: &Structure) -> IoResult<()> {
        writeln!(self.writer, "{}", structure.atom_count())?;
        writeln!(self.writer, "{}", self.options.title())?;
        for atom in structure.atoms() {
            let [x, y, z] = atom.xyz();
            writeln!(self.writer, "{}   {:.6}   {:.6}   {:.6}", atom.element(), x, y, z)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
