//! PDB file writer
//!
//! Writes a single `MODEL 1` with fixed-column `ATOM` records. Mass and
//! charge go to the occupancy and B-factor columns.

use std::io::Write;

use zalign_mol::{Atom, Structure};

use crate::error::IoResult;
use crate::traits::{StructureWriter, WriteOptions};

/// PDB file writer
pub struct PdbWriter<W> {
    writer: W,
    options: WriteOptions,
}

impl<W: Write> PdbWriter<W> {
    /// Create a new PDB writer
    pub fn new(writer: W, options: WriteOptions) -> Self {
        PdbWriter { writer, options }
    }

    /// Write ATOM record
    fn write_atom(&mut self, atom: &Atom) -> IoResult<()> {
        let [x, y, z] = atom.xyz();
        let chain = atom.chain().chars().next().unwrap_or(' ');
        let element = atom.element().chars().next().map(String::from).unwrap_or_default();

        writeln!(
            self.writer,
            "ATOM  {:5} {:4} {:>3} {}{:4}    {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}          {:>2}",
            atom.index() % 100_000,
            format_atom_name(atom.element()),
            truncate(atom.res_name(), 3),
            chain,
            atom.res_index(),
            x,
            y,
            z,
            atom.mass(),
            atom.charge(),
            element
        )?;
        Ok(())
    }

    fn write_structure(&mut self, structure: &Structure) -> IoResult<()> {
        writeln!(self.writer, "TITLE     {}", self.options.title())?;
        writeln!(self.writer, "MODEL        1")?;
        for atom in structure.atoms() {
            self.write_atom(atom)?;
        }
        writeln!(self.writer, "TER")?;
        writeln!(self.writer, "ENDMDL")?;

        if self.options.write_bonds {
            for bond in structure.bonds() {
                write!(self.writer, "CONECT{:5}", bond.index)?;
                for partner in &bond.bonded {
                    write!(self.writer, "{:5}", partner)?;
                }
                writeln!(self.writer)?;
            }
        }

        writeln!(self.writer, "END")?;
        Ok(())
    }
}

impl<W: Write> StructureWriter for PdbWriter<W> {
    fn write(&mut self, structure: &Structure) -> IoResult<()> {
        self.write_structure(structure)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Atom names shorter than four characters start in column 14
fn format_atom_name(name: &str) -> String {
    if name.len() >= 4 {
        truncate(name, 4).to_string()
    } else {
        format!(" {:<3}", name)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StructureReader;
    use lin_alg::f64::Vec3;
    use zalign_mol::Bond;

    fn sample() -> Structure {
        Structure::builder("sample")
            .atom(
                Atom::builder(1, "N")
                    .residue("ALA", 1)
                    .chain("B")
                    .coord(Vec3::new(11.104, 6.134, -6.504))
                    .mass(14.01)
                    .charge(-0.5)
                    .build(),
            )
            .atom(
                Atom::builder(2, "CA")
                    .residue("ALA", 1)
                    .chain("B")
                    .xyz(-123.4567, 0.0, 99.9996)
                    .build(),
            )
            .bond(Bond::new(1, vec![2]))
            .bond(Bond::new(2, vec![1]))
            .build()
    }

    fn write(structure: &Structure, options: WriteOptions) -> String {
        let mut output = Vec::new();
        PdbWriter::new(&mut output, options).write(structure).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_write_layout() {
        let text = write(&sample(), WriteOptions::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "TITLE     Aligned molecule");
        assert_eq!(lines[1], "MODEL        1");
        assert_eq!(
            lines[2],
            "ATOM      1  N   ALA B   1      11.104   6.134  -6.504 14.01 -0.50           N"
        );
        assert_eq!(&lines[3][12..16], " CA ");
        assert_eq!(lines[4], "TER");
        assert_eq!(lines[5], "ENDMDL");
        assert_eq!(lines[6], "CONECT    1    2");
        assert_eq!(lines[7], "CONECT    2    1");
        assert_eq!(lines[8], "END");
    }

    #[test]
    fn test_write_without_bonds_and_custom_title() {
        let options = WriteOptions::new().with_title("custom").with_bonds(false);
        let text = write(&sample(), options);
        assert!(text.starts_with("TITLE     custom\n"));
        assert!(!text.contains("CONECT"));
    }

    #[test]
    fn test_roundtrip() {
        let original = sample();
        let text = write(&original, WriteOptions::default());
        let parsed = crate::pdb::PdbReader::new(text.as_bytes()).read().unwrap();

        assert_eq!(parsed.atom_count(), 2);
        assert_eq!(parsed.title(), "Aligned molecule");
        assert_eq!(parsed.bonds(), original.bonds());
        let ca = &parsed.atoms()[1];
        assert_eq!(ca.element(), "CA");
        assert_eq!(ca.chain(), "B");
        assert_eq!(ca.xyz(), [-123.457, 0.0, 100.0]);
        assert_eq!(parsed.atoms()[0].mass(), 14.01);
    }

    #[test]
    fn test_format_atom_name() {
        assert_eq!(format_atom_name("N"), " N  ");
        assert_eq!(format_atom_name("CA"), " CA ");
        assert_eq!(format_atom_name("HG21"), "HG21");
        assert_eq!(format_atom_name("HG212"), "HG21");
    }
}
