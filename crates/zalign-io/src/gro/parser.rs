//! GROMACS GRO file parser
//!
//! Atom lines are fixed-width (`%5d%-5s%5s%5d%8.3f%8.3f%8.3f`). Lines whose
//! coordinates are not column-aligned are read by whitespace tokens instead.

use std::io::{BufRead, BufReader, Read};

use zalign_mol::{Atom, Structure, UNKNOWN_PROPERTY};

use super::NM_TO_ANGSTROM;
use crate::error::{IoError, IoResult};
use crate::traits::StructureReader;

/// GRO file reader
pub struct GroReader<R> {
    reader: BufReader<R>,
    line_number: usize,
}

impl<R: Read> GroReader<R> {
    /// Create a new GRO reader
    pub fn new(reader: R) -> Self {
        GroReader {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Read a single line from the file
    fn read_line(&mut self) -> IoResult<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.line_number += 1;
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Ok(Some(line))
            }
            Err(e) => Err(IoError::Io(e)),
        }
    }

    /// Parse the first frame of the file
    fn parse_frame(&mut self) -> IoResult<Structure> {
        // Line 1: Title
        let title = match self.read_line()? {
            Some(line) => line.trim().to_string(),
            None => return Err(IoError::EmptyFile),
        };

        // Line 2: Number of atoms
        let n_atoms: usize = match self.read_line()? {
            Some(line) => line
                .trim()
                .parse()
                .map_err(|_| IoError::parse(self.line_number, "Invalid atom count"))?,
            None => {
                return Err(IoError::parse(
                    self.line_number,
                    "Expected atom count after title",
                ))
            }
        };

        if n_atoms == 0 {
            return Err(IoError::EmptyFile);
        }

        let mut builder = Structure::builder(title);
        for i in 0..n_atoms {
            let line = match self.read_line()? {
                Some(line) => line,
                None => {
                    return Err(IoError::parse(
                        self.line_number,
                        format!("Expected atom {} of {}, got end of file", i + 1, n_atoms),
                    ))
                }
            };
            let atom = parse_atom_line(&line)
                .map_err(|message| IoError::parse(self.line_number, message))?;
            builder.push_atom(atom);
        }

        // Box vectors are not kept
        if self.read_line()?.is_none() {
            log::warn!("GRO file has no box vector line");
        }

        let structure = builder.build();
        log::debug!("Parsed GRO: {}", structure);
        Ok(structure)
    }
}

impl<R: Read> StructureReader for GroReader<R> {
    fn read(&mut self) -> IoResult<Structure> {
        self.parse_frame()
    }
}

/// `%8.3f` coordinates at columns 21-44 put the decimal point at byte
/// offsets 24, 32 and 40.
fn is_column_aligned(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 44 && bytes[24] == b'.' && bytes[32] == b'.' && bytes[40] == b'.'
}

/// Parse a GRO atom line into an [`Atom`] with angstrom coordinates
pub(crate) fn parse_atom_line(line: &str) -> Result<Atom, String> {
    let fields = if is_column_aligned(line) {
        column_fields(line)
    } else {
        token_fields(line)?
    };

    let res_index: i32 = fields[0]
        .parse()
        .map_err(|_| format!("invalid residue number '{}'", fields[0]))?;
    let index: i32 = fields[3]
        .parse()
        .map_err(|_| format!("invalid atom number '{}'", fields[3]))?;
    let nm = |i: usize| {
        fields[i]
            .parse::<f64>()
            .map(|v| v * NM_TO_ANGSTROM)
            .map_err(|_| format!("invalid coordinate '{}'", fields[i]))
    };
    let (x, y, z) = (nm(4)?, nm(5)?, nm(6)?);

    Ok(Atom::builder(index, fields[2])
        .residue(fields[1], res_index)
        .xyz(x, y, z)
        .mass(UNKNOWN_PROPERTY)
        .charge(UNKNOWN_PROPERTY)
        .build())
}

/// `[resnum, resname, name, atomnum, x, y, z]` by fixed columns
fn column_fields(line: &str) -> [&str; 7] {
    let field = move |start: usize, end: usize| line.get(start..end).map(str::trim).unwrap_or("");
    [
        field(0, 5),
        field(5, 10),
        field(10, 15),
        field(15, 20),
        field(20, 28),
        field(28, 36),
        field(36, 44),
    ]
}

/// `[resnum, resname, name, atomnum, x, y, z]` by whitespace tokens
///
/// Accepts `1ALA N 1 x y z` (residue number fused with its name) as well
/// as `1 ALA N 1 x y z`.
fn token_fields(line: &str) -> Result<[&str; 7], String> {
    let t: Vec<&str> = line.split_whitespace().collect();
    if t.len() >= 7 && t[0].parse::<i32>().is_ok() {
        return Ok([t[0], t[1], t[2], t[3], t[4], t[5], t[6]]);
    }
    if t.len() >= 6 {
        let (res_index, res_name) = split_residue(t[0]);
        return Ok([res_index, res_name, t[1], t[2], t[3], t[4], t[5]]);
    }
    Err(format!(
        "atom line has {} fields, expected 'resnum resname name atomnum x y z'",
        t.len()
    ))
}

/// Split `"12ALA"` into `("12", "ALA")`; a leading sign belongs to the number
fn split_residue(token: &str) -> (&str, &str) {
    let digits_end = token
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    token.split_at(digits_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = "\
Water
    3
    1SOL     OW    1   0.126   0.639   0.322
    1SOL    HW1    2   0.187   0.713   0.394
    1SOL    HW2    3   0.145   0.584   0.241
   1.86206   1.86206   1.86206
";

    #[test]
    fn test_read_water() {
        let s = GroReader::new(WATER.as_bytes()).read().unwrap();
        assert_eq!(s.title(), "Water");
        assert_eq!(s.atom_count(), 3);

        let ow = &s.atoms()[0];
        assert_eq!(ow.index(), 1);
        assert_eq!(ow.element(), "OW");
        assert_eq!(ow.res_name(), "SOL");
        assert_eq!(ow.res_index(), 1);
        assert_eq!(ow.chain(), "A");
        assert!((ow.xyz()[0] - 1.26).abs() < 1e-9);
        assert!((ow.xyz()[2] - 3.22).abs() < 1e-9);
        assert_eq!(ow.mass(), UNKNOWN_PROPERTY);
        assert_eq!(ow.charge(), UNKNOWN_PROPERTY);
    }

    #[test]
    fn test_token_fallback() {
        // "%5d%3s %6s %4d %7.3f %7.3f %7.3f"
        let atom = parse_atom_line("    0MOL      C    1   0.000   0.150  -0.225").unwrap();
        assert_eq!(atom.res_index(), 0);
        assert_eq!(atom.res_name(), "MOL");
        assert_eq!(atom.element(), "C");
        assert!((atom.xyz()[1] - 1.5).abs() < 1e-9);
        assert!((atom.xyz()[2] + 2.25).abs() < 1e-9);

        let atom = parse_atom_line("   -2NaN      O    4   1.000   0.000   0.000").unwrap();
        assert_eq!(atom.res_index(), -2);
        assert_eq!(atom.res_name(), "NaN");

        let atom = parse_atom_line("7 GLY CA 12 0.1 0.2 0.3").unwrap();
        assert_eq!(atom.res_index(), 7);
        assert_eq!(atom.res_name(), "GLY");
        assert_eq!(atom.index(), 12);
    }

    #[test]
    fn test_split_residue() {
        assert_eq!(split_residue("12ALA"), ("12", "ALA"));
        assert_eq!(split_residue("-1NaN"), ("-1", "NaN"));
        assert_eq!(split_residue("SOL"), ("", "SOL"));
    }

    #[test]
    fn test_errors() {
        assert!(parse_atom_line("1SOL OW").is_err());
        assert!(matches!(
            GroReader::new("t\nabc\n".as_bytes()).read(),
            Err(IoError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            GroReader::new("t\n    2\n    1SOL     OW    1   0.126   0.639   0.322\n".as_bytes()).read(),
            Err(IoError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            GroReader::new("".as_bytes()).read(),
            Err(IoError::EmptyFile)
        ));
    }
}
