//! XYZ file parser
//!
//! The atom count and comment lines are optional. Every other non-blank
//! line must read `element x y z [...]`. When a count is given, exactly
//! that many atoms are read and any following frames are ignored.

use std::io::{BufRead, BufReader, Read};

use zalign_mol::{Atom, Structure};

use crate::error::{IoError, IoResult};
use crate::traits::StructureReader;

/// XYZ file reader
pub struct XyzReader<R> {
    reader: BufReader<R>,
    line_number: usize,
}

impl<R: Read> XyzReader<R> {
    /// Create a new XYZ reader
    pub fn new(reader: R) -> Self {
        XyzReader {
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

    /// Next line that is not blank
    fn next_content_line(&mut self) -> IoResult<Option<String>> {
        while let Some(line) = self.read_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn parse(&mut self) -> IoResult<Structure> {
        let first = match self.next_content_line()? {
            Some(line) => line,
            None => return Err(IoError::EmptyFile),
        };

        let mut builder = Structure::builder("");
        let expected = match first.trim().parse::<usize>() {
            Ok(n) => {
                // Comment line follows the count, even when blank
                let title = self.read_line()?.unwrap_or_default();
                builder = builder.title(title.trim());
                Some(n)
            }
            Err(_) => {
                builder.push_atom(parse_atom_line(&first, 1, self.line_number)?);
                None
            }
        };

        while expected.map_or(true, |n| builder.atom_count() < n) {
            let Some(line) = self.next_content_line()? else {
                break;
            };
            let index = builder.atom_count() as i32 + 1;
            builder.push_atom(parse_atom_line(&line, index, self.line_number)?);
        }

        if let Some(n) = expected {
            if builder.atom_count() < n {
                return Err(IoError::parse(
                    self.line_number,
                    format!("Expected {} atoms, got end of file after {}", n, builder.atom_count()),
                ));
            }
        }
        if builder.atom_count() == 0 {
            return Err(IoError::EmptyFile);
        }

        let structure = builder.build();
        log::debug!("Parsed XYZ: {}", structure);
        Ok(structure)
    }
}

impl<R: Read> StructureReader for XyzReader<R> {
    fn read(&mut self) -> IoResult<Structure> {
        self.parse()
    }
}

/// Parse an XYZ atom line; `index` is the 1-based position in the file
fn parse_atom_line(line: &str, index: i32, line_number: usize) -> IoResult<Atom> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() < 4 {
        return Err(IoError::parse(
            line_number,
            format!("Atom line too short: expected 'element x y z', got '{}'", line.trim()),
        ));
    }

    let coord = |i: usize, axis: &str| {
        parts[i].parse::<f64>().map_err(|_| {
            IoError::parse(
                line_number,
                format!("Invalid {} coordinate '{}'", axis, parts[i]),
            )
        })
    };
    let x = coord(1, "x")?;
    let y = coord(2, "y")?;
    let z = coord(3, "z")?;

    Ok(Atom::builder(index, parts[0]).xyz(x, y, z).build())
}
