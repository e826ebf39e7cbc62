//! PDB file parser
//!
//! Standard fixed-column `ATOM`/`HETATM` records are read by column. Lines
//! whose coordinates are not column-aligned are tokenized with nom and read
//! as `serial name resName [chain] resSeq x y z [mass] [charge]`.

use std::io::{BufRead, BufReader, Read};

use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::{i32 as int32, space0, space1},
    multi::{many1, separated_list0},
    sequence::preceded,
    IResult,
};
use zalign_mol::{Atom, Bond, Structure, UNKNOWN_PROPERTY};

use crate::error::{IoError, IoResult};
use crate::traits::StructureReader;

/// Chain identifier used when a record carries none
const DEFAULT_CHAIN: &str = "A";

/// PDB file reader
pub struct PdbReader<R> {
    reader: BufReader<R>,
    line_number: usize,
}

impl<R: Read> PdbReader<R> {
    /// Create a new PDB reader
    pub fn new(reader: R) -> Self {
        PdbReader {
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
                Ok(Some(line))
            }
            Err(e) => Err(IoError::Io(e)),
        }
    }

    /// Parse the PDB file
    fn parse(&mut self) -> IoResult<Structure> {
        let mut builder = Structure::builder("");
        let mut title = String::new();
        let mut models = 0usize;
        let mut skipping_model = false;

        while let Some(line) = self.read_line()? {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            // Record name is at most six columns and may be fused with the serial
            let head = line.get(..6).unwrap_or(line);
            let record_type = head.split_whitespace().next().unwrap_or("");

            match record_type {
                "ATOM" | "HETATM" => {
                    if skipping_model {
                        continue;
                    }
                    let atom = parse_atom_line(line)
                        .map_err(|message| IoError::parse(self.line_number, message))?;
                    builder.push_atom(atom);
                }
                "CONECT" => match parse_conect_line(line) {
                    Some(bond) => builder.push_bond(bond),
                    None => log::warn!(
                        "Skipping malformed CONECT record at line {}",
                        self.line_number
                    ),
                },
                "TITLE" => append_title(&mut title, line),
                "MODEL" => {
                    models += 1;
                    if models == 2 {
                        log::info!(
                            "Multiple models found; reading only the first (line {})",
                            self.line_number
                        );
                    }
                    skipping_model = models > 1;
                }
                "END" => break,
                _ => {}
            }
        }

        if builder.atom_count() == 0 {
            return Err(IoError::EmptyFile);
        }

        let structure = builder.title(title).build();
        log::debug!("Parsed PDB: {}", structure);
        Ok(structure)
    }
}

impl<R: Read> StructureReader for PdbReader<R> {
    fn read(&mut self) -> IoResult<Structure> {
        self.parse()
    }
}

/// Append the text of a `TITLE` record, dropping continuation numbers
fn append_title(title: &mut String, line: &str) {
    let text = line.get(5..).unwrap_or("").trim();
    let text = if title.is_empty() {
        text
    } else {
        // "TITLE    2 more text"
        match text.split_once(char::is_whitespace) {
            Some((cont, rest)) if cont.parse::<u32>().is_ok() => rest.trim_start(),
            _ => text,
        }
    };
    if text.is_empty() {
        return;
    }
    if !title.is_empty() {
        title.push(' ');
    }
    title.push_str(text);
}

// ============================================================================
// ATOM / HETATM
// ============================================================================

/// Fixed-column coordinates (`%8.3f` at columns 31-54) put the decimal
/// point at byte offsets 34, 42 and 50.
fn is_column_aligned(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 54 && bytes[34] == b'.' && bytes[42] == b'.' && bytes[50] == b'.'
}

/// Parse an ATOM or HETATM line into an [`Atom`]
pub(crate) fn parse_atom_line(line: &str) -> Result<Atom, String> {
    if is_column_aligned(line) {
        parse_atom_columns(line)
    } else {
        parse_atom_tokens(line)
    }
}

fn parse_atom_columns(line: &str) -> Result<Atom, String> {
    let field = move |start: usize, end: usize| {
        line.get(start..end.min(line.len()))
            .map(str::trim)
            .unwrap_or("")
    };
    let number = |start: usize, end: usize, what: &str| {
        field(start, end)
            .parse::<f64>()
            .map_err(|_| format!("invalid {} '{}'", what, field(start, end)))
    };

    let serial: i32 = field(6, 11)
        .parse()
        .map_err(|_| format!("invalid atom serial '{}'", field(6, 11)))?;
    let name = field(12, 16);
    if name.is_empty() {
        return Err("missing atom name".to_string());
    }
    let res_name = match field(17, 20) {
        "" => "NaN",
        r => r,
    };
    let chain = match field(21, 22) {
        "" => DEFAULT_CHAIN,
        c => c,
    };
    let res_index: i32 = match field(22, 26) {
        "" => -1,
        s => s.parse().map_err(|_| format!("invalid residue number '{}'", s))?,
    };

    let x = number(30, 38, "x coordinate")?;
    let y = number(38, 46, "y coordinate")?;
    let z = number(46, 54, "z coordinate")?;

    let mass = field(54, 60).parse().unwrap_or(UNKNOWN_PROPERTY);
    let charge = field(60, 66).parse().unwrap_or(UNKNOWN_PROPERTY);

    Ok(Atom::builder(serial, name)
        .residue(res_name, res_index)
        .chain(chain)
        .xyz(x, y, z)
        .mass(mass)
        .charge(charge)
        .build())
}

/// Split a line into whitespace-separated tokens
fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    preceded(
        space0,
        separated_list0(space1, take_till1(|c: char| c.is_whitespace())),
    )(input)
}

fn parse_atom_tokens(line: &str) -> Result<Atom, String> {
    let (_, t) = tokens(line).map_err(|e| format!("unreadable atom record: {}", e))?;
    if t.len() < 8 {
        return Err(format!(
            "atom record has {} fields, expected 'serial name resName [chain] resSeq x y z'",
            t.len().saturating_sub(1)
        ));
    }

    let serial: i32 = t[1]
        .parse()
        .map_err(|_| format!("invalid atom serial '{}'", t[1]))?;
    let name = t[2];
    let res_name = t[3];

    // A chain is present unless the next two tokens read as resSeq + decimal x
    let has_chain = t[4].parse::<i32>().is_err() || t[5].parse::<i32>().is_ok();
    let (chain, rest) = if has_chain {
        (t[4], &t[5..])
    } else {
        (DEFAULT_CHAIN, &t[4..])
    };
    if rest.len() < 4 {
        return Err("atom record is missing coordinates".to_string());
    }

    let res_index: i32 = rest[0]
        .parse()
        .map_err(|_| format!("invalid residue number '{}'", rest[0]))?;
    let coord = |i: usize| {
        rest[i]
            .parse::<f64>()
            .map_err(|_| format!("invalid coordinate '{}'", rest[i]))
    };
    let (x, y, z) = (coord(1)?, coord(2)?, coord(3)?);

    let optional = |i: usize| {
        rest.get(i)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(UNKNOWN_PROPERTY)
    };

    Ok(Atom::builder(serial, name)
        .residue(res_name, res_index)
        .chain(chain)
        .xyz(x, y, z)
        .mass(optional(4))
        .charge(optional(5))
        .build())
}

// ============================================================================
// CONECT
// ============================================================================

fn conect_tokens(input: &str) -> IResult<&str, Vec<i32>> {
    preceded(tag("CONECT"), many1(preceded(space1, int32)))(input)
}

/// Parse a CONECT line into a [`Bond`]
///
/// Whitespace-separated serials are read in full; fused five-column
/// fields (serials above 9999) fall back to fixed-width slicing.
pub(crate) fn parse_conect_line(line: &str) -> Option<Bond> {
    if let Ok((rest, serials)) = conect_tokens(line) {
        if rest.trim().is_empty() {
            return Some(Bond::new(serials[0], &serials[1..]));
        }
    }

    let mut serials = Vec::new();
    let mut start = 6;
    while start < line.len() {
        let field = line.get(start..(start + 5).min(line.len()))?.trim();
        if !field.is_empty() {
            serials.push(field.parse::<i32>().ok()?);
        }
        start += 5;
    }
    let (&index, bonded) = serials.split_first()?;
    Some(Bond::new(index, bonded))
}
