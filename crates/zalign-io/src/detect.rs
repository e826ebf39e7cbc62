//! File format detection
//!
//! Detects structure file formats from file extensions and content.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::traits::FileFormat;

/// Detect file format from a file path (by extension)
pub fn detect_from_path(path: &Path) -> FileFormat {
    FileFormat::from_path(path)
}

/// Detect file format from file content
///
/// Looks at the first few lines to determine the format. Returns the
/// detected format and the full content that was read (for re-parsing).
pub fn detect_from_content<R: Read>(reader: R) -> (FileFormat, String) {
    let mut buf_reader = BufReader::new(reader);
    let mut content = String::new();
    let mut lines = Vec::new();

    for _ in 0..10 {
        let mut line = String::new();
        match buf_reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                content.push_str(&line);
                lines.push(line);
            }
            Err(_) => break,
        }
    }

    if let Err(e) = buf_reader.read_to_string(&mut content) {
        log::warn!("Content sniffing stopped early: {}", e);
    }

    let format = detect_from_lines(&lines);
    log::debug!("Detected {} content", format.name());
    (format, content)
}

/// Detect file format from the first few lines
pub(crate) fn detect_from_lines(lines: &[String]) -> FileFormat {
    if lines.iter().all(|l| l.trim().is_empty()) {
        return FileFormat::Unknown;
    }

    if is_pdb_format(lines) {
        return FileFormat::Pdb;
    }

    // XYZ with header is checked before GRO: both carry an atom count line
    if is_xyz_with_header(lines) {
        return FileFormat::Xyz;
    }

    if is_gro_format(lines) {
        return FileFormat::Gro;
    }

    if lines
        .iter()
        .find(|l| !l.trim().is_empty())
        .is_some_and(|l| is_xyz_atom_line(l))
    {
        return FileFormat::Xyz;
    }

    FileFormat::Unknown
}

/// Check if content looks like PDB format
fn is_pdb_format(lines: &[String]) -> bool {
    const PDB_KEYWORDS: [&str; 12] = [
        "HEADER", "TITLE", "COMPND", "REMARK", "CRYST1", "MODEL", "ATOM", "HETATM", "TER",
        "ENDMDL", "CONECT", "END",
    ];

    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .any(|l| {
            let record = l.split_whitespace().next().unwrap_or("");
            PDB_KEYWORDS.contains(&record)
        })
}

/// First line is an atom count and the third line is `elem x y z`
fn is_xyz_with_header(lines: &[String]) -> bool {
    lines.len() >= 3 && lines[0].trim().parse::<u32>().is_ok() && is_xyz_atom_line(&lines[2])
}

/// Second line is an atom count and the third line carries coordinates
fn is_gro_format(lines: &[String]) -> bool {
    if lines.len() < 3 || lines[1].trim().parse::<u32>().is_err() {
        return false;
    }
    let parts: Vec<&str> = lines[2].split_whitespace().collect();
    parts.len() >= 6
        && parts[parts.len() - 3..]
            .iter()
            .all(|p| p.parse::<f64>().is_ok())
}

fn is_xyz_atom_line(line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    parts.len() >= 4
        && parts[0].parse::<f64>().is_err()
        && parts[1..4].iter().all(|p| p.parse::<f64>().is_ok())
}
