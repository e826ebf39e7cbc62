//! Structure file I/O for zalign
//!
//! This crate provides readers and writers for the coordinate formats the
//! aligner accepts:
//!
//! - **PDB** - Protein Data Bank format (`.pdb`, `.ent`)
//! - **GRO** - GROMACS coordinate format (`.gro`, nanometers on disk)
//! - **XYZ** - Simple XYZ coordinate format (`.xyz`)
//!
//! Any of them may be gzip-compressed (`.pdb.gz`, ...). Readers always hand
//! back coordinates in angstrom.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use zalign_io::{read_file, write_file_with, WriteOptions};
//!
//! let structure = read_file(Path::new("model.gro"))?;
//! write_file_with(
//!     Path::new("model.pdb"),
//!     &structure,
//!     &WriteOptions::new().with_title("converted"),
//! )?;
//! # Ok::<(), zalign_io::IoError>(())
//! ```

pub mod compress;
pub mod detect;
pub mod error;
pub mod gro;
pub mod pdb;
pub mod traits;
pub mod xyz;

// Re-exports
pub use error::{IoError, IoResult};
pub use traits::{
    create_reader, create_writer, FileFormat, StructureReader, StructureWriter, WriteOptions,
    DEFAULT_TITLE,
};

use std::io::Write;
use std::path::Path;

use zalign_mol::Structure;

/// Read a structure from a file, picking the format from its suffix
pub fn read_file(path: &Path) -> IoResult<Structure> {
    let format = detect::detect_from_path(path);
    read_file_format(path, format)
}

/// Read a structure from a file with a specific format
pub fn read_file_format(path: &Path, format: FileFormat) -> IoResult<Structure> {
    if format == FileFormat::Unknown {
        return Err(IoError::unsupported(path.display().to_string()));
    }
    let source = compress::open_file(path)?;
    let mut structure = create_reader(source, format)?.read()?;

    if structure.title().is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            structure.set_title(stem.trim_end_matches(&format!(".{}", format.extension())));
        }
    }

    log::info!(
        "Read {} atoms from {} ({})",
        structure.atom_count(),
        path.display(),
        format.name()
    );
    Ok(structure)
}

/// Write a structure to a file with default options, picking the format
/// from its suffix
pub fn write_file(path: &Path, structure: &Structure) -> IoResult<()> {
    write_file_with(path, structure, &WriteOptions::default())
}

/// Write a structure to a file, picking the format from its suffix
///
/// A `.gz` suffix gzip-compresses the output.
pub fn write_file_with(path: &Path, structure: &Structure, options: &WriteOptions) -> IoResult<()> {
    let format = detect::detect_from_path(path);
    if format == FileFormat::Unknown {
        return Err(IoError::unsupported(path.display().to_string()));
    }

    let mut sink = compress::create_file(path)?;
    {
        let mut writer = create_writer(&mut sink, format, options.clone())?;
        writer.write(structure)?;
        writer.flush()?;
    }
    sink.finish()?.flush()?;

    log::info!(
        "Wrote {} atoms to {} ({})",
        structure.atom_count(),
        path.display(),
        format.name()
    );
    Ok(())
}

/// Parse a structure from a string with the given format
///
/// [`FileFormat::Unknown`] sniffs the format from the content.
pub fn parse_str(content: &str, format: FileFormat) -> IoResult<Structure> {
    let format = match format {
        FileFormat::Unknown => detect::detect_from_content(content.as_bytes()).0,
        known => known,
    };
    match format {
        FileFormat::Pdb => pdb::read_pdb_str(content),
        FileFormat::Gro => gro::read_gro_str(content),
        FileFormat::Xyz => xyz::read_xyz_str(content),
        FileFormat::Unknown => Err(IoError::unsupported("content of unknown format")),
    }
}
