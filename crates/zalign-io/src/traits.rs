//! Reader and writer traits for structure file formats
//!
//! Defines the common interface every format implements, plus the format
//! enumeration used to dispatch on file suffixes.

use std::io::{Read, Write};
use std::path::Path;

use zalign_mol::Structure;

use crate::error::{IoError, IoResult};

/// Title written when none is supplied
pub const DEFAULT_TITLE: &str = "Aligned molecule";

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Protein Data Bank format
    Pdb,
    /// GROMACS coordinate format
    Gro,
    /// XYZ coordinate format
    Xyz,
    /// Unknown format
    Unknown,
}

impl FileFormat {
    /// Get the file format from a file extension (without the dot)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdb" | "ent" => FileFormat::Pdb,
            "gro" => FileFormat::Gro,
            "xyz" => FileFormat::Xyz,
            _ => FileFormat::Unknown,
        }
    }

    /// Get the file format from a path
    ///
    /// A trailing `.gz` is skipped, so `model.pdb.gz` is PDB.
    pub fn from_path(path: &Path) -> Self {
        let path = if crate::compress::is_gzip_path(path) {
            Path::new(path.file_stem().unwrap_or_default())
        } else {
            path
        };

        path.extension()
            .and_then(|s| s.to_str())
            .map(FileFormat::from_extension)
            .unwrap_or(FileFormat::Unknown)
    }

    /// Get the default file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Pdb => "pdb",
            FileFormat::Gro => "gro",
            FileFormat::Xyz => "xyz",
            FileFormat::Unknown => "",
        }
    }

    /// Get a human-readable name for the format
    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Pdb => "PDB",
            FileFormat::Gro => "GRO",
            FileFormat::Xyz => "XYZ",
            FileFormat::Unknown => "Unknown",
        }
    }
}

/// Trait for reading a structure from a source
pub trait StructureReader {
    /// Read the (first) structure from the source
    fn read(&mut self) -> IoResult<Structure>;
}

/// Trait for writing a structure to a destination
pub trait StructureWriter {
    /// Write a structure to the destination
    fn write(&mut self, structure: &Structure) -> IoResult<()>;

    /// Flush any buffered data
    fn flush(&mut self) -> IoResult<()>;
}

/// Options for writing structure files
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Title line; [`DEFAULT_TITLE`] when `None`
    pub title: Option<String>,
    /// Whether to write bond records (PDB only)
    pub write_bonds: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            title: None,
            write_bonds: true,
        }
    }
}

impl WriteOptions {
    /// Create default write options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to write bonds
    pub fn with_bonds(mut self, write_bonds: bool) -> Self {
        self.write_bonds = write_bonds;
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title to write
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}

/// Create a reader for the given format from a Read source
pub fn create_reader<'a, R: Read + 'a>(
    reader: R,
    format: FileFormat,
) -> IoResult<Box<dyn StructureReader + 'a>> {
    match format {
        FileFormat::Pdb => Ok(Box::new(crate::pdb::PdbReader::new(reader))),
        FileFormat::Gro => Ok(Box::new(crate::gro::GroReader::new(reader))),
        FileFormat::Xyz => Ok(Box::new(crate::xyz::XyzReader::new(reader))),
        FileFormat::Unknown => Err(IoError::unsupported("unknown format")),
    }
}

/// Create a writer for the given format to a Write destination
pub fn create_writer<'a, W: Write + 'a>(
    writer: W,
    format: FileFormat,
    options: WriteOptions,
) -> IoResult<Box<dyn StructureWriter + 'a>> {
    match format {
        FileFormat::Pdb => Ok(Box::new(crate::pdb::PdbWriter::new(writer, options))),
        FileFormat::Gro => Ok(Box::new(crate::gro::GroWriter::new(writer, options))),
        FileFormat::Xyz => Ok(Box::new(crate::xyz::XyzWriter::new(writer, options))),
        FileFormat::Unknown => Err(IoError::unsupported("unknown format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_case_insensitive() {
        assert_eq!(FileFormat::from_extension("PDB"), FileFormat::Pdb);
        assert_eq!(FileFormat::from_extension("ent"), FileFormat::Pdb);
        assert_eq!(FileFormat::from_extension("Gro"), FileFormat::Gro);
        assert_eq!(FileFormat::from_extension("xyz"), FileFormat::Xyz);
        assert_eq!(FileFormat::from_extension("sdf"), FileFormat::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(FileFormat::from_path(Path::new("a/b/model.pdb")), FileFormat::Pdb);
        assert_eq!(FileFormat::from_path(Path::new("traj.gro.gz")), FileFormat::Gro);
        assert_eq!(FileFormat::from_path(Path::new("mol.XYZ")), FileFormat::Xyz);
        assert_eq!(FileFormat::from_path(Path::new("noext")), FileFormat::Unknown);
        assert_eq!(FileFormat::from_path(Path::new("file.gz")), FileFormat::Unknown);
    }

    #[test]
    fn test_write_options_title() {
        assert_eq!(WriteOptions::default().title(), DEFAULT_TITLE);
        assert!(WriteOptions::default().write_bonds);
        let options = WriteOptions::new().with_title("t").with_bonds(false);
        assert_eq!(options.title(), "t");
        assert!(!options.write_bonds);
    }

    #[test]
    fn test_unknown_format_has_no_reader_or_writer() {
        assert!(matches!(
            create_reader(&b""[..], FileFormat::Unknown),
            Err(IoError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            create_writer(Vec::new(), FileFormat::Unknown, WriteOptions::default()),
            Err(IoError::UnsupportedExtension(_))
        ));
    }
}
