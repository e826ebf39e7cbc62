//! Compression/decompression support
//!
//! Provides transparent handling of gzip-compressed structure files.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{IoError, IoResult};

/// Check if a path indicates a gzip file (by extension)
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Open a file for reading as a buffered stream
///
/// Gzip files are decompressed eagerly so that a corrupt stream surfaces
/// as [`IoError::Decompression`] rather than as a parse error.
pub fn open_file(path: &Path) -> IoResult<Box<dyn Read>> {
    let file = File::open(path)?;

    if is_gzip_path(path) {
        let mut content = Vec::new();
        GzDecoder::new(BufReader::new(file))
            .read_to_end(&mut content)
            .map_err(|e| IoError::Decompression(format!("{}: {}", path.display(), e)))?;
        log::debug!(
            "Decompressed {} ({} bytes)",
            path.display(),
            content.len()
        );
        Ok(Box::new(std::io::Cursor::new(content)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Writer that can optionally gzip-compress output
pub enum MaybeGzWriter<W: Write> {
    /// Plain uncompressed writer
    Plain(W),
    /// Gzip-compressed writer
    Gzip(GzEncoder<W>),
}

impl<W: Write> Write for MaybeGzWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            MaybeGzWriter::Plain(w) => w.write(buf),
            MaybeGzWriter::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            MaybeGzWriter::Plain(w) => w.flush(),
            MaybeGzWriter::Gzip(w) => w.flush(),
        }
    }
}

impl<W: Write> MaybeGzWriter<W> {
    /// Finish compression and return the underlying writer
    pub fn finish(self) -> std::io::Result<W> {
        match self {
            MaybeGzWriter::Plain(w) => Ok(w),
            MaybeGzWriter::Gzip(w) => w.finish(),
        }
    }
}

/// Create a file for writing, gzip-compressed when the path ends in `.gz`
pub fn create_file(path: &Path) -> IoResult<MaybeGzWriter<BufWriter<File>>> {
    let file = BufWriter::new(File::create(path)?);
    if is_gzip_path(path) {
        Ok(MaybeGzWriter::Gzip(GzEncoder::new(file, Compression::default())))
    } else {
        Ok(MaybeGzWriter::Plain(file))
    }
}
