use crate::core::models::structure::Structure;
use std::error::Error;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading molecular file formats.
///
/// Implementors handle format-specific parsing; the path-based entry point
/// dispatches on the file-name extension to pick a decompression transform
/// (`.gz`, `.bz2`) before handing a line stream to the parser.
pub trait StructureFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed structure and associated metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error>;

    /// Reads a structure from a file path.
    ///
    /// Paths ending in `.gz` or `.bz2` are decompressed transparently when
    /// the matching cargo feature is enabled; otherwise an unsupported-format
    /// I/O error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the compression format
    /// is not supported by this build, or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Structure, Self::Metadata), Self::Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let name = path.file_name().and_then(OsStr::to_str).unwrap_or("");

        if name.ends_with(".gz") {
            #[cfg(feature = "gzip")]
            {
                let mut reader = BufReader::new(flate2::read::GzDecoder::new(file));
                return Self::read_from(&mut reader);
            }
            #[cfg(not(feature = "gzip"))]
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "gzip support is not enabled in this build",
            )
            .into());
        }
        if name.ends_with(".bz2") {
            #[cfg(feature = "bzip2")]
            {
                let mut reader = BufReader::new(bzip2::read::BzDecoder::new(file));
                return Self::read_from(&mut reader);
            }
            #[cfg(not(feature = "bzip2"))]
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "bzip2 support is not enabled in this build",
            )
            .into());
        }

        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
