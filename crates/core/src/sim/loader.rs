//! Flat binary loader.
//!
//! Reads a raw little-endian machine-code image from disk into an
//! [`AssembledProgram`]. No object-format parsing happens here; the
//! external assembler hands over bare words.

use crate::sim::program::AssembledProgram;
use std::io;
use std::path::Path;

/// Reads a flat binary file into a program image.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be read.
pub fn load_flat_binary<P: AsRef<Path>>(path: P) -> io::Result<AssembledProgram> {
    let bytes = std::fs::read(path)?;
    Ok(AssembledProgram::from_bytes(&bytes))
}
