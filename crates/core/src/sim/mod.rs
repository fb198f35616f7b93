//! Simulation input: assembled programs and loading utilities.
//!
//! The assembler itself is an external collaborator; the engines treat its
//! output as opaque input data. This module provides:
//! 1. **Program Representation:** The ordered machine-code image and its byte extent.
//! 2. **Loading:** Construction from raw little-endian binaries on disk or in memory.

/// Reading flat binaries into programs.
pub mod loader;

/// The assembled program image.
pub mod program;

pub use program::AssembledProgram;
