//! Error definitions for structurally invalid setup.
//!
//! Only two situations are escalated to the caller as failures: requesting an
//! unregistered VM type and loading a program that does not fit in simulated
//! memory. Everything the engine hits mid-run (decode misses, empty history,
//! breakpoints) degrades to defined statuses instead, so a long `run` cannot
//! be aborted by an unexpected encoding.

use crate::vm::VmType;
use thiserror::Error;

/// Errors reported for structurally invalid setup, never for mid-run conditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// A VM type tag was requested that was never registered with the registry.
    ///
    /// The registry never silently substitutes a default VM.
    #[error("unknown VM type: {0:?}")]
    UnknownVmType(VmType),

    /// The program's byte extent does not fit in simulated memory.
    #[error("program of {program_bytes} bytes exceeds memory of {memory_bytes} bytes")]
    ProgramTooLarge {
        /// Byte extent of the program being loaded.
        program_bytes: u64,
        /// Configured size of simulated memory.
        memory_bytes: u64,
    },
}
