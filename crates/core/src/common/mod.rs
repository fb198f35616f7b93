//! Common types and constants shared across the simulator.
//!
//! This module groups the pieces every other module reaches for:
//! 1. **Constants:** Instruction field masks, shifts, and the canonical NOP encoding.
//! 2. **Errors:** The structured error type for configuration-level failures.

/// Instruction field masks, shifts, opcodes, and the NOP encoding.
pub mod constants;

/// Structured errors for configuration-level failures.
pub mod error;

pub use error::VmError;
