//! Instruction word field extraction and immediate generation.
//!
//! The simulator treats an instruction as an immutable 32-bit word and pulls
//! fields out positionally. This module provides:
//! 1. **Field Accessors:** opcode, rd, rs1, rs2, funct3, funct7, funct5, funct2.
//! 2. **Immediate Generation:** Sign-extended immediates for the I, S, B, U, and J formats.

/// Field accessors and the immediate generator.
pub mod decode;

pub use decode::{funct2, funct3, funct5, funct7, immediate, opcode, rd, reads_rs2, rs1, rs2};
