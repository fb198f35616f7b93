//! Builders for raw RISC-V machine code used as test programs.

pub mod instruction;
