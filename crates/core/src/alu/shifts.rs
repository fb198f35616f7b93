//! Shift operations.
//!
//! RV64 shifts use the low 6 bits of the second operand as the shift amount;
//! the 32-bit "W" variants use the low 5 bits and sign-extend their result.

use crate::pipeline::signals::AluOp;

/// Executes a shift operation.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    let amt64 = (b & 0x3F) as u32;
    let amt32 = (b & 0x1F) as u32;
    match op {
        AluOp::Sll => a.wrapping_shl(amt64),
        AluOp::Srl => a.wrapping_shr(amt64),
        AluOp::Sra => ((a as i64).wrapping_shr(amt64)) as u64,
        AluOp::Sllw => ((a as i32).wrapping_shl(amt32)) as i64 as u64,
        AluOp::Srlw => ((a as u32).wrapping_shr(amt32)) as i32 as i64 as u64,
        AluOp::Sraw => ((a as i32).wrapping_shr(amt32)) as i64 as u64,
        _ => 0,
    }
}
