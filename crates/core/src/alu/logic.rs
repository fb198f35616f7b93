//! Bitwise logic and set-less-than comparisons.

use crate::pipeline::signals::AluOp;

/// Executes a logical or comparison operation.
///
/// `Slt`/`Sltu` produce 1 or 0, consumed directly by the branch condition
/// logic in the Execute stage as well as by the SLT instruction family.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => u64::from((a as i64) < (b as i64)),
        AluOp::Sltu => u64::from(a < b),
        _ => 0,
    }
}
