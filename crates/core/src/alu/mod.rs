//! Arithmetic unit used by the Execute stage.
//!
//! Implements the concrete operations selected by the ALU control unit for
//! 64-bit operands, with the 32-bit "W" variants truncating and
//! sign-extending per the RISC-V spec. Operations are organized into
//! submodules by category:
//! - [`arithmetic`]: add/sub, multiply, divide and remainder families
//! - [`logic`]:      or, and, xor, set-less-than comparisons
//! - [`shifts`]:     logical and arithmetic shifts
//! - [`float`]:      single/double arithmetic, compares, conversions, moves
//!
//! The unit is pure: the same operation and operands always produce the same
//! `(result, overflow)` pair, and architecturally-defined special cases
//! (division by zero, signed-overflow division) return the ISA's defined
//! results rather than faulting.

/// Integer add/sub, multiply, divide, and remainder operations.
pub mod arithmetic;

/// Floating-point operations on boxed single / raw double bit patterns.
pub mod float;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

use crate::pipeline::signals::AluOp;

/// The arithmetic unit. Stateless; all behavior lives in [`Alu::execute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation on two 64-bit operands.
    ///
    /// # Returns
    ///
    /// `(result, overflow)`. The overflow flag is meaningful for signed
    /// add/subtract variants and false elsewhere. [`AluOp::None`] and the
    /// fused multiply-add tags return `(0, false)`: `None` marks an
    /// unrecognized encoding, and the fused family needs a third operand
    /// this two-operand port does not carry.
    pub fn execute(op: AluOp, a: u64, b: u64) -> (u64, bool) {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Addw
            | AluOp::Subw
            | AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Mulw
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu
            | AluOp::Divw
            | AluOp::Divuw
            | AluOp::Remw
            | AluOp::Remuw => arithmetic::execute(op, a, b),

            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                (logic::execute(op, a, b), false)
            }

            AluOp::Sll | AluOp::Srl | AluOp::Sra | AluOp::Sllw | AluOp::Srlw | AluOp::Sraw => {
                (shifts::execute(op, a, b), false)
            }

            AluOp::None
            | AluOp::FmaddS
            | AluOp::FmsubS
            | AluOp::FnmaddS
            | AluOp::FnmsubS
            | AluOp::FmaddD
            | AluOp::FmsubD
            | AluOp::FnmaddD
            | AluOp::FnmsubD => (0, false),

            _ => (float::execute(op, a, b), false),
        }
    }
}
