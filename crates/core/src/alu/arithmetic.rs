//! Integer arithmetic: add/sub, the multiply family, and divide/remainder.
//!
//! All "W" variants truncate their operands to 32 bits, operate, and
//! sign-extend the 32-bit result to 64 bits (RISC-V spec §2.4, §7.1, §7.2).
//! Division follows §7.2: divide-by-zero yields all-ones (quotient) or the
//! dividend (remainder); signed overflow (`MIN / -1`) yields `MIN` and a
//! zero remainder. None of these fault.

use crate::pipeline::signals::AluOp;

/// Bits shifted off to obtain the high half of a 64-bit multiply.
const XLEN_BITS: u32 = 64;

/// Executes an integer arithmetic operation, returning `(result, overflow)`.
///
/// The overflow flag reports signed overflow for `Add`, `Sub`, `Addw`, and
/// `Subw`; it is false for the multiply and divide families.
pub fn execute(op: AluOp, a: u64, b: u64) -> (u64, bool) {
    match op {
        AluOp::Add => {
            let (r, o) = (a as i64).overflowing_add(b as i64);
            (r as u64, o)
        }
        AluOp::Sub => {
            let (r, o) = (a as i64).overflowing_sub(b as i64);
            (r as u64, o)
        }
        AluOp::Addw => {
            let (r, o) = (a as i32).overflowing_add(b as i32);
            (r as i64 as u64, o)
        }
        AluOp::Subw => {
            let (r, o) = (a as i32).overflowing_sub(b as i32);
            (r as i64 as u64, o)
        }
        AluOp::Mul => (a.wrapping_mul(b), false),
        AluOp::Mulw => ((a as i32).wrapping_mul(b as i32) as i64 as u64, false),
        AluOp::Mulh => {
            // Both operands signed: sign-extend through i64 into i128.
            ((((a as i64 as i128) * (b as i64 as i128)) >> XLEN_BITS) as u64, false)
        }
        AluOp::Mulhsu => {
            // a signed, b unsigned: sign-extend a, zero-extend b.
            ((((a as i64 as i128) * (b as u128 as i128)) >> XLEN_BITS) as u64, false)
        }
        AluOp::Mulhu => ((((a as u128) * (b as u128)) >> XLEN_BITS) as u64, false),
        AluOp::Div => (div_signed(a as i64, b as i64) as u64, false),
        AluOp::Divu => {
            let r = if b == 0 { u64::MAX } else { a / b };
            (r, false)
        }
        AluOp::Rem => (rem_signed(a as i64, b as i64) as u64, false),
        AluOp::Remu => {
            let r = if b == 0 { a } else { a % b };
            (r, false)
        }
        AluOp::Divw => (div_signed(a as i32 as i64, b as i32 as i64) as i32 as i64 as u64, false),
        AluOp::Divuw => {
            let (a32, b32) = (a as u32, b as u32);
            let r = if b32 == 0 { u32::MAX } else { a32 / b32 };
            (r as i32 as i64 as u64, false)
        }
        AluOp::Remw => (rem_signed(a as i32 as i64, b as i32 as i64) as i32 as i64 as u64, false),
        AluOp::Remuw => {
            let (a32, b32) = (a as u32, b as u32);
            let r = if b32 == 0 { a32 } else { a32 % b32 };
            (r as i32 as i64 as u64, false)
        }
        _ => (0, false),
    }
}

/// Signed division with the ISA's defined edge results.
fn div_signed(a: i64, b: i64) -> i64 {
    if b == 0 {
        -1
    } else if a == i64::MIN && b == -1 {
        i64::MIN
    } else {
        a.wrapping_div(b)
    }
}

/// Signed remainder with the ISA's defined edge results.
fn rem_signed(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else if a == i64::MIN && b == -1 {
        0
    } else {
        a.wrapping_rem(b)
    }
}
