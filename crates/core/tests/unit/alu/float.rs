//! Floating-point ALU semantics.
//!
//! Single-precision values travel NaN-boxed through 64-bit registers;
//! doubles use the raw bit pattern. Conversions saturate on NaN and
//! out-of-range inputs instead of faulting.

use pretty_assertions::assert_eq;
use rv5s_core::alu::Alu;
use rv5s_core::pipeline::signals::AluOp;

const NAN_BOX: u64 = 0xFFFF_FFFF_0000_0000;

fn box_s(v: f32) -> u64 {
    NAN_BOX | u64::from(v.to_bits())
}

fn bits_d(v: f64) -> u64 {
    v.to_bits()
}

#[test]
fn single_precision_arithmetic_stays_boxed() {
    let (result, overflow) = Alu::execute(AluOp::FaddS, box_s(1.5), box_s(2.25));
    assert_eq!(result, box_s(3.75));
    assert!(!overflow);

    let (result, _) = Alu::execute(AluOp::FmulS, box_s(-2.0), box_s(4.0));
    assert_eq!(result, box_s(-8.0));
}

#[test]
fn improperly_boxed_single_is_nan() {
    // Upper bits not all ones: the operand reads as canonical NaN, and
    // NaN + anything is NaN.
    let (result, _) = Alu::execute(AluOp::FaddS, 0x0000_0000_3FC0_0000, box_s(1.0));
    assert_eq!(result & NAN_BOX, NAN_BOX);
    assert!(f32::from_bits(result as u32).is_nan());
}

#[test]
fn double_precision_arithmetic() {
    let (result, _) = Alu::execute(AluOp::FaddD, bits_d(1.5), bits_d(2.25));
    assert_eq!(result, bits_d(3.75));

    let (result, _) = Alu::execute(AluOp::FdivD, bits_d(1.0), bits_d(0.0));
    assert_eq!(f64::from_bits(result), f64::INFINITY);
}

#[test]
fn compares_return_integer_flags() {
    let (eq, _) = Alu::execute(AluOp::FeqD, bits_d(2.0), bits_d(2.0));
    assert_eq!(eq, 1);

    let (lt, _) = Alu::execute(AluOp::FltS, box_s(3.0), box_s(2.0));
    assert_eq!(lt, 0);

    // Comparisons with NaN are false.
    let (le, _) = Alu::execute(AluOp::FleD, bits_d(f64::NAN), bits_d(2.0));
    assert_eq!(le, 0);
}

#[test]
fn sign_injection() {
    let (result, _) = Alu::execute(AluOp::FsgnjD, bits_d(2.5), bits_d(-1.0));
    assert_eq!(result, bits_d(-2.5));

    let (result, _) = Alu::execute(AluOp::FsgnjnS, box_s(2.5), box_s(-1.0));
    assert_eq!(result, box_s(2.5));

    let (result, _) = Alu::execute(AluOp::FsgnjxS, box_s(-2.5), box_s(-1.0));
    assert_eq!(result, box_s(2.5));
}

#[test]
fn conversions_saturate_on_nan_and_range() {
    // NaN to signed word -> i32::MAX, sign-extension keeps it positive.
    let (result, _) = Alu::execute(AluOp::FcvtWD, bits_d(f64::NAN), 0);
    assert_eq!(result, i32::MAX as u64);

    // Out of range saturates to the destination extreme.
    let (result, _) = Alu::execute(AluOp::FcvtWD, bits_d(1e12), 0);
    assert_eq!(result, i32::MAX as u64);

    // Negative to unsigned saturates to zero.
    let (result, _) = Alu::execute(AluOp::FcvtLuD, bits_d(-3.0), 0);
    assert_eq!(result, 0);

    // In-range conversion is exact.
    let (result, _) = Alu::execute(AluOp::FcvtWD, bits_d(-7.0), 0);
    assert_eq!(result as i64, -7);
}

#[test]
fn integer_to_float_conversions() {
    let (result, _) = Alu::execute(AluOp::FcvtDW, (-5i32 as u32) as u64, 0);
    assert_eq!(result, bits_d(-5.0));

    let (result, _) = Alu::execute(AluOp::FcvtSW, (-5i32 as u32) as u64, 0);
    assert_eq!(result, box_s(-5.0));
}

#[test]
fn moves_preserve_bit_patterns() {
    // FMV.X.W sign-extends the 32-bit pattern.
    let (result, _) = Alu::execute(AluOp::FmvXW, box_s(-1.0), 0);
    assert_eq!(result, 0xFFFF_FFFF_BF80_0000);

    // FMV.W.X re-boxes the low 32 bits.
    let (result, _) = Alu::execute(AluOp::FmvWX, 0x3F80_0000, 0);
    assert_eq!(result, box_s(1.0));
}

#[test]
fn classify_masks() {
    // Negative infinity -> bit 0; positive normal -> bit 6; NaN (quiet) -> bit 9.
    let (result, _) = Alu::execute(AluOp::FclassD, bits_d(f64::NEG_INFINITY), 0);
    assert_eq!(result, 1 << 0);

    let (result, _) = Alu::execute(AluOp::FclassD, bits_d(2.0), 0);
    assert_eq!(result, 1 << 6);

    let (result, _) = Alu::execute(AluOp::FclassS, box_s(f32::NAN), 0);
    assert_eq!(result, 1 << 9);
}
