//! Floating-point operations for the F and D extensions.
//!
//! Single-precision values travel through 64-bit registers NaN-boxed: the
//! upper 32 bits are all ones, and any operand whose upper bits are not the
//! box pattern is treated as the canonical NaN. Double-precision values use
//! the raw 64-bit pattern.
//!
//! Conversions to integer follow the ISA's invalid-operation results: NaN
//! and out-of-range inputs saturate to the destination's extreme values.

use crate::pipeline::signals::AluOp;

/// NaN-box pattern for single-precision values in a 64-bit register.
const NAN_BOX: u64 = 0xFFFF_FFFF_0000_0000;

/// Executes a floating-point operation on raw register bit patterns.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::FaddS => box_s(unbox_s(a) + unbox_s(b)),
        AluOp::FsubS => box_s(unbox_s(a) - unbox_s(b)),
        AluOp::FmulS => box_s(unbox_s(a) * unbox_s(b)),
        AluOp::FdivS => box_s(unbox_s(a) / unbox_s(b)),
        AluOp::FsqrtS => box_s(unbox_s(a).sqrt()),
        AluOp::FminS => box_s(unbox_s(a).min(unbox_s(b))),
        AluOp::FmaxS => box_s(unbox_s(a).max(unbox_s(b))),
        AluOp::FsgnjS => box_s(f32::from_bits(
            (unbox_s(a).to_bits() & 0x7FFF_FFFF) | (unbox_s(b).to_bits() & 0x8000_0000),
        )),
        AluOp::FsgnjnS => box_s(f32::from_bits(
            (unbox_s(a).to_bits() & 0x7FFF_FFFF) | (!unbox_s(b).to_bits() & 0x8000_0000),
        )),
        AluOp::FsgnjxS => box_s(f32::from_bits(
            unbox_s(a).to_bits() ^ (unbox_s(b).to_bits() & 0x8000_0000),
        )),
        AluOp::FeqS => u64::from(unbox_s(a) == unbox_s(b)),
        AluOp::FltS => u64::from(unbox_s(a) < unbox_s(b)),
        AluOp::FleS => u64::from(unbox_s(a) <= unbox_s(b)),
        AluOp::FclassS => classify_s(unbox_s(a)),
        AluOp::FcvtWS => cvt_to_i32(f64::from(unbox_s(a))),
        AluOp::FcvtWuS => cvt_to_u32(f64::from(unbox_s(a))),
        AluOp::FcvtLS => cvt_to_i64(f64::from(unbox_s(a))),
        AluOp::FcvtLuS => cvt_to_u64(f64::from(unbox_s(a))),
        AluOp::FcvtSW => box_s(a as i32 as f32),
        AluOp::FcvtSWu => box_s(a as u32 as f32),
        AluOp::FcvtSL => box_s(a as i64 as f32),
        AluOp::FcvtSLu => box_s(a as f32),
        AluOp::FmvXW => a as u32 as i32 as i64 as u64,
        AluOp::FmvWX => NAN_BOX | (a & 0xFFFF_FFFF),

        AluOp::FaddD => (f64::from_bits(a) + f64::from_bits(b)).to_bits(),
        AluOp::FsubD => (f64::from_bits(a) - f64::from_bits(b)).to_bits(),
        AluOp::FmulD => (f64::from_bits(a) * f64::from_bits(b)).to_bits(),
        AluOp::FdivD => (f64::from_bits(a) / f64::from_bits(b)).to_bits(),
        AluOp::FsqrtD => f64::from_bits(a).sqrt().to_bits(),
        AluOp::FminD => f64::from_bits(a).min(f64::from_bits(b)).to_bits(),
        AluOp::FmaxD => f64::from_bits(a).max(f64::from_bits(b)).to_bits(),
        AluOp::FsgnjD => (a & 0x7FFF_FFFF_FFFF_FFFF) | (b & 0x8000_0000_0000_0000),
        AluOp::FsgnjnD => (a & 0x7FFF_FFFF_FFFF_FFFF) | (!b & 0x8000_0000_0000_0000),
        AluOp::FsgnjxD => a ^ (b & 0x8000_0000_0000_0000),
        AluOp::FeqD => u64::from(f64::from_bits(a) == f64::from_bits(b)),
        AluOp::FltD => u64::from(f64::from_bits(a) < f64::from_bits(b)),
        AluOp::FleD => u64::from(f64::from_bits(a) <= f64::from_bits(b)),
        AluOp::FclassD => classify_d(f64::from_bits(a)),
        AluOp::FcvtWD => cvt_to_i32(f64::from_bits(a)),
        AluOp::FcvtWuD => cvt_to_u32(f64::from_bits(a)),
        AluOp::FcvtLD => cvt_to_i64(f64::from_bits(a)),
        AluOp::FcvtLuD => cvt_to_u64(f64::from_bits(a)),
        AluOp::FcvtDW => (a as i32 as f64).to_bits(),
        AluOp::FcvtDWu => (a as u32 as f64).to_bits(),
        AluOp::FcvtDL => (a as i64 as f64).to_bits(),
        AluOp::FcvtDLu => (a as f64).to_bits(),
        AluOp::FmvXD | AluOp::FmvDX => a,

        _ => 0,
    }
}

/// Unboxes a single-precision operand, substituting the canonical NaN for
/// improperly boxed values.
fn unbox_s(bits: u64) -> f32 {
    if bits & NAN_BOX == NAN_BOX {
        f32::from_bits(bits as u32)
    } else {
        f32::NAN
    }
}

/// NaN-boxes a single-precision result into a 64-bit register value.
fn box_s(v: f32) -> u64 {
    NAN_BOX | u64::from(v.to_bits())
}

/// Converts to i32 with ISA invalid-operation saturation, sign-extended.
fn cvt_to_i32(v: f64) -> u64 {
    let r = if v.is_nan() {
        i32::MAX
    } else {
        // Rust's saturating float-to-int cast matches the ISA for range overflow.
        v as i32
    };
    r as i64 as u64
}

/// Converts to u32 with ISA invalid-operation saturation, sign-extended.
fn cvt_to_u32(v: f64) -> u64 {
    let r = if v.is_nan() { u32::MAX } else { v as u32 };
    r as i32 as i64 as u64
}

/// Converts to i64 with ISA invalid-operation saturation.
fn cvt_to_i64(v: f64) -> u64 {
    let r = if v.is_nan() { i64::MAX } else { v as i64 };
    r as u64
}

/// Converts to u64 with ISA invalid-operation saturation.
fn cvt_to_u64(v: f64) -> u64 {
    if v.is_nan() { u64::MAX } else { v as u64 }
}

/// FCLASS.S: 10-bit classification mask.
fn classify_s(v: f32) -> u64 {
    let sign = v.is_sign_negative();
    let bit = if v == f32::NEG_INFINITY {
        0
    } else if v.is_nan() {
        if v.to_bits() & 0x0040_0000 != 0 { 9 } else { 8 }
    } else if v == f32::INFINITY {
        7
    } else if v == 0.0 {
        if sign { 3 } else { 4 }
    } else if v.is_subnormal() {
        if sign { 2 } else { 5 }
    } else if sign {
        1
    } else {
        6
    };
    1 << bit
}

/// FCLASS.D: 10-bit classification mask.
fn classify_d(v: f64) -> u64 {
    let sign = v.is_sign_negative();
    let bit = if v == f64::NEG_INFINITY {
        0
    } else if v.is_nan() {
        if v.to_bits() & 0x0008_0000_0000_0000 != 0 { 9 } else { 8 }
    } else if v == f64::INFINITY {
        7
    } else if v == 0.0 {
        if sign { 3 } else { 4 }
    } else if v.is_subnormal() {
        if sign { 2 } else { 5 }
    } else if sign {
        1
    } else {
        6
    };
    1 << bit
}
