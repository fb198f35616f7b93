//! Positional field extraction and immediate reconstruction.
//!
//! Immediates are scattered across the word differently per format; the
//! generator keys the format on the opcode and reassembles the pieces,
//! sign-extending from the top bit of the encoded immediate.

use crate::common::constants::{
    FUNCT2_MASK, FUNCT2_SHIFT, FUNCT3_MASK, FUNCT3_SHIFT, FUNCT5_MASK, FUNCT5_SHIFT, FUNCT7_MASK,
    FUNCT7_SHIFT, OPCODE_MASK, RD_SHIFT, REG_MASK, RS1_SHIFT, RS2_SHIFT, opcodes,
};

/// Extracts the opcode field (bits 0-6).
#[inline]
pub fn opcode(inst: u32) -> u32 {
    inst & OPCODE_MASK
}

/// Extracts the destination register index (bits 7-11).
#[inline]
pub fn rd(inst: u32) -> usize {
    ((inst >> RD_SHIFT) & REG_MASK) as usize
}

/// Extracts the first source register index (bits 15-19).
#[inline]
pub fn rs1(inst: u32) -> usize {
    ((inst >> RS1_SHIFT) & REG_MASK) as usize
}

/// Extracts the second source register index (bits 20-24).
#[inline]
pub fn rs2(inst: u32) -> usize {
    ((inst >> RS2_SHIFT) & REG_MASK) as usize
}

/// Whether this word's format reads a second source register.
///
/// For I/U/J formats bits 20-24 are immediate bits, not a register index;
/// treating them as one would create phantom dependencies.
#[inline]
pub fn reads_rs2(inst: u32) -> bool {
    matches!(
        opcode(inst),
        opcodes::OP
            | opcodes::OP_32
            | opcodes::STORE
            | opcodes::STORE_FP
            | opcodes::BRANCH
            | opcodes::OP_FP
            | opcodes::FMADD
            | opcodes::FMSUB
            | opcodes::FNMADD
            | opcodes::FNMSUB
    )
}

/// Extracts the funct3 field (bits 12-14).
#[inline]
pub fn funct3(inst: u32) -> u32 {
    (inst >> FUNCT3_SHIFT) & FUNCT3_MASK
}

/// Extracts the funct7 field (bits 25-31).
#[inline]
pub fn funct7(inst: u32) -> u32 {
    (inst >> FUNCT7_SHIFT) & FUNCT7_MASK
}

/// Extracts the funct5 field (bits 20-24), the narrow view used by FP conversions.
#[inline]
pub fn funct5(inst: u32) -> u32 {
    (inst >> FUNCT5_SHIFT) & FUNCT5_MASK
}

/// Extracts the funct2 field (bits 25-26), the FMA format selector.
#[inline]
pub fn funct2(inst: u32) -> u32 {
    (inst >> FUNCT2_SHIFT) & FUNCT2_MASK
}

/// Reconstructs the sign-extended immediate for an instruction word.
///
/// The format is selected by opcode: I for loads, immediate ALU ops, and
/// `JALR`; S for stores; B for branches; U for `LUI`/`AUIPC`; J for `JAL`.
/// Opcodes without an immediate (R-type and unrecognized encodings) yield 0.
pub fn immediate(inst: u32) -> i32 {
    match opcode(inst) {
        opcodes::OP_IMM | opcodes::LOAD | opcodes::JALR | opcodes::OP_IMM_32
        | opcodes::LOAD_FP => imm_i(inst),
        opcodes::STORE | opcodes::STORE_FP => imm_s(inst),
        opcodes::BRANCH => imm_b(inst),
        opcodes::LUI | opcodes::AUIPC => imm_u(inst),
        opcodes::JAL => imm_j(inst),
        _ => 0,
    }
}

/// I-type: `imm[11:0]` in bits 31-20, sign-extended.
#[inline]
fn imm_i(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// S-type: `imm[11:5]` in bits 31-25, `imm[4:0]` in bits 11-7.
#[inline]
fn imm_s(inst: u32) -> i32 {
    let hi = (inst as i32) >> 25;
    let lo = ((inst >> 7) & 0x1F) as i32;
    (hi << 5) | lo
}

/// B-type: 13-bit even offset scattered over bits 31, 30-25, 11-8, 7.
#[inline]
fn imm_b(inst: u32) -> i32 {
    let bit12 = (inst >> 31) & 0x1;
    let bit11 = (inst >> 7) & 0x1;
    let bits10_5 = (inst >> 25) & 0x3F;
    let bits4_1 = (inst >> 8) & 0xF;
    let raw = (bit12 << 12) | (bit11 << 11) | (bits10_5 << 5) | (bits4_1 << 1);
    // Sign-extend from bit 12 of the 13-bit immediate.
    ((raw << 19) as i32) >> 19
}

/// U-type: `imm[31:12]` kept in place, low 12 bits zero.
#[inline]
fn imm_u(inst: u32) -> i32 {
    (inst & 0xFFFF_F000) as i32
}

/// J-type: 21-bit even offset scattered over bits 31, 30-21, 20, 19-12.
#[inline]
fn imm_j(inst: u32) -> i32 {
    let bit20 = (inst >> 31) & 0x1;
    let bits19_12 = (inst >> 12) & 0xFF;
    let bit11 = (inst >> 20) & 0x1;
    let bits10_1 = (inst >> 21) & 0x3FF;
    let raw = (bit20 << 20) | (bits19_12 << 12) | (bit11 << 11) | (bits10_1 << 1);
    // Sign-extend from bit 20 of the 21-bit immediate.
    ((raw << 11) as i32) >> 11
}
