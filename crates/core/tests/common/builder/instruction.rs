//! Raw instruction encoders.
//!
//! Format-level encoders (`r_type`, `i_type`, ...) plus mnemonic helpers for
//! the instructions test programs actually use. All encoders produce the
//! 32-bit little-endian word exactly as an assembler would.

use rv5s_core::common::constants::opcodes::*;

// ──────────────────────────────────────────────────────────
// Format encoders
// ──────────────────────────────────────────────────────────

/// Encode an R-type instruction.
pub fn r_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    (funct7 & 0x7F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | (rd & 0x1F) << 7
        | (opcode & 0x7F)
}

/// Encode an I-type instruction.
pub fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    let imm_bits = (imm as u32) & 0xFFF;
    imm_bits << 20 | (rs1 & 0x1F) << 15 | (funct3 & 0x7) << 12 | (rd & 0x1F) << 7 | (opcode & 0x7F)
}

/// Encode an S-type instruction.
pub fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let v = imm as u32;
    let hi = (v >> 5) & 0x7F;
    let lo = v & 0x1F;
    hi << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | lo << 7
        | (opcode & 0x7F)
}

/// Encode a B-type instruction.
pub fn b_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let v = imm as u32;
    let bit12 = (v >> 12) & 1;
    let bits10_5 = (v >> 5) & 0x3F;
    let bits4_1 = (v >> 1) & 0xF;
    let bit11 = (v >> 11) & 1;
    bit12 << 31
        | bits10_5 << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | bits4_1 << 8
        | bit11 << 7
        | (opcode & 0x7F)
}

/// Encode a U-type instruction (`imm20` is the raw upper-20 field).
pub fn u_type(opcode: u32, rd: u32, imm20: u32) -> u32 {
    (imm20 & 0xF_FFFF) << 12 | (rd & 0x1F) << 7 | (opcode & 0x7F)
}

/// Encode a J-type instruction.
pub fn j_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    let v = imm as u32;
    let bit20 = (v >> 20) & 1;
    let bits10_1 = (v >> 1) & 0x3FF;
    let bit11 = (v >> 11) & 1;
    let bits19_12 = (v >> 12) & 0xFF;
    bit20 << 31 | bits10_1 << 21 | bit11 << 20 | bits19_12 << 12 | (rd & 0x1F) << 7 | (opcode & 0x7F)
}

// ──────────────────────────────────────────────────────────
// Mnemonic helpers
// ──────────────────────────────────────────────────────────

/// `addi rd, rs1, imm`
pub fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_IMM, rd, 0b000, rs1, imm)
}

/// `nop` (`addi x0, x0, 0`)
pub fn nop() -> u32 {
    addi(0, 0, 0)
}

/// `add rd, rs1, rs2`
pub fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP, rd, 0b000, rs1, rs2, 0b000_0000)
}

/// `sub rd, rs1, rs2`
pub fn sub(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP, rd, 0b000, rs1, rs2, 0b010_0000)
}

/// `mul rd, rs1, rs2`
pub fn mul(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP, rd, 0b000, rs1, rs2, 0b000_0001)
}

/// `div rd, rs1, rs2`
pub fn div(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP, rd, 0b100, rs1, rs2, 0b000_0001)
}

/// `and rd, rs1, rs2`
pub fn and(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP, rd, 0b111, rs1, rs2, 0b000_0000)
}

/// `slli rd, rs1, shamt`
pub fn slli(rd: u32, rs1: u32, shamt: i32) -> u32 {
    i_type(OP_IMM, rd, 0b001, rs1, shamt)
}

/// `beq rs1, rs2, offset`
pub fn beq(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(BRANCH, 0b000, rs1, rs2, offset)
}

/// `bne rs1, rs2, offset`
pub fn bne(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(BRANCH, 0b001, rs1, rs2, offset)
}

/// `blt rs1, rs2, offset`
pub fn blt(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(BRANCH, 0b100, rs1, rs2, offset)
}

/// `bge rs1, rs2, offset`
pub fn bge(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(BRANCH, 0b101, rs1, rs2, offset)
}

/// `bltu rs1, rs2, offset`
pub fn bltu(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(BRANCH, 0b110, rs1, rs2, offset)
}

/// `bgeu rs1, rs2, offset`
pub fn bgeu(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(BRANCH, 0b111, rs1, rs2, offset)
}

/// `ld rd, imm(rs1)`
pub fn ld(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(LOAD, rd, 0b011, rs1, imm)
}

/// `sd rs2, imm(rs1)`
pub fn sd(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(STORE, 0b011, rs1, rs2, imm)
}

/// `lui rd, imm20`
pub fn lui(rd: u32, imm20: u32) -> u32 {
    u_type(LUI, rd, imm20)
}

/// `auipc rd, imm20`
pub fn auipc(rd: u32, imm20: u32) -> u32 {
    u_type(AUIPC, rd, imm20)
}

/// `jal rd, offset`
pub fn jal(rd: u32, offset: i32) -> u32 {
    j_type(JAL, rd, offset)
}

/// `jalr rd, rs1, imm`
pub fn jalr(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(JALR, rd, 0b000, rs1, imm)
}
