//! Decode table tests: main control and ALU control.

use crate::common::builder::instruction::{
    add, addi, beq, bge, bltu, div, i_type, ld, lui, mul, r_type, sd, slli, sub,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use rv5s_core::common::constants::opcodes;
use rv5s_core::common::constants::NOP;
use rv5s_core::pipeline::control::{decode_alu, decode_main};
use rv5s_core::pipeline::signals::{AluHint, AluOp, ControlSignals};

// ──────────────────────────────────────────────────────────
// Main control unit
// ──────────────────────────────────────────────────────────

#[test]
fn nop_decodes_as_an_immediate_alu_op() {
    let s = decode_main(NOP);
    assert!(s.reg_write && s.alu_src);
    assert!(!s.mem_read && !s.mem_write && !s.branch && !s.mem_to_reg);
    assert_eq!(s.alu_hint, AluHint::BranchImm);
}

#[test]
fn load_decodes_with_memory_read_path() {
    let s = decode_main(ld(1, 2, 8));
    assert!(s.reg_write && s.mem_read && s.mem_to_reg && s.alu_src);
    assert!(!s.mem_write && !s.branch);
    assert_eq!(s.alu_hint, AluHint::ForceAdd);
}

#[test]
fn store_decodes_with_memory_write_path() {
    let s = decode_main(sd(1, 2, 8));
    assert!(s.mem_write && s.alu_src);
    assert!(!s.reg_write && !s.mem_read && !s.branch);
}

#[test]
fn branch_decodes_with_register_compare() {
    let s = decode_main(beq(1, 2, 8));
    assert!(s.branch);
    assert!(!s.alu_src && !s.reg_write && !s.mem_read && !s.mem_write);
    assert_eq!(s.alu_hint, AluHint::BranchImm);
}

#[test]
fn unsupported_opcode_decodes_to_all_false() {
    let s = decode_main(0b111_1111);
    assert_eq!(s, ControlSignals::default());
    assert_eq!(decode_alu(0b111_1111, s.alu_hint), AluOp::Add); // ForceAdd hint
}

// ──────────────────────────────────────────────────────────
// ALU control unit
// ──────────────────────────────────────────────────────────

#[rstest]
#[case(addi(1, 2, 3), AluOp::Add)]
#[case(slli(1, 2, 4), AluOp::Sll)]
#[case(i_type(opcodes::OP_IMM, 1, 0b101, 2, 0x400 + 3), AluOp::Sra)] // srai: funct7=0b0100000
#[case(i_type(opcodes::OP_IMM, 1, 0b101, 2, 3), AluOp::Srl)] // srli
fn immediate_family(#[case] inst: u32, #[case] expected: AluOp) {
    let hint = decode_main(inst).alu_hint;
    assert_eq!(decode_alu(inst, hint), expected);
}

#[rstest]
#[case(beq(1, 2, 8), AluOp::Sub)]
#[case(bge(1, 2, 8), AluOp::Slt)]
#[case(bltu(1, 2, 8), AluOp::Sltu)]
fn branch_compares(#[case] inst: u32, #[case] expected: AluOp) {
    assert_eq!(decode_alu(inst, AluHint::BranchImm), expected);
}

#[rstest]
#[case(add(1, 2, 3), AluOp::Add)]
#[case(sub(1, 2, 3), AluOp::Sub)]
#[case(mul(1, 2, 3), AluOp::Mul)]
#[case(div(1, 2, 3), AluOp::Div)]
fn register_family(#[case] inst: u32, #[case] expected: AluOp) {
    assert_eq!(decode_alu(inst, AluHint::IntRtype), expected);
}

#[test]
fn w_variants() {
    // addiw has no funct7; the immediate occupies those bits.
    let addiw = i_type(opcodes::OP_IMM_32, 1, 0b000, 2, -1);
    assert_eq!(decode_alu(addiw, AluHint::IntRtype), AluOp::Addw);

    let subw = r_type(opcodes::OP_32, 1, 0b000, 2, 3, 0b010_0000);
    assert_eq!(decode_alu(subw, AluHint::IntRtype), AluOp::Subw);

    let divuw = r_type(opcodes::OP_32, 1, 0b101, 2, 3, 0b000_0001);
    assert_eq!(decode_alu(divuw, AluHint::IntRtype), AluOp::Divuw);
}

#[test]
fn fp_and_fma_families() {
    // fadd.d f1, f2, f3
    let fadd_d = r_type(opcodes::OP_FP, 1, 0b000, 2, 3, 0b000_0001);
    assert_eq!(decode_alu(fadd_d, AluHint::FpRtype), AluOp::FaddD);

    // fcvt.w.s (funct7 0b1100000, rs2 field 0)
    let fcvt_w_s = r_type(opcodes::OP_FP, 1, 0b000, 2, 0, 0b110_0000);
    assert_eq!(decode_alu(fcvt_w_s, AluHint::FpRtype), AluOp::FcvtWS);

    // fmadd.s (funct2 == 0b00 lives in the low funct7 bits)
    let fmadd_s = r_type(opcodes::FMADD, 1, 0b000, 2, 3, 0b000_0000);
    assert_eq!(decode_alu(fmadd_s, AluHint::Fma), AluOp::FmaddS);
}

#[test]
fn unknown_funct_combination_is_none() {
    // Integer table only inspects the M-extension/SUB funct7 selectors, so
    // a garbage funct7 falls back to the base operation.
    let garbage_funct7 = r_type(opcodes::OP, 1, 0b010, 2, 3, 0b111_1111);
    assert_eq!(decode_alu(garbage_funct7, AluHint::IntRtype), AluOp::Slt);

    // FP group with an unknown funct7.
    let bogus_fp = r_type(opcodes::OP_FP, 1, 0b000, 2, 3, 0b111_1111);
    assert_eq!(decode_alu(bogus_fp, AluHint::FpRtype), AluOp::None);
}
