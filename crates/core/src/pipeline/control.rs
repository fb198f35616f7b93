//! Two-level instruction decode: main control unit and ALU control unit.
//!
//! Both levels are pure combinational tables:
//! 1. **Main control** ([`decode_main`]): opcode → [`ControlSignals`], run in the Decode stage.
//! 2. **ALU control** ([`decode_alu`]): coarse hint + funct fields → [`AluOp`], run in Execute.
//!
//! Edge policy: opcodes outside the supported set decode to the all-false
//! signal set, and funct combinations outside the tables yield
//! [`AluOp::None`]. Both are silent: execution treats them as effective
//! no-ops rather than raising an illegal-instruction fault.

use crate::common::constants::opcodes;
use crate::isa;
use crate::pipeline::signals::{AluHint, AluOp, ControlSignals};

/// Decodes the main control signals for an instruction word.
///
/// Total over all 32-bit inputs; only the opcode is inspected.
pub fn decode_main(inst: u32) -> ControlSignals {
    let mut s = ControlSignals::default();
    match isa::opcode(inst) {
        opcodes::OP => {
            s.reg_write = true;
            s.alu_hint = AluHint::IntRtype;
        }
        opcodes::OP_IMM => {
            s.alu_src = true;
            s.reg_write = true;
            s.alu_hint = AluHint::BranchImm;
        }
        opcodes::LOAD => {
            s.alu_src = true;
            s.mem_to_reg = true;
            s.reg_write = true;
            s.mem_read = true;
        }
        opcodes::STORE => {
            s.alu_src = true;
            s.mem_write = true;
        }
        opcodes::BRANCH => {
            s.branch = true;
            s.alu_hint = AluHint::BranchImm;
        }
        opcodes::LUI => {
            s.alu_src = true;
            s.reg_write = true;
        }
        opcodes::AUIPC => {
            s.reg_write = true;
        }
        opcodes::JAL => {
            s.reg_write = true;
        }
        opcodes::JALR => {
            s.alu_src = true;
            s.reg_write = true;
        }
        // W-variant immediates decode like R-types but take the immediate operand.
        opcodes::OP_IMM_32 => {
            s.alu_src = true;
            s.reg_write = true;
            s.alu_hint = AluHint::IntRtype;
        }
        opcodes::OP_32 => {
            s.reg_write = true;
            s.alu_hint = AluHint::IntRtype;
        }
        opcodes::LOAD_FP => {
            s.alu_src = true;
            s.mem_to_reg = true;
            s.reg_write = true;
            s.mem_read = true;
        }
        opcodes::STORE_FP => {
            s.alu_src = true;
            s.mem_write = true;
        }
        opcodes::OP_FP => {
            s.reg_write = true;
            s.alu_hint = AluHint::FpRtype;
        }
        opcodes::FMADD | opcodes::FMSUB | opcodes::FNMADD | opcodes::FNMSUB => {
            s.reg_write = true;
            s.alu_hint = AluHint::Fma;
        }
        // Unsupported opcode: all-false signal set, treated as a no-op downstream.
        _ => {}
    }
    s
}

/// Refines the coarse hint into a concrete ALU operation.
///
/// Keyed first on the hint, then on funct3/funct7/funct5/funct2 as each
/// family requires. Combinations absent from the tables yield `AluOp::None`.
pub fn decode_alu(inst: u32, hint: AluHint) -> AluOp {
    match hint {
        AluHint::ForceAdd => AluOp::Add,
        AluHint::BranchImm => decode_branch_imm(inst),
        AluHint::IntRtype => decode_int_rtype(inst),
        AluHint::FpRtype => decode_fp_rtype(inst),
        AluHint::Fma => decode_fma(inst),
    }
}

/// Branch comparisons and the I-type ALU family.
fn decode_branch_imm(inst: u32) -> AluOp {
    let funct3 = isa::funct3(inst);
    if isa::opcode(inst) == opcodes::BRANCH {
        match funct3 {
            // BEQ/BNE compare via subtraction; BLT/BGE and BLTU/BGEU via set-less-than.
            0b000 | 0b001 => AluOp::Sub,
            0b100 | 0b101 => AluOp::Slt,
            0b110 | 0b111 => AluOp::Sltu,
            _ => AluOp::None,
        }
    } else {
        match funct3 {
            0b000 => AluOp::Add,
            0b010 => AluOp::Slt,
            0b011 => AluOp::Sltu,
            0b100 => AluOp::Xor,
            0b110 => AluOp::Or,
            0b111 => AluOp::And,
            0b001 => AluOp::Sll,
            0b101 => {
                if isa::funct7(inst) == 0b010_0000 {
                    AluOp::Sra
                } else {
                    AluOp::Srl
                }
            }
            _ => AluOp::None,
        }
    }
}

/// Integer R-type and W-type families, including the M extension.
fn decode_int_rtype(inst: u32) -> AluOp {
    let opcode = isa::opcode(inst);
    let funct3 = isa::funct3(inst);
    let funct7 = isa::funct7(inst);

    if opcode == opcodes::OP_32 || opcode == opcodes::OP_IMM_32 {
        match funct3 {
            0b000 => {
                if opcode == opcodes::OP_IMM_32 {
                    return AluOp::Addw; // ADDIW has no funct7
                }
                return match funct7 {
                    0b000_0001 => AluOp::Mulw,
                    0b010_0000 => AluOp::Subw,
                    _ => AluOp::Addw,
                };
            }
            0b001 => return AluOp::Sllw,
            0b100 => {
                if funct7 == 0b000_0001 {
                    return AluOp::Divw;
                }
            }
            0b101 => {
                return match funct7 {
                    0b000_0001 => AluOp::Divuw,
                    0b010_0000 => AluOp::Sraw,
                    _ => AluOp::Srlw,
                };
            }
            0b110 => {
                if funct7 == 0b000_0001 {
                    return AluOp::Remw;
                }
            }
            0b111 => {
                if funct7 == 0b000_0001 {
                    return AluOp::Remuw;
                }
            }
            _ => {}
        }
        return AluOp::None;
    }

    match funct3 {
        0b000 => match funct7 {
            0b000_0001 => AluOp::Mul,
            0b010_0000 => AluOp::Sub,
            _ => AluOp::Add,
        },
        0b001 => {
            if funct7 == 0b000_0001 {
                AluOp::Mulh
            } else {
                AluOp::Sll
            }
        }
        0b010 => {
            if funct7 == 0b000_0001 {
                AluOp::Mulhsu
            } else {
                AluOp::Slt
            }
        }
        0b011 => {
            if funct7 == 0b000_0001 {
                AluOp::Mulhu
            } else {
                AluOp::Sltu
            }
        }
        0b100 => {
            if funct7 == 0b000_0001 {
                AluOp::Div
            } else {
                AluOp::Xor
            }
        }
        0b101 => match funct7 {
            0b000_0001 => AluOp::Divu,
            0b010_0000 => AluOp::Sra,
            _ => AluOp::Srl,
        },
        0b110 => {
            if funct7 == 0b000_0001 {
                AluOp::Rem
            } else {
                AluOp::Or
            }
        }
        0b111 => {
            if funct7 == 0b000_0001 {
                AluOp::Remu
            } else {
                AluOp::And
            }
        }
        _ => AluOp::None,
    }
}

/// Floating-point R-type family: funct7 selects the group, funct3/funct5 refine it.
fn decode_fp_rtype(inst: u32) -> AluOp {
    let funct3 = isa::funct3(inst);
    let funct5 = isa::funct5(inst);

    match isa::funct7(inst) {
        0b000_0000 => AluOp::FaddS,
        0b000_0001 => AluOp::FaddD,
        0b000_0100 => AluOp::FsubS,
        0b000_0101 => AluOp::FsubD,
        0b000_1000 => AluOp::FmulS,
        0b000_1001 => AluOp::FmulD,
        0b000_1100 => AluOp::FdivS,
        0b000_1101 => AluOp::FdivD,
        0b010_1100 if funct5 == 0 => AluOp::FsqrtS,
        0b010_1101 if funct5 == 0 => AluOp::FsqrtD,
        0b001_0000 => match funct3 {
            0b000 => AluOp::FsgnjS,
            0b001 => AluOp::FsgnjnS,
            0b010 => AluOp::FsgnjxS,
            _ => AluOp::None,
        },
        0b001_0001 => match funct3 {
            0b000 => AluOp::FsgnjD,
            0b001 => AluOp::FsgnjnD,
            0b010 => AluOp::FsgnjxD,
            _ => AluOp::None,
        },
        0b001_0100 => match funct3 {
            0b000 => AluOp::FminS,
            0b001 => AluOp::FmaxS,
            _ => AluOp::None,
        },
        0b001_0101 => match funct3 {
            0b000 => AluOp::FminD,
            0b001 => AluOp::FmaxD,
            _ => AluOp::None,
        },
        0b101_0000 => match funct3 {
            0b010 => AluOp::FeqS,
            0b001 => AluOp::FltS,
            0b000 => AluOp::FleS,
            _ => AluOp::None,
        },
        0b101_0001 => match funct3 {
            0b010 => AluOp::FeqD,
            0b001 => AluOp::FltD,
            0b000 => AluOp::FleD,
            _ => AluOp::None,
        },
        0b110_0000 => match funct5 {
            0b00000 => AluOp::FcvtWS,
            0b00001 => AluOp::FcvtWuS,
            0b00010 => AluOp::FcvtLS,
            0b00011 => AluOp::FcvtLuS,
            _ => AluOp::None,
        },
        0b110_0001 => match funct5 {
            0b00000 => AluOp::FcvtWD,
            0b00001 => AluOp::FcvtWuD,
            0b00010 => AluOp::FcvtLD,
            0b00011 => AluOp::FcvtLuD,
            _ => AluOp::None,
        },
        0b110_1000 => match funct5 {
            0b00000 => AluOp::FcvtSW,
            0b00001 => AluOp::FcvtSWu,
            0b00010 => AluOp::FcvtSL,
            0b00011 => AluOp::FcvtSLu,
            _ => AluOp::None,
        },
        0b110_1001 => match funct5 {
            0b00000 => AluOp::FcvtDW,
            0b00001 => AluOp::FcvtDWu,
            0b00010 => AluOp::FcvtDL,
            0b00011 => AluOp::FcvtDLu,
            _ => AluOp::None,
        },
        0b111_0000 => match funct3 {
            0b001 => AluOp::FclassS,
            0b000 => AluOp::FmvXW,
            _ => AluOp::None,
        },
        0b111_0001 => match funct3 {
            0b001 => AluOp::FclassD,
            0b000 => AluOp::FmvXD,
            _ => AluOp::None,
        },
        0b111_1000 => AluOp::FmvWX,
        0b111_1001 => AluOp::FmvDX,
        _ => AluOp::None,
    }
}

/// Fused multiply-add family: opcode selects the operation, funct2 the format.
fn decode_fma(inst: u32) -> AluOp {
    let single = isa::funct2(inst) == 0b00;
    match isa::opcode(inst) {
        opcodes::FMADD => {
            if single {
                AluOp::FmaddS
            } else {
                AluOp::FmaddD
            }
        }
        opcodes::FMSUB => {
            if single {
                AluOp::FmsubS
            } else {
                AluOp::FmsubD
            }
        }
        opcodes::FNMADD => {
            if single {
                AluOp::FnmaddS
            } else {
                AluOp::FnmaddD
            }
        }
        opcodes::FNMSUB => {
            if single {
                AluOp::FnmsubS
            } else {
                AluOp::FnmsubD
            }
        }
        _ => AluOp::None,
    }
}
