//! Global system constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Instruction Constants:** Field masks and shifts for instruction decoding.
//! 2. **Opcode Constants:** The RV64 base and F/D extension opcodes the decode tables know.
//! 3. **Simulation Constants:** The NOP bubble encoding and instruction size.

/// The canonical NOP encoding (`addi x0, x0, 0`), injected into latches as the bubble.
pub const NOP: u32 = 0x0000_0013;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Bit mask for extracting the opcode field from a RISC-V instruction.
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit mask for a 5-bit register index field.
pub const REG_MASK: u32 = 0x1F;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit position shift for the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit position shift for the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Bit position shift for the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;

/// Bit mask for the funct3 field (after shifting).
pub const FUNCT3_MASK: u32 = 0x7;

/// Bit position shift for the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

/// Bit mask for the funct7 field (after shifting).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Bit position shift for the funct5 field (bits 20-24, FP conversions).
pub const FUNCT5_SHIFT: u32 = 20;

/// Bit mask for the funct5 field (after shifting).
pub const FUNCT5_MASK: u32 = 0x1F;

/// Bit position shift for the funct2 field (bits 25-26, FMA format select).
pub const FUNCT2_SHIFT: u32 = 25;

/// Bit mask for the funct2 field (after shifting).
pub const FUNCT2_MASK: u32 = 0x3;

/// RV64 opcodes recognized by the main control unit.
pub mod opcodes {
    /// Integer register-register operations (`ADD`, `SUB`, `AND`, ...).
    pub const OP: u32 = 0b011_0011;
    /// Integer register-immediate operations (`ADDI`, `ANDI`, ...).
    pub const OP_IMM: u32 = 0b001_0011;
    /// Integer loads (`LB`..`LD`).
    pub const LOAD: u32 = 0b000_0011;
    /// Integer stores (`SB`..`SD`).
    pub const STORE: u32 = 0b010_0011;
    /// Conditional branches (`BEQ`..`BGEU`).
    pub const BRANCH: u32 = 0b110_0011;
    /// Load upper immediate.
    pub const LUI: u32 = 0b011_0111;
    /// Add upper immediate to PC.
    pub const AUIPC: u32 = 0b001_0111;
    /// Jump and link.
    pub const JAL: u32 = 0b110_1111;
    /// Jump and link register.
    pub const JALR: u32 = 0b110_0111;
    /// 32-bit register-immediate operations (`ADDIW`, `SLLIW`, ...).
    pub const OP_IMM_32: u32 = 0b001_1011;
    /// 32-bit register-register operations (`ADDW`, `SUBW`, ...).
    pub const OP_32: u32 = 0b011_1011;
    /// Floating-point loads (`FLW`, `FLD`).
    pub const LOAD_FP: u32 = 0b000_0111;
    /// Floating-point stores (`FSW`, `FSD`).
    pub const STORE_FP: u32 = 0b010_0111;
    /// Floating-point register-register operations.
    pub const OP_FP: u32 = 0b101_0011;
    /// Fused multiply-add.
    pub const FMADD: u32 = 0b100_0011;
    /// Fused multiply-subtract.
    pub const FMSUB: u32 = 0b100_0111;
    /// Fused negated multiply-add.
    pub const FNMADD: u32 = 0b100_1011;
    /// Fused negated multiply-subtract.
    pub const FNMSUB: u32 = 0b100_1111;
}
