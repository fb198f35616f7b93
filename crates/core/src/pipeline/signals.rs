//! Pipeline control signals and ALU operation types.
//!
//! This module defines the outputs of the two-level decode. It provides:
//! 1. **Operation Tags:** The closed enumeration of concrete ALU operations.
//! 2. **Decode Hints:** The coarse ALU-op hint the main control unit hands the ALU control unit.
//! 3. **Control Signals:** The per-instruction signal set generated in the Decode stage.

/// Concrete ALU operation selected by the ALU control unit.
///
/// `None` means the encoding matched no table entry; callers must treat it as
/// an unsupported-instruction signal, not as a usable result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// No recognized operation.
    #[default]
    None,

    // ── Integer arithmetic / logic / shifts / compares ──
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than (unsigned).
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Multiply (low 64 bits).
    Mul,
    /// Multiply high, signed × signed.
    Mulh,
    /// Multiply high, signed × unsigned.
    Mulhsu,
    /// Multiply high, unsigned × unsigned.
    Mulhu,
    /// Divide (signed).
    Div,
    /// Divide (unsigned).
    Divu,
    /// Remainder (signed).
    Rem,
    /// Remainder (unsigned).
    Remu,

    // ── 32-bit "W" variants (truncate, operate, sign-extend) ──
    /// 32-bit addition.
    Addw,
    /// 32-bit subtraction.
    Subw,
    /// 32-bit shift left logical.
    Sllw,
    /// 32-bit shift right logical.
    Srlw,
    /// 32-bit shift right arithmetic.
    Sraw,
    /// 32-bit multiply.
    Mulw,
    /// 32-bit divide (signed).
    Divw,
    /// 32-bit divide (unsigned).
    Divuw,
    /// 32-bit remainder (signed).
    Remw,
    /// 32-bit remainder (unsigned).
    Remuw,

    // ── Single-precision floating point ──
    /// Single-precision addition.
    FaddS,
    /// Single-precision subtraction.
    FsubS,
    /// Single-precision multiplication.
    FmulS,
    /// Single-precision division.
    FdivS,
    /// Single-precision square root.
    FsqrtS,
    /// Single-precision sign injection.
    FsgnjS,
    /// Single-precision sign injection (negated).
    FsgnjnS,
    /// Single-precision sign injection (XOR).
    FsgnjxS,
    /// Single-precision minimum.
    FminS,
    /// Single-precision maximum.
    FmaxS,
    /// Single-precision equality compare.
    FeqS,
    /// Single-precision less-than compare.
    FltS,
    /// Single-precision less-or-equal compare.
    FleS,
    /// Classify single-precision value.
    FclassS,
    /// Convert single to signed word.
    FcvtWS,
    /// Convert single to unsigned word.
    FcvtWuS,
    /// Convert single to signed long.
    FcvtLS,
    /// Convert single to unsigned long.
    FcvtLuS,
    /// Convert signed word to single.
    FcvtSW,
    /// Convert unsigned word to single.
    FcvtSWu,
    /// Convert signed long to single.
    FcvtSL,
    /// Convert unsigned long to single.
    FcvtSLu,
    /// Move single bits to integer register.
    FmvXW,
    /// Move integer bits to single register.
    FmvWX,

    // ── Double-precision floating point ──
    /// Double-precision addition.
    FaddD,
    /// Double-precision subtraction.
    FsubD,
    /// Double-precision multiplication.
    FmulD,
    /// Double-precision division.
    FdivD,
    /// Double-precision square root.
    FsqrtD,
    /// Double-precision sign injection.
    FsgnjD,
    /// Double-precision sign injection (negated).
    FsgnjnD,
    /// Double-precision sign injection (XOR).
    FsgnjxD,
    /// Double-precision minimum.
    FminD,
    /// Double-precision maximum.
    FmaxD,
    /// Double-precision equality compare.
    FeqD,
    /// Double-precision less-than compare.
    FltD,
    /// Double-precision less-or-equal compare.
    FleD,
    /// Classify double-precision value.
    FclassD,
    /// Convert double to signed word.
    FcvtWD,
    /// Convert double to unsigned word.
    FcvtWuD,
    /// Convert double to signed long.
    FcvtLD,
    /// Convert double to unsigned long.
    FcvtLuD,
    /// Convert signed word to double.
    FcvtDW,
    /// Convert unsigned word to double.
    FcvtDWu,
    /// Convert signed long to double.
    FcvtDL,
    /// Convert unsigned long to double.
    FcvtDLu,
    /// Move double bits to integer register.
    FmvXD,
    /// Move integer bits to double register.
    FmvDX,

    // ── Fused multiply-add family (decoded, not executed by the 2-operand port) ──
    /// Single-precision fused multiply-add.
    FmaddS,
    /// Single-precision fused multiply-subtract.
    FmsubS,
    /// Single-precision fused negated multiply-add.
    FnmaddS,
    /// Single-precision fused negated multiply-subtract.
    FnmsubS,
    /// Double-precision fused multiply-add.
    FmaddD,
    /// Double-precision fused multiply-subtract.
    FmsubD,
    /// Double-precision fused negated multiply-add.
    FnmaddD,
    /// Double-precision fused negated multiply-subtract.
    FnmsubD,
}

/// Coarse ALU-op hint produced by the main control unit.
///
/// The ALU control unit refines the hint with funct3/funct7/funct5/funct2
/// into a concrete [`AluOp`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluHint {
    /// Force an addition (loads, stores, `JALR`, `LUI`, `AUIPC`).
    #[default]
    ForceAdd,
    /// Branch comparison or I-type ALU family.
    BranchImm,
    /// Integer R-type / W-type family.
    IntRtype,
    /// Floating-point R-type family.
    FpRtype,
    /// Fused multiply-add family.
    Fma,
}

/// Control signals produced by the main control unit for one instruction.
///
/// A pure function of the instruction word; the all-default value is both the
/// bubble's signal set and the silent decode-miss result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Select the memory result (instead of the ALU result) for writeback.
    pub mem_to_reg: bool,
    /// Enable memory read (load).
    pub mem_read: bool,
    /// Enable memory write (store).
    pub mem_write: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Select the immediate (instead of rs2) as the second ALU operand.
    pub alu_src: bool,
    /// Coarse hint for the ALU control unit.
    pub alu_hint: AluHint,
}
