//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the four registers that sit between the five pipeline
//! stages: IF/ID, ID/EX, EX/MEM, MEM/WB. Each holds the frozen output of one
//! stage, consumed by the next stage on the following cycle.
//!
//! Every latch has a canonical "bubble" value: instruction set to the NOP
//! encoding, program counter zero, all data and control fields false/zero.
//! `Default` constructs the bubble and `reset()` restores it; resetting a
//! latch is how the engine flushes wrong-path work out of the pipeline.

use crate::common::constants::NOP;
use crate::pipeline::signals::ControlSignals;

/// Data passed from Fetch (IF) to Decode (ID).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfIdLatch {
    /// Fetched 32-bit instruction word.
    pub instruction: u32,
    /// Program counter the word was fetched from.
    pub pc: u64,
    /// Fetch-time branch prediction (taken?) under prediction modes.
    pub pred_taken: bool,
}

impl Default for IfIdLatch {
    fn default() -> Self {
        Self {
            instruction: NOP,
            pc: 0,
            pred_taken: false,
        }
    }
}

impl IfIdLatch {
    /// Resets the latch to the NOP bubble.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Data passed from Decode (ID) to Execute (EX).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdExLatch {
    /// Program counter of the instruction.
    pub pc: u64,
    /// Full instruction word, re-inspected by the ALU control unit in EX.
    pub instruction: u32,
    /// Value read (or forwarded) for rs1.
    pub reg1_data: u64,
    /// Value read (or forwarded) for rs2.
    pub reg2_data: u64,
    /// Sign-extended immediate.
    pub imm: i32,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Destination register index.
    pub rd: usize,
    /// Control signals generated by the main control unit.
    pub ctrl: ControlSignals,
    /// Fetch-time branch prediction, carried for resolution in EX.
    pub pred_taken: bool,
}

impl Default for IdExLatch {
    fn default() -> Self {
        Self {
            pc: 0,
            instruction: NOP,
            reg1_data: 0,
            reg2_data: 0,
            imm: 0,
            rs1: 0,
            rs2: 0,
            rd: 0,
            ctrl: ControlSignals::default(),
            pred_taken: false,
        }
    }
}

impl IdExLatch {
    /// Resets the latch to the NOP bubble with all control signals off.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the latch currently holds the bubble (no real work in flight).
    pub fn is_bubble(&self) -> bool {
        self.instruction == NOP
    }
}

/// Data passed from Execute (EX) to Memory (MEM).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExMemLatch {
    /// ALU result (also the address for memory operations).
    pub alu_result: u64,
    /// rs2 value, needed by store instructions.
    pub reg2_data: u64,
    /// Destination register index.
    pub rd: usize,
    /// Whether a conditional branch resolved taken this cycle.
    pub branch_taken: bool,
    /// Resolved branch target.
    pub branch_target_pc: u64,
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Select the memory result for writeback.
    pub mem_to_reg: bool,
    /// Enable memory read.
    pub mem_read: bool,
    /// Enable memory write.
    pub mem_write: bool,
}

impl ExMemLatch {
    /// Resets the latch to the bubble (all fields zero/false).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Data passed from Memory (MEM) to Writeback (WB).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemWbLatch {
    /// Data read from memory (loads).
    pub memory_data: u64,
    /// ALU result (everything else).
    pub alu_result: u64,
    /// Destination register index.
    pub rd: usize,
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Select the memory result for writeback.
    pub mem_to_reg: bool,
}

impl MemWbLatch {
    /// Resets the latch to the bubble (all fields zero/false).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
