//! Hazard-handling strategies.
//!
//! The pipelined engine is one type parameterized by a [`HazardMode`]; the
//! mode selects a [`HazardPolicy`] strategy object invoked at the
//! Decode/Execute boundary. This module provides:
//! 1. **Operand Forwarding:** Bypassing EX/MEM and MEM/WB results into the
//!    decode-stage register read to resolve read-after-write hazards.
//! 2. **Interlocks:** Stall decisions, load-use only (with forwarding) or
//!    any in-flight producer (without).
//! 3. **Branch Prediction:** Fetch-time direction guesses, static
//!    (backward-taken/forward-not-taken) or dynamic (2-bit counters).
//!
//! The six documented modes are interchangeable implementations behind one
//! trait, not six engine variants.

use crate::common::constants::opcodes;
use crate::isa;
use crate::pipeline::latches::{ExMemLatch, MemWbLatch};
use serde::Deserialize;

/// Selector fixing which hazard-resolution behavior the engine applies.
///
/// Chosen at construction or via an explicit mode change, never inferred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum HazardMode {
    /// Naive register reads, no stalls, flush-on-taken-branch only.
    #[default]
    NoHazardNoForwarding,
    /// Forwarding without interlocks (load-use hazards remain unresolved).
    ForwardingNoHazard,
    /// Interlocks without forwarding (stall until writeback).
    HazardNoForwarding,
    /// Forwarding plus the load-use interlock.
    HazardAndForwarding,
    /// Forwarding, interlock, and backward-taken/forward-not-taken prediction.
    StaticBranchPrediction,
    /// Forwarding, interlock, and a 2-bit saturating-counter predictor.
    DynamicBranchPrediction,
}

/// Strategy interface invoked by the Decode and Fetch/Execute stages.
///
/// The default methods implement the naive behavior
/// ([`HazardMode::NoHazardNoForwarding`]): register-file reads are used as
/// read, nothing stalls, and every branch is predicted not-taken.
pub trait HazardPolicy: std::fmt::Debug + Send {
    /// Resolves a source operand at the decode-stage register read.
    ///
    /// `reg_val` is the (possibly stale) register-file value for `rs`;
    /// forwarding policies bypass newer results from the EX/MEM and MEM/WB
    /// latches.
    fn forward(
        &self,
        _rs: usize,
        reg_val: u64,
        _ex_mem: &ExMemLatch,
        _mem_wb: &MemWbLatch,
    ) -> u64 {
        reg_val
    }

    /// Whether decode must hold this instruction for a cycle.
    ///
    /// A stalling decode inserts a bubble into ID/EX and leaves IF/ID and
    /// the program counter untouched, so the same word is decoded again
    /// next cycle.
    fn should_stall(
        &self,
        _rs1: usize,
        _rs2: usize,
        _ex_mem: &ExMemLatch,
        _mem_wb: &MemWbLatch,
    ) -> bool {
        false
    }

    /// Fetch-time direction guess for the word at `pc`.
    fn predict(&mut self, _pc: u64, _inst: u32) -> bool {
        false
    }

    /// Branch-outcome feedback from the Execute stage.
    fn train(&mut self, _pc: u64, _taken: bool) {}
}

/// Builds the strategy object for a mode.
///
/// `bht_size` is consumed only by [`HazardMode::DynamicBranchPrediction`].
pub fn policy_for(mode: HazardMode, bht_size: usize) -> Box<dyn HazardPolicy> {
    match mode {
        HazardMode::NoHazardNoForwarding => Box::new(NoHazardNoForwarding),
        HazardMode::ForwardingNoHazard => Box::new(ForwardingNoHazard),
        HazardMode::HazardNoForwarding => Box::new(HazardNoForwarding),
        HazardMode::HazardAndForwarding => Box::new(HazardAndForwarding),
        HazardMode::StaticBranchPrediction => Box::new(StaticBranchPrediction),
        HazardMode::DynamicBranchPrediction => {
            Box::new(DynamicBranchPrediction::new(bht_size))
        }
    }
}

// ── Shared mechanics ──

/// Bypasses the newest in-flight result for `rs`, if one is available.
///
/// EX/MEM wins over MEM/WB (it is one instruction closer). A load sitting
/// in EX/MEM has no data yet (only an address) so it is never forwarded
/// from there; policies that also interlock stall that case instead.
fn forward_from_latches(rs: usize, reg_val: u64, ex_mem: &ExMemLatch, mem_wb: &MemWbLatch) -> u64 {
    if rs != 0 && ex_mem.reg_write && !ex_mem.mem_read && ex_mem.rd == rs {
        return ex_mem.alu_result;
    }
    if rs != 0 && mem_wb.reg_write && mem_wb.rd == rs {
        return if mem_wb.mem_to_reg {
            mem_wb.memory_data
        } else {
            mem_wb.alu_result
        };
    }
    reg_val
}

/// Load-use check: the instruction one ahead is a load producing a source
/// register of the instruction being decoded.
fn load_use_stall(rs1: usize, rs2: usize, ex_mem: &ExMemLatch) -> bool {
    ex_mem.mem_read && ex_mem.rd != 0 && (ex_mem.rd == rs1 || ex_mem.rd == rs2)
}

/// No-forwarding interlock: stall while any in-flight producer matches a
/// source register. Once the producer reaches writeback it drains before
/// the next decode, so EX/MEM and MEM/WB are the only latches to check.
fn interlock_stall(rs1: usize, rs2: usize, ex_mem: &ExMemLatch, mem_wb: &MemWbLatch) -> bool {
    let matches = |rd: usize| rd != 0 && (rd == rs1 || rd == rs2);
    (ex_mem.reg_write && matches(ex_mem.rd)) || (mem_wb.reg_write && matches(mem_wb.rd))
}

// ── Strategy implementations ──

/// Option 1: naive reads, taken branches flushed in Execute.
#[derive(Debug, Default)]
pub struct NoHazardNoForwarding;

impl HazardPolicy for NoHazardNoForwarding {}

/// Option 2: forwarding without interlocks.
///
/// Load-use hazards remain unresolved: the dependent instruction reads the
/// load's address, not its data.
#[derive(Debug, Default)]
pub struct ForwardingNoHazard;

impl HazardPolicy for ForwardingNoHazard {
    fn forward(&self, rs: usize, reg_val: u64, ex_mem: &ExMemLatch, mem_wb: &MemWbLatch) -> u64 {
        forward_from_latches(rs, reg_val, ex_mem, mem_wb)
    }
}

/// Option 3: interlocks without forwarding.
#[derive(Debug, Default)]
pub struct HazardNoForwarding;

impl HazardPolicy for HazardNoForwarding {
    fn should_stall(
        &self,
        rs1: usize,
        rs2: usize,
        ex_mem: &ExMemLatch,
        mem_wb: &MemWbLatch,
    ) -> bool {
        interlock_stall(rs1, rs2, ex_mem, mem_wb)
    }
}

/// Option 4: forwarding plus the load-use interlock.
#[derive(Debug, Default)]
pub struct HazardAndForwarding;

impl HazardPolicy for HazardAndForwarding {
    fn forward(&self, rs: usize, reg_val: u64, ex_mem: &ExMemLatch, mem_wb: &MemWbLatch) -> u64 {
        forward_from_latches(rs, reg_val, ex_mem, mem_wb)
    }

    fn should_stall(
        &self,
        rs1: usize,
        rs2: usize,
        ex_mem: &ExMemLatch,
        _mem_wb: &MemWbLatch,
    ) -> bool {
        load_use_stall(rs1, rs2, ex_mem)
    }
}

/// Option 5: option 4 plus backward-taken/forward-not-taken prediction.
#[derive(Debug, Default)]
pub struct StaticBranchPrediction;

impl HazardPolicy for StaticBranchPrediction {
    fn forward(&self, rs: usize, reg_val: u64, ex_mem: &ExMemLatch, mem_wb: &MemWbLatch) -> u64 {
        forward_from_latches(rs, reg_val, ex_mem, mem_wb)
    }

    fn should_stall(
        &self,
        rs1: usize,
        rs2: usize,
        ex_mem: &ExMemLatch,
        _mem_wb: &MemWbLatch,
    ) -> bool {
        load_use_stall(rs1, rs2, ex_mem)
    }

    fn predict(&mut self, _pc: u64, inst: u32) -> bool {
        // Backward branches (loops) are guessed taken, forward branches not.
        isa::opcode(inst) == opcodes::BRANCH && isa::immediate(inst) < 0
    }
}

/// Option 6: option 4 plus a 2-bit saturating-counter direction predictor.
#[derive(Debug)]
pub struct DynamicBranchPrediction {
    /// One 2-bit counter per entry, indexed by word-aligned PC bits.
    /// Initialized to 1 (weakly not-taken).
    counters: Vec<u8>,
}

impl DynamicBranchPrediction {
    /// Creates a predictor with `size` counters (at least 1).
    pub fn new(size: usize) -> Self {
        Self {
            counters: vec![1; size.max(1)],
        }
    }

    fn index(&self, pc: u64) -> usize {
        ((pc >> 2) as usize) % self.counters.len()
    }
}

impl HazardPolicy for DynamicBranchPrediction {
    fn forward(&self, rs: usize, reg_val: u64, ex_mem: &ExMemLatch, mem_wb: &MemWbLatch) -> u64 {
        forward_from_latches(rs, reg_val, ex_mem, mem_wb)
    }

    fn should_stall(
        &self,
        rs1: usize,
        rs2: usize,
        ex_mem: &ExMemLatch,
        _mem_wb: &MemWbLatch,
    ) -> bool {
        load_use_stall(rs1, rs2, ex_mem)
    }

    fn predict(&mut self, pc: u64, inst: u32) -> bool {
        isa::opcode(inst) == opcodes::BRANCH && self.counters[self.index(pc)] >= 2
    }

    fn train(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        let c = &mut self.counters[idx];
        if taken {
            *c = (*c + 1).min(3);
        } else {
            *c = c.saturating_sub(1);
        }
    }
}
