//! Simulation statistics collection.
//!
//! Tracks per-engine counters for performance analysis and test
//! observability: cycles, retired instructions, branch resolution, control
//! flushes, and stall cycles. Reset together with the engine.

/// Counters accumulated while an engine executes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Clock cycles elapsed (one per `step`).
    pub cycles: u64,
    /// Instructions retired in the writeback stage.
    pub instructions_retired: u64,
    /// Conditional branches resolved in execute.
    pub branches_resolved: u64,
    /// Conditional branches that resolved taken.
    pub branches_taken: u64,
    /// Pipeline flushes caused by branch resolution disagreeing with the
    /// fetch-time prediction.
    pub branch_flushes: u64,
    /// Cycles the decode stage spent stalled by an interlock.
    pub stall_cycles: u64,
}

impl SimStats {
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
