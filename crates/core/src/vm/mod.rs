//! VM lifecycle contract, identity tags, and run statuses.
//!
//! Every engine variant implements the [`Vm`] trait; the manager and
//! presentation layer speak only this interface. This module provides:
//! 1. **Lifecycle Trait:** load/run/step/undo/redo/reset plus breakpoints and
//!    read-only state accessors.
//! 2. **Identity:** The [`VmType`] tag the registry keys constructors on.
//! 3. **Statuses:** Run-exit and history outcomes as values, not errors.
//! 4. **Cancellation:** The atomic [`CancelToken`] polled once per cycle by
//!    run loops, settable from another thread.

/// VM manager owning the active engine.
pub mod manager;

/// Registry mapping identity tags to constructors.
pub mod registry;

/// The single-cycle datapath engine.
pub mod single_cycle;

use crate::arch::{MemoryController, RegisterFile, reg::RegObserver};
use crate::common::VmError;
use crate::history::StepDelta;
use crate::sim::AssembledProgram;
use crate::stats::SimStats;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub use manager::VmManager;
pub use registry::VmRegistry;
pub use single_cycle::SingleCycleVm;

/// Opaque tag distinguishing microarchitecture implementations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum VmType {
    /// One instruction per cycle, no overlap.
    SingleCycle,
    /// The 5-stage pipelined datapath.
    #[default]
    Pipelined,
}

/// Why a run loop returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunExit {
    /// The program counter passed the program extent and the pipeline drained.
    Completed,
    /// A cooperative stop was requested through the cancel token.
    Stopped,
    /// A breakpoint matched the current program counter before the step ran.
    Breakpoint(u64),
}

/// Result of an undo or redo request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// A step delta was applied.
    Applied,
    /// The relevant history side was empty; nothing happened.
    Empty,
}

/// Cooperative cancellation flag shared between a run loop and its caller.
///
/// Clones share one flag. The run loop polls once per cycle; any thread may
/// set it.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the not-requested state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the run loop stop after the current cycle.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clears a previous stop request.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Engine lifecycle contract implemented by every VM variant.
pub trait Vm: Send {
    /// Loads a program image into memory and resets execution state.
    ///
    /// # Errors
    ///
    /// [`VmError::ProgramTooLarge`] if the image does not fit in simulated
    /// memory.
    fn load_program(&mut self, program: &AssembledProgram) -> Result<(), VmError>;

    /// Executes exactly one clock cycle.
    fn step(&mut self);

    /// Steps until the program completes or a stop is requested.
    fn run(&mut self, cancel: &CancelToken) -> RunExit;

    /// Like [`Vm::run`], but checks breakpoints before each step and paces
    /// steps with the configured delay.
    fn debug_run(&mut self, cancel: &CancelToken) -> RunExit;

    /// Rolls back the most recent recorded step.
    fn undo(&mut self) -> HistoryOutcome;

    /// Replays the most recently undone step.
    fn redo(&mut self) -> HistoryOutcome;

    /// Returns the engine to its freshly-loaded state.
    fn reset(&mut self);

    /// Arms a breakpoint at a program counter value.
    fn add_breakpoint(&mut self, pc: u64);

    /// Disarms a breakpoint.
    fn remove_breakpoint(&mut self, pc: u64);

    /// Current program counter.
    fn pc(&self) -> u64;

    /// Read-only view of the register file.
    fn registers(&self) -> &RegisterFile;

    /// Read-only view of memory.
    fn memory(&self) -> &MemoryController;

    /// Execution counters.
    fn stats(&self) -> &SimStats;

    /// Installs the register change observer for the presentation layer.
    fn set_register_observer(&mut self, observer: RegObserver);
}

/// Restores a delta's old values into the architectural state (undo).
pub(crate) fn apply_old(
    delta: &StepDelta,
    registers: &mut RegisterFile,
    memory: &mut MemoryController,
) {
    for change in &delta.register_changes {
        registers.write_gpr(change.index, change.old_value);
    }
    for change in &delta.memory_changes {
        for (i, byte) in change.old_bytes.iter().enumerate() {
            memory.write_byte(change.address.wrapping_add(i as u64), *byte);
        }
    }
}

/// Restores a delta's new values into the architectural state (redo).
pub(crate) fn apply_new(
    delta: &StepDelta,
    registers: &mut RegisterFile,
    memory: &mut MemoryController,
) {
    for change in &delta.register_changes {
        registers.write_gpr(change.index, change.new_value);
    }
    for change in &delta.memory_changes {
        for (i, byte) in change.new_bytes.iter().enumerate() {
            memory.write_byte(change.address.wrapping_add(i as u64), *byte);
        }
    }
}
