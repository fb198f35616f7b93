//! The 5-stage pipelined engine.
//!
//! One [`PipelinedVm::step`] call simulates one clock cycle. The five stages
//! run in **reverse pipeline order** (Writeback, Memory, Execute, Decode,
//! Fetch) so each stage consumes the previous cycle's latch contents before
//! the earlier stage overwrites them, modeling five concurrent stage
//! executions with a single-threaded call sequence and no double-buffering.
//!
//! Around every cycle the engine keeps a transaction: a [`StepDelta`] opened
//! before any stage runs and pushed onto the undo history afterwards if the
//! cycle mutated any architectural state.

use crate::arch::{MemoryController, RegisterFile, reg::RegObserver};
use crate::common::VmError;
use crate::config::Config;
use crate::history::{History, StepDelta};
use crate::pipeline::hazards::{self, HazardMode, HazardPolicy};
use crate::pipeline::latches::{ExMemLatch, IdExLatch, IfIdLatch, MemWbLatch};
use crate::pipeline::stages;
use crate::sim::AssembledProgram;
use crate::stats::SimStats;
use crate::vm::{CancelToken, HistoryOutcome, RunExit, Vm, apply_new, apply_old};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, trace};

/// The 5-stage pipelined VM.
///
/// Owns the four inter-stage latches, the program counter, the architectural
/// collaborators, and the hazard-resolution strategy selected by
/// [`HazardMode`]. Single-owner, single-thread-at-a-time: run loops are meant
/// for a worker thread, with the [`CancelToken`] as the only cross-thread
/// coordination.
#[derive(Debug)]
pub struct PipelinedVm {
    pub(crate) registers: RegisterFile,
    pub(crate) memory: MemoryController,
    pub(crate) pc: u64,

    pub(crate) if_id: IfIdLatch,
    pub(crate) id_ex: IdExLatch,
    pub(crate) ex_mem: ExMemLatch,
    pub(crate) mem_wb: MemWbLatch,

    pub(crate) policy: Box<dyn HazardPolicy>,
    mode: HazardMode,

    /// Set by a stalling decode; read by fetch later in the same call.
    pub(crate) stall: bool,

    pub(crate) current_delta: StepDelta,
    history: History,

    pub(crate) stats: SimStats,
    breakpoints: BTreeSet<u64>,

    program: Option<AssembledProgram>,
    /// One byte past the last program byte (`text_base + extent`).
    pub(crate) program_end: u64,

    text_base: u64,
    memory_size: u64,
    history_capacity: usize,
    bht_size: usize,
    step_delay: Duration,
}

impl PipelinedVm {
    /// Creates an engine with the configured hazard mode and no program.
    pub fn new(config: &Config) -> Self {
        Self::with_mode(config, config.hazard_mode)
    }

    /// Creates an engine with an explicit hazard mode.
    pub fn with_mode(config: &Config, mode: HazardMode) -> Self {
        Self {
            registers: RegisterFile::new(),
            memory: MemoryController::new(),
            pc: config.text_base,
            if_id: IfIdLatch::default(),
            id_ex: IdExLatch::default(),
            ex_mem: ExMemLatch::default(),
            mem_wb: MemWbLatch::default(),
            policy: hazards::policy_for(mode, config.bht_size),
            mode,
            stall: false,
            current_delta: StepDelta::default(),
            history: History::new(config.history_capacity),
            stats: SimStats::default(),
            breakpoints: BTreeSet::new(),
            program: None,
            program_end: config.text_base,
            text_base: config.text_base,
            memory_size: config.memory_size,
            history_capacity: config.history_capacity,
            bht_size: config.bht_size,
            step_delay: Duration::from_millis(config.step_delay_ms),
        }
    }

    /// Switches the hazard-handling strategy, discarding predictor state.
    pub fn set_hazard_mode(&mut self, mode: HazardMode) {
        self.mode = mode;
        self.policy = hazards::policy_for(mode, self.bht_size);
    }

    /// The active hazard-handling mode.
    pub fn hazard_mode(&self) -> HazardMode {
        self.mode
    }

    /// Read-only view of the IF/ID latch.
    pub fn if_id(&self) -> &IfIdLatch {
        &self.if_id
    }

    /// Read-only view of the ID/EX latch.
    pub fn id_ex(&self) -> &IdExLatch {
        &self.id_ex
    }

    /// Read-only view of the EX/MEM latch.
    pub fn ex_mem(&self) -> &ExMemLatch {
        &self.ex_mem
    }

    /// Read-only view of the MEM/WB latch.
    pub fn mem_wb(&self) -> &MemWbLatch {
        &self.mem_wb
    }

    /// Number of undoable steps currently held.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_len()
    }

    /// Number of redoable steps currently held.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_len()
    }

    /// Termination condition: past the program extent with the pipeline
    /// drained of real work. The rear latches are checked as well as ID/EX;
    /// stopping on an empty decode stage alone would cut off the writebacks
    /// of the last two in-flight instructions. The post-extent NOP stream
    /// decodes with `reg_write` set but targets `x0`, so it never counts as
    /// pending work.
    fn finished(&self) -> bool {
        let ex_mem_pending =
            (self.ex_mem.reg_write && self.ex_mem.rd != 0) || self.ex_mem.mem_write;
        let mem_wb_pending = self.mem_wb.reg_write && self.mem_wb.rd != 0;
        self.pc >= self.program_end
            && self.id_ex.is_bubble()
            && !ex_mem_pending
            && !mem_wb_pending
    }

    /// Restores the freshly-loaded state: architectural state, latches,
    /// history, stats, and the program image itself.
    fn reset_state(&mut self) {
        self.pc = self.text_base;
        self.registers.reset();
        self.memory.reset();
        self.if_id.reset();
        self.id_ex.reset();
        self.ex_mem.reset();
        self.mem_wb.reset();
        self.stall = false;
        self.current_delta = StepDelta::default();
        self.history = History::new(self.history_capacity);
        self.stats.reset();
        self.policy = hazards::policy_for(self.mode, self.bht_size);

        if let Some(program) = &self.program {
            for (i, word) in program.words.iter().enumerate() {
                self.memory.write_word(self.text_base + i as u64 * 4, *word);
            }
            self.program_end = self.text_base + program.byte_len();
        } else {
            self.program_end = self.text_base;
        }
    }
}

impl Vm for PipelinedVm {
    fn load_program(&mut self, program: &AssembledProgram) -> Result<(), VmError> {
        let extent = program.byte_len();
        if self.text_base + extent > self.memory_size {
            return Err(VmError::ProgramTooLarge {
                program_bytes: extent,
                memory_bytes: self.memory_size,
            });
        }
        self.program = Some(program.clone());
        self.reset_state();
        debug!(bytes = extent, base = self.text_base, "program loaded");
        Ok(())
    }

    fn step(&mut self) {
        // One clock cycle: all five stages run "concurrently" on different
        // instructions, simulated by executing them in reverse order over
        // the previous cycle's latches.
        self.current_delta = StepDelta::open(self.pc);
        self.stall = false;

        stages::writeback_stage(self);
        stages::memory_stage(self);
        stages::execute_stage(self);
        stages::decode_stage(self);
        stages::fetch_stage(self);

        self.stats.cycles += 1;

        self.current_delta.new_pc = self.pc;
        let delta = std::mem::take(&mut self.current_delta);
        if !delta.is_empty() {
            trace!(
                cycle = self.stats.cycles,
                regs = delta.register_changes.len(),
                mem = delta.memory_changes.len(),
                "step recorded"
            );
            self.history.record(delta);
        }
    }

    fn run(&mut self, cancel: &CancelToken) -> RunExit {
        while !self.finished() {
            if cancel.is_stop_requested() {
                return RunExit::Stopped;
            }
            self.step();
        }
        debug!(cycles = self.stats.cycles, "run completed");
        RunExit::Completed
    }

    fn debug_run(&mut self, cancel: &CancelToken) -> RunExit {
        while !self.finished() {
            if cancel.is_stop_requested() {
                return RunExit::Stopped;
            }
            if self.breakpoints.contains(&self.pc) {
                debug!(pc = self.pc, "breakpoint hit");
                return RunExit::Breakpoint(self.pc);
            }
            self.step();
            if !self.step_delay.is_zero() {
                std::thread::sleep(self.step_delay);
            }
        }
        RunExit::Completed
    }

    fn undo(&mut self) -> HistoryOutcome {
        let Some(delta) = self.history.pop_undo() else {
            debug!("nothing to undo");
            return HistoryOutcome::Empty;
        };

        apply_old(&delta, &mut self.registers, &mut self.memory);
        self.pc = delta.old_pc;

        // Only architectural state round-trips exactly: in-flight pipeline
        // contents are not reconstructed, the latches are bubbled instead.
        self.if_id.reset();
        self.id_ex.reset();
        self.ex_mem.reset();
        self.mem_wb.reset();

        debug!(pc = self.pc, "undo completed");
        HistoryOutcome::Applied
    }

    fn redo(&mut self) -> HistoryOutcome {
        let Some(delta) = self.history.pop_redo() else {
            debug!("nothing to redo");
            return HistoryOutcome::Empty;
        };

        apply_new(&delta, &mut self.registers, &mut self.memory);
        self.pc = delta.new_pc;

        self.if_id.reset();
        self.id_ex.reset();
        self.ex_mem.reset();
        self.mem_wb.reset();

        debug!(pc = self.pc, "redo completed");
        HistoryOutcome::Applied
    }

    fn reset(&mut self) {
        self.reset_state();
    }

    fn add_breakpoint(&mut self, pc: u64) {
        let _ = self.breakpoints.insert(pc);
    }

    fn remove_breakpoint(&mut self, pc: u64) {
        let _ = self.breakpoints.remove(&pc);
    }

    fn pc(&self) -> u64 {
        self.pc
    }

    fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    fn memory(&self) -> &MemoryController {
        &self.memory
    }

    fn stats(&self) -> &SimStats {
        &self.stats
    }

    fn set_register_observer(&mut self, observer: RegObserver) {
        self.registers.set_observer(observer);
    }
}
