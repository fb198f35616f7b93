//! Manager owning the active engine and its registry.
//!
//! The presentation layer talks to one [`VmManager`]. It keeps the registry
//! it was built with, the currently active engine, and the most recently
//! loaded program, so switching microarchitectures reloads the same program
//! into a fresh engine. A switch discards all execution state, including the
//! undo/redo history.

use crate::arch::{MemoryController, RegisterFile, reg::RegObserver};
use crate::common::VmError;
use crate::sim::AssembledProgram;
use crate::stats::SimStats;
use crate::vm::{CancelToken, HistoryOutcome, RunExit, Vm, VmRegistry, VmType};
use tracing::info;

/// Owns the active engine and constructs replacements through the registry.
pub struct VmManager {
    registry: VmRegistry,
    active: Box<dyn Vm>,
    active_type: VmType,
    program: Option<AssembledProgram>,
}

impl std::fmt::Debug for VmManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VmManager")
            .field("registry", &self.registry)
            .field("active_type", &self.active_type)
            .field("pc", &self.active.pc())
            .finish_non_exhaustive()
    }
}

impl VmManager {
    /// Builds a manager with `initial` as the active engine type.
    ///
    /// # Errors
    ///
    /// [`VmError::UnknownVmType`] if `initial` is not registered.
    pub fn new(registry: VmRegistry, initial: VmType) -> Result<Self, VmError> {
        let active = registry.create(initial)?;
        Ok(Self {
            registry,
            active,
            active_type: initial,
            program: None,
        })
    }

    /// The type tag of the active engine.
    pub fn vm_type(&self) -> VmType {
        self.active_type
    }

    /// Replaces the active engine with a freshly constructed one.
    ///
    /// The loaded program (if any) is reloaded into the new engine; all other
    /// execution state (registers, memory, statistics, undo/redo history)
    /// starts over.
    ///
    /// # Errors
    ///
    /// [`VmError::UnknownVmType`] if `vm_type` is not registered; the active
    /// engine is left untouched in that case.
    pub fn change_vm(&mut self, vm_type: VmType) -> Result<(), VmError> {
        let mut replacement = self.registry.create(vm_type)?;
        if let Some(program) = &self.program {
            replacement.load_program(program)?;
        }
        self.active = replacement;
        self.active_type = vm_type;
        info!(?vm_type, "active VM switched");
        Ok(())
    }

    /// Loads a program into the active engine, keeping it for later switches.
    ///
    /// # Errors
    ///
    /// Propagates [`VmError::ProgramTooLarge`] from the engine.
    pub fn load_program(&mut self, program: &AssembledProgram) -> Result<(), VmError> {
        self.active.load_program(program)?;
        self.program = Some(program.clone());
        Ok(())
    }

    /// Executes one clock cycle on the active engine.
    pub fn step(&mut self) {
        self.active.step();
    }

    /// Runs the active engine to completion or cancellation.
    pub fn run(&mut self, cancel: &CancelToken) -> RunExit {
        self.active.run(cancel)
    }

    /// Runs with breakpoint checks and per-step pacing.
    pub fn debug_run(&mut self, cancel: &CancelToken) -> RunExit {
        self.active.debug_run(cancel)
    }

    /// Rolls back the most recent recorded step.
    pub fn undo(&mut self) -> HistoryOutcome {
        self.active.undo()
    }

    /// Replays the most recently undone step.
    pub fn redo(&mut self) -> HistoryOutcome {
        self.active.redo()
    }

    /// Resets the active engine to its freshly-loaded state.
    pub fn reset(&mut self) {
        self.active.reset();
    }

    /// Arms a breakpoint at `pc`.
    pub fn add_breakpoint(&mut self, pc: u64) {
        self.active.add_breakpoint(pc);
    }

    /// Disarms the breakpoint at `pc`, if armed.
    pub fn remove_breakpoint(&mut self, pc: u64) {
        self.active.remove_breakpoint(pc);
    }

    /// Current program counter of the active engine.
    pub fn pc(&self) -> u64 {
        self.active.pc()
    }

    /// Read-only view of the active engine's register file.
    pub fn registers(&self) -> &RegisterFile {
        self.active.registers()
    }

    /// Read-only view of the active engine's memory.
    pub fn memory(&self) -> &MemoryController {
        self.active.memory()
    }

    /// Execution statistics of the active engine.
    pub fn stats(&self) -> &SimStats {
        self.active.stats()
    }

    /// Installs a register change observer on the active engine.
    ///
    /// Observers do not survive a [`Self::change_vm`]; install again after
    /// switching.
    pub fn set_register_observer(&mut self, observer: RegObserver) {
        self.active.set_register_observer(observer);
    }
}
