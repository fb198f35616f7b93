//! Core library for a cycle-accurate RV64 processor simulator.
//!
//! Two interchangeable engines execute assembled RISC-V machine code behind
//! one lifecycle trait:
//! 1. **Single-cycle:** One instruction per step ([`vm::SingleCycleVm`]).
//! 2. **Pipelined:** The classic 5-stage datapath with latches, two-level
//!    decode, and pluggable hazard handling ([`pipeline::PipelinedVm`]).
//!
//! Every step is transactional: architectural mutations are recorded as a
//! [`history::StepDelta`] so execution can be stepped backwards and forwards
//! exactly. A [`vm::VmRegistry`] and [`vm::VmManager`] construct and switch
//! engines at runtime.
//!
//! The crate is presentation-agnostic: no I/O beyond the optional flat-binary
//! loader, no threads of its own. Run loops poll a [`vm::CancelToken`] so a
//! caller may host them on a worker thread and stop them cooperatively.

/// ALU implementation: integer, shift, logic, and floating-point operations.
pub mod alu;

/// Architectural state collaborators: register file and sparse memory.
pub mod arch;

/// Shared constants and error definitions.
pub mod common;

/// Simulator configuration.
pub mod config;

/// Transactional step history for undo/redo.
pub mod history;

/// Instruction field extraction and immediate reconstruction.
pub mod isa;

/// The 5-stage pipelined datapath.
pub mod pipeline;

/// Program images and the flat-binary loader.
pub mod sim;

/// Execution statistics.
pub mod stats;

/// Engine lifecycle trait, registry, manager, and the single-cycle engine.
pub mod vm;

pub use common::VmError;
pub use config::Config;
pub use pipeline::{HazardMode, PipelinedVm};
pub use sim::AssembledProgram;
pub use stats::SimStats;
pub use vm::{
    CancelToken, HistoryOutcome, RunExit, SingleCycleVm, Vm, VmManager, VmRegistry, VmType,
};
