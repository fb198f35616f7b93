//! The single-cycle engine.
//!
//! Every [`SingleCycleVm::step`] fetches, decodes, executes, accesses memory
//! and writes back one whole instruction, so cycle count and instruction
//! count advance in lockstep. The same two-level decode tables drive it as
//! drive the pipelined engine; what differs is that jumps and upper-immediate
//! instructions are resolved directly here instead of flowing through latches.

use crate::alu::Alu;
use crate::arch::{MemoryController, RegisterFile, reg::RegObserver};
use crate::common::VmError;
use crate::common::constants::opcodes;
use crate::config::Config;
use crate::history::{History, MemoryChange, RegClass, RegisterChange, StepDelta};
use crate::isa;
use crate::pipeline::control;
use crate::sim::AssembledProgram;
use crate::stats::SimStats;
use crate::vm::{CancelToken, HistoryOutcome, RunExit, Vm, apply_new, apply_old};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

/// The single-cycle VM: one instruction per step, no hazards to resolve.
#[derive(Debug)]
pub struct SingleCycleVm {
    registers: RegisterFile,
    memory: MemoryController,
    pc: u64,

    current_delta: StepDelta,
    history: History,

    stats: SimStats,
    breakpoints: BTreeSet<u64>,

    program: Option<AssembledProgram>,
    program_end: u64,

    text_base: u64,
    memory_size: u64,
    history_capacity: usize,
    step_delay: Duration,
}

impl SingleCycleVm {
    /// Creates an engine with no program loaded.
    pub fn new(config: &Config) -> Self {
        Self {
            registers: RegisterFile::new(),
            memory: MemoryController::new(),
            pc: config.text_base,
            current_delta: StepDelta::default(),
            history: History::new(config.history_capacity),
            stats: SimStats::default(),
            breakpoints: BTreeSet::new(),
            program: None,
            program_end: config.text_base,
            text_base: config.text_base,
            memory_size: config.memory_size,
            history_capacity: config.history_capacity,
            step_delay: Duration::from_millis(config.step_delay_ms),
        }
    }

    /// Number of undoable steps currently held.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_len()
    }

    /// Number of redoable steps currently held.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_len()
    }

    fn finished(&self) -> bool {
        self.pc >= self.program_end
    }

    fn reset_state(&mut self) {
        self.pc = self.text_base;
        self.registers.reset();
        self.memory.reset();
        self.current_delta = StepDelta::default();
        self.history = History::new(self.history_capacity);
        self.stats.reset();

        if let Some(program) = &self.program {
            for (i, word) in program.words.iter().enumerate() {
                self.memory.write_word(self.text_base + i as u64 * 4, *word);
            }
            self.program_end = self.text_base + program.byte_len();
        } else {
            self.program_end = self.text_base;
        }
    }

    /// Commits `value` to `rd`, recording the change when it is visible.
    fn write_back(&mut self, rd: usize, value: u64) {
        if rd == 0 {
            return;
        }
        let old_value = self.registers.read_gpr(rd);
        if old_value != value {
            self.current_delta.register_changes.push(RegisterChange {
                index: rd,
                class: RegClass::Gpr,
                old_value,
                new_value: value,
            });
        }
        self.registers.write_gpr(rd, value);
    }

    /// Executes one whole instruction and returns the next program counter.
    fn execute_instruction(&mut self, instruction: u32) -> u64 {
        let pc = self.pc;
        let fallthrough = pc.wrapping_add(4);

        let opcode = isa::opcode(instruction);
        let rd = isa::rd(instruction);
        let imm = i64::from(isa::immediate(instruction));
        let reg1 = self.registers.read_gpr(isa::rs1(instruction));
        let reg2 = self.registers.read_gpr(isa::rs2(instruction));

        match opcode {
            opcodes::LUI => {
                self.write_back(rd, imm as u64);
                fallthrough
            }
            opcodes::AUIPC => {
                self.write_back(rd, pc.wrapping_add_signed(imm));
                fallthrough
            }
            opcodes::JAL => {
                self.write_back(rd, fallthrough);
                pc.wrapping_add_signed(imm)
            }
            opcodes::JALR => {
                self.write_back(rd, fallthrough);
                reg1.wrapping_add_signed(imm) & !1
            }
            _ => {
                let ctrl = control::decode_main(instruction);
                let operand_b = if ctrl.alu_src { imm as u64 } else { reg2 };
                let op = control::decode_alu(instruction, ctrl.alu_hint);
                let (alu_result, _overflow) = Alu::execute(op, reg1, operand_b);

                if ctrl.branch {
                    let funct3 = isa::funct3(instruction);
                    let taken = match funct3 {
                        0b000 | 0b101 | 0b111 => alu_result == 0,
                        _ => alu_result != 0,
                    };
                    self.stats.branches_resolved += 1;
                    if taken {
                        self.stats.branches_taken += 1;
                        return pc.wrapping_add_signed(imm);
                    }
                    return fallthrough;
                }

                let memory_data = if ctrl.mem_read {
                    self.memory.read_double_word(alu_result)
                } else {
                    0
                };

                if ctrl.mem_write {
                    let old_bytes: Vec<u8> = (0..8)
                        .map(|i| self.memory.read_byte(alu_result.wrapping_add(i)))
                        .collect();
                    self.memory.write_double_word(alu_result, reg2);
                    let new_bytes: Vec<u8> = (0..8)
                        .map(|i| self.memory.read_byte(alu_result.wrapping_add(i)))
                        .collect();
                    if old_bytes != new_bytes {
                        self.current_delta.memory_changes.push(MemoryChange {
                            address: alu_result,
                            old_bytes,
                            new_bytes,
                        });
                    }
                }

                if ctrl.reg_write {
                    let value = if ctrl.mem_to_reg { memory_data } else { alu_result };
                    self.write_back(rd, value);
                }
                fallthrough
            }
        }
    }
}

impl Vm for SingleCycleVm {
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
        if self.finished() {
            return;
        }

        self.current_delta = StepDelta::open(self.pc);

        let instruction = self.memory.read_word(self.pc);
        self.pc = self.execute_instruction(instruction);

        self.stats.cycles += 1;
        self.stats.instructions_retired += 1;

        self.current_delta.new_pc = self.pc;
        let delta = std::mem::take(&mut self.current_delta);
        if !delta.is_empty() {
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
