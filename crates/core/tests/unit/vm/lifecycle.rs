//! Run-loop exits: cancellation, breakpoints, and load-time validation.

use crate::common::builder::instruction::addi;
use crate::common::harness::{test_config, TestContext};
use pretty_assertions::assert_eq;
use rv5s_core::pipeline::HazardMode;
use rv5s_core::{
    AssembledProgram, CancelToken, PipelinedVm, RunExit, SingleCycleVm, Vm, VmError,
};

#[test]
fn a_pre_cancelled_run_does_not_step() {
    let mut ctx = TestContext::new(HazardMode::NoHazardNoForwarding)
        .load_program(&[addi(1, 0, 1), addi(2, 0, 2)]);
    let cancel = CancelToken::new();
    cancel.request_stop();

    assert_eq!(ctx.vm.run(&cancel), RunExit::Stopped);
    assert_eq!(ctx.vm.stats().cycles, 0);
    assert_eq!(ctx.vm.registers().read_gpr(1), 0);
}

#[test]
fn a_cleared_token_runs_to_completion() {
    let mut ctx = TestContext::new(HazardMode::NoHazardNoForwarding)
        .load_program(&[addi(1, 0, 1)]);
    let cancel = CancelToken::new();
    cancel.request_stop();
    cancel.clear();

    assert_eq!(ctx.vm.run(&cancel), RunExit::Completed);
    assert_eq!(ctx.vm.registers().read_gpr(1), 1);
}

#[test]
fn clones_share_the_stop_flag() {
    let cancel = CancelToken::new();
    let observer = cancel.clone();

    assert!(!observer.is_stop_requested());
    cancel.request_stop();
    assert!(observer.is_stop_requested());
}

#[test]
fn debug_run_pauses_at_a_breakpoint_before_the_step() {
    let mut ctx = TestContext::new(HazardMode::NoHazardNoForwarding)
        .load_program(&[addi(1, 0, 1), addi(2, 0, 2), addi(3, 0, 3)]);
    ctx.vm.add_breakpoint(8);

    assert_eq!(ctx.vm.debug_run(&CancelToken::new()), RunExit::Breakpoint(8));
    // Paused with the word at 8 still unfetched.
    assert_eq!(ctx.vm.pc(), 8);

    ctx.vm.remove_breakpoint(8);
    assert_eq!(ctx.vm.debug_run(&CancelToken::new()), RunExit::Completed);
    assert_eq!(ctx.vm.registers().read_gpr(3), 3);
}

#[test]
fn resuming_on_the_breakpoint_pauses_again() {
    let mut ctx = TestContext::new(HazardMode::NoHazardNoForwarding)
        .load_program(&[addi(1, 0, 1), addi(2, 0, 2)]);
    ctx.vm.add_breakpoint(4);

    assert_eq!(ctx.vm.debug_run(&CancelToken::new()), RunExit::Breakpoint(4));
    assert_eq!(ctx.vm.debug_run(&CancelToken::new()), RunExit::Breakpoint(4));

    // Stepping over by hand moves past it.
    ctx.vm.step();
    assert_eq!(ctx.vm.debug_run(&CancelToken::new()), RunExit::Completed);
}

#[test]
fn debug_run_without_breakpoints_behaves_like_run() {
    let mut vm = crate::common::harness::single_cycle_with_program(&[addi(1, 0, 9)]);

    assert_eq!(vm.debug_run(&CancelToken::new()), RunExit::Completed);
    assert_eq!(vm.registers().read_gpr(1), 9);
}

#[test]
fn oversized_programs_are_rejected_at_load() {
    let config = rv5s_core::Config {
        memory_size: 16,
        ..test_config()
    };
    let program = AssembledProgram::new(vec![addi(1, 0, 1); 8]);

    let mut pipelined = PipelinedVm::new(&config);
    assert_eq!(
        pipelined.load_program(&program),
        Err(VmError::ProgramTooLarge {
            program_bytes: 32,
            memory_bytes: 16,
        })
    );

    let mut single = SingleCycleVm::new(&config);
    assert_eq!(
        single.load_program(&program),
        Err(VmError::ProgramTooLarge {
            program_bytes: 32,
            memory_bytes: 16,
        })
    );
}
