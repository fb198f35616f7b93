//! The one-instruction-per-cycle datapath.

use crate::common::builder::instruction::{add, addi, auipc, beq, bne, jal, jalr, ld, lui, sd};
use crate::common::harness::single_cycle_with_program;
use pretty_assertions::assert_eq;
use rv5s_core::{CancelToken, HistoryOutcome, RunExit, Vm};

#[test]
fn results_are_visible_to_the_next_instruction() {
    let mut vm = single_cycle_with_program(&[addi(1, 0, 5), addi(2, 1, 3), add(3, 1, 2)]);
    assert_eq!(vm.run(&CancelToken::new()), RunExit::Completed);

    // No pipeline, no hazards: every read sees the latest write.
    assert_eq!(vm.registers().read_gpr(2), 8);
    assert_eq!(vm.registers().read_gpr(3), 13);
}

#[test]
fn each_step_retires_exactly_one_instruction() {
    let mut vm = single_cycle_with_program(&[addi(1, 0, 1), addi(2, 0, 2), addi(3, 0, 3)]);
    vm.run(&CancelToken::new());

    assert_eq!(vm.stats().cycles, 3);
    assert_eq!(vm.stats().instructions_retired, 3);
    assert_eq!(vm.stats().stall_cycles, 0);
    assert_eq!(vm.stats().branch_flushes, 0);
}

#[test]
fn step_past_the_program_end_does_nothing() {
    let mut vm = single_cycle_with_program(&[addi(1, 0, 1)]);
    vm.step();
    vm.step();
    vm.step();

    assert_eq!(vm.stats().cycles, 1);
    assert_eq!(vm.pc(), 4);
}

#[test]
fn upper_immediates() {
    let mut vm = single_cycle_with_program(&[lui(1, 0x12345), auipc(2, 1)]);
    vm.run(&CancelToken::new());

    assert_eq!(vm.registers().read_gpr(1), 0x1234_5000);
    // auipc executes at pc 4.
    assert_eq!(vm.registers().read_gpr(2), 0x1004);
}

#[test]
fn lui_sign_extends_to_64_bits() {
    let mut vm = single_cycle_with_program(&[lui(1, 0x8_0000)]);
    vm.run(&CancelToken::new());

    assert_eq!(vm.registers().read_gpr(1), 0xFFFF_FFFF_8000_0000);
}

#[test]
fn jal_links_and_redirects() {
    let mut vm = single_cycle_with_program(&[jal(1, 8), addi(2, 0, 99), addi(3, 0, 7)]);
    vm.run(&CancelToken::new());

    assert_eq!(vm.registers().read_gpr(1), 4);
    // The skipped word never executes.
    assert_eq!(vm.registers().read_gpr(2), 0);
    assert_eq!(vm.registers().read_gpr(3), 7);
    assert_eq!(vm.stats().instructions_retired, 2);
}

#[test]
fn jalr_clears_the_target_low_bit() {
    let mut vm = single_cycle_with_program(&[
        addi(1, 0, 13),
        jalr(2, 1, 0),
        addi(3, 0, 99),
        addi(4, 0, 5),
    ]);
    vm.run(&CancelToken::new());

    // Target 13 & !1 lands on the word at 12.
    assert_eq!(vm.registers().read_gpr(2), 8);
    assert_eq!(vm.registers().read_gpr(3), 0);
    assert_eq!(vm.registers().read_gpr(4), 5);
}

#[test]
fn branches_redirect_without_flush_accounting() {
    let mut vm = single_cycle_with_program(&[
        addi(1, 0, 1),
        bne(1, 0, 8),
        addi(2, 0, 99),
        addi(3, 0, 6),
    ]);
    vm.run(&CancelToken::new());

    assert_eq!(vm.registers().read_gpr(2), 0);
    assert_eq!(vm.registers().read_gpr(3), 6);
    assert_eq!(vm.stats().branches_resolved, 1);
    assert_eq!(vm.stats().branches_taken, 1);
    // Nothing speculative exists to squash.
    assert_eq!(vm.stats().branch_flushes, 0);
}

#[test]
fn not_taken_branch_falls_through() {
    let mut vm = single_cycle_with_program(&[
        addi(1, 0, 1),
        beq(1, 0, 8),
        addi(2, 0, 5),
        addi(3, 0, 6),
    ]);
    vm.run(&CancelToken::new());

    assert_eq!(vm.registers().read_gpr(2), 5);
    assert_eq!(vm.stats().branches_resolved, 1);
    assert_eq!(vm.stats().branches_taken, 0);
}

#[test]
fn memory_round_trip_with_undo() {
    let mut vm = single_cycle_with_program(&[addi(1, 0, 77), sd(1, 0, 64), ld(2, 0, 64)]);
    vm.run(&CancelToken::new());

    assert_eq!(vm.registers().read_gpr(2), 77);
    assert_eq!(vm.memory().read_double_word(64), 77);

    // Walk back over the load, then the store.
    assert_eq!(vm.undo(), HistoryOutcome::Applied);
    assert_eq!(vm.registers().read_gpr(2), 0);
    assert_eq!(vm.undo(), HistoryOutcome::Applied);
    assert_eq!(vm.memory().read_double_word(64), 0);

    assert_eq!(vm.redo(), HistoryOutcome::Applied);
    assert_eq!(vm.memory().read_double_word(64), 77);
}

#[test]
fn store_at_the_top_of_the_address_space_wraps() {
    // sd x1, -1(x0) targets 0xFFFF_FFFF_FFFF_FFFF; the 8-byte range wraps
    // around to address 0 instead of aborting the run.
    let mut vm = single_cycle_with_program(&[addi(1, 0, 77), sd(1, 0, -1), ld(2, 0, -1)]);
    assert_eq!(vm.run(&CancelToken::new()), RunExit::Completed);

    assert_eq!(vm.registers().read_gpr(2), 77);
    assert_eq!(vm.memory().read_double_word(u64::MAX), 77);
    assert_eq!(vm.memory().read_byte(u64::MAX), 77);

    // Undo the load and the store; the wrapped range is restored too.
    assert_eq!(vm.undo(), HistoryOutcome::Applied);
    assert_eq!(vm.undo(), HistoryOutcome::Applied);
    assert_eq!(vm.memory().read_double_word(u64::MAX), 0);
    assert_eq!(vm.memory().read_byte(0), 0);
}

#[test]
fn undo_then_redo_round_trips_a_register_write() {
    let mut vm = single_cycle_with_program(&[addi(1, 0, 5)]);
    vm.step();
    assert_eq!(vm.registers().read_gpr(1), 5);

    assert_eq!(vm.undo(), HistoryOutcome::Applied);
    assert_eq!(vm.registers().read_gpr(1), 0);
    assert_eq!(vm.pc(), 0);
    assert_eq!(vm.undo(), HistoryOutcome::Empty);

    assert_eq!(vm.redo(), HistoryOutcome::Applied);
    assert_eq!(vm.registers().read_gpr(1), 5);
    assert_eq!(vm.pc(), 4);
    assert_eq!(vm.redo(), HistoryOutcome::Empty);
}
