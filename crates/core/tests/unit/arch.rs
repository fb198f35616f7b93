//! Register file and memory collaborator tests.

use pretty_assertions::assert_eq;
use rv5s_core::arch::{MemoryController, RegisterFile};
use std::sync::mpsc;

// ──────────────────────────────────────────────────────────
// Register file
// ──────────────────────────────────────────────────────────

#[test]
fn x0_is_hardwired_to_zero() {
    let mut regs = RegisterFile::new();
    regs.write_gpr(0, 0xDEAD_BEEF);
    assert_eq!(regs.read_gpr(0), 0);
}

#[test]
fn writes_round_trip() {
    let mut regs = RegisterFile::new();
    regs.write_gpr(5, 42);
    regs.write_gpr(31, u64::MAX);
    assert_eq!(regs.read_gpr(5), 42);
    assert_eq!(regs.read_gpr(31), u64::MAX);

    regs.reset();
    assert_eq!(regs.read_gpr(5), 0);
    assert_eq!(regs.read_gpr(31), 0);
}

#[test]
fn observer_sees_every_write() {
    let (tx, rx) = mpsc::channel();
    let mut regs = RegisterFile::new();
    regs.set_observer(Box::new(move |idx, val| {
        tx.send((idx, val)).ok();
    }));

    regs.write_gpr(3, 7);
    regs.write_gpr(4, 9);

    assert_eq!(rx.try_recv().ok(), Some((3, 7)));
    assert_eq!(rx.try_recv().ok(), Some((4, 9)));
}

// ──────────────────────────────────────────────────────────
// Memory controller
// ──────────────────────────────────────────────────────────

#[test]
fn memory_defaults_to_zero() {
    let mem = MemoryController::new();
    assert_eq!(mem.read_byte(0), 0);
    assert_eq!(mem.read_double_word(0x1234_5678), 0);
}

#[test]
fn word_access_is_little_endian() {
    let mut mem = MemoryController::new();
    mem.write_word(0x100, 0xDEAD_BEEF);
    assert_eq!(mem.read_byte(0x100), 0xEF);
    assert_eq!(mem.read_byte(0x103), 0xDE);
    assert_eq!(mem.read_word(0x100), 0xDEAD_BEEF);
}

#[test]
fn double_word_round_trip_across_page_boundary() {
    let mut mem = MemoryController::new();
    // Straddles the 4 KiB page edge.
    let addr = 4096 - 3;
    mem.write_double_word(addr, 0x0102_0304_0506_0708);
    assert_eq!(mem.read_double_word(addr), 0x0102_0304_0506_0708);
}

#[test]
fn double_word_wraps_at_the_top_of_the_address_space() {
    let mut mem = MemoryController::new();
    // The low byte lands at the last address, the rest wrap to 0..=6.
    mem.write_double_word(u64::MAX, 0x0123_4567_89AB_CDEF);
    assert_eq!(mem.read_double_word(u64::MAX), 0x0123_4567_89AB_CDEF);
    assert_eq!(mem.read_byte(u64::MAX), 0xEF);
    assert_eq!(mem.read_byte(0), 0xCD);
    assert_eq!(mem.read_byte(6), 0x01);
}

#[test]
fn reset_clears_all_pages() {
    let mut mem = MemoryController::new();
    mem.write_double_word(0x2000, 99);
    mem.reset();
    assert_eq!(mem.read_double_word(0x2000), 0);
}
