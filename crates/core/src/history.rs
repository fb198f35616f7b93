//! Transactional step history for undo/redo.
//!
//! Every cycle the engine opens a fresh [`StepDelta`] and records each
//! architectural mutation (register writes in Writeback, memory writes in
//! Memory) with both old and new values, so a completed step can be rolled
//! back or replayed exactly. This module provides:
//! 1. **Change Records:** Register and memory mutations with before/after values.
//! 2. **Step Deltas:** The per-cycle transaction, retained only when non-empty.
//! 3. **Bounded History:** Undo/redo stacks with fixed capacity; the oldest
//!    entry is evicted once the limit is reached, capping memory growth
//!    during long runs.
//!
//! Invariant: pushing a newly completed step clears the redo side entirely;
//! undo moves an entry from undo to redo and redo moves it back.

use std::collections::VecDeque;

/// Class of register touched by a change record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegClass {
    /// General-purpose register.
    Gpr,
    /// Control/status register.
    Csr,
    /// Floating-point register.
    Fpr,
}

/// One register mutation: index, class, and the value before and after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterChange {
    /// Register index within its class.
    pub index: usize,
    /// Register class.
    pub class: RegClass,
    /// Value before the write.
    pub old_value: u64,
    /// Value after the write.
    pub new_value: u64,
}

/// One memory mutation: start address and the byte range before and after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryChange {
    /// First byte address of the mutated range.
    pub address: u64,
    /// Bytes before the write.
    pub old_bytes: Vec<u8>,
    /// Bytes after the write.
    pub new_bytes: Vec<u8>,
}

/// All architectural state changes completed in a single clock cycle.
///
/// Created fresh at the start of every step and immutable once the cycle
/// completes. Only deltas with at least one change are worth retaining.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepDelta {
    /// Program counter before any stage ran.
    pub old_pc: u64,
    /// Program counter after the cycle completed.
    pub new_pc: u64,
    /// Register mutations, in the order they were performed.
    pub register_changes: Vec<RegisterChange>,
    /// Memory mutations, in the order they were performed.
    pub memory_changes: Vec<MemoryChange>,
}

impl StepDelta {
    /// Opens a fresh delta recording the pre-cycle program counter.
    pub fn open(pc: u64) -> Self {
        Self {
            old_pc: pc,
            ..Self::default()
        }
    }

    /// Whether the cycle mutated any register or memory location.
    pub fn is_empty(&self) -> bool {
        self.register_changes.is_empty() && self.memory_changes.is_empty()
    }
}

/// Bounded undo/redo history of step deltas, most-recent-first.
#[derive(Debug)]
pub struct History {
    undo: VecDeque<StepDelta>,
    redo: VecDeque<StepDelta>,
    capacity: usize,
}

impl History {
    /// Creates an empty history holding at most `capacity` undo entries.
    ///
    /// A zero capacity is treated as 1 so a completed step is always
    /// undoable.
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Records a completed step, evicting the oldest entry at capacity.
    ///
    /// A new step invalidates any previous redo history.
    pub fn record(&mut self, delta: StepDelta) {
        if self.undo.len() == self.capacity {
            let _ = self.undo.pop_front();
        }
        self.undo.push_back(delta);
        self.redo.clear();
    }

    /// Pops the most recent step for undoing, moving it to the redo side.
    pub fn pop_undo(&mut self) -> Option<StepDelta> {
        let delta = self.undo.pop_back()?;
        self.redo.push_back(delta.clone());
        Some(delta)
    }

    /// Pops the most recently undone step for redoing, moving it back.
    pub fn pop_redo(&mut self) -> Option<StepDelta> {
        let delta = self.redo.pop_back()?;
        self.undo.push_back(delta.clone());
        Some(delta)
    }

    /// Number of undoable steps.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable steps.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Discards both sides of the history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
