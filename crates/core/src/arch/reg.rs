//! General-purpose register file.
//!
//! This module implements the integer register file. It performs:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Register `x0` is hardwired to zero.
//! 3. **Change Notification:** An optional observer sees every write
//!    (index, new value), letting a presentation layer mirror register
//!    state without polling.

use std::fmt;

/// Callback invoked on every register write with `(index, new_value)`.
pub type RegObserver = Box<dyn FnMut(usize, u64) + Send>;

/// General-purpose register file with 32 registers, `x0` hardwired to zero.
pub struct RegisterFile {
    regs: [u64; 32],
    observer: Option<RegObserver>,
}

impl RegisterFile {
    /// Creates a register file with all registers zeroed and no observer.
    pub fn new() -> Self {
        Self {
            regs: [0; 32],
            observer: None,
        }
    }

    /// Reads a general-purpose register. `x0` always reads zero.
    pub fn read_gpr(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a general-purpose register. Writes to `x0` are dropped.
    ///
    /// Notifies the observer, if any, after the write takes effect.
    pub fn write_gpr(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
            if let Some(obs) = self.observer.as_mut() {
                obs(idx, val);
            }
        }
    }

    /// Zeroes every register. The observer is kept and not notified.
    pub fn reset(&mut self) {
        self.regs = [0; 32];
    }

    /// Installs the change observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: RegObserver) {
        self.observer = Some(observer);
    }

    /// Removes the change observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterFile")
            .field("regs", &self.regs)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
