//! Architectural state collaborators: register file and memory controller.
//!
//! The engines are the only writers of these components; the presentation
//! layer observes them read-only through the [`crate::vm::VmManager`]
//! accessors. This module provides:
//! 1. **Register File:** 32 general-purpose registers with `x0` hardwired to zero
//!    and a change-notification hook.
//! 2. **Memory Controller:** a flat byte-addressable space with byte, word, and
//!    doubleword access.

/// Flat byte-addressable memory with word/doubleword access.
pub mod mem;

/// General-purpose register file with change notification.
pub mod reg;

pub use mem::MemoryController;
pub use reg::RegisterFile;
