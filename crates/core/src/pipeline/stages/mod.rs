//! The five pipeline stage functions.
//!
//! Each stage is a free function over the engine, reading the latch filled by
//! its predecessor on the previous cycle and writing the latch consumed by
//! its successor. The engine calls them in reverse order (WB, MEM, EX, ID,
//! IF) so every stage still sees last cycle's input before it is replaced.

mod decode;
mod execute;
mod fetch;
mod memory;
mod writeback;

pub(crate) use decode::decode_stage;
pub(crate) use execute::execute_stage;
pub(crate) use fetch::fetch_stage;
pub(crate) use memory::memory_stage;
pub(crate) use writeback::writeback_stage;
