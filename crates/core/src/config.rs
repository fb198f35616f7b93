//! Simulator configuration.
//!
//! This module defines the configuration structure consumed at VM
//! construction time. It provides:
//! 1. **Defaults:** Baseline constants (memory size, history depth, pacing).
//! 2. **Structure:** A flat `Config` with serde defaults, loadable from JSON.
//!
//! Configuration is read-only from the engines' perspective; the debug-run
//! pacing delay in particular is supplied here rather than queried from the
//! environment mid-run.

use crate::pipeline::hazards::HazardMode;
use crate::vm::VmType;
use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Base address where program text is loaded.
    pub const TEXT_BASE: u64 = 0;

    /// Total simulated memory available to a program (128 MiB).
    pub const MEMORY_SIZE: u64 = 128 * 1024 * 1024;

    /// Bounded undo/redo depth in steps.
    pub const HISTORY_CAPACITY: usize = 1000;

    /// Inter-step delay for debug runs, in milliseconds.
    pub const STEP_DELAY_MS: u64 = 50;

    /// Entries in the dynamic branch predictor's counter table.
    pub const BHT_SIZE: usize = 256;
}

/// Top-level simulator configuration.
///
/// Every field has a default, so `Config::default()` and partial JSON both
/// work: `serde_json::from_str::<Config>("{}")` yields the defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// VM variant instantiated by default.
    pub vm_type: VmType,
    /// Hazard-handling strategy for the pipelined VM.
    pub hazard_mode: HazardMode,
    /// Base address where program text is loaded.
    pub text_base: u64,
    /// Total simulated memory in bytes; programs beyond this fail to load.
    pub memory_size: u64,
    /// Bounded undo/redo depth in steps.
    pub history_capacity: usize,
    /// Inter-step delay for debug runs, in milliseconds.
    pub step_delay_ms: u64,
    /// Entries in the dynamic branch predictor's counter table.
    pub bht_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vm_type: VmType::Pipelined,
            hazard_mode: HazardMode::NoHazardNoForwarding,
            text_base: defaults::TEXT_BASE,
            memory_size: defaults::MEMORY_SIZE,
            history_capacity: defaults::HISTORY_CAPACITY,
            step_delay_ms: defaults::STEP_DELAY_MS,
            bht_size: defaults::BHT_SIZE,
        }
    }
}
