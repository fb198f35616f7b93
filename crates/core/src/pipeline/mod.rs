//! The 5-stage pipelined datapath.
//!
//! This module groups everything specific to the pipelined VM:
//! 1. **Latches:** The four inter-stage registers ([`latches`]).
//! 2. **Control:** The two-level decode, main control and ALU control
//!    ([`control`], [`signals`]).
//! 3. **Hazards:** Pluggable hazard-resolution strategies ([`hazards`]).
//! 4. **Stages:** The five stage functions ([`stages`]).
//! 5. **Engine:** The VM that wires them together ([`engine`]).

pub mod control;
pub mod engine;
pub mod hazards;
pub mod latches;
pub mod signals;
pub mod stages;

pub use engine::PipelinedVm;
pub use hazards::{HazardMode, HazardPolicy};
