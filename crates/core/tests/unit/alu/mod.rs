//! ALU unit tests.


/// Floating-point semantics, NaN boxing, and conversions.
pub mod float;
