//! Grid sizing and cell reveal engine.
//!
//! # Responsibility
//! - Size a near-square grid for a total cell count.
//! - Track and advance per-cell reveal state.
//!
//! # Invariants
//! - Both submodules are pure over their inputs; randomness is injected.

pub mod partition;
pub mod reveal;
