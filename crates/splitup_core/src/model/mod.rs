//! Domain model for goals, grid cells and saved projects.
//!
//! # Responsibility
//! - Define the records shared by the reveal engine, board and store.
//! - Validate records on construction and on decode.
//!
//! # Invariants
//! - Goals and projects are identified by non-nil UUIDs.
//! - Cell positions are stable keys, never reassigned.

pub mod cell;
pub mod goal;
pub mod project;
