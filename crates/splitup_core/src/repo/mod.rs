//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the named-slot storage contract and its backends.
//! - Own the wire codec of the saved-projects slot.
//!
//! # Invariants
//! - Slot writes are whole-value overwrites.
//! - Decoding validates every record before handing it to services.

pub mod kv_store;
pub mod project_codec;
