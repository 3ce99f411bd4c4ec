//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate grid, reveal and repository calls into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_service;
pub mod project_store;
