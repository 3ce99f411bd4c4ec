//! Core domain logic for SplitUp.
//! This crate is the single source of truth for grid, goal and project
//! invariants; the mobile UI only renders what it exposes.

pub mod db;
pub mod grid;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use grid::partition::{cell_index_to_coordinate, dimensions, GridDimensions};
pub use grid::reveal::{cells_to_reveal, initialize, reveal_random, revealed_count};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::cell::Cell;
pub use model::goal::{Goal, GoalId, GoalValidationError};
pub use model::project::{ProjectId, ProjectSnapshot, ProjectSummary, SnapshotValidationError};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::board_service::{Board, BoardError, PartialCompletion, MAX_TOTAL_CELLS};
pub use service::project_store::{ProjectStore, PROJECTS_SLOT_KEY};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
