//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose board and saved-project use-cases to Dart via FRB.
//! - Own the process-wide board session the UI edits.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through response envelopes, never thrown.
//! - Board access is serialized through one mutex; a poisoned lock is
//!   recovered instead of propagated.
//! - The saved-project list is loaded from disk once per process; a failed
//!   write keeps the in-memory list the UI sees.

use log::warn;
use splitup_core::db::open_db;
use splitup_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Board, GoalId, ProjectId, ProjectStore, RepoResult,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use uuid::Uuid;

const STORE_DB_FILE_NAME: &str = "splitup_store.sqlite3";
const STORE_DB_PATH_ENV: &str = "SPLITUP_DB_PATH";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static BOARD: OnceLock<Mutex<Board>> = OnceLock::new();
static PROJECTS: Mutex<Option<ProjectStore<Connection>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Goal row rendered by the goal list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalItem {
    pub goal_id: String,
    pub text: String,
    pub total: u32,
    pub remaining: u32,
    pub completed: bool,
    /// Progress label in `done/total` form.
    pub progress: String,
}

/// Full board view for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub project_name: String,
    pub has_image: bool,
    pub goals: Vec<GoalItem>,
    pub rows: u32,
    pub columns: u32,
    /// Reveal flag per cell position, row-major.
    pub cells: Vec<bool>,
    pub grid_visible: bool,
    pub total: u32,
    pub remaining: u32,
}

/// Saved-projects gallery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListItem {
    pub project_id: String,
    pub name: String,
    pub thumbnail: Vec<u8>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Goal or project ID the action created or touched.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Replaces the board image with already-decoded bytes.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_image(bytes: Vec<u8>) -> BoardState {
    let mut board = lock_board();
    board.set_image(bytes);
    to_board_state(&board)
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_set_project_name(name: String) -> BoardState {
    let mut board = lock_board();
    board.set_project_name(name);
    to_board_state(&board)
}

/// Adds a goal; `total` is validated as non-negative by the UI.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_goal(text: String, total: u32) -> ActionResponse {
    match lock_board().add_goal(&text, total) {
        Ok(goal_id) => ActionResponse::success("Goal added.", Some(goal_id.to_string())),
        Err(err) => ActionResponse::failure(format!("board_add_goal failed: {err}")),
    }
}

/// Replaces a goal's text and total; progress restarts.
#[flutter_rust_bridge::frb(sync)]
pub fn board_edit_goal(goal_id: String, text: String, total: u32) -> ActionResponse {
    let goal_id = match parse_id(&goal_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("board_edit_goal failed: {message}")),
    };
    match lock_board().edit_goal(goal_id, &text, total) {
        Ok(()) => ActionResponse::success("Goal updated.", Some(goal_id.to_string())),
        Err(err) => ActionResponse::failure(format!("board_edit_goal failed: {err}")),
    }
}

/// Shows the grid sized to the current goal totals.
#[flutter_rust_bridge::frb(sync)]
pub fn board_divide() -> BoardState {
    let mut board = lock_board();
    board.divide();
    to_board_state(&board)
}

/// Applies a completed amount to one goal and reveals earned cells.
///
/// # FFI contract
/// - Amounts outside `1..=remaining` are rejected without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn board_apply_partial(goal_id: String, amount: u32) -> ActionResponse {
    let goal_id = match parse_id(&goal_id) {
        Ok(id) => id,
        Err(message) => {
            return ActionResponse::failure(format!("board_apply_partial failed: {message}"))
        }
    };
    match lock_board().apply_partial(goal_id, amount, &mut rand::rng()) {
        Ok(outcome) => {
            let message = if outcome.completed {
                format!("Goal completed. Revealed {} cell(s).", outcome.cells_revealed)
            } else {
                format!("Revealed {} cell(s).", outcome.cells_revealed)
            };
            ActionResponse::success(message, Some(goal_id.to_string()))
        }
        Err(err) => ActionResponse::failure(format!("board_apply_partial failed: {err}")),
    }
}

/// Current board view.
#[flutter_rust_bridge::frb(sync)]
pub fn board_state() -> BoardState {
    to_board_state(&lock_board())
}

/// Clears the board back to an empty session.
#[flutter_rust_bridge::frb(sync)]
pub fn board_reset() -> BoardState {
    let mut board = lock_board();
    board.reset();
    to_board_state(&board)
}

/// Lists saved projects in saved order.
///
/// # FFI contract
/// - Unreadable storage yields an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_list() -> Vec<ProjectListItem> {
    match with_project_store(|store| {
        Ok(store
            .summaries()
            .into_iter()
            .map(|summary| ProjectListItem {
                project_id: summary.id.to_string(),
                name: summary.name,
                thumbnail: summary.thumbnail,
            })
            .collect::<Vec<_>>())
    }) {
        Ok(items) => items,
        Err(err) => {
            warn!("event=projects_list module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Saves the current board as a new project.
#[flutter_rust_bridge::frb(sync)]
pub fn project_save_current() -> ActionResponse {
    let snapshot = match lock_board().snapshot() {
        Ok(snapshot) => snapshot,
        Err(err) => return ActionResponse::failure(format!("project_save_current failed: {err}")),
    };
    let project_id = snapshot.id;
    match with_project_store(|store| store.add(snapshot)) {
        Ok(()) => ActionResponse::success("Project saved.", Some(project_id.to_string())),
        Err(err) => ActionResponse::failure(format!("project_save_current failed: {err}")),
    }
}

/// Deletes one saved project; unknown IDs succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn project_delete(project_id: String) -> ActionResponse {
    let project_id = match parse_id(&project_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("project_delete failed: {message}")),
    };
    match with_project_store(|store| store.remove(project_id)) {
        Ok(true) => ActionResponse::success("Project deleted.", Some(project_id.to_string())),
        Ok(false) => ActionResponse::success("Project not found.", None),
        Err(err) => ActionResponse::failure(format!("project_delete failed: {err}")),
    }
}

/// Loads a saved project into the board.
#[flutter_rust_bridge::frb(sync)]
pub fn project_restore(project_id: String) -> ActionResponse {
    let project_id: ProjectId = match parse_id(&project_id) {
        Ok(id) => id,
        Err(message) => {
            return ActionResponse::failure(format!("project_restore failed: {message}"))
        }
    };
    let snapshot = match with_project_store(|store| Ok(store.get(project_id).cloned())) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            return ActionResponse::failure(format!(
                "project_restore failed: project not found: {project_id}"
            ))
        }
        Err(err) => return ActionResponse::failure(format!("project_restore failed: {err}")),
    };
    match lock_board().restore(&snapshot) {
        Ok(()) => ActionResponse::success("Project restored.", Some(project_id.to_string())),
        Err(err) => ActionResponse::failure(format!("project_restore failed: {err}")),
    }
}

fn lock_board() -> MutexGuard<'static, Board> {
    BOARD
        .get_or_init(|| Mutex::new(Board::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORE_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn with_project_store<T>(
    f: impl FnOnce(&mut ProjectStore<Connection>) -> RepoResult<T>,
) -> Result<T, String> {
    let mut slot = PROJECTS.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.is_none() {
        let conn = open_db(resolve_store_db_path())
            .map_err(|err| format!("project DB open failed: {err}"))?;
        *slot = Some(ProjectStore::open(conn));
    }
    let Some(store) = slot.as_mut() else {
        return Err("project store unavailable".to_string());
    };
    f(store).map_err(|err| err.to_string())
}

fn parse_id(raw: &str) -> Result<GoalId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{}`", raw.trim()))
}

fn to_board_state(board: &Board) -> BoardState {
    let dimensions = board.dimensions();
    BoardState {
        project_name: board.project_name().to_string(),
        has_image: board.image().is_some(),
        goals: board
            .goals()
            .iter()
            .map(|goal| GoalItem {
                goal_id: goal.id.to_string(),
                text: goal.text.clone(),
                total: goal.total,
                remaining: goal.remaining,
                completed: goal.completed,
                progress: goal.progress(),
            })
            .collect(),
        rows: dimensions.rows,
        columns: dimensions.columns,
        cells: board.cells().iter().map(|cell| cell.revealed).collect(),
        grid_visible: board.grid_visible(),
        total: board.total_quantity(),
        remaining: board.remaining_quantity(),
    }
}
