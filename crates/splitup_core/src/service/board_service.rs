//! Board use-case service.
//!
//! # Responsibility
//! - Hold the working session: image, goals, cells and grid visibility.
//! - Turn goal progress into cell reveals.
//! - Produce and restore project snapshots.
//!
//! # Invariants
//! - Sum of goal totals, and the cell count, never exceed `MAX_TOTAL_CELLS`.
//! - Rejected operations leave the board unchanged.
//! - Snapshots satisfy `cells.len() == sum(goal.total)`.

use crate::grid::partition::{dimensions, GridDimensions};
use crate::grid::reveal::{cells_to_reveal, initialize, reveal_random, revealed_count};
use crate::model::cell::Cell;
use crate::model::goal::{Goal, GoalId};
use crate::model::project::ProjectSnapshot;
use log::{debug, info};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const UNTITLED_PROJECT_NAME: &str = "Untitled";

/// Largest grid a board accepts, summed over all goal totals.
pub const MAX_TOTAL_CELLS: u32 = 100_000;

/// Service error for board use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Goal text is empty after trimming.
    BlankGoalText,
    /// Target goal does not exist on this board.
    GoalNotFound(GoalId),
    /// Target goal has nothing left to complete.
    GoalAlreadyCompleted(GoalId),
    /// Amount is zero or larger than the goal's remaining quantity.
    AmountOutOfRange { amount: u32, remaining: u32 },
    /// Sum of goal totals (or a restored cell list) exceeds `MAX_TOTAL_CELLS`.
    TotalOverflow,
    /// Saving requires an image.
    MissingImage,
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankGoalText => write!(f, "goal text cannot be empty"),
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::GoalAlreadyCompleted(id) => write!(f, "goal already completed: {id}"),
            Self::AmountOutOfRange { amount, remaining } => write!(
                f,
                "amount {amount} must be between 1 and remaining ({remaining})"
            ),
            Self::TotalOverflow => write!(
                f,
                "sum of goal totals exceeds the {MAX_TOTAL_CELLS} cell limit"
            ),
            Self::MissingImage => write!(f, "project has no image"),
        }
    }
}

impl Error for BoardError {}

/// Result of one applied partial completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialCompletion {
    pub goal_id: GoalId,
    pub remaining: u32,
    pub completed: bool,
    /// Cells earned by the amount.
    pub cells_requested: u32,
    /// Cells actually revealed; lower when the grid ran out of hidden cells.
    pub cells_revealed: u32,
}

/// Working session edited by the UI before saving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    image_bytes: Option<Vec<u8>>,
    project_name: String,
    goals: Vec<Goal>,
    cells: Vec<Cell>,
    grid_visible: bool,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the image the grid is laid over.
    pub fn set_image(&mut self, bytes: Vec<u8>) {
        self.image_bytes = Some(bytes);
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image_bytes.as_deref()
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Adds a goal with `remaining = total`.
    ///
    /// The grid is not resized until the next `divide`.
    pub fn add_goal(&mut self, text: &str, total: u32) -> Result<GoalId, BoardError> {
        let text = normalize_goal_text(text)?;
        check_total(self.total_quantity_u64() + u64::from(total))?;

        let goal = Goal::new(text, total);
        let goal_id = goal.id;
        self.goals.push(goal);
        debug!(
            "event=goal_add module=board status=ok total={} goal_count={}",
            total,
            self.goals.len()
        );
        Ok(goal_id)
    }

    /// Replaces a goal's text and total and restarts its progress.
    ///
    /// Revealed cells are kept.
    pub fn edit_goal(&mut self, goal_id: GoalId, text: &str, total: u32) -> Result<(), BoardError> {
        let text = normalize_goal_text(text)?;
        let index = self.goal_index(goal_id)?;
        let others = self.total_quantity_u64() - u64::from(self.goals[index].total);
        check_total(others + u64::from(total))?;

        self.goals[index].reset(text, total);
        debug!("event=goal_edit module=board status=ok total={total}");
        Ok(())
    }

    /// Shows the grid and sizes it to the current goal totals.
    ///
    /// Previously revealed positions that still exist stay revealed.
    pub fn divide(&mut self) {
        let total = self.total_quantity();
        self.cells = initialize(total, &self.cells);
        self.grid_visible = true;
        info!(
            "event=board_divide module=board status=ok cells={} revealed={}",
            self.cells.len(),
            revealed_count(&self.cells)
        );
    }

    /// Applies a completed amount to one goal and reveals earned cells.
    ///
    /// # Errors
    /// - `GoalNotFound`, `GoalAlreadyCompleted`, `AmountOutOfRange`; the board
    ///   is unchanged in every error case.
    pub fn apply_partial<R: Rng + ?Sized>(
        &mut self,
        goal_id: GoalId,
        amount: u32,
        rng: &mut R,
    ) -> Result<PartialCompletion, BoardError> {
        let index = self.goal_index(goal_id)?;
        let goal = &mut self.goals[index];
        if goal.completed {
            return Err(BoardError::GoalAlreadyCompleted(goal_id));
        }
        let remaining = goal.remaining;
        if !goal.apply(amount) {
            return Err(BoardError::AmountOutOfRange { amount, remaining });
        }

        let cells_requested = cells_to_reveal(goal.total, amount, goal.total);
        let outcome = PartialCompletion {
            goal_id,
            remaining: goal.remaining,
            completed: goal.completed,
            cells_requested,
            cells_revealed: 0,
        };
        let cells_revealed = reveal_random(&mut self.cells, cells_requested as usize, rng) as u32;

        info!(
            "event=goal_progress module=board status=ok amount={} remaining={} completed={} cells_requested={} cells_revealed={}",
            amount, outcome.remaining, outcome.completed, cells_requested, cells_revealed
        );
        Ok(PartialCompletion {
            cells_revealed,
            ..outcome
        })
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, goal_id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == goal_id)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn revealed_count(&self) -> usize {
        revealed_count(&self.cells)
    }

    /// Sum of goal totals; the cell count `divide` sizes the grid to.
    pub fn total_quantity(&self) -> u32 {
        // Bounded by `check_total` on every goal mutation and restore.
        u32::try_from(self.total_quantity_u64()).unwrap_or(MAX_TOTAL_CELLS)
    }

    /// Sum of remaining goal quantities.
    pub fn remaining_quantity(&self) -> u32 {
        self.goals.iter().map(|goal| goal.remaining).sum()
    }

    /// Dimensions of the current cell list.
    pub fn dimensions(&self) -> GridDimensions {
        dimensions(self.cells.len() as u32)
    }

    /// Captures the board as a new project snapshot.
    ///
    /// The name falls back to the first goal's text, then `"Untitled"`.
    /// Cells are sized to the current goal totals so the snapshot is
    /// self-consistent even when the grid was not divided since the last
    /// goal change.
    pub fn snapshot(&self) -> Result<ProjectSnapshot, BoardError> {
        let image_bytes = self.image_bytes.clone().ok_or(BoardError::MissingImage)?;
        let project_name = if !self.project_name.trim().is_empty() {
            self.project_name.trim().to_string()
        } else {
            self.goals
                .first()
                .map(|goal| goal.text.clone())
                .unwrap_or_else(|| UNTITLED_PROJECT_NAME.to_string())
        };

        Ok(ProjectSnapshot {
            id: Uuid::new_v4(),
            image_bytes,
            goals: self.goals.clone(),
            project_name,
            cells: initialize(self.total_quantity(), &self.cells),
            grid_visible: self.grid_visible,
        })
    }

    /// Replaces the board with a saved snapshot.
    ///
    /// # Errors
    /// - `TotalOverflow` when the snapshot's goal totals or cell count exceed
    ///   `MAX_TOTAL_CELLS`; the board is unchanged.
    pub fn restore(&mut self, snapshot: &ProjectSnapshot) -> Result<(), BoardError> {
        let goal_total = snapshot
            .goals
            .iter()
            .map(|goal| u64::from(goal.total))
            .sum::<u64>();
        check_total(goal_total)?;
        check_total(snapshot.cells.len() as u64)?;

        self.image_bytes = Some(snapshot.image_bytes.clone());
        self.project_name = snapshot.project_name.clone();
        self.goals = snapshot.goals.clone();
        self.cells = snapshot.cells.clone();
        self.grid_visible = snapshot.grid_visible;
        info!(
            "event=board_restore module=board status=ok goals={} cells={} revealed={}",
            self.goals.len(),
            self.cells.len(),
            self.revealed_count()
        );
        Ok(())
    }

    /// Clears the board back to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn goal_index(&self, goal_id: GoalId) -> Result<usize, BoardError> {
        self.goals
            .iter()
            .position(|goal| goal.id == goal_id)
            .ok_or(BoardError::GoalNotFound(goal_id))
    }

    fn total_quantity_u64(&self) -> u64 {
        self.goals.iter().map(|goal| u64::from(goal.total)).sum()
    }
}

fn check_total(total: u64) -> Result<(), BoardError> {
    if total > u64::from(MAX_TOTAL_CELLS) {
        return Err(BoardError::TotalOverflow);
    }
    Ok(())
}

fn normalize_goal_text(text: &str) -> Result<String, BoardError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BoardError::BlankGoalText);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Board, BoardError, MAX_TOTAL_CELLS};
    use crate::model::goal::Goal;
    use crate::model::project::ProjectSnapshot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn add_goal_rejects_blank_text() {
        let mut board = Board::new();
        assert_eq!(board.add_goal("   ", 3), Err(BoardError::BlankGoalText));
        assert!(board.goals().is_empty());
    }

    #[test]
    fn add_goal_rejects_totals_above_cell_limit() {
        let mut board = Board::new();
        assert_eq!(
            board.add_goal("huge", 4_000_000_000),
            Err(BoardError::TotalOverflow)
        );
        board.add_goal("a", MAX_TOTAL_CELLS - 1).unwrap();
        board.add_goal("b", 1).unwrap();
        assert_eq!(board.add_goal("c", 1), Err(BoardError::TotalOverflow));
        assert_eq!(board.goals().len(), 2);
        assert_eq!(board.total_quantity(), MAX_TOTAL_CELLS);
    }

    #[test]
    fn edit_goal_rejects_total_above_cell_limit() {
        let mut board = Board::new();
        let goal_id = board.add_goal("a", 10).unwrap();
        assert_eq!(
            board.edit_goal(goal_id, "a", MAX_TOTAL_CELLS + 1),
            Err(BoardError::TotalOverflow)
        );
        assert_eq!(board.goal(goal_id).unwrap().total, 10);
    }

    #[test]
    fn restore_rejects_snapshot_above_cell_limit() {
        let mut board = Board::new();
        board.add_goal("kept", 3).unwrap();
        let before = board.clone();

        let oversized = ProjectSnapshot {
            id: uuid::Uuid::new_v4(),
            image_bytes: vec![1],
            goals: vec![Goal::new("a", u32::MAX), Goal::new("b", u32::MAX)],
            project_name: "crafted".to_string(),
            cells: Vec::new(),
            grid_visible: true,
        };
        assert_eq!(board.restore(&oversized), Err(BoardError::TotalOverflow));
        assert_eq!(board, before);
    }

    #[test]
    fn apply_partial_on_undivided_board_reveals_nothing() {
        let mut board = Board::new();
        let goal_id = board.add_goal("steps", 10).unwrap();
        let outcome = board
            .apply_partial(goal_id, 4, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(outcome.cells_requested, 4);
        assert_eq!(outcome.cells_revealed, 0);
        assert_eq!(board.goal(goal_id).unwrap().remaining, 6);
    }

    #[test]
    fn remaining_quantity_sums_goals() {
        let mut board = Board::new();
        let first = board.add_goal("a", 5).unwrap();
        board.add_goal("b", 7).unwrap();
        board.divide();
        board
            .apply_partial(first, 2, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(board.total_quantity(), 12);
        assert_eq!(board.remaining_quantity(), 10);
    }
}
