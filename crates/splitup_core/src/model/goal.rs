//! Goal domain model.
//!
//! # Responsibility
//! - Define the quantity target that drives cell reveals.
//! - Own remaining/completion bookkeeping for partial completions.
//!
//! # Invariants
//! - `id` is stable and never nil.
//! - `remaining <= total`.
//! - `completed == (remaining == 0)`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one goal.
pub type GoalId = Uuid;

/// Validation failures for goal records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    NilId,
    RemainingExceedsTotal { remaining: u32, total: u32 },
    CompletionMismatch { remaining: u32, completed: bool },
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "goal id must not be nil"),
            Self::RemainingExceedsTotal { remaining, total } => {
                write!(f, "remaining ({remaining}) must be <= total ({total})")
            }
            Self::CompletionMismatch {
                remaining,
                completed,
            } => write!(
                f,
                "completed ({completed}) disagrees with remaining ({remaining})"
            ),
        }
    }
}

impl Error for GoalValidationError {}

/// Named quantity target with a total and a remaining amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GoalRecord")]
pub struct Goal {
    pub id: GoalId,
    /// Display text shown in the goal list.
    pub text: String,
    pub total: u32,
    pub remaining: u32,
    pub completed: bool,
}

/// Unvalidated wire shape; every decode goes through `Goal::validate`.
#[derive(Deserialize)]
struct GoalRecord {
    id: GoalId,
    text: String,
    total: u32,
    remaining: u32,
    completed: bool,
}

impl TryFrom<GoalRecord> for Goal {
    type Error = GoalValidationError;

    fn try_from(value: GoalRecord) -> Result<Self, Self::Error> {
        let goal = Self {
            id: value.id,
            text: value.text,
            total: value.total,
            remaining: value.remaining,
            completed: value.completed,
        };
        goal.validate()?;
        Ok(goal)
    }
}

impl Goal {
    /// Creates a fresh goal with `remaining = total`.
    pub fn new(text: impl Into<String>, total: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            total,
            remaining: total,
            completed: total == 0,
        }
    }

    /// Checks the record invariants listed in the module docs.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.id.is_nil() {
            return Err(GoalValidationError::NilId);
        }
        if self.remaining > self.total {
            return Err(GoalValidationError::RemainingExceedsTotal {
                remaining: self.remaining,
                total: self.total,
            });
        }
        if self.completed != (self.remaining == 0) {
            return Err(GoalValidationError::CompletionMismatch {
                remaining: self.remaining,
                completed: self.completed,
            });
        }
        Ok(())
    }

    /// Replaces text and total. Progress restarts from zero.
    pub fn reset(&mut self, text: impl Into<String>, total: u32) {
        self.text = text.into();
        self.total = total;
        self.remaining = total;
        self.completed = total == 0;
    }

    /// Applies a completed amount.
    ///
    /// Returns `false` and leaves the goal untouched unless
    /// `0 < amount <= remaining`.
    pub fn apply(&mut self, amount: u32) -> bool {
        if amount == 0 || amount > self.remaining {
            return false;
        }
        self.remaining -= amount;
        self.completed = self.remaining == 0;
        true
    }

    /// Completed quantity, `total - remaining`.
    pub fn done(&self) -> u32 {
        self.total - self.remaining
    }

    /// Progress label in `done/total` form.
    pub fn progress(&self) -> String {
        format!("{}/{}", self.done(), self.total)
    }
}
