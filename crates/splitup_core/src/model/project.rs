//! Saved project snapshot model.
//!
//! # Responsibility
//! - Bundle image bytes, goals and cell state for later restoration.
//! - Define the gallery summary projection.
//!
//! # Invariants
//! - `id` is never nil.
//! - `cells[i].position == i` for every cell.
//! - `image_bytes` round-trips byte-for-byte through the wire format.

use crate::model::cell::Cell;
use crate::model::goal::{Goal, GoalValidationError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one saved project.
pub type ProjectId = Uuid;

/// Validation failures for project snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotValidationError {
    NilId,
    Goal(GoalValidationError),
    CellPositionMismatch { index: usize, position: u32 },
}

impl Display for SnapshotValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "project id must not be nil"),
            Self::Goal(err) => write!(f, "invalid goal: {err}"),
            Self::CellPositionMismatch { index, position } => {
                write!(f, "cell at index {index} has position {position}")
            }
        }
    }
}

impl Error for SnapshotValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Goal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GoalValidationError> for SnapshotValidationError {
    fn from(value: GoalValidationError) -> Self {
        Self::Goal(value)
    }
}

/// Saved bundle of image, goals and cell state.
///
/// Serialized with camelCase keys (`imageBytes`, `projectName`,
/// `gridVisible`) to keep the persisted slot layout stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProjectRecord")]
pub struct ProjectSnapshot {
    pub id: ProjectId,
    #[serde(with = "base64_bytes")]
    pub image_bytes: Vec<u8>,
    pub goals: Vec<Goal>,
    pub project_name: String,
    pub cells: Vec<Cell>,
    pub grid_visible: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRecord {
    id: ProjectId,
    #[serde(with = "base64_bytes")]
    image_bytes: Vec<u8>,
    goals: Vec<Goal>,
    project_name: String,
    cells: Vec<Cell>,
    grid_visible: bool,
}

impl TryFrom<ProjectRecord> for ProjectSnapshot {
    type Error = SnapshotValidationError;

    fn try_from(value: ProjectRecord) -> Result<Self, Self::Error> {
        let snapshot = Self {
            id: value.id,
            image_bytes: value.image_bytes,
            goals: value.goals,
            project_name: value.project_name,
            cells: value.cells,
            grid_visible: value.grid_visible,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl ProjectSnapshot {
    /// Checks id, goal and cell-position invariants.
    ///
    /// The `cells.len() == sum(goal.total)` relation is only guaranteed at
    /// snapshot time and is enforced by the board, not here.
    pub fn validate(&self) -> Result<(), SnapshotValidationError> {
        if self.id.is_nil() {
            return Err(SnapshotValidationError::NilId);
        }
        for goal in &self.goals {
            goal.validate()?;
        }
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.position as usize != index {
                return Err(SnapshotValidationError::CellPositionMismatch {
                    index,
                    position: cell.position,
                });
            }
        }
        Ok(())
    }

    /// Gallery projection of this snapshot.
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id,
            name: self.project_name.clone(),
            thumbnail: self.image_bytes.clone(),
        }
    }
}

/// Saved-projects gallery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    /// Stored image bytes, rendered as the gallery thumbnail.
    pub thumbnail: Vec<u8>,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
