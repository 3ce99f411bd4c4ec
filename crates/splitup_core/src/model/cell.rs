//! Grid cell model.

use serde::{Deserialize, Serialize};

/// One unit of the partitioned grid over the project image.
///
/// `position` is the linear index in `0..total_cells` and is used as the
/// stable key across grid resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub revealed: bool,
    pub position: u32,
}

impl Cell {
    /// Creates a hidden cell at `position`.
    pub fn hidden(position: u32) -> Self {
        Self {
            revealed: false,
            position,
        }
    }
}
