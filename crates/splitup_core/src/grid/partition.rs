//! Near-square grid sizing.
//!
//! # Invariants
//! - `rows * columns >= total_cells`.
//! - `rows * columns - total_cells < columns`; only the last row may be
//!   partially filled.

use serde::{Deserialize, Serialize};

/// Grid shape for one total cell count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub rows: u32,
    pub columns: u32,
}

impl GridDimensions {
    /// Number of slots in the grid, including unused trailing slots.
    pub fn capacity(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }

    /// Maps a linear cell index to `(row, column)`.
    ///
    /// Returns `None` for an empty grid.
    pub fn coordinate_of(&self, index: u32) -> Option<(u32, u32)> {
        if self.columns == 0 {
            return None;
        }
        Some(cell_index_to_coordinate(index, self.columns))
    }
}

/// Computes grid dimensions for `total_cells`.
///
/// `columns = ceil(sqrt(total))`, `rows = ceil(total / columns)`, and an
/// empty grid for zero cells.
pub fn dimensions(total_cells: u32) -> GridDimensions {
    if total_cells == 0 {
        return GridDimensions::default();
    }
    let columns = ceil_sqrt(total_cells);
    let rows = total_cells.div_ceil(columns);
    GridDimensions { rows, columns }
}

/// Maps a linear cell index to `(row, column)`.
///
/// `columns` must be non-zero.
pub fn cell_index_to_coordinate(index: u32, columns: u32) -> (u32, u32) {
    (index / columns, index % columns)
}

fn ceil_sqrt(value: u32) -> u32 {
    let target = u64::from(value);
    // Float estimate, then exact correction in integer space.
    let mut root = (value as f64).sqrt() as u64;
    while root * root < target {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= target {
        root -= 1;
    }
    root as u32
}
