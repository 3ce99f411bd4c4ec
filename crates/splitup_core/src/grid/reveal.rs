//! Cell reveal engine.
//!
//! # Responsibility
//! - Rebuild cell lists across grid resizes without losing progress.
//! - Reveal random hidden cells for applied goal progress.
//!
//! # Invariants
//! - A revealed cell is never hidden again by this module.
//! - `reveal_random` is the only source of non-determinism and takes its
//!   random source from the caller.

use crate::model::cell::Cell;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Builds a cell list of `total_cells` positions.
///
/// Positions revealed in `previous` stay revealed when they still exist.
pub fn initialize(total_cells: u32, previous: &[Cell]) -> Vec<Cell> {
    let revealed = previous
        .iter()
        .filter(|cell| cell.revealed)
        .map(|cell| cell.position)
        .collect::<HashSet<_>>();

    (0..total_cells)
        .map(|position| Cell {
            revealed: revealed.contains(&position),
            position,
        })
        .collect()
}

/// Reveals up to `count` hidden cells chosen uniformly without replacement.
///
/// Clamps to the number of hidden cells and returns how many were revealed.
pub fn reveal_random<R: Rng + ?Sized>(cells: &mut [Cell], count: usize, rng: &mut R) -> usize {
    let mut hidden = cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.revealed)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    let amount = count.min(hidden.len());
    if amount == 0 {
        return 0;
    }

    let (picked, _) = hidden.partial_shuffle(rng, amount);
    for &index in picked.iter() {
        cells[index].revealed = true;
    }
    amount
}

/// Number of cells a partial completion earns.
///
/// `floor(goal_cell_count * amount / goal_total)`; zero when `goal_total`
/// is zero. Truncation can leave a goal's last cells unrevealed after the
/// goal completes.
pub fn cells_to_reveal(goal_cell_count: u32, amount: u32, goal_total: u32) -> u32 {
    if goal_total == 0 {
        return 0;
    }
    let earned = u64::from(goal_cell_count) * u64::from(amount) / u64::from(goal_total);
    u32::try_from(earned).unwrap_or(u32::MAX)
}

/// Counts revealed cells.
pub fn revealed_count(cells: &[Cell]) -> usize {
    cells.iter().filter(|cell| cell.revealed).count()
}

#[cfg(test)]
mod tests {
    use super::{cells_to_reveal, initialize, reveal_random, revealed_count};
    use crate::model::cell::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn initialize_keeps_surviving_reveals_only() {
        let mut previous = initialize(10, &[]);
        previous[5].revealed = true;
        previous[9].revealed = true;

        let shrunk = initialize(7, &previous);
        assert_eq!(shrunk.len(), 7);
        assert!(shrunk[5].revealed);
        assert_eq!(revealed_count(&shrunk), 1);
    }

    #[test]
    fn reveal_random_is_deterministic_for_seed() {
        let mut first = initialize(50, &[]);
        let mut second = initialize(50, &[]);
        reveal_random(&mut first, 12, &mut StdRng::seed_from_u64(7));
        reveal_random(&mut second, 12, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn reveal_random_on_empty_grid_is_noop() {
        let mut cells: Vec<Cell> = Vec::new();
        let revealed = reveal_random(&mut cells, 3, &mut StdRng::seed_from_u64(1));
        assert_eq!(revealed, 0);
    }

    #[test]
    fn cells_to_reveal_truncates() {
        assert_eq!(cells_to_reveal(100, 25, 100), 25);
        assert_eq!(cells_to_reveal(7, 1, 3), 2);
        assert_eq!(cells_to_reveal(5, 3, 0), 0);
    }
}
