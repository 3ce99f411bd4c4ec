use rand::rngs::StdRng;
use rand::SeedableRng;
use splitup_core::{cells_to_reveal, initialize, reveal_random, revealed_count, Cell};
use std::collections::HashSet;

#[test]
fn initialize_builds_hidden_positions_in_order() {
    let cells = initialize(6, &[]);
    assert_eq!(cells.len(), 6);
    for (index, cell) in cells.iter().enumerate() {
        assert_eq!(cell.position as usize, index);
        assert!(!cell.revealed);
    }
}

#[test]
fn initialize_is_idempotent() {
    let mut previous = initialize(12, &[]);
    previous[3].revealed = true;
    previous[11].revealed = true;

    let first = initialize(15, &previous);
    let second = initialize(15, &previous);
    assert_eq!(first, second);
}

#[test]
fn resize_preserves_revealed_position() {
    let mut previous = initialize(10, &[]);
    previous[5].revealed = true;

    for new_total in [6u32, 10, 20] {
        let resized = initialize(new_total, &previous);
        assert_eq!(resized.len(), new_total as usize);
        assert!(resized[5].revealed, "new_total={new_total}");
        assert_eq!(revealed_count(&resized), 1);
    }
}

#[test]
fn reveal_random_never_exceeds_count_or_rereveals() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut cells = initialize(40, &[]);
    cells[0].revealed = true;
    cells[39].revealed = true;
    let before: HashSet<u32> = revealed_positions(&cells);

    let revealed = reveal_random(&mut cells, 10, &mut rng);
    assert_eq!(revealed, 10);

    let after = revealed_positions(&cells);
    assert!(before.is_subset(&after));
    assert_eq!(after.len(), before.len() + 10);
}

#[test]
fn reveal_random_clamps_to_hidden_cells() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut cells = initialize(8, &[]);
    cells[2].revealed = true;

    let revealed = reveal_random(&mut cells, 100, &mut rng);
    assert_eq!(revealed, 7);
    assert!(cells.iter().all(|cell| cell.revealed));

    assert_eq!(reveal_random(&mut cells, 3, &mut rng), 0);
}

#[test]
fn reveal_random_with_zero_count_changes_nothing() {
    let mut cells = initialize(5, &[]);
    let revealed = reveal_random(&mut cells, 0, &mut StdRng::seed_from_u64(0));
    assert_eq!(revealed, 0);
    assert_eq!(revealed_count(&cells), 0);
}

#[test]
fn proportional_reveal_for_quarter_progress() {
    assert_eq!(cells_to_reveal(100, 25, 100), 25);
    assert_eq!(cells_to_reveal(0, 0, 0), 0);
    assert_eq!(cells_to_reveal(3, 1, 3), 1);
    assert_eq!(cells_to_reveal(10, 3, 4), 7);
}

fn revealed_positions(cells: &[Cell]) -> HashSet<u32> {
    cells
        .iter()
        .filter(|cell| cell.revealed)
        .map(|cell| cell.position)
        .collect()
}
