use std::collections::BTreeMap;

use quizship::{
    Board, BoardConfig, BoardError, Cell, ShotOutcome, GRID_SIZE, SEQUENCE_COLORS,
    TOTAL_SEQUENCE_CELLS,
};
use rand::{rngs::SmallRng, SeedableRng};

fn layout(cells: &[(usize, usize, usize)]) -> BTreeMap<Cell, usize> {
    cells
        .iter()
        .map(|&(r, c, id)| (Cell::new(r, c), id))
        .collect()
}

fn two_cell_board() -> Board {
    Board::with_layout(
        GRID_SIZE,
        layout(&[(0, 0, 0), (0, 1, 0)]),
        SEQUENCE_COLORS.to_vec(),
    )
}

#[test]
fn hit_then_miss_then_repeat() {
    let mut board = two_cell_board();
    assert_eq!(board.register_shot(Cell::new(0, 0)), Ok(ShotOutcome::Hit));
    assert_eq!(board.register_shot(Cell::new(5, 5)), Ok(ShotOutcome::Miss));
    let before = board.clone();
    assert_eq!(
        board.register_shot(Cell::new(0, 0)),
        Ok(ShotOutcome::AlreadyShot)
    );
    assert_eq!(
        board.register_shot(Cell::new(5, 5)),
        Ok(ShotOutcome::AlreadyShot)
    );
    assert_eq!(board, before);
}

#[test]
fn out_of_bounds_shot_is_rejected_without_mutation() {
    let mut board = two_cell_board();
    assert_eq!(
        board.register_shot(Cell::new(GRID_SIZE, 0)),
        Err(BoardError::OutOfBounds {
            row: GRID_SIZE,
            col: 0
        })
    );
    assert!(board.hits().is_empty());
    assert!(board.misses().is_empty());
}

#[test]
fn all_sunk_after_every_occupied_cell_is_hit() {
    let mut board = two_cell_board();
    assert!(!board.all_sunk());
    board.register_shot(Cell::new(0, 0)).unwrap();
    assert!(!board.all_sunk());
    board.register_shot(Cell::new(0, 1)).unwrap();
    assert!(board.all_sunk());
}

#[test]
fn empty_board_is_never_sunk() {
    let mut board = Board::new(GRID_SIZE, SEQUENCE_COLORS.to_vec());
    board.register_shot(Cell::new(3, 3)).unwrap();
    assert!(!board.all_sunk());
    assert_eq!(board.total_sequence_cells(), 0);
}

#[test]
fn color_follows_sequence_id() {
    let board = Board::with_layout(
        GRID_SIZE,
        layout(&[(1, 1, 0), (2, 2, 2)]),
        SEQUENCE_COLORS.to_vec(),
    );
    assert_eq!(board.color_at(Cell::new(1, 1)), Some(SEQUENCE_COLORS[0]));
    assert_eq!(board.color_at(Cell::new(2, 2)), Some(SEQUENCE_COLORS[2]));
    assert_eq!(board.color_at(Cell::new(3, 3)), None);
}

#[test]
fn random_board_covers_standard_cell_count() {
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Board::random(&mut rng, &BoardConfig::default()).unwrap();
        assert_eq!(board.placement_fallbacks(), 0);
        assert_eq!(board.total_sequence_cells(), TOTAL_SEQUENCE_CELLS);
        assert!(board.occupied().keys().all(|c| c.within(GRID_SIZE)));
        let ids: std::collections::BTreeSet<_> = board.occupied().values().copied().collect();
        assert_eq!(ids.len(), 3);
    }
}
