//! Board model tests - generation, matching, fill and gravity

use match3_sim::core::{BoardModel, BoardSnapshot, SequenceRng, Tile};
use match3_sim::types::{Cell, TileId};

fn board_from_rows(rows: &[&str], palette: u8) -> BoardModel {
    let height = rows.len() as u16;
    let width = rows[0].len() as u16;
    let mut board = BoardModel::new(width, height, palette, 1).unwrap();
    board.load_rows(rows).unwrap();
    board
}

#[test]
fn test_randomize_golden_output() {
    let mut board = BoardModel::new(5, 6, 5, 1).unwrap();
    board.randomize().unwrap();
    assert_eq!(
        board.to_string(),
        "XXXXX\n14303\n20024\n33121\n04332\n12143\n"
    );
}

#[test]
fn test_randomize_default_size_golden_output() {
    let mut board = BoardModel::new(8, 9, 6, 1).unwrap();
    board.randomize().unwrap();
    assert_eq!(
        board.to_string(),
        "XXXXXXXX\n35211313\n34344354\n44140205\n42154205\n04522120\n00351542\n43441212\n13254054\n"
    );
}

#[test]
fn test_randomize_is_deterministic() {
    for seed in [1u32, 7, 12345, 233279] {
        let mut a = BoardModel::new(7, 8, 5, seed).unwrap();
        let mut b = BoardModel::new(7, 8, 5, seed).unwrap();
        a.randomize().unwrap();
        b.randomize().unwrap();
        assert_eq!(a.to_string(), b.to_string(), "seed {}", seed);
    }
}

#[test]
fn test_randomize_has_no_matches() {
    for seed in 1..50u32 {
        let mut board = BoardModel::new(8, 9, 4, seed).unwrap();
        board.randomize().unwrap();
        assert!(board.get_matches().is_empty(), "seed {} produced a match", seed);
    }
}

#[test]
fn test_randomize_different_seeds_differ() {
    let mut a = BoardModel::new(8, 9, 6, 1).unwrap();
    let mut b = BoardModel::new(8, 9, 6, 2).unwrap();
    a.randomize().unwrap();
    b.randomize().unwrap();
    assert_ne!(a.to_string(), b.to_string());
}

#[test]
fn test_horizontal_run_of_three_is_matched_exactly() {
    let board = board_from_rows(
        &[
            "01234", //
            "56789", //
            "31112",
        ],
        10,
    );
    let matches = board.get_matches();
    let cells: Vec<Cell> = matches.cells().collect();
    assert_eq!(cells, vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)]);
    assert!(matches.tiles().all(|t| t.value == 1));
}

#[test]
fn test_run_of_two_never_matched() {
    let board = board_from_rows(&["0123", "4556", "7789"], 10);
    assert!(board.get_matches().is_empty());
}

#[test]
fn test_run_longer_than_three_fully_matched() {
    let board = board_from_rows(&["01234", "22222"], 10);
    assert_eq!(board.get_matches().len(), 5);
}

#[test]
fn test_per_tile_runs() {
    let board = board_from_rows(&["3XX", "3XX", "311"], 10);
    let corner = board.get(Cell::new(0, 0)).unwrap();
    assert_eq!(board.get_vertical_matches(&corner).len(), 3);
    assert_eq!(board.get_horizontal_matches(&corner).len(), 1);

    let right = board.get(Cell::new(2, 0)).unwrap();
    let run = board.get_horizontal_matches(&right);
    assert_eq!(run.len(), 2);
    assert_eq!(run[0], right);
}

#[test]
fn test_detached_tile_yields_only_itself() {
    let board = board_from_rows(&["XXX", "111"], 10);
    let ghost = Tile::new(TileId(u32::MAX), 1);
    assert_eq!(board.get_horizontal_matches(&ghost), vec![ghost]);
}

#[test]
fn test_gravity_column_scenario() {
    // Bottom to top: [empty, empty, A, empty, B]
    let mut board = board_from_rows(&["2", "X", "1", "X", "X"], 10);
    let a = board.get(Cell::new(0, 2)).unwrap();
    let b = board.get(Cell::new(0, 4)).unwrap();

    assert!(board.gravity().unwrap());
    assert_eq!(board.to_string(), "X\nX\nX\n2\n1\n");
    assert_eq!(board.position_of(&a), Some(Cell::new(0, 0)));
    assert_eq!(board.position_of(&b), Some(Cell::new(0, 1)));

    assert!(!board.gravity().unwrap());
}

#[test]
fn test_gravity_columns_independent() {
    let mut board = board_from_rows(&["12X", "X3X", "XX4"], 10);
    assert!(board.gravity().unwrap());
    assert_eq!(board.to_string(), "XXX\nX2X\n134\n");
}

#[test]
fn test_fill_scenario() {
    let mut board = board_from_rows(&["XXXX", "0123", "4567"], 10);
    assert!(board.fill());
    for x in 0..4 {
        assert!(board.get(Cell::new(x, 2)).is_some());
    }
    assert!(!board.fill());
}

#[test]
fn test_fill_uses_board_generator() {
    let rng = SequenceRng::new(vec![7, 8, 9]);
    let mut board = BoardModel::with_rng(3, 2, 10, Box::new(rng)).unwrap();
    board.load_rows(&["XXX", "012"]).unwrap();
    assert!(board.fill());
    assert_eq!(board.to_string(), "789\n012\n");
}

#[test]
fn test_snapshot_roundtrips_through_json() {
    let mut board = BoardModel::new(4, 5, 4, 99).unwrap();
    board.randomize().unwrap();
    let json = serde_json::to_string(&board.snapshot()).unwrap();
    let back: BoardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_text(), board.to_string());
    assert_eq!(back.seed, 99);
}
