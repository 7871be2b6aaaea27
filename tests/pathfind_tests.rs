//! Path search through a live board

use marbles::core::Board;
use marbles::pathfind::{expand_ways, path_cost, relative_ways, PathConfig};
use marbles::types::{Hue, MarbleColor, Position};

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn blue() -> MarbleColor {
    MarbleColor::single(Hue::Blue)
}

fn assert_walkable(board: &Board, path: &[Position]) {
    for pair in path.windows(2) {
        let adjacent = pair[0].manhattan(pair[1]) == 1;
        let jump = board.jump_holes().links(pair[0]).contains(&pair[1]);
        assert!(adjacent || jump, "{} -> {}", pair[0], pair[1]);
    }
    for pos in &path[1..] {
        assert!(board.marble_at(*pos).is_none(), "path crosses {pos}");
    }
}

/// Column 4 filled except for the bottom cell
fn walled_board() -> Board {
    let mut board = Board::new(1);
    for y in 0..8 {
        board.create_marble(p(4, y), blue()).unwrap();
    }
    board
}

#[test]
fn test_path_goes_around_marbles() {
    let mut board = walled_board();
    let id = board.create_marble(p(0, 0), MarbleColor::single(Hue::Red)).unwrap();
    let path = board.find_path(id, p(8, 0)).unwrap().expect("gap at the bottom");
    assert_eq!(path.first(), Some(&p(0, 0)));
    assert_eq!(path.last(), Some(&p(8, 0)));
    assert!(path.contains(&p(4, 8)));
    assert_walkable(&board, &path);
}

#[test]
fn test_no_path_to_occupied_or_same_cell() {
    let mut board = walled_board();
    let id = board.create_marble(p(0, 0), MarbleColor::single(Hue::Red)).unwrap();
    assert_eq!(board.find_path(id, p(4, 3)).unwrap(), None);
    assert_eq!(board.find_path(id, p(0, 0)).unwrap(), None);
    assert_eq!(board.find_path(id, p(-1, 0)).unwrap(), None);
}

#[test]
fn test_no_path_when_enclosed() {
    let mut board = Board::new(1);
    let id = board.create_marble(p(0, 0), MarbleColor::single(Hue::Red)).unwrap();
    board.create_marble(p(1, 0), blue()).unwrap();
    board.create_marble(p(0, 1), blue()).unwrap();
    assert_eq!(board.find_path(id, p(8, 8)).unwrap(), None);
    assert!(!board.path_finder().is_searching());
}

#[test]
fn test_jump_hole_beats_walking() {
    let mut board = walled_board();
    let id = board.create_marble(p(0, 0), MarbleColor::single(Hue::Red)).unwrap();
    let walked = board.find_path(id, p(8, 0)).unwrap().expect("walkable");

    board.jump_holes_mut().add(p(1, 0), p(7, 0));
    let jumped = board.find_path(id, p(8, 0)).unwrap().expect("jumpable");
    assert_walkable(&board, &jumped);

    let config = PathConfig::default();
    let walk_cost = path_cost(&walked, board.grid(), &config);
    let jump_cost = path_cost(&jumped, board.grid(), &config);
    assert!(jump_cost < walk_cost, "{jump_cost} >= {walk_cost}");
    assert_eq!(jumped, vec![p(0, 0), p(1, 0), p(7, 0), p(8, 0)]);
}

#[test]
fn test_repeated_search_is_identical() {
    let mut board = walled_board();
    let id = board.create_marble(p(2, 2), MarbleColor::single(Hue::Red)).unwrap();
    board.create_marble(p(6, 5), blue()).unwrap();
    let first = board.find_path(id, p(7, 3)).unwrap();
    let second = board.find_path(id, p(7, 3)).unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_preview_marble_has_no_path() {
    let mut board = Board::new(4);
    board.pre_create_random_marbles();
    let preview = board.next_marbles().map(|m| m.id()).next().unwrap();
    let target = *board.free_positions().iter().next().unwrap();
    assert_eq!(board.find_path(preview, target).unwrap(), None);
}

#[test]
fn test_relative_ways_describe_path() {
    let mut board = walled_board();
    board.jump_holes_mut().add(p(3, 8), p(5, 8));
    let id = board.create_marble(p(0, 0), MarbleColor::single(Hue::Red)).unwrap();
    let path = board.find_path(id, p(8, 8)).unwrap().expect("path");
    let ways = relative_ways(&path);
    assert!(ways.len() < path.len());
    assert_eq!(expand_ways(path[0], &ways), path[1..].to_vec());
}
