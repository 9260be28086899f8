//! Pieces module tests - shapes, rotation and wall kick

use falling_blocks::core::pieces::{get_shape, rotate_cells, try_rotate, Tetromino};
use falling_blocks::core::Board;
use falling_blocks::types::{Color, PieceKind};

fn sorted_cells(piece: &Tetromino) -> Vec<(usize, usize)> {
    let mut cells: Vec<_> = piece.live_cells().map(|(i, j, _)| (i, j)).collect();
    cells.sort();
    cells
}

fn at(kind: PieceKind, x: i32, y: i32) -> Tetromino {
    let mut piece = Tetromino::from_kind(kind);
    piece.x = x;
    piece.y = y;
    piece
}

// ============== Shape Tests ==============

#[test]
fn test_spawn_layouts() {
    assert_eq!(get_shape(PieceKind::I).cells, [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(get_shape(PieceKind::O).cells, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    assert_eq!(get_shape(PieceKind::T).cells, [(0, 1), (1, 0), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::S).cells, [(0, 1), (1, 0), (1, 1), (2, 0)]);
    assert_eq!(get_shape(PieceKind::Z).cells, [(0, 0), (1, 0), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::J).cells, [(0, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::L).cells, [(0, 1), (1, 1), (2, 0), (2, 1)]);
}

#[test]
fn test_sizes_and_colors() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::from_kind(kind);
        let expected_size = match kind {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        };
        assert_eq!(piece.size, expected_size, "{:?}", kind);
        assert!(piece.live_cells().all(|(_, _, c)| c == kind.color()));
    }
    assert_eq!(PieceKind::I.color(), Color::Cyan);
    assert_eq!(PieceKind::O.color(), Color::Yellow);
    assert_eq!(PieceKind::T.color(), Color::Purple);
    assert_eq!(PieceKind::S.color(), Color::Green);
    assert_eq!(PieceKind::Z.color(), Color::Red);
    assert_eq!(PieceKind::J.color(), Color::Blue);
    assert_eq!(PieceKind::L.color(), Color::Orange);
}

#[test]
fn test_spawn_columns() {
    let mut i = Tetromino::from_kind(PieceKind::I);
    i.reset_position();
    assert_eq!((i.x, i.y), (3, 0));

    let mut o = Tetromino::from_kind(PieceKind::O);
    o.reset_position();
    assert_eq!((o.x, o.y), (4, 0));

    let mut s = Tetromino::from_kind(PieceKind::S);
    s.reset_position();
    assert_eq!((s.x, s.y), (3, 0));
}

// ============== Rotation Tests ==============

#[test]
fn test_i_rotates_within_its_square() {
    let board = Board::new();
    let piece = at(PieceKind::I, 3, 5);

    let cw = try_rotate(&board, &piece, true, true).unwrap();
    assert_eq!(sorted_cells(&cw), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!((cw.x, cw.y), (3, 5));

    let ccw = try_rotate(&board, &piece, false, true).unwrap();
    assert_eq!(sorted_cells(&ccw), vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_s_rotation() {
    let board = Board::new();
    let piece = at(PieceKind::S, 3, 5);
    let cw = try_rotate(&board, &piece, true, true).unwrap();
    // .#.
    // .##
    // ..#
    assert_eq!(sorted_cells(&cw), vec![(1, 0), (1, 1), (2, 1), (2, 2)]);
}

#[test]
fn test_rotation_round_trip_restores_piece() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let piece = at(kind, 3, 5);
        let cw = try_rotate(&board, &piece, true, true).unwrap();
        let back = try_rotate(&board, &cw, false, true).unwrap();
        assert_eq!(back, piece, "{:?}", kind);
    }
}

#[test]
fn test_rotation_blocked_by_filled_cell() {
    let mut board = Board::new();
    let piece = at(PieceKind::T, 3, 5);
    // The clockwise T needs buffer cell (1, 2) -> board (4, 7).
    board.set(4, 7, Some(Color::Red));
    assert!(try_rotate(&board, &piece, true, true).is_none());
    // Counter-clockwise also needs (1, 2).
    assert!(try_rotate(&board, &piece, false, true).is_none());
}

#[test]
fn test_rotation_blocked_by_floor() {
    let board = Board::new();
    // Horizontal I resting on the floor cannot stand up.
    let piece = at(PieceKind::I, 3, 20);
    assert!(try_rotate(&board, &piece, true, true).is_none());
}

#[test]
fn test_rotation_above_the_top_is_allowed() {
    let board = Board::new();
    let piece = at(PieceKind::I, 3, -2);
    assert!(try_rotate(&board, &piece, true, true).is_some());
}

// ============== Wall Kick Tests ==============

#[test]
fn test_left_wall_kick() {
    let board = Board::new();
    let i = Tetromino::from_kind(PieceKind::I);
    let vertical = Tetromino {
        cells: rotate_cells(&i.cells, i.size, true),
        x: -2,
        y: 5,
        ..i
    };

    let kicked = try_rotate(&board, &vertical, true, true).unwrap();
    assert_eq!(kicked.x, 0);

    assert!(try_rotate(&board, &vertical, true, false).is_none());
}

#[test]
fn test_right_wall_kick_on_three_wide_piece() {
    let board = Board::new();
    let t = Tetromino::from_kind(PieceKind::T);
    // Pointing left: live columns 0 and 1, so the anchor may sit at x = 8.
    let pointing_left = Tetromino {
        cells: rotate_cells(&t.cells, t.size, false),
        x: 8,
        y: 5,
        ..t
    };
    assert!(!board.check_collision(&pointing_left, 0, 0));

    let kicked = try_rotate(&board, &pointing_left, false, true).unwrap();
    assert_eq!(kicked.x, 7);
    assert!(kicked.live_cells().all(|(i, _, _)| kicked.x + (i as i32) < 10));
}

#[test]
fn test_wall_kick_rejected_when_destination_is_blocked() {
    let mut board = Board::new();
    let i = Tetromino::from_kind(PieceKind::I);
    let vertical = Tetromino {
        cells: rotate_cells(&i.cells, i.size, true),
        x: -2,
        y: 5,
        ..i
    };
    // Kicked horizontal bar would cover row 7, columns 0..=3.
    board.set(3, 7, Some(Color::Blue));
    assert!(try_rotate(&board, &vertical, true, true).is_none());
}

#[test]
fn test_o_never_rotates() {
    let board = Board::new();
    let piece = at(PieceKind::O, 4, 5);
    assert_eq!(try_rotate(&board, &piece, true, true), Some(piece));
}
