//! Pieces module - tetromino shapes, piece instances and rotation
//!
//! Every piece lives in a 4x4 cell buffer addressed as `[x][y]`:
//!
//! ```text
//! +---- x
//! |
//! |
//! y
//! ```
//!
//! Only the top-left `size x size` square of the buffer holds live cells:
//! 4 for I, 2 for O and 3 for the rest. Rotation turns that square in place and
//! may push the piece away from a side wall (wall kick).

use crate::board::Board;
use crate::types::{Cell, Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, TETROMINO_SIZE};

/// Cell buffer of a piece, `[x][y]`
pub type PieceCells = [[Cell; TETROMINO_SIZE]; TETROMINO_SIZE];

/// Canonical shape of a kind: live cell offsets and effective size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub cells: [(usize, usize); 4],
    pub size: usize,
}

/// Spawn layouts, indexed by [`PieceKind::index`]
pub const SHAPES: [Shape; 7] = [
    // I
    // ....
    // ####
    // ....
    // ....
    Shape {
        cells: [(0, 1), (1, 1), (2, 1), (3, 1)],
        size: 4,
    },
    // O
    // ##..
    // ##..
    Shape {
        cells: [(0, 0), (0, 1), (1, 0), (1, 1)],
        size: 2,
    },
    // T
    // .#..
    // ###.
    Shape {
        cells: [(0, 1), (1, 0), (1, 1), (2, 1)],
        size: 3,
    },
    // S
    // .##.
    // ##..
    Shape {
        cells: [(0, 1), (1, 0), (1, 1), (2, 0)],
        size: 3,
    },
    // Z
    // ##..
    // .##.
    Shape {
        cells: [(0, 0), (1, 0), (1, 1), (2, 1)],
        size: 3,
    },
    // J
    // #...
    // ###.
    Shape {
        cells: [(0, 0), (0, 1), (1, 1), (2, 1)],
        size: 3,
    },
    // L
    // ..#.
    // ###.
    Shape {
        cells: [(0, 1), (1, 1), (2, 0), (2, 1)],
        size: 3,
    },
];

/// Get the canonical shape for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static Shape {
    &SHAPES[kind.index()]
}

/// A piece instance: cell buffer, anchor position, effective size and kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub cells: PieceCells,
    pub x: i32,
    pub y: i32,
    pub size: usize,
    pub kind: PieceKind,
}

impl Tetromino {
    /// Build a fresh piece of `kind` at (0, 0) from the shape table.
    pub fn from_kind(kind: PieceKind) -> Self {
        let shape = get_shape(kind);
        let mut cells = [[None; TETROMINO_SIZE]; TETROMINO_SIZE];
        for &(i, j) in shape.cells.iter() {
            cells[i][j] = Some(kind.color());
        }
        Self {
            cells,
            x: 0,
            y: 0,
            size: shape.size,
            kind,
        }
    }

    /// Column where a piece of this size spawns centered
    pub fn spawn_x(size: usize) -> i32 {
        ((BOARD_WIDTH - size) / 2) as i32
    }

    /// Move to the spawn position: centered, top row.
    pub fn reset_position(&mut self) {
        self.x = Self::spawn_x(self.size);
        self.y = 0;
    }

    /// Live cells within the `size x size` square as `(i, j, color)`
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        let size = self.size;
        (0..size).flat_map(move |i| {
            (0..size).filter_map(move |j| self.cells[i][j].map(|color| (i, j, color)))
        })
    }

    /// Copy buffer, size and kind from `other`, keeping this piece's position.
    pub fn copy_shape_from(&mut self, other: &Tetromino) {
        self.cells = other.cells;
        self.size = other.size;
        self.kind = other.kind;
    }
}

/// Rotate the live `size x size` square of `cells` by 90 degrees.
///
/// Clockwise maps `(i, j)` to `(size - 1 - j, i)`; counter-clockwise maps
/// `(i, j)` to `(j, size - 1 - i)`. Everything outside the square is empty.
pub fn rotate_cells(cells: &PieceCells, size: usize, clockwise: bool) -> PieceCells {
    let mut rotated = [[None; TETROMINO_SIZE]; TETROMINO_SIZE];
    for i in 0..size {
        for j in 0..size {
            if clockwise {
                rotated[size - 1 - j][i] = cells[i][j];
            } else {
                rotated[j][size - 1 - i] = cells[i][j];
            }
        }
    }
    rotated
}

/// Horizontal push needed to bring `rotated` back inside the side walls when
/// the anchor hangs off the board, or 0.
///
/// Columns are scanned from the overhanging edge inward and the first column
/// holding a live cell decides the displacement.
fn wall_displacement(rotated: &PieceCells, x: i32, size: usize) -> i32 {
    let live_column = |i: usize| rotated[i][..size].iter().any(|cell| cell.is_some());
    let width = BOARD_WIDTH as i32;

    if x < 0 {
        (0..(-x) as usize)
            .take_while(|&i| i < size)
            .find(|&i| live_column(i))
            .map_or(0, |i| i as i32 - x)
    } else if x > width - size as i32 {
        (0..size)
            .rev()
            .take_while(|&i| i as i32 >= width - x)
            .find(|&i| live_column(i))
            .map_or(0, |i| width - 1 - x - i as i32)
    } else {
        0
    }
}

/// Try to rotate `piece` against `board`.
///
/// Returns the rotated piece (possibly pushed sideways when `wall_kick` is
/// set), or `None` when the rotation is blocked. O pieces come back unchanged.
pub fn try_rotate(
    board: &Board,
    piece: &Tetromino,
    clockwise: bool,
    wall_kick: bool,
) -> Option<Tetromino> {
    if piece.kind == PieceKind::O {
        return Some(*piece);
    }

    let rotated = rotate_cells(&piece.cells, piece.size, clockwise);
    let displace = if wall_kick {
        wall_displacement(&rotated, piece.x, piece.size)
    } else {
        0
    };
    let nx = piece.x + displace;

    for i in 0..piece.size {
        for j in 0..piece.size {
            if rotated[i][j].is_none() {
                continue;
            }
            let x = nx + i as i32;
            let y = piece.y + j as i32;
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return None;
            }
            if board.is_occupied(x, y) {
                return None;
            }
        }
    }

    Some(Tetromino {
        cells: rotated,
        x: nx,
        ..*piece
    })
}
