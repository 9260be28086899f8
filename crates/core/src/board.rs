//! Board module - manages the game grid
//!
//! The board is a 10x22 grid where each cell is empty or holds a color.
//! Cells are stored column-major and addressed as `[x][y]`, with x growing to
//! the right and y growing downward. Row 0 is the spawn row.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Indices of the rows removed by a single lock, in scan order (top to bottom)
pub type ClearedRows = ArrayVec<usize, BOARD_HEIGHT>;

/// Set every cell of a rectangular `[x][y]` buffer to `value`.
pub fn fill_cells<const W: usize, const H: usize>(grid: &mut [[Cell; H]; W], value: Cell) {
    for column in grid.iter_mut() {
        column.fill(value);
    }
}

/// The game board - 10 columns x 22 rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_HEIGHT]; BOARD_WIDTH],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_HEIGHT]; BOARD_WIDTH],
        }
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    #[inline(always)]
    fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_HEIGHT as i32
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if Self::in_bounds(x, y) {
            Some(self.cells[x as usize][y as usize])
        } else {
            None
        }
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.cells[x as usize][y as usize] = cell;
        true
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        self.cells.iter().all(|column| column[y].is_some())
    }

    /// Remove row `y` by shifting every row above it down by one.
    ///
    /// Row 0 keeps its contents: it is copied into row 1 but never refilled.
    pub fn clear_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT {
            return;
        }
        for column in self.cells.iter_mut() {
            column.copy_within(0..y, 1);
        }
    }

    /// Remove every full row and return the removed indices.
    ///
    /// Rows are scanned from 1 to the bottom; row 0 is never checked. Each full
    /// row compacts the rows above it as soon as it is found, so a run of full
    /// rows is removed one after another in ascending index order.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 1..BOARD_HEIGHT {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared.push(y);
            }
        }
        cleared
    }

    /// Check whether `piece`, moved by (dx, dy), would leave the board through
    /// the left, right or bottom border or overlap a filled cell.
    ///
    /// There is no top border: live cells above row 0 are treated as free.
    pub fn check_collision(&self, piece: &Tetromino, dx: i32, dy: i32) -> bool {
        let nx = piece.x + dx;
        let ny = piece.y + dy;
        piece.live_cells().any(|(i, j, _)| {
            let x = nx + i as i32;
            let y = ny + j as i32;
            x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 || self.is_occupied(x, y)
        })
    }

    /// Copy the live cells of `piece` into the board at its current position.
    ///
    /// Empty piece cells never overwrite the board. Cells outside the board are
    /// skipped.
    pub fn lock_piece(&mut self, piece: &Tetromino) {
        for (i, j, color) in piece.live_cells() {
            self.set(piece.x + i as i32, piece.y + j as i32, Some(color));
        }
    }

    /// Column-major view of the cells (`cells()[x][y]`)
    pub fn cells(&self) -> &[[Cell; BOARD_HEIGHT]; BOARD_WIDTH] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        fill_cells(&mut self.cells, None);
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    fn fill_row(board: &mut Board, y: i32, color: Color) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_fill_cells() {
        let mut grid = [[None; 4]; 4];
        fill_cells(&mut grid, Some(Color::Red));
        assert!(grid.iter().flatten().all(|c| *c == Some(Color::Red)));
        fill_cells(&mut grid, None);
        assert!(grid.iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_board_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert!(!board.set(BOARD_WIDTH as i32, 0, Some(Color::Cyan)));
        assert!(board.set(9, 21, Some(Color::Cyan)));
        assert_eq!(board.get(9, 21), Some(Some(Color::Cyan)));
        assert_eq!(board.cells()[9][21], Some(Color::Cyan));
    }

    #[test]
    fn test_row_zero_is_never_cleared() {
        let mut board = Board::new();
        fill_row(&mut board, 0, Color::Blue);
        let cleared = board.clear_full_rows();
        assert!(cleared.is_empty());
        assert!(board.is_row_full(0));
    }

    #[test]
    fn test_clear_row_keeps_row_zero() {
        let mut board = Board::new();
        board.set(4, 0, Some(Color::Green));
        fill_row(&mut board, 21, Color::Red);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[21]);
        // Row 0 is copied down but not emptied.
        assert_eq!(board.get(4, 0), Some(Some(Color::Green)));
        assert_eq!(board.get(4, 1), Some(Some(Color::Green)));
        assert!(!board.is_row_full(21));
    }

    #[test]
    fn test_check_collision_ignores_top_border() {
        let board = Board::new();
        let mut piece = Tetromino::from_kind(PieceKind::O);
        piece.x = 4;
        piece.y = -1;
        assert!(!board.check_collision(&piece, 0, 0));
        assert!(!board.check_collision(&piece, 0, -5));
    }
}
