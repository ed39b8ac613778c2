//! Game board representation, collision detection and line clearing

use crate::piece::Piece;
use ratatui::style::Color;

/// Board dimensions
pub const COLUMNS: usize = 12;
pub const ROWS: usize = 22;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    cells: [[Cell; COLUMNS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLUMNS]; ROWS],
        }
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= ROWS || col >= COLUMNS {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= ROWS || col >= COLUMNS {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    /// Rows top to bottom
    pub fn rows(&self) -> &[[Cell; COLUMNS]; ROWS] {
        &self.cells
    }

    /// Check whether a piece overlaps a wall, the floor or a filled cell.
    ///
    /// Cells above the top edge (negative rows) are never blocked by
    /// occupancy; there is no ceiling here.
    pub fn has_collision(&self, piece: &Piece) -> bool {
        piece.blocks().any(|(row, col)| {
            if col < 0 || col >= COLUMNS as i32 || row >= ROWS as i32 {
                return true;
            }
            row >= 0 && self.cells[row as usize][col as usize].is_filled()
        })
    }

    /// Write a piece's cells into the grid with its color.
    /// The caller must have checked `has_collision` first.
    pub fn commit(&mut self, piece: &Piece) {
        let color = piece.color();
        for (row, col) in piece.blocks() {
            self.set(row, col, Cell::Filled(color));
        }
    }

    /// Remove full rows, shift the rest down and return the number cleared
    pub fn clear_full_rows(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut write_row = ROWS;

        // Compact bottom-up so kept rows retain their relative order
        for read_row in (0..ROWS).rev() {
            if self.is_line_full(read_row) {
                lines_cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row] = self.cells[read_row];
                }
            }
        }

        // Fill the top with empty rows
        for row in 0..write_row {
            self.cells[row] = [Cell::Empty; COLUMNS];
        }

        lines_cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Shape;
    use crate::tetromino::TetrominoType;

    const RED: Cell = Cell::Filled(Color::Red);

    fn fill_row(board: &mut Board, row: i32, color: Color) {
        for col in 0..COLUMNS {
            board.set(row, col as i32, Cell::Filled(color));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, RED));
        assert_eq!(board.get(5, 5), Some(RED));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(ROWS as i32, 0), None);
        assert_eq!(board.get(0, COLUMNS as i32), None);
        assert!(!board.set(-1, 0, RED));
        assert!(board.is_empty());
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::I);
        assert!(!board.has_collision(&piece));

        piece.x = -1;
        assert!(board.has_collision(&piece));

        piece.x = (COLUMNS - 3) as i32;
        assert!(board.has_collision(&piece));

        piece.x = 0;
        piece.y = ROWS as i32;
        assert!(board.has_collision(&piece));

        piece.y = (ROWS - 1) as i32;
        assert!(!board.has_collision(&piece));
    }

    #[test]
    fn test_cells_above_top_do_not_collide() {
        let mut board = Board::new();
        // Bottom row filled; a wrapping index would find it
        fill_row(&mut board, (ROWS - 1) as i32, Color::Red);

        let mut piece = Piece::new(TetrominoType::T);
        piece.y = -1;
        assert!(!board.has_collision(&piece));

        piece.y = -5;
        assert!(!board.has_collision(&piece));
    }

    #[test]
    fn test_collision_with_filled_cell() {
        let mut board = Board::new();
        let piece = Piece::new(TetrominoType::O);
        board.set(1, piece.x + 1, RED);
        assert!(board.has_collision(&piece));
    }

    #[test]
    fn test_empty_shape_cells_ignored() {
        let mut board = Board::new();
        // T spawn: top-left corner is empty
        let piece = Piece::new(TetrominoType::T);
        board.set(0, piece.x, RED);
        assert!(!board.has_collision(&piece));
    }

    #[test]
    fn test_commit_writes_only_piece_cells() {
        let mut board = Board::new();
        board.set(10, 0, RED);
        let before = board.clone();

        let mut piece = Piece::new(TetrominoType::L);
        piece.y = 4;
        board.commit(&piece);

        let blocks: Vec<_> = piece.blocks().collect();
        for row in 0..ROWS as i32 {
            for col in 0..COLUMNS as i32 {
                if blocks.contains(&(row, col)) {
                    assert_eq!(board.get(row, col), Some(Cell::Filled(piece.color())));
                } else {
                    assert_eq!(board.get(row, col), before.get(row, col));
                }
            }
        }
    }

    #[test]
    fn test_clear_with_no_full_rows_is_noop() {
        let mut board = Board::new();
        board.set(21, 0, RED);
        board.set(20, 3, RED);
        let before = board.clone();

        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::new();
        fill_row(&mut board, 21, Color::Cyan);
        board.set(20, 0, RED);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared, 1);
        // The block from row 20 should now be on row 21
        assert_eq!(board.get(21, 0), Some(RED));
        assert!(board.get(20, 0).unwrap().is_empty());
    }

    #[test]
    fn test_clear_non_adjacent_rows_preserves_order() {
        let mut board = Board::new();
        board.set(15, 0, Cell::Filled(Color::Green));
        fill_row(&mut board, 17, Color::Cyan);
        board.set(18, 1, Cell::Filled(Color::Blue));
        fill_row(&mut board, 19, Color::Cyan);
        board.set(20, 2, Cell::Filled(Color::Yellow));

        assert_eq!(board.clear_full_rows(), 2);

        assert!(board.rows()[0].iter().all(Cell::is_empty));
        assert!(board.rows()[1].iter().all(Cell::is_empty));
        assert_eq!(board.get(17, 0), Some(Cell::Filled(Color::Green)));
        assert_eq!(board.get(19, 1), Some(Cell::Filled(Color::Blue)));
        assert_eq!(board.get(20, 2), Some(Cell::Filled(Color::Yellow)));
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::new();
        for row in 0..ROWS as i32 {
            fill_row(&mut board, row, Color::Magenta);
        }
        assert_eq!(board.clear_full_rows(), ROWS);
        assert!(board.is_empty());
    }

    #[test]
    fn test_commit_then_clear_completed_row() {
        let mut board = Board::new();
        for col in 0..COLUMNS as i32 {
            if col != 5 {
                board.set(21, col, RED);
            }
        }
        board.set(20, 0, Cell::Filled(Color::Green));

        // Vertical bar dropped into the gap
        let mut piece = Piece::from_shape(Shape::from_matrix(&[&[1]]), Color::Cyan);
        piece.x = 5;
        piece.y = 21;
        assert!(!board.has_collision(&piece));
        board.commit(&piece);

        assert_eq!(board.clear_full_rows(), 1);
        assert!(board.rows()[0].iter().all(Cell::is_empty));
        assert_eq!(board.get(21, 0), Some(Cell::Filled(Color::Green)));
        assert_eq!(board.get(21, 5), Some(Cell::Empty));
    }
}
