//! Active falling piece: a shape matrix with a color and a grid position

use crate::board::COLUMNS;
use crate::tetromino::TetrominoType;
use ratatui::style::Color;

/// Row-major bit matrix, first index is row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    pub fn from_matrix(matrix: &[&[u8]]) -> Self {
        Self {
            rows: matrix
                .iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate over the (row, col) offsets of filled cells
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(j, _)| (i, j))
        })
    }

    /// Rotate 90° clockwise: transpose of the row-reversed matrix
    pub fn rotated_cw(&self) -> Self {
        let height = self.height();
        let width = self.width();
        let rows = (0..width)
            .map(|j| (0..height).map(|i| self.rows[height - 1 - i][j]).collect())
            .collect();
        Self { rows }
    }
}

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Catalog entry this piece was drawn from, if any
    kind: Option<TetrominoType>,
    shape: Shape,
    color: Color,
    /// Grid column of the shape's top-left corner
    pub x: i32,
    /// Grid row of the shape's top-left corner, row 0 is the top
    pub y: i32,
}

impl Piece {
    /// Create a catalog piece at spawn position
    pub fn new(kind: TetrominoType) -> Self {
        let mut piece = Self::from_shape(Shape::from_matrix(kind.matrix()), kind.color());
        piece.kind = Some(kind);
        piece
    }

    /// Create a piece from an arbitrary shape, centered horizontally on row 0
    pub fn from_shape(shape: Shape, color: Color) -> Self {
        let x = (COLUMNS / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            kind: None,
            shape,
            color,
            x,
            y: 0,
        }
    }

    pub fn kind(&self) -> Option<TetrominoType> {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> usize {
        self.shape.width()
    }

    pub fn height(&self) -> usize {
        self.shape.height()
    }

    /// Shift by (dx, dy) without validation
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Rotate clockwise in place.
    ///
    /// There is no inverse; a rejected rotation is undone by calling this
    /// three more times.
    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated_cw();
    }

    /// Absolute (row, col) of every filled cell
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(|(i, j)| (self.y + i as i32, self.x + j as i32))
    }
}
