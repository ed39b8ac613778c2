//! Tetromino catalog
//!
//! The 7 fixed piece templates, each a spawn-orientation bit matrix plus a
//! color. Rotation happens on the matrix itself (see `piece.rs`), so there is
//! no per-rotation table here.

use rand::Rng;
use ratatui::style::Color;

/// The 7 tetromino types, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Light blue - long bar
    T, // Purple
    O, // Yellow - square
    S, // Green
    Z, // Red
    L, // Orange
    J, // Dark blue
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Rgb(173, 216, 230),
            TetrominoType::T => Color::Rgb(128, 0, 128),
            TetrominoType::O => Color::Rgb(255, 255, 0),
            TetrominoType::S => Color::Rgb(0, 255, 0),
            TetrominoType::Z => Color::Rgb(255, 0, 0),
            TetrominoType::L => Color::Rgb(255, 165, 0),
            TetrominoType::J => Color::Rgb(0, 0, 139),
        }
    }

    /// Get all tetromino types in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::T,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::L,
            TetrominoType::J,
        ]
    }

    /// Spawn-orientation matrix, rows top to bottom
    pub fn matrix(&self) -> &'static [&'static [u8]] {
        match self {
            TetrominoType::I => &[&[1, 1, 1, 1]],
            TetrominoType::T => &[&[0, 1, 0], &[1, 1, 1]],
            TetrominoType::O => &[&[1, 1], &[1, 1]],
            TetrominoType::S => &[&[0, 1, 1], &[1, 1, 0]],
            TetrominoType::Z => &[&[1, 1, 0], &[0, 1, 1]],
            TetrominoType::L => &[&[1, 0, 0], &[1, 1, 1]],
            TetrominoType::J => &[&[0, 0, 1], &[1, 1, 1]],
        }
    }

    /// Pick one type uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> TetrominoType {
        let all = Self::all();
        all[rng.gen_range(0..all.len())]
    }

    /// Short name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            TetrominoType::I => "I",
            TetrominoType::T => "T",
            TetrominoType::O => "O",
            TetrominoType::S => "S",
            TetrominoType::Z => "Z",
            TetrominoType::L => "L",
            TetrominoType::J => "J",
        }
    }
}
