//! Game core: board, pieces, gravity, line clears and hold.
//!
//! Nothing here touches the terminal, audio or the clock; the binary feeds in
//! elapsed time and player actions and draws from the read-only accessors.

pub mod board;
pub mod game;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod tetromino;
