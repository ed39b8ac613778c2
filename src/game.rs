//! Core game state and logic

use crate::board::Board;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use std::mem;
use std::time::Duration;

/// Fall interval while soft drop is held
pub const FAST_FALL_INTERVAL: Duration = Duration::from_millis(50);

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDropOn,
    SoftDropOff,
    Rotate,
    Hold,
    Restart,
    Quit,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board
    board: Board,
    /// Current falling piece
    current_piece: Piece,
    /// Preview piece, promoted on the next spawn
    next_piece: Piece,
    /// Held piece (can swap once per drop)
    hold_piece: Option<Piece>,
    /// Whether hold may be used before the next commit
    can_hold: bool,
    /// Soft drop selects the fast fall interval
    soft_drop: bool,
    /// Time accumulated since the last gravity step
    fall_time: Duration,
    /// Lines and fall speed
    score: Score,
    /// Current game state
    state: GameState,
    randomizer: Randomizer,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a new game with a random seed
    pub fn new() -> Self {
        Self::with_randomizer(Randomizer::new())
    }

    /// Create a new game with a fixed seed (reproducible piece order)
    pub fn with_seed(seed: u64) -> Self {
        Self::with_randomizer(Randomizer::with_seed(seed))
    }

    pub fn with_randomizer(mut randomizer: Randomizer) -> Self {
        let current_piece = randomizer.next_piece();
        let next_piece = randomizer.next_piece();

        Self {
            board: Board::new(),
            current_piece,
            next_piece,
            hold_piece: None,
            can_hold: true,
            soft_drop: false,
            fall_time: Duration::ZERO,
            score: Score::new(),
            state: GameState::Playing,
            randomizer,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn active_piece(&self) -> &Piece {
        &self.current_piece
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    pub fn held_piece(&self) -> Option<&Piece> {
        self.hold_piece.as_ref()
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    pub fn lines_cleared(&self) -> u32 {
        self.score.lines()
    }

    /// Normal (non soft drop) fall interval
    pub fn fall_interval(&self) -> Duration {
        self.score.fall_interval()
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match self.state {
            GameState::GameOver => {
                if action == Action::Restart {
                    self.restart();
                }
            }
            GameState::Playing => match action {
                Action::MoveLeft => self.shift(-1),
                Action::MoveRight => self.shift(1),
                Action::SoftDropOn => self.soft_drop = true,
                Action::SoftDropOff => self.soft_drop = false,
                Action::Rotate => self.rotate(),
                Action::Hold => self.hold(),
                // Quit is handled by the caller; restart only after game over
                Action::Restart | Action::Quit => {}
            },
        }
    }

    /// Advance gravity by the elapsed real time
    pub fn tick(&mut self, elapsed: Duration) {
        if self.state != GameState::Playing {
            return;
        }

        self.fall_time += elapsed;
        let interval = if self.soft_drop {
            FAST_FALL_INTERVAL
        } else {
            self.score.fall_interval()
        };

        if self.fall_time > interval {
            self.current_piece.translate(0, 1);
            if self.board.has_collision(&self.current_piece) {
                self.current_piece.translate(0, -1);
                self.lock_piece();
            }
            self.fall_time = Duration::ZERO;
        }
    }

    fn shift(&mut self, dx: i32) {
        self.current_piece.translate(dx, 0);
        if self.board.has_collision(&self.current_piece) {
            self.current_piece.translate(-dx, 0);
        }
    }

    fn rotate(&mut self) {
        self.current_piece.rotate();
        if self.board.has_collision(&self.current_piece) {
            // Three more quarter turns bring it back to where it started
            for _ in 0..3 {
                self.current_piece.rotate();
            }
        }
    }

    fn hold(&mut self) {
        if !self.can_hold {
            return;
        }

        let incoming = match self.hold_piece.take() {
            Some(held) => held,
            None => self.take_next(),
        };
        let outgoing = mem::replace(&mut self.current_piece, incoming);
        self.current_piece.y = 0;
        self.hold_piece = Some(outgoing);
        self.can_hold = false;
        tracing::debug!(
            held = self.hold_piece.as_ref().and_then(Piece::kind).map(|kind| kind.name()),
            active = self.current_piece.kind().map(|kind| kind.name()),
            "hold"
        );

        // A swapped-in piece can land on top of the stack
        if self.board.has_collision(&self.current_piece) {
            self.game_over();
        }
    }

    /// Commit the current piece, clear lines and spawn the next one
    fn lock_piece(&mut self) {
        self.board.commit(&self.current_piece);
        tracing::debug!(
            kind = self.current_piece.kind().map(|kind| kind.name()),
            x = self.current_piece.x,
            y = self.current_piece.y,
            "piece committed"
        );

        let cleared = self.board.clear_full_rows() as u32;
        if cleared > 0 {
            let sped_up = self.score.add_lines(cleared);
            tracing::info!(cleared, total = self.score.lines(), "lines cleared");
            if sped_up {
                tracing::info!(
                    interval_ms = self.score.fall_interval().as_millis() as u64,
                    "fall speed increased"
                );
            }
        }

        self.current_piece = self.take_next();
        self.current_piece.y = 0;
        self.can_hold = true;

        if self.board.has_collision(&self.current_piece) {
            self.game_over();
        }
    }

    /// Take the preview piece and draw a replacement
    fn take_next(&mut self) -> Piece {
        let replacement = self.randomizer.next_piece();
        mem::replace(&mut self.next_piece, replacement)
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        tracing::info!(lines = self.score.lines(), "game over");
    }

    /// Reset everything except the randomizer stream
    fn restart(&mut self) {
        let randomizer = mem::take(&mut self.randomizer);
        *self = Self::with_randomizer(randomizer);
        tracing::info!("game restarted");
    }
}
