//! Keyboard input mapping
//!
//! Soft drop is a held key, so it needs a release. Many terminals never send
//! key release events; there a held Down is considered released once its
//! auto-repeat stops arriving.

use blockfall::game::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Time after which a held key with no repeat is considered released.
/// Must exceed the usual terminal auto-repeat delay (660 ms on X11).
const KEY_TIMEOUT: Duration = Duration::from_millis(700);

/// Input handler that turns key events into game actions
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Last time a Down press or repeat was seen, while soft drop is on
    down_seen: Option<Instant>,
    /// Set once the terminal has delivered a real release event
    has_release_events: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or repeat
    pub fn key_down(&mut self, key: KeyEvent) -> Vec<Action> {
        self.key_down_at(key, Instant::now())
    }

    fn key_down_at(&mut self, key: KeyEvent, now: Instant) -> Vec<Action> {
        // Handle Ctrl+C for quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }

        match normalize_key(key.code) {
            KeyCode::Left => vec![Action::MoveLeft],
            KeyCode::Right => vec![Action::MoveRight],
            KeyCode::Up => vec![Action::Rotate],
            KeyCode::Down => {
                let was_held = self.down_seen.replace(now).is_some();
                if was_held {
                    Vec::new()
                } else {
                    vec![Action::SoftDropOn]
                }
            }
            KeyCode::Char('c') => vec![Action::Hold],
            KeyCode::Char(' ') => vec![Action::Restart],
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            _ => Vec::new(),
        }
    }

    /// Handle a key release event (only some terminals send these)
    pub fn key_up(&mut self, key: KeyEvent) -> Vec<Action> {
        self.has_release_events = true;
        if normalize_key(key.code) == KeyCode::Down && self.down_seen.take().is_some() {
            vec![Action::SoftDropOff]
        } else {
            Vec::new()
        }
    }

    /// Release keys whose repeats stopped (call every frame)
    pub fn update(&mut self) -> Vec<Action> {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> Vec<Action> {
        if self.has_release_events {
            return Vec::new();
        }

        match self.down_seen {
            Some(last_seen) if now.duration_since(last_seen) > KEY_TIMEOUT => {
                self.down_seen = None;
                vec![Action::SoftDropOff]
            }
            _ => Vec::new(),
        }
    }

    /// Forget held keys (after a restart)
    pub fn clear(&mut self) {
        self.down_seen = None;
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
