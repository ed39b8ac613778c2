//! Line counting and the fall-speed schedule

use ratatui::style::Color;
use std::time::Duration;

/// Normal fall interval at the start of a game
pub const INITIAL_FALL_INTERVAL: Duration = Duration::from_millis(300);
/// Amount the interval shrinks at each 10-line milestone
pub const SPEED_STEP: Duration = Duration::from_millis(10);
/// Floor applied at the first milestone (10 lines)
pub const FIRST_FLOOR: Duration = Duration::from_millis(200);
/// Floor applied at every later milestone
pub const LATER_FLOOR: Duration = Duration::from_millis(100);
/// Lines per speed milestone
pub const LINES_PER_MILESTONE: u32 = 10;

/// Score tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Total lines cleared
    lines: u32,
    /// Current normal fall interval
    fall_interval: Duration,
    /// Milestones already applied to `fall_interval`
    milestones: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            lines: 0,
            fall_interval: INITIAL_FALL_INTERVAL,
            milestones: 0,
        }
    }

    /// Total lines cleared
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    /// Add cleared lines and apply any speed milestones crossed.
    /// Returns true if the fall interval changed.
    pub fn add_lines(&mut self, cleared: u32) -> bool {
        self.lines += cleared;
        let before = self.fall_interval;

        // Each multiple of 10 is applied exactly once, even if a single clear
        // jumps over it
        while self.milestones < self.lines / LINES_PER_MILESTONE {
            self.milestones += 1;
            let floor = if self.milestones == 1 {
                FIRST_FLOOR
            } else {
                LATER_FLOOR
            };
            self.fall_interval = self.fall_interval.saturating_sub(SPEED_STEP).max(floor);
        }

        self.fall_interval != before
    }

    /// Display color of the lines counter, one tier per 10 lines
    pub fn tier_color(&self) -> Color {
        match self.lines {
            0..=9 => Color::White,
            10..=19 => Color::Rgb(0, 255, 0),
            20..=29 => Color::Rgb(255, 165, 0),
            30..=39 => Color::Rgb(0, 0, 139),
            40..=49 => Color::Rgb(255, 0, 0),
            50..=59 => Color::Rgb(128, 0, 128),
            _ => Color::Rgb(255, 255, 0),
        }
    }
}
