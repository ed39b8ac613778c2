//! Terminal UI rendering with ratatui

use crate::settings::Settings;
use blockfall::board::{Cell, COLUMNS, ROWS};
use blockfall::game::{Game, FAST_FALL_INTERVAL};
use blockfall::piece::Piece;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Side panel widths
const HOLD_WIDTH: u16 = 12;
const SIDE_WIDTH: u16 = 16;
/// Board: two characters per column plus borders
const BOARD_WIDTH: u16 = COLUMNS as u16 * 2 + 2;
/// Total size of the game area
const GAME_WIDTH: u16 = HOLD_WIDTH + BOARD_WIDTH + SIDE_WIDTH;
const GAME_HEIGHT: u16 = ROWS as u16 + 2;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let block_char = settings.visual.block_chars();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Create main layout: hold | board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(HOLD_WIDTH),
            Constraint::Length(BOARD_WIDTH),
            Constraint::Length(SIDE_WIDTH),
        ])
        .split(game_area);

    if settings.visual.show_hold {
        let hold_area = Rect {
            height: main_layout[0].height.min(6),
            ..main_layout[0]
        };
        // Dimmed while hold is spent for this drop
        let border = if game.can_hold() { Color::Gray } else { Color::DarkGray };
        render_piece_box(frame, hold_area, " HOLD ", game.held_piece(), border, block_char);
    }

    render_board(frame, main_layout[1], game, block_char);

    // Right side: next piece and stats
    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next piece
            Constraint::Min(5),    // Stats
        ])
        .split(main_layout[2]);

    if settings.visual.show_next {
        render_piece_box(
            frame,
            right_layout[0],
            " NEXT ",
            Some(game.next_piece()),
            Color::Gray,
            block_char,
        );
    }
    render_stats(frame, right_layout[1], game);

    if game.is_game_over() {
        render_overlay(frame, area, "GAME OVER", "SPACE restart  Q quit");
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a titled box holding a single piece preview (hold and next)
fn render_piece_box(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    piece: Option<&Piece>,
    border: Color,
    block_char: &str,
) {
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(piece) = piece {
        render_mini_piece(frame, inner, piece, block_char);
    }
}

/// Render a piece's shape, centered in the given area
fn render_mini_piece(frame: &mut Frame, area: Rect, piece: &Piece, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let shape = piece.shape();
    let style = Style::default().fg(piece.color());

    let lines: Vec<Line> = (0..shape.height())
        .map(|row| {
            let spans: Vec<Span> = (0..shape.width())
                .map(|col| {
                    if shape.is_filled(row, col) {
                        Span::styled(block_char, style)
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the game board with the active piece on top
fn render_board(frame: &mut Frame, area: Rect, game: &Game, block_char: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece = game.active_piece();
    let piece_blocks: Vec<(i32, i32)> = piece.blocks().collect();

    let mut lines: Vec<Line> = Vec::with_capacity(ROWS);
    for (row, cells) in game.board().rows().iter().enumerate() {
        let spans: Vec<Span> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                if piece_blocks.contains(&(row as i32, col as i32)) {
                    Span::styled(block_char, Style::default().fg(piece.color()))
                } else {
                    match cell {
                        Cell::Filled(color) => Span::styled(block_char, Style::default().fg(*color)),
                        Cell::Empty => Span::raw(EMPTY),
                    }
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (interval, speed_color) = if game.is_soft_dropping() {
        (FAST_FALL_INTERVAL, Color::Yellow)
    } else {
        (game.fall_interval(), Color::Cyan)
    };

    let lines = vec![
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.lines_cleared()),
            Style::default().fg(game.score().tier_color()).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("SPEED", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{} ms", interval.as_millis()),
            Style::default().fg(speed_color),
        )),
    ];

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render an overlay (for game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 26u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
