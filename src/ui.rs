//! Terminal UI rendering with ratatui

use crate::board::Cell;
use crate::game::{Game, GameState, LockEvent};
use crate::settings::Settings;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Width of the score panel beside the board
const PANEL_WIDTH: u16 = 16;

/// Render the title screen
pub fn render_title(frame: &mut Frame, settings: &Settings) {
    let area = center_rect(frame.area(), 44, 14);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::raw(""),
        Line::styled("B L O C K F A L L", Style::default().fg(Color::Cyan).bold()),
        Line::raw(""),
        Line::styled(
            format!("Press {} to start", key_names(&settings.keys.start)),
            Style::default().fg(Color::Yellow),
        ),
        Line::raw(""),
        Line::styled(
            format!(
                "Move {} {}  Drop {}",
                key_names(&settings.keys.move_left),
                key_names(&settings.keys.move_right),
                key_names(&settings.keys.soft_drop)
            ),
            Style::default().fg(Color::Gray),
        ),
        Line::styled(
            format!(
                "Rotate {}  Hard drop {}",
                key_names(&settings.keys.rotate),
                key_names(&settings.keys.hard_drop)
            ),
            Style::default().fg(Color::Gray),
        ),
        Line::styled(
            format!(
                "Pause {}  Quit {}",
                key_names(&settings.keys.pause),
                key_names(&settings.keys.quit)
            ),
            Style::default().fg(Color::Gray),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render a game in progress, with pause and game-over overlays
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let config = game.config();

    // Two terminal columns per cell plus borders
    let board_width = config.columns as u16 * 2 + 2;
    let board_height = config.rows as u16 + 2;
    let game_area = center_rect(area, board_width + PANEL_WIDTH, board_height);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(PANEL_WIDTH),
        ])
        .split(game_area);

    render_board(frame, layout[0], game, settings);
    render_stats(frame, layout[1], game);

    match game.state {
        GameState::Paused => {
            let subtitle = format!("Press {} to resume", key_names(&settings.keys.pause));
            render_overlay(frame, area, "PAUSED", &subtitle);
        }
        GameState::GameOver => {
            let subtitle = format!(
                "Score {} - {}",
                game.score.points,
                key_names(&settings.keys.start)
            );
            render_overlay(frame, area, "GAME OVER", &subtitle);
        }
        GameState::Playing => {}
    }
}

fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece = game.current_piece.as_ref();
    let piece_cells = piece.map(|p| p.cells()).unwrap_or_default();
    let ghost_cells: Vec<(i32, i32)> = match piece {
        Some(p) if settings.visual.show_ghost => {
            let drop = p.ghost_row(&game.board) - p.row();
            piece_cells.iter().map(|&(c, r)| (c, r + drop)).collect()
        }
        _ => Vec::new(),
    };

    let lines: Vec<Line> = game
        .board
        .rows_iter()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let pos = (col as i32, row as i32);
                    if let (Some(p), true) = (piece, piece_cells.contains(&pos)) {
                        Span::styled(block_char, Style::default().fg(p.color()))
                    } else if let Cell::Filled(color) = cell {
                        Span::styled(block_char, Style::default().fg(*color))
                    } else if let (Some(p), true) = (piece, ghost_cells.contains(&pos)) {
                        Span::styled(ghost_char, Style::default().fg(p.color()).dim())
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stat = |label: &'static str, value: String, color: Color| {
        [
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
            Line::from(Span::styled(value, Style::default().fg(color).bold())),
            Line::raw(""),
        ]
    };

    let mut lines = Vec::new();
    lines.extend(stat("SCORE", game.score.points.to_string(), Color::Yellow));
    lines.extend(stat("ROWS", game.score.rows.to_string(), Color::Green));
    lines.extend(stat("PIECES", game.score.pieces.to_string(), Color::Cyan));

    if let Some(LockEvent::Settled { rows_cleared, points }) = game.last_lock {
        if rows_cleared > 0 {
            lines.push(Line::styled(
                format!("{} rows +{}", rows_cleared, points),
                Style::default().fg(Color::Magenta).bold(),
            ));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 26, 5);

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

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

/// Display form of a binding list, e.g. "Up/x"
fn key_names(keys: &[String]) -> String {
    keys.join("/")
}

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
