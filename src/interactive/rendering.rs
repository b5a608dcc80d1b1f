//! TUI rendering with ratatui

use super::app::{App, GRID_ROWS, InputMode, MessageStyle, SessionPhase};
use crate::core::{Mark, WORD_LEN};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                 // Header
            Constraint::Length(GRID_ROWS as u16 + 2), // Grid + borders
            Constraint::Min(4),                    // Messages
            Constraint::Length(3),                 // Key help
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(30)])
        .split(chunks[1]);

    render_grid(f, app, main[0]);
    render_suggestions(f, app, main[1]);
    render_messages(f, app, chunks[2]);
    render_help(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let (phase_text, phase_color) = match app.phase {
        SessionPhase::InProgress => (
            format!("{} candidates", app.candidate_count()),
            Color::Cyan,
        ),
        SessionPhase::Solved => (
            format!("SOLVED: {}", app.solution().unwrap_or_default()),
            Color::Green,
        ),
        SessionPhase::Contradiction => ("CONTRADICTION".to_string(), Color::Red),
        SessionPhase::Exhausted => ("OUT OF TURNS".to_string(), Color::Yellow),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "WORDLE ADVISOR",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  —  "),
        Span::styled(
            phase_text,
            Style::default()
                .fg(phase_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(header, area);
}

fn mark_style(mark: Mark) -> Style {
    match mark {
        Mark::Exact => Style::default().bg(Color::Green).fg(Color::Black),
        Mark::Present => Style::default().bg(Color::Yellow).fg(Color::Black),
        Mark::Absent => Style::default().bg(Color::DarkGray).fg(Color::White),
    }
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::with_capacity(GRID_ROWS);

    for (row_idx, row) in app.grid.iter().enumerate() {
        let mut spans = Vec::with_capacity(WORD_LEN * 2);
        let is_active = row_idx == app.turn && app.phase == SessionPhase::InProgress;

        for (col_idx, cell) in row.iter().enumerate() {
            let text = cell
                .letter
                .map_or("   ".to_string(), |c| format!(" {} ", c.to_ascii_uppercase()));

            let style = if cell.letter.is_none() {
                Style::default().fg(Color::DarkGray).bg(Color::Black)
            } else if is_active && app.mode == InputMode::Typing {
                // Typed but not yet marked.
                Style::default().fg(Color::White).bg(Color::Black)
            } else {
                mark_style(cell.mark)
            };

            let style = if is_active && app.mode == InputMode::Marking && col_idx == app.cursor {
                style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                style
            };

            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let grid = Paragraph::new(lines).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(grid, area);
}

fn render_suggestions(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.ranking_in_flight {
        " Suggestions (computing…) "
    } else {
        " Suggestions "
    };

    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, row)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<7}", row.word.text().to_uppercase()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:>8.4} bits", row.entropy),
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .messages
        .iter()
        .map(|msg| {
            let color = match msg.style {
                MessageStyle::Info => Color::Gray,
                MessageStyle::Success => Color::Green,
                MessageStyle::Error => Color::Red,
            };
            Line::from(Span::styled(&msg.text, Style::default().fg(color)))
        })
        .collect();

    let messages = Paragraph::new(lines).block(
        Block::default()
            .title(" Messages ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(messages, area);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let help = match (app.phase, app.mode) {
        (SessionPhase::InProgress, InputMode::Typing) => {
            "type guess · Enter confirm · Esc clear · Ctrl-U undo · Ctrl-N new · Ctrl-C quit"
        }
        (SessionPhase::InProgress, InputMode::Marking) => {
            "←/→ move · space cycle · 0/1/2 set · Enter commit · Esc back"
        }
        _ => "n new session · u undo · q quit",
    };

    let bar = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(bar, area);
}
