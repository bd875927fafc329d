use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const KEYS: &[(&str, &str)] = &[
    ("j/k ↑/↓", "move cursor"),
    ("h/l ←/→", "collapse / expand folder"),
    ("Enter/Space", "select row"),
    ("v", "toggle row in selection (ctrl-click)"),
    ("V", "select range from anchor (shift-click)"),
    ("a", "select all"),
    ("Esc", "clear selection / cancel"),
    ("n / N", "new task / new folder"),
    ("r", "rename"),
    ("e", "edit task content"),
    ("x", "toggle complete (X reopens in select mode)"),
    ("1/2/3", "priority high / medium / low"),
    ("s", "sort (name / created / priority)"),
    ("d", "delete (with confirmation)"),
    ("p", "toggle markdown preview"),
    ("E", "export tasks-export.json"),
    ("q", "quit"),
];

/// Render the key-binding cheatsheet over the content.
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let width = 56.min(area.width);
    let height = (KEYS.len() as u16 + 4).min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let mut lines = vec![Line::default()];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<12}", key),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(action.to_string(), Style::default().fg(theme.text)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .title(" keys (? or Esc closes) ")
        .title_style(Style::default().fg(theme.text))
        .style(Style::default().bg(theme.background));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
