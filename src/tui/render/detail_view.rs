use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::node::Node;
use crate::model::tree::{count_tasks, find_node};
use crate::util::unicode::{display_width, truncate_to_width};

use crate::tui::app::{App, Mode};

use super::preview;

/// Render the detail pane: the active node's metadata and content, the
/// content editor, or a selection summary.
pub fn render_detail_view(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.mode == Mode::Edit {
        render_editor(frame, app, area);
        return;
    }

    let theme = app.theme.clone();
    let dim = Style::default().fg(theme.dim);

    let (title, lines): (String, Vec<Line>) = match app.selection.len() {
        0 => (
            " details ".to_string(),
            vec![Line::from(Span::styled(
                "Nothing selected. Press Enter on a row",
                dim,
            ))],
        ),
        1 => {
            let id = app.selection.ids()[0].clone();
            match find_node(&app.tree, &id) {
                None => (" details ".to_string(), Vec::new()),
                Some(node) => node_detail(app, node),
            }
        }
        n => (
            " details ".to_string(),
            vec![Line::from(Span::styled(
                format!("{} items selected", n),
                dim,
            ))],
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title)
        .title_style(Style::default().fg(theme.text));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn node_detail(app: &App, node: &Node) -> (String, Vec<Line<'static>>) {
    let theme = &app.theme;
    let title = format!(" {} ", truncate_to_width(node.name(), 40));

    match node {
        Node::Folder { children, .. } => {
            let lines = vec![Line::from(Span::styled(
                format!(
                    "folder · {} children · {} tasks inside",
                    children.len(),
                    count_tasks(children)
                ),
                Style::default().fg(theme.dim),
            ))];
            (title, lines)
        }
        Node::Task {
            completed,
            priority,
            created_at,
            updated_at,
            content,
            ..
        } => {
            let mut meta_spans = vec![Span::styled(
                format!("priority {}", priority.label()),
                Style::default().fg(theme.priority_color(*priority)),
            )];
            if *completed {
                meta_spans.push(Span::styled("  ✓ done", Style::default().fg(theme.done)));
            }
            let mut lines = vec![
                Line::from(meta_spans),
                Line::from(Span::styled(
                    format!(
                        "created {}  updated {}",
                        created_at.format("%Y-%m-%d %H:%M"),
                        updated_at.format("%Y-%m-%d %H:%M")
                    ),
                    Style::default().fg(theme.dim),
                )),
                Line::default(),
            ];

            if app.preview {
                lines.extend(preview::markdown_lines(content, theme));
            } else {
                for raw in content.split('\n') {
                    lines.push(Line::from(Span::styled(
                        raw.to_string(),
                        Style::default().fg(theme.text),
                    )));
                }
            }
            (title, lines)
        }
    }
}

/// Render the multi-line content editor with a visible terminal cursor.
fn render_editor(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let name = app
        .active_task()
        .map(|task| task.name().to_string())
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .title(format!(" editing {} (Esc to finish) ", truncate_to_width(&name, 30)))
        .title_style(Style::default().fg(theme.text));
    let inner = block.inner(area);

    // Keep the cursor line in view
    let height = inner.height as usize;
    if height > 0 {
        if app.edit_line < app.edit_scroll {
            app.edit_scroll = app.edit_line;
        } else if app.edit_line >= app.edit_scroll + height {
            app.edit_scroll = app.edit_line + 1 - height;
        }
    }

    let text: Text = app
        .edit_lines
        .iter()
        .skip(app.edit_scroll)
        .take(height.max(1))
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(theme.text),
            ))
        })
        .collect::<Vec<_>>()
        .into();

    frame.render_widget(Paragraph::new(text).block(block), area);

    // Place the terminal cursor at the edit position
    if let Some(line) = app.edit_lines.get(app.edit_line) {
        let col = display_width(&line[..app.edit_col.min(line.len())]) as u16;
        let x = inner.x + col.min(inner.width.saturating_sub(1));
        let y = inner.y + (app.edit_line - app.edit_scroll) as u16;
        frame.set_cursor_position(Position::new(x, y));
    }
}
