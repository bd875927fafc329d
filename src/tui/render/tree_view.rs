use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::node::Node;
use crate::model::tree::find_node;
use crate::util::unicode::truncate_to_width;

use crate::tui::app::App;

/// Render the expandable tree list with cursor and selection highlighting.
pub fn render_tree_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.visible_rows();
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;

    // Keep the cursor row visible
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if inner_height > 0 && app.cursor >= app.scroll_offset + inner_height {
        app.scroll_offset = app.cursor + 1 - inner_height;
    }

    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();

    for (idx, row) in rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(inner_height.max(1))
    {
        let Some(node) = find_node(&app.tree, &row.id) else {
            continue;
        };

        let is_cursor = idx == app.cursor;
        let is_selected = app.selection.contains(&row.id);

        let row_bg = if is_selected {
            Some(theme.selection_bg)
        } else {
            None
        };
        let base_fg = if is_selected {
            theme.selection_fg
        } else {
            theme.text
        };
        let apply = move |mut style: Style| {
            if let Some(bg) = row_bg {
                style = style.bg(bg);
            }
            if is_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            style
        };

        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled("  ".repeat(row.depth), apply(Style::default())));

        match node {
            Node::Folder { name, .. } => {
                let arrow = if !row.has_children {
                    "▹ "
                } else if row.expanded {
                    "▾ "
                } else {
                    "▸ "
                };
                spans.push(Span::styled(
                    arrow,
                    apply(Style::default().fg(theme.dim)),
                ));
                let used = row.depth * 2 + 2;
                spans.push(Span::styled(
                    truncate_to_width(name, inner_width.saturating_sub(used)),
                    apply(
                        Style::default()
                            .fg(if is_selected { theme.selection_fg } else { theme.folder })
                            .add_modifier(Modifier::BOLD),
                    ),
                ));
            }
            Node::Task {
                name,
                completed,
                priority,
                ..
            } => {
                let checkbox = if *completed { "[x] " } else { "[ ] " };
                let checkbox_style = if *completed {
                    Style::default().fg(theme.done)
                } else {
                    Style::default().fg(theme.dim)
                };
                spans.push(Span::styled(checkbox, apply(checkbox_style)));
                spans.push(Span::styled(
                    "● ",
                    apply(Style::default().fg(theme.priority_color(*priority))),
                ));
                let mut name_style = Style::default().fg(base_fg);
                if *completed {
                    name_style = name_style
                        .fg(theme.dim)
                        .add_modifier(Modifier::CROSSED_OUT);
                }
                let used = row.depth * 2 + 6;
                spans.push(Span::styled(
                    truncate_to_width(name, inner_width.saturating_sub(used)),
                    apply(name_style),
                ));
            }
        }

        lines.push(Line::from(spans));
    }

    let title = format!(" tasks ({}) ", app.task_count());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title)
        .title_style(Style::default().fg(theme.text));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
