use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::tree::find_node;
use crate::util::unicode::display_width;

use crate::tui::app::{App, Mode};

/// Render the bottom status row: prompt or status on the left, task count
/// on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let status_style = Style::default().fg(theme.status);
    let prompt_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = Vec::new();

    match app.mode {
        Mode::Rename => {
            spans.push(Span::styled("rename: ", prompt_style));
            spans.push(Span::styled(
                app.rename_buffer.clone(),
                Style::default().fg(theme.text),
            ));
            // Visible cursor inside the prompt
            let x = area.x
                + display_width("rename: ") as u16
                + display_width(&app.rename_buffer[..app.rename_cursor]) as u16;
            frame.set_cursor_position(ratatui::layout::Position::new(x, area.y));
        }
        Mode::Confirm => {
            let name = app
                .confirm_delete
                .as_deref()
                .and_then(|id| find_node(&app.tree, id))
                .map(|node| node.name().to_string())
                .unwrap_or_default();
            spans.push(Span::styled(
                format!("delete \"{}\"? y/n ", name),
                Style::default().fg(theme.high),
            ));
        }
        Mode::Sort => {
            spans.push(Span::styled(
                "sort by: [n]ame  [c]reated  [p]riority  Esc cancels ",
                prompt_style,
            ));
        }
        Mode::Edit => {
            spans.push(Span::styled("-- EDIT --  Esc to finish", status_style));
        }
        Mode::Select | Mode::Navigate => {
            if app.mode == Mode::Select {
                spans.push(Span::styled(
                    format!("-- SELECT ({}) --  ", app.selection.len()),
                    Style::default().fg(theme.highlight),
                ));
            }
            let message = app
                .status
                .as_ref()
                .map(|s| s.text.clone())
                .unwrap_or_else(|| "Ready".to_string());
            spans.push(Span::styled(message, status_style));
        }
    }

    // Right-aligned task count
    let left_width: usize = spans.iter().map(|s| display_width(s.content.as_ref())).sum();
    let count_text = format!("{} tasks · ? for help", app.task_count());
    let pad = (area.width as usize)
        .saturating_sub(left_width)
        .saturating_sub(display_width(&count_text));
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(count_text, status_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
