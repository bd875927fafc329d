use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::node_ops;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

use crate::tui::app::App;

use super::*;

// ---------------------------------------------------------------------------
// Rename prompt (single-line input in the status row)
// ---------------------------------------------------------------------------

/// Handle keys in RENAME mode.
pub(super) fn handle_rename(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.rename_target = None;
            app.mode = base_mode(app);
        }
        (_, KeyCode::Enter) => {
            if let Some(id) = app.rename_target.take() {
                let buffer = app.rename_buffer.clone();
                // Blank input is a silent no-op; the old name stands.
                if node_ops::rename(&mut app.tree, &id, &buffer) {
                    app.save();
                }
            }
            app.mode = base_mode(app);
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = prev_grapheme_boundary(&app.rename_buffer, app.rename_cursor) {
                app.rename_buffer.replace_range(prev..app.rename_cursor, "");
                app.rename_cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = next_grapheme_boundary(&app.rename_buffer, app.rename_cursor) {
                app.rename_buffer.replace_range(app.rename_cursor..next, "");
            }
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = prev_grapheme_boundary(&app.rename_buffer, app.rename_cursor) {
                app.rename_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = next_grapheme_boundary(&app.rename_buffer, app.rename_cursor) {
                app.rename_cursor = next;
            }
        }
        (_, KeyCode::Home) => app.rename_cursor = 0,
        (_, KeyCode::End) => app.rename_cursor = app.rename_buffer.len(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.rename_buffer.insert(app.rename_cursor, c);
            app.rename_cursor += c.len_utf8();
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Content editor (multi-line, in the detail pane)
// ---------------------------------------------------------------------------

/// Handle keys in EDIT mode. Every buffer change is written straight into
/// the active task and persisted, so leaving the editor never loses text.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.mode = base_mode(app);
        }
        (_, KeyCode::Up) => {
            if app.edit_line > 0 {
                app.edit_line -= 1;
                clamp_edit_col(app);
            }
        }
        (_, KeyCode::Down) => {
            if app.edit_line + 1 < app.edit_lines.len() {
                app.edit_line += 1;
                clamp_edit_col(app);
            }
        }
        (_, KeyCode::Left) => {
            let line = &app.edit_lines[app.edit_line];
            if let Some(prev) = prev_grapheme_boundary(line, app.edit_col) {
                app.edit_col = prev;
            } else if app.edit_line > 0 {
                app.edit_line -= 1;
                app.edit_col = app.edit_lines[app.edit_line].len();
            }
        }
        (_, KeyCode::Right) => {
            let line = &app.edit_lines[app.edit_line];
            if let Some(next) = next_grapheme_boundary(line, app.edit_col) {
                app.edit_col = next;
            } else if app.edit_line + 1 < app.edit_lines.len() {
                app.edit_line += 1;
                app.edit_col = 0;
            }
        }
        (_, KeyCode::Home) => app.edit_col = 0,
        (_, KeyCode::End) => app.edit_col = app.edit_lines[app.edit_line].len(),
        (_, KeyCode::Enter) => {
            let line = &mut app.edit_lines[app.edit_line];
            let rest = line.split_off(app.edit_col);
            app.edit_lines.insert(app.edit_line + 1, rest);
            app.edit_line += 1;
            app.edit_col = 0;
            apply_content_edit(app);
        }
        (_, KeyCode::Backspace) => {
            let line = &mut app.edit_lines[app.edit_line];
            if let Some(prev) = prev_grapheme_boundary(line, app.edit_col) {
                line.replace_range(prev..app.edit_col, "");
                app.edit_col = prev;
                apply_content_edit(app);
            } else if app.edit_line > 0 {
                let current = app.edit_lines.remove(app.edit_line);
                app.edit_line -= 1;
                let target = &mut app.edit_lines[app.edit_line];
                app.edit_col = target.len();
                target.push_str(&current);
                apply_content_edit(app);
            }
        }
        (_, KeyCode::Delete) => {
            let line_len = app.edit_lines[app.edit_line].len();
            if app.edit_col < line_len {
                let line = &mut app.edit_lines[app.edit_line];
                if let Some(next) = next_grapheme_boundary(line, app.edit_col) {
                    line.replace_range(app.edit_col..next, "");
                    apply_content_edit(app);
                }
            } else if app.edit_line + 1 < app.edit_lines.len() {
                let next_line = app.edit_lines.remove(app.edit_line + 1);
                app.edit_lines[app.edit_line].push_str(&next_line);
                apply_content_edit(app);
            }
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.edit_lines[app.edit_line].insert(app.edit_col, c);
            app.edit_col += c.len_utf8();
            apply_content_edit(app);
        }
        _ => {}
    }
}

fn clamp_edit_col(app: &mut App) {
    let line = &app.edit_lines[app.edit_line];
    let mut col = app.edit_col.min(line.len());
    while col > 0 && !line.is_char_boundary(col) {
        col -= 1;
    }
    app.edit_col = col;
}

/// The editor-change hook: write the buffer into the active task and
/// persist.
fn apply_content_edit(app: &mut App) {
    let Some(id) = app.selection.active().map(str::to_string) else {
        return;
    };
    let content = app.edit_lines.join("\n");
    if let Ok(true) = node_ops::set_content(&mut app.tree, &id, &content) {
        app.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::TreeStore;
    use crate::model::config::Config;
    use crate::model::node::Node;
    use crate::model::tree::find_node;
    use crate::ops::selection::Modifiers;
    use crate::tui::app::Mode;
    use crossterm::event::KeyEvent;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path());
        let mut app = App::new(store, Config::default()).unwrap();
        let order = app.flat_order();
        app.selection.click("1", Modifiers::NONE, &order);
        (app, dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn content(app: &App, id: &str) -> String {
        match find_node(&app.tree, id).unwrap() {
            Node::Task { content, .. } => content.clone(),
            Node::Folder { .. } => panic!("expected task"),
        }
    }

    #[test]
    fn typing_writes_through_to_the_task() {
        let (mut app, _dir) = test_app();
        app.edit_lines = vec![String::new()];
        app.edit_line = 0;
        app.edit_col = 0;
        app.mode = Mode::Edit;

        for c in "hi".chars() {
            handle_edit(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(content(&app, "1"), "hi");
    }

    #[test]
    fn enter_splits_line_and_backspace_joins() {
        let (mut app, _dir) = test_app();
        app.edit_lines = vec!["ab".to_string()];
        app.edit_line = 0;
        app.edit_col = 1;
        app.mode = Mode::Edit;

        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(app.edit_lines, vec!["a", "b"]);
        assert_eq!(content(&app, "1"), "a\nb");

        // Backspace at column 0 joins the lines back.
        handle_edit(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.edit_lines, vec!["ab"]);
        assert_eq!(app.edit_col, 1);
        assert_eq!(content(&app, "1"), "ab");
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let (mut app, _dir) = test_app();
        app.edit_lines = vec!["long line".to_string(), "x".to_string()];
        app.edit_line = 0;
        app.edit_col = 7;
        app.mode = Mode::Edit;

        handle_edit(&mut app, key(KeyCode::Down));
        assert_eq!(app.edit_line, 1);
        assert_eq!(app.edit_col, 1);
    }

    #[test]
    fn rename_commit_and_cancel() {
        let (mut app, _dir) = test_app();
        app.rename_target = Some("1".to_string());
        app.rename_buffer = "Renamed".to_string();
        app.rename_cursor = app.rename_buffer.len();
        app.mode = Mode::Rename;

        handle_rename(&mut app, key(KeyCode::Enter));
        assert_eq!(find_node(&app.tree, "1").unwrap().name(), "Renamed");

        // Esc leaves the name alone.
        app.rename_target = Some("1".to_string());
        app.rename_buffer = "Ignored".to_string();
        app.mode = Mode::Rename;
        handle_rename(&mut app, key(KeyCode::Esc));
        assert_eq!(find_node(&app.tree, "1").unwrap().name(), "Renamed");
    }

    #[test]
    fn rename_blank_keeps_old_name() {
        let (mut app, _dir) = test_app();
        app.rename_target = Some("1".to_string());
        app.rename_buffer = "   ".to_string();
        app.rename_cursor = 3;
        app.mode = Mode::Rename;

        handle_rename(&mut app, key(KeyCode::Enter));
        assert_eq!(find_node(&app.tree, "1").unwrap().name(), "Welcome Task");
    }
}
