use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::node::Priority;
use crate::ops::node_ops;

use crate::tui::app::App;

use super::*;

/// Handle keys in SELECT mode (a multi-selection is live).
pub(super) fn handle_select(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit: q or Ctrl+Q
        (m, KeyCode::Char('q')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Esc drops the selection
        (_, KeyCode::Esc) => clear_selection(app),

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => move_cursor(app, -1),
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => move_cursor(app, 1),
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => jump_to_top(app),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => jump_to_bottom(app),

        // Selection editing
        (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char(' ')) => plain_select(app),
        (KeyModifiers::NONE, KeyCode::Char('v')) => toggle_select(app),
        (KeyModifiers::SHIFT, KeyCode::Char('V')) => range_select(app),
        (KeyModifiers::NONE, KeyCode::Char('a')) => select_all(app),

        // Bulk state changes over the selection
        (KeyModifiers::NONE, KeyCode::Char('x')) => bulk_set_completed(app, true),
        (KeyModifiers::SHIFT, KeyCode::Char('X')) => bulk_set_completed(app, false),
        (KeyModifiers::NONE, KeyCode::Char('1')) => bulk_set_priority(app, Priority::High),
        (KeyModifiers::NONE, KeyCode::Char('2')) => bulk_set_priority(app, Priority::Medium),
        (KeyModifiers::NONE, KeyCode::Char('3')) => bulk_set_priority(app, Priority::Low),

        // Delete the first selected node (subtree included)
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            if let Some(id) = app.selection.ids().first().cloned() {
                begin_confirm_delete(app, &id);
            }
        }

        // Sort prompt
        (KeyModifiers::NONE, KeyCode::Char('s')) => begin_sort(app),

        // Edit requires a single selection; begin_edit reports otherwise
        (KeyModifiers::NONE, KeyCode::Char('e')) => begin_edit(app),

        // Preview toggle
        (KeyModifiers::NONE, KeyCode::Char('p')) => {
            app.preview = !app.preview;
        }

        // Export
        (KeyModifiers::SHIFT, KeyCode::Char('E')) => do_export(app),

        // Help overlay
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        _ => {}
    }
}

/// Apply a completed flag to every selected task. Folders in the selection
/// are skipped, not errors.
pub(super) fn bulk_set_completed(app: &mut App, done: bool) {
    let selected: Vec<String> = app.selection.ids().to_vec();
    let mut changed = 0;
    for id in &selected {
        if let Ok(true) = node_ops::set_completed(&mut app.tree, id, done) {
            changed += 1;
        }
    }
    if changed > 0 {
        app.save();
        let verb = if done { "Completed" } else { "Reopened" };
        app.set_status(format!("{} {} tasks", verb, changed));
    }
}

/// Apply a priority to every selected task, skipping folders.
pub(super) fn bulk_set_priority(app: &mut App, priority: Priority) {
    let selected: Vec<String> = app.selection.ids().to_vec();
    let mut changed = 0;
    for id in &selected {
        if let Ok(true) = node_ops::set_priority(&mut app.tree, id, priority) {
            changed += 1;
        }
    }
    if changed > 0 {
        app.save();
        app.set_status(format!("Set {} tasks to {}", changed, priority.label()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::TreeStore;
    use crate::model::config::Config;
    use crate::model::node::Node;
    use crate::model::tree::find_node;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path());
        let app = App::new(store, Config::default()).unwrap();
        (app, dir)
    }

    fn assert_completed(app: &App, id: &str, want: bool) {
        match find_node(&app.tree, id).unwrap() {
            Node::Task { completed, .. } => assert_eq!(*completed, want),
            Node::Folder { .. } => panic!("expected task"),
        }
    }

    #[test]
    fn bulk_complete_skips_folders() {
        let (mut app, _dir) = test_app();
        let order = app.flat_order();
        app.selection.select_all(&order);

        bulk_set_completed(&mut app, true);
        assert_completed(&app, "1", true);
        assert_completed(&app, "3", true);
        assert_completed(&app, "4", true);
        // The folder survived untouched.
        assert!(find_node(&app.tree, "2").unwrap().is_folder());
    }

    #[test]
    fn bulk_priority_applies_to_selected_tasks_only() {
        let (mut app, _dir) = test_app();
        let order = app.flat_order();
        app.selection.click("3", crate::ops::selection::Modifiers::NONE, &order);
        app.selection.click("4", crate::ops::selection::Modifiers::CTRL, &order);

        bulk_set_priority(&mut app, Priority::Low);
        for id in ["3", "4"] {
            match find_node(&app.tree, id).unwrap() {
                Node::Task { priority, .. } => assert_eq!(*priority, Priority::Low),
                Node::Folder { .. } => panic!("expected task"),
            }
        }
        // Unselected task keeps its priority.
        match find_node(&app.tree, "1").unwrap() {
            Node::Task { priority, .. } => assert_eq!(*priority, Priority::Medium),
            Node::Folder { .. } => panic!("expected task"),
        }
    }
}
