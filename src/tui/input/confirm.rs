use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::node_ops;

use crate::tui::app::App;

use super::*;

/// Handle keys in CONFIRM mode (delete confirmation).
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(id) = app.confirm_delete.take() {
                let name = crate::model::tree::find_node(&app.tree, &id)
                    .map(|n| n.name().to_string())
                    .unwrap_or_else(|| id.clone());
                if node_ops::delete(&mut app.tree, &id) {
                    // Deleting a selected node drops the whole selection,
                    // not just its entry.
                    if app.selection.contains(&id) {
                        app.selection.clear();
                    }
                    app.after_tree_change();
                    app.set_status(format!("Deleted \"{}\"", name));
                }
            }
            app.mode = base_mode(app);
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.confirm_delete = None;
            app.mode = base_mode(app);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::TreeStore;
    use crate::model::config::Config;
    use crate::model::tree::find_node;
    use crate::ops::selection::Modifiers;
    use crate::tui::app::Mode;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path());
        let app = App::new(store, Config::default()).unwrap();
        (app, dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn confirm_deletes_subtree_and_clears_selection() {
        let (mut app, _dir) = test_app();
        let order = app.flat_order();
        app.selection.click("2", Modifiers::NONE, &order);
        app.confirm_delete = Some("2".to_string());
        app.mode = Mode::Confirm;

        handle_confirm(&mut app, key(KeyCode::Char('y')));
        assert!(find_node(&app.tree, "2").is_none());
        assert!(find_node(&app.tree, "3").is_none());
        assert!(app.selection.is_empty());
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn cancel_keeps_the_node() {
        let (mut app, _dir) = test_app();
        app.confirm_delete = Some("1".to_string());
        app.mode = Mode::Confirm;

        handle_confirm(&mut app, key(KeyCode::Esc));
        assert!(find_node(&app.tree, "1").is_some());
        assert!(app.confirm_delete.is_none());
    }

    #[test]
    fn deleting_unselected_node_keeps_selection() {
        let (mut app, _dir) = test_app();
        let order = app.flat_order();
        app.selection.click("1", Modifiers::NONE, &order);
        app.confirm_delete = Some("4".to_string());
        app.mode = Mode::Confirm;

        handle_confirm(&mut app, key(KeyCode::Enter));
        assert!(find_node(&app.tree, "4").is_none());
        assert_eq!(app.selection.ids(), ["1"]);
    }
}
