use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::node::Priority;
use crate::ops::sort::{SortKey, sort_tree};

use crate::tui::app::App;

use super::*;

/// Handle keys in NAVIGATE mode.
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit: q or Ctrl+Q
        (m, KeyCode::Char('q')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Esc clears the (single) selection
        (_, KeyCode::Esc) => {
            clear_selection(app);
        }

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => move_cursor(app, -1),
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => move_cursor(app, 1),
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => jump_to_top(app),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => jump_to_bottom(app),

        // Selection: Enter/Space plain, v toggle, V range, a all
        (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char(' ')) => plain_select(app),
        (KeyModifiers::NONE, KeyCode::Char('v')) => toggle_select(app),
        (KeyModifiers::SHIFT, KeyCode::Char('V')) => range_select(app),
        (KeyModifiers::NONE, KeyCode::Char('a')) => select_all(app),

        // Expand/collapse
        (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char('l')) => {
            set_expanded_at_cursor(app, true);
        }
        (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('h')) => {
            set_expanded_at_cursor(app, false);
        }

        // Create
        (KeyModifiers::NONE, KeyCode::Char('n')) => create_task_at_cursor(app),
        (KeyModifiers::SHIFT, KeyCode::Char('N')) => create_folder_at_cursor(app),

        // Edit operations at the cursor
        (KeyModifiers::NONE, KeyCode::Char('r')) => begin_rename_at_cursor(app),
        (KeyModifiers::NONE, KeyCode::Char('e')) => begin_edit(app),
        (KeyModifiers::NONE, KeyCode::Char('x')) => toggle_complete_at_cursor(app),
        (KeyModifiers::NONE, KeyCode::Char('1')) => set_priority_at_cursor(app, Priority::High),
        (KeyModifiers::NONE, KeyCode::Char('2')) => set_priority_at_cursor(app, Priority::Medium),
        (KeyModifiers::NONE, KeyCode::Char('3')) => set_priority_at_cursor(app, Priority::Low),
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            if let Some(id) = app.cursor_id() {
                begin_confirm_delete(app, &id);
            }
        }

        // Sort prompt
        (KeyModifiers::NONE, KeyCode::Char('s')) => begin_sort(app),

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

/// Handle keys in the SORT prompt: pick a key or cancel.
pub(super) fn handle_sort(app: &mut App, key: KeyEvent) {
    let chosen = match key.code {
        KeyCode::Char('n') => Some(SortKey::Name),
        KeyCode::Char('c') => Some(SortKey::Created),
        KeyCode::Char('p') => Some(SortKey::Priority),
        // Enter takes the configured default, if any
        KeyCode::Enter => app
            .config
            .default_sort
            .as_deref()
            .and_then(SortKey::parse),
        _ => None,
    };

    match chosen {
        Some(sort_key) => {
            sort_tree(&mut app.tree, sort_key);
            app.save();
            app.set_status(format!("Sorted by {}", sort_key.label()));
            app.mode = base_mode(app);
        }
        None => {
            if matches!(key.code, KeyCode::Esc) {
                app.mode = base_mode(app);
            }
        }
    }
}
