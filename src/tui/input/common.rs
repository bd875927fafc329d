use std::path::Path;

use crate::io::store::EXPORT_FILE;
use crate::model::node::{Node, Priority};
use crate::model::tree::find_node_mut;
use crate::ops::node_ops;
use crate::ops::selection::Modifiers;

use crate::tui::app::{App, Mode};

/// The mode to fall back to after a prompt: Select while a multi-selection
/// is live, Navigate otherwise.
pub(super) fn base_mode(app: &App) -> Mode {
    if app.selection.is_empty() {
        Mode::Navigate
    } else {
        Mode::Select
    }
}

// ---------------------------------------------------------------------------
// Cursor movement
// ---------------------------------------------------------------------------

pub(super) fn move_cursor(app: &mut App, delta: i32) {
    let len = app.visible_rows().len();
    if len == 0 {
        return;
    }
    let new = (app.cursor as i32 + delta).clamp(0, len as i32 - 1);
    app.cursor = new as usize;
}

pub(super) fn jump_to_top(app: &mut App) {
    app.cursor = 0;
}

pub(super) fn jump_to_bottom(app: &mut App) {
    let len = app.visible_rows().len();
    app.cursor = len.saturating_sub(1);
}

// ---------------------------------------------------------------------------
// Selection (keyboard stand-ins for the three click kinds)
// ---------------------------------------------------------------------------

/// Plain click on the cursor row: single-select and set the range anchor.
pub(super) fn plain_select(app: &mut App) {
    if let Some(id) = app.cursor_id() {
        let order = app.flat_order();
        app.selection.click(&id, Modifiers::NONE, &order);
        app.mode = Mode::Navigate;
    }
}

/// Ctrl-click on the cursor row: toggle membership.
pub(super) fn toggle_select(app: &mut App) {
    if let Some(id) = app.cursor_id() {
        let order = app.flat_order();
        app.selection.click(&id, Modifiers::CTRL, &order);
        app.mode = base_mode(app);
    }
}

/// Shift-click on the cursor row: range from the anchor.
pub(super) fn range_select(app: &mut App) {
    if let Some(id) = app.cursor_id() {
        let order = app.flat_order();
        app.selection.click(&id, Modifiers::SHIFT, &order);
        app.mode = base_mode(app);
    }
}

pub(super) fn select_all(app: &mut App) {
    let order = app.flat_order();
    app.selection.select_all(&order);
    app.mode = base_mode(app);
}

pub(super) fn clear_selection(app: &mut App) {
    app.selection.clear();
    app.mode = Mode::Navigate;
}

// ---------------------------------------------------------------------------
// Expand / collapse
// ---------------------------------------------------------------------------

pub(super) fn set_expanded_at_cursor(app: &mut App, open: bool) {
    let Some(id) = app.cursor_id() else { return };
    if let Some(Node::Folder { expanded, .. }) = find_node_mut(&mut app.tree, &id)
        && *expanded != open
    {
        *expanded = open;
        app.clamp_cursor();
        app.save();
    }
}

// ---------------------------------------------------------------------------
// Mutations at the cursor
// ---------------------------------------------------------------------------

/// Parent folder for a create: the cursor node when it is a folder,
/// otherwise the root.
fn create_parent(app: &App) -> Option<String> {
    let id = app.cursor_id()?;
    app.visible_rows()
        .iter()
        .find(|row| row.id == id && row.is_folder)
        .map(|row| row.id.clone())
}

pub(super) fn create_task_at_cursor(app: &mut App) {
    let parent = create_parent(app);
    match node_ops::create_task(&mut app.tree, parent.as_deref()) {
        Ok(id) => {
            app.save();
            let order = app.flat_order();
            app.selection.click(&id, Modifiers::NONE, &order);
            move_cursor_to(app, &id);
            begin_rename_of(app, &id);
        }
        Err(e) => app.set_status(e.to_string()),
    }
}

pub(super) fn create_folder_at_cursor(app: &mut App) {
    let parent = create_parent(app);
    match node_ops::create_folder(&mut app.tree, parent.as_deref()) {
        Ok(id) => {
            app.save();
            let order = app.flat_order();
            app.selection.click(&id, Modifiers::NONE, &order);
            move_cursor_to(app, &id);
            begin_rename_of(app, &id);
        }
        Err(e) => app.set_status(e.to_string()),
    }
}

fn move_cursor_to(app: &mut App, id: &str) {
    if let Some(idx) = app.visible_rows().iter().position(|row| row.id == id) {
        app.cursor = idx;
    }
}

pub(super) fn toggle_complete_at_cursor(app: &mut App) {
    let Some(id) = app.cursor_id() else { return };
    let done = match crate::model::tree::find_node(&app.tree, &id) {
        Some(Node::Task { completed, .. }) => !*completed,
        _ => return,
    };
    match node_ops::set_completed(&mut app.tree, &id, done) {
        Ok(true) => app.save(),
        Ok(false) => {}
        Err(e) => app.set_status(e.to_string()),
    }
}

pub(super) fn set_priority_at_cursor(app: &mut App, priority: Priority) {
    let Some(id) = app.cursor_id() else { return };
    match node_ops::set_priority(&mut app.tree, &id, priority) {
        Ok(true) => {
            app.save();
            app.set_status(format!("Priority set to {}", priority.label()));
        }
        Ok(false) => {}
        Err(_) => app.set_status("Folders have no priority"),
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

pub(super) fn begin_rename_at_cursor(app: &mut App) {
    if let Some(id) = app.cursor_id() {
        begin_rename_of(app, &id);
    }
}

pub(super) fn begin_rename_of(app: &mut App, id: &str) {
    let Some(node) = crate::model::tree::find_node(&app.tree, id) else {
        return;
    };
    app.rename_buffer = node.name().to_string();
    app.rename_cursor = app.rename_buffer.len();
    app.rename_target = Some(id.to_string());
    app.mode = Mode::Rename;
}

/// Open the content editor on the active task. The cursor row is
/// plain-selected first so `e` works without an explicit click.
pub(super) fn begin_edit(app: &mut App) {
    if app.active_task().is_none() {
        plain_select(app);
    }
    let content = match app.active_task() {
        Some(Node::Task { content, .. }) => content.clone(),
        _ => {
            app.set_status("Select a task to edit");
            return;
        }
    };
    app.edit_lines = content.split('\n').map(str::to_string).collect();
    app.edit_line = 0;
    app.edit_col = 0;
    app.edit_scroll = 0;
    app.mode = Mode::Edit;
}

pub(super) fn begin_confirm_delete(app: &mut App, id: &str) {
    if crate::model::tree::find_node(&app.tree, id).is_some() {
        app.confirm_delete = Some(id.to_string());
        app.mode = Mode::Confirm;
    }
}

pub(super) fn begin_sort(app: &mut App) {
    app.mode = Mode::Sort;
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

pub(super) fn do_export(app: &mut App) {
    let path = Path::new(EXPORT_FILE);
    match app.store.export(&app.tree, path) {
        Ok(()) => app.set_status(format!("Exported to {}", EXPORT_FILE)),
        Err(e) => app.set_status(format!("export failed: {}", e)),
    }
}
