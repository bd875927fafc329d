use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::store::{StoreError, TreeStore};
use crate::model::config::Config;
use crate::model::node::Node;
use crate::model::tree::{count_tasks, find_node, flatten_ids};
use crate::ops::selection::Selection;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Select,
    Rename,
    Edit,
    Confirm,
    Sort,
}

/// How long a transient status message stays up before reverting to Ready.
const STATUS_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    set_at: Instant,
}

/// A row in the visible tree list. Unlike `flatten_ids`, this honors the
/// `expanded` flags: collapsed folders hide their children from display
/// (but never from selection math).
#[derive(Debug, Clone)]
pub struct FlatRow {
    pub id: String,
    pub depth: usize,
    pub is_folder: bool,
    pub expanded: bool,
    pub has_children: bool,
}

/// Main application state
pub struct App {
    pub store: TreeStore,
    pub config: Config,
    pub theme: Theme,
    pub tree: Vec<Node>,
    pub selection: Selection,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the visible rows list
    pub cursor: usize,
    /// Scroll offset (first visible row)
    pub scroll_offset: usize,
    /// Detail pane shows the rendered markdown preview instead of the source
    pub preview: bool,
    pub show_help: bool,
    pub status: Option<StatusMessage>,

    // Rename mode
    pub rename_target: Option<String>,
    pub rename_buffer: String,
    /// Byte offset into rename_buffer
    pub rename_cursor: usize,

    // Content edit mode
    pub edit_lines: Vec<String>,
    pub edit_line: usize,
    /// Byte offset into the current edit line
    pub edit_col: usize,
    /// Scroll offset of the detail pane while editing
    pub edit_scroll: usize,

    // Confirm mode: id pending deletion
    pub confirm_delete: Option<String>,
}

impl App {
    pub fn new(store: TreeStore, config: Config) -> Result<App, StoreError> {
        let tree = store.load()?;
        let theme = Theme::from_config(&config);
        Ok(App {
            store,
            config,
            theme,
            tree,
            selection: Selection::new(),
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            preview: false,
            show_help: false,
            status: None,
            rename_target: None,
            rename_buffer: String::new(),
            rename_cursor: 0,
            edit_lines: Vec::new(),
            edit_line: 0,
            edit_col: 0,
            edit_scroll: 0,
            confirm_delete: None,
        })
    }

    /// Build the visible rows, honoring expand/collapse state.
    pub fn visible_rows(&self) -> Vec<FlatRow> {
        let mut rows = Vec::new();
        collect_rows(&self.tree, 0, &mut rows);
        rows
    }

    /// Full depth-first id order, collapsed folders included. Range
    /// selection and pruning run over this.
    pub fn flat_order(&self) -> Vec<String> {
        flatten_ids(&self.tree)
    }

    /// Id of the node under the cursor, if any.
    pub fn cursor_id(&self) -> Option<String> {
        self.visible_rows().get(self.cursor).map(|row| row.id.clone())
    }

    /// Keep the cursor inside the visible list after mutations.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
        });
    }

    /// Drop an expired status message (reverts the bar to "Ready").
    pub fn expire_status(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.set_at.elapsed() >= STATUS_TTL)
        {
            self.status = None;
        }
    }

    /// Persist the tree. Persistence failures are advisory, not fatal.
    pub fn save(&mut self) {
        if let Err(e) = self.store.save(&self.tree) {
            self.set_status(format!("save failed: {}", e));
        }
    }

    /// Run after any mutation that may have removed nodes: drop stale
    /// selection entries, re-clamp the cursor, persist.
    pub fn after_tree_change(&mut self) {
        let order = self.flat_order();
        self.selection.prune(&order);
        self.clamp_cursor();
        self.save();
    }

    /// The single selected node, when it is a task. This is the node
    /// content edits apply to.
    pub fn active_task(&self) -> Option<&Node> {
        let id = self.selection.active()?;
        let node = find_node(&self.tree, id)?;
        node.is_task().then_some(node)
    }

    pub fn task_count(&self) -> usize {
        count_tasks(&self.tree)
    }
}

fn collect_rows(nodes: &[Node], depth: usize, rows: &mut Vec<FlatRow>) {
    for node in nodes {
        match node {
            Node::Folder {
                id,
                expanded,
                children,
                ..
            } => {
                rows.push(FlatRow {
                    id: id.clone(),
                    depth,
                    is_folder: true,
                    expanded: *expanded,
                    has_children: !children.is_empty(),
                });
                if *expanded {
                    collect_rows(children, depth + 1, rows);
                }
            }
            Node::Task { id, .. } => {
                rows.push(FlatRow {
                    id: id.clone(),
                    depth,
                    is_folder: false,
                    expanded: false,
                    has_children: false,
                });
            }
        }
    }
}

/// Restore cursor/selection/preview from .state.json, pruned against the
/// loaded tree.
fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(app.store.data_dir()) else {
        return;
    };
    app.preview = state.preview;
    app.cursor = state.cursor;
    app.selection.restore(state.selected);
    let order = app.flat_order();
    app.selection.prune(&order);
    app.clamp_cursor();
    if !app.selection.is_empty() {
        app.mode = Mode::Select;
    }
}

fn save_ui_state(app: &App) {
    let state = UiState {
        selected: app.selection.ids().to_vec(),
        cursor: app.cursor,
        preview: app.preview,
    };
    let _ = write_ui_state(app.store.data_dir(), &state);
}

/// Run the TUI application
pub fn run(data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = crate::cli::handlers::resolve_data_dir(data_dir);
    let config = config_io::read_config(&dir)?;
    let store = TreeStore::open(dir);
    let mut app = App::new(store, config)?;

    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.expire_status();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::seed_tree;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path());
        let app = App::new(store, Config::default()).unwrap();
        (app, dir)
    }

    #[test]
    fn visible_rows_follow_expansion() {
        let (mut app, _dir) = test_app();
        // Seed: folder "2" is expanded, so all four nodes are visible.
        let ids: Vec<String> = app.visible_rows().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);

        if let Some(Node::Folder { expanded, .. }) =
            crate::model::tree::find_node_mut(&mut app.tree, "2")
        {
            *expanded = false;
        }
        let ids: Vec<String> = app.visible_rows().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
        // The flat order still contains the hidden children.
        assert_eq!(app.flat_order(), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn row_depth_tracks_nesting() {
        let (app, _dir) = test_app();
        let rows = app.visible_rows();
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[2].depth, 1); // Research, inside Sample Project
    }

    #[test]
    fn clamp_cursor_after_shrink() {
        let (mut app, _dir) = test_app();
        app.cursor = 3;
        app.tree = seed_tree().into_iter().take(1).collect();
        app.clamp_cursor();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn active_task_requires_single_task_selection() {
        let (mut app, _dir) = test_app();
        let order = app.flat_order();
        assert!(app.active_task().is_none());

        app.selection
            .click("1", crate::ops::selection::Modifiers::NONE, &order);
        assert_eq!(app.active_task().unwrap().id(), "1");

        // A folder can be the only selection but is never the active task.
        app.selection
            .click("2", crate::ops::selection::Modifiers::NONE, &order);
        assert!(app.active_task().is_none());
    }

    #[test]
    fn after_tree_change_prunes_selection() {
        let (mut app, _dir) = test_app();
        let order = app.flat_order();
        app.selection.select_all(&order);
        crate::ops::node_ops::delete(&mut app.tree, "2");
        app.after_tree_change();
        assert_eq!(app.selection.ids(), ["1"]);
    }
}
