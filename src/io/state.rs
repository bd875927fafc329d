use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json). Purely cosmetic restore
/// data; ids that no longer exist are pruned against the tree on load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Selected node ids, in selection order.
    #[serde(default)]
    pub selected: Vec<String>,
    /// Cursor row in the visible tree list.
    #[serde(default)]
    pub cursor: usize,
    /// Whether the detail pane shows the markdown preview.
    #[serde(default)]
    pub preview: bool,
}

/// Read .state.json from the data directory.
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let path = data_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory.
pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = data_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            selected: vec!["3".into(), "4".into()],
            cursor: 2,
            preview: true,
        };
        write_ui_state(dir.path(), &state).unwrap();
        let loaded = read_ui_state(dir.path()).unwrap();
        assert_eq!(loaded.selected, vec!["3", "4"]);
        assert_eq!(loaded.cursor, 2);
        assert!(loaded.preview);
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".state.json"), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let state: UiState = serde_json::from_str("{}").unwrap();
        assert!(state.selected.is_empty());
        assert_eq!(state.cursor, 0);
        assert!(!state.preview);
    }
}
