use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::model::node::{Node, Priority};

/// File name of the tree snapshot inside the data directory.
pub const SNAPSHOT_FILE: &str = "tasks.json";

/// Default file name for `tt export`.
pub const EXPORT_FILE: &str = "tasks-export.json";

/// Error type for snapshot I/O.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Whole-snapshot store for the task tree. Every save serializes the full
/// tree; there is no partial or delta persistence.
#[derive(Debug, Clone)]
pub struct TreeStore {
    data_dir: PathBuf,
}

impl TreeStore {
    pub fn open(data_dir: impl Into<PathBuf>) -> TreeStore {
        TreeStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    /// Load the tree. First run (no snapshot on disk) returns the seed
    /// tree; a snapshot that exists but does not parse is an error, not a
    /// silent reset.
    pub fn load(&self) -> Result<Vec<Node>, StoreError> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(seed_tree());
        }
        let text = fs::read_to_string(&path).map_err(|e| StoreError::Read {
            path: path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Persist the full tree, atomically: write a temp file in the data
    /// directory, then rename it over the snapshot.
    pub fn save(&self, nodes: &[Node]) -> Result<(), StoreError> {
        let path = self.snapshot_path();
        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::Write {
            path: self.data_dir.clone(),
            source: e,
        })?;
        let text = serde_json::to_string(nodes)?;
        let mut tmp =
            tempfile::NamedTempFile::new_in(&self.data_dir).map_err(|e| StoreError::Write {
                path: path.clone(),
                source: e,
            })?;
        tmp.write_all(text.as_bytes()).map_err(|e| StoreError::Write {
            path: path.clone(),
            source: e,
        })?;
        tmp.persist(&path).map_err(|e| StoreError::Write {
            path,
            source: e.error,
        })?;
        Ok(())
    }

    /// Write the tree as a pretty-printed export artifact. Same schema as
    /// the snapshot.
    pub fn export(&self, nodes: &[Node], path: &Path) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(nodes)?;
        fs::write(path, text).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// The first-run tree: one welcome task at the root and a sample project
/// folder with two tasks. A fixture, not a template; nothing re-derives
/// logic from it.
pub fn seed_tree() -> Vec<Node> {
    let now = Utc::now();
    let welcome = Node::task(
        "1".to_string(),
        "Welcome Task".to_string(),
        "# Welcome to Task Manager\n\nThis is your first task. You can edit it or create new ones."
            .to_string(),
        now,
    );
    // Seed defaults match Node::task (medium, incomplete); ids 3 and 4
    // differ in priority/content only.
    let mut research = Node::task(
        "3".to_string(),
        "Research".to_string(),
        "Research potential solutions for the project.".to_string(),
        now,
    );
    if let Node::Task { priority, .. } = &mut research {
        *priority = Priority::High;
    }
    let design = Node::task(
        "4".to_string(),
        "Design".to_string(),
        "Design the user interface.".to_string(),
        now,
    );

    let mut project = Node::folder("2".to_string(), "Sample Project".to_string());
    if let Some(children) = project.children_mut() {
        children.push(research);
        children.push(design);
    }

    vec![welcome, project]
}
