use chrono::Utc;

use crate::model::node::{Node, Priority};
use crate::model::tree::{find_node_mut, remove_node};

/// Error type for tree mutations. Lookups that can meaningfully no-op do
/// not error on missing ids; see the individual operations.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("no such node: {0}")]
    NotFound(String),
    #[error("not a folder: {0}")]
    NotAFolder(String),
    #[error("not a task: {0}")]
    NotATask(String),
}

pub const DEFAULT_TASK_NAME: &str = "New Task";
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

const NEW_TASK_CONTENT: &str = "# New Task\n\nEnter your task details here in markdown format.";

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Append a new default task under `parent` (which must name a folder), or
/// at the root when `parent` is `None`. The parent folder is forced open so
/// the new task is visible. Returns the assigned id.
pub fn create_task(nodes: &mut Vec<Node>, parent: Option<&str>) -> Result<String, NodeError> {
    let id = next_id(nodes);
    let task = Node::task(
        id.clone(),
        DEFAULT_TASK_NAME.to_string(),
        NEW_TASK_CONTENT.to_string(),
        Utc::now(),
    );
    attach(nodes, parent, task)?;
    Ok(id)
}

/// Append a new empty, expanded folder. Same parent rules as `create_task`.
pub fn create_folder(nodes: &mut Vec<Node>, parent: Option<&str>) -> Result<String, NodeError> {
    let id = next_id(nodes);
    let folder = Node::folder(id.clone(), DEFAULT_FOLDER_NAME.to_string());
    attach(nodes, parent, folder)?;
    Ok(id)
}

fn attach(nodes: &mut Vec<Node>, parent: Option<&str>, node: Node) -> Result<(), NodeError> {
    match parent {
        None => {
            nodes.push(node);
            Ok(())
        }
        Some(parent_id) => {
            let target = find_node_mut(nodes, parent_id)
                .ok_or_else(|| NodeError::NotFound(parent_id.to_string()))?;
            match target {
                Node::Folder {
                    expanded, children, ..
                } => {
                    *expanded = true;
                    children.push(node);
                    Ok(())
                }
                Node::Task { .. } => Err(NodeError::NotAFolder(parent_id.to_string())),
            }
        }
    }
}

/// Allocate the next id: the highest numeric id anywhere in the tree, plus
/// one. Non-numeric ids are skipped. An empty tree starts at "1".
pub fn next_id(nodes: &[Node]) -> String {
    let mut max = 0u64;
    scan_max_id(nodes, &mut max);
    (max + 1).to_string()
}

fn scan_max_id(nodes: &[Node], max: &mut u64) {
    for node in nodes {
        if let Ok(n) = node.id().parse::<u64>()
            && n > *max
        {
            *max = n;
        }
        if let Some(children) = node.children() {
            scan_max_id(children, max);
        }
    }
}

// ---------------------------------------------------------------------------
// Rename / delete
// ---------------------------------------------------------------------------

/// Set a node's name. Whitespace-only input and unknown ids are silent
/// no-ops; returns whether the name changed. Renaming a task refreshes its
/// `updated_at`.
pub fn rename(nodes: &mut [Node], id: &str, new_name: &str) -> bool {
    let trimmed = new_name.trim();
    if trimmed.is_empty() {
        return false;
    }
    let Some(node) = find_node_mut(nodes, id) else {
        return false;
    };
    node.set_name(trimmed.to_string());
    node.touch(Utc::now());
    true
}

/// Remove the node and its whole subtree. Returns whether anything was
/// removed. The caller is responsible for pruning the selection afterwards.
pub fn delete(nodes: &mut Vec<Node>, id: &str) -> bool {
    remove_node(nodes, id).is_some()
}

// ---------------------------------------------------------------------------
// Task property setters
// ---------------------------------------------------------------------------

/// Set a task's completed flag. A folder target is an error, never a silent
/// mutation; an unknown id is a no-op (`Ok(false)`).
pub fn set_completed(nodes: &mut [Node], id: &str, done: bool) -> Result<bool, NodeError> {
    with_task(nodes, id, |node| {
        if let Node::Task {
            completed,
            updated_at,
            ..
        } = node
        {
            *completed = done;
            *updated_at = Utc::now();
        }
    })
}

/// Set a task's priority. Same contract as `set_completed`.
pub fn set_priority(nodes: &mut [Node], id: &str, new: Priority) -> Result<bool, NodeError> {
    with_task(nodes, id, |node| {
        if let Node::Task {
            priority,
            updated_at,
            ..
        } = node
        {
            *priority = new;
            *updated_at = Utc::now();
        }
    })
}

/// Replace a task's markdown content. This is the editor-change hook: it
/// runs on every buffer change, refreshing `updated_at`.
pub fn set_content(nodes: &mut [Node], id: &str, text: &str) -> Result<bool, NodeError> {
    with_task(nodes, id, |node| {
        if let Node::Task {
            content,
            updated_at,
            ..
        } = node
        {
            *content = text.to_string();
            *updated_at = Utc::now();
        }
    })
}

fn with_task(
    nodes: &mut [Node],
    id: &str,
    apply: impl FnOnce(&mut Node),
) -> Result<bool, NodeError> {
    match find_node_mut(nodes, id) {
        None => Ok(false),
        Some(node) if node.is_folder() => Err(NodeError::NotATask(id.to_string())),
        Some(node) => {
            apply(node);
            Ok(true)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree::{count_tasks, find_node, flatten_ids};

    fn sample_tree() -> Vec<Node> {
        serde_json::from_str(
            r##"[
              {
                "type": "task",
                "id": "1",
                "name": "Welcome Task",
                "completed": false,
                "priority": "medium",
                "createdAt": "2026-08-01T09:00:00Z",
                "updatedAt": "2026-08-01T09:00:00Z",
                "content": "# Welcome"
              },
              {
                "type": "folder",
                "id": "2",
                "name": "Sample Project",
                "expanded": false,
                "children": [
                  {
                    "type": "task",
                    "id": "3",
                    "name": "Research",
                    "completed": false,
                    "priority": "high",
                    "createdAt": "2026-08-01T09:01:00Z",
                    "updatedAt": "2026-08-01T09:01:00Z",
                    "content": "Research potential solutions."
                  },
                  {
                    "type": "task",
                    "id": "4",
                    "name": "Design",
                    "completed": false,
                    "priority": "medium",
                    "createdAt": "2026-08-01T09:02:00Z",
                    "updatedAt": "2026-08-01T09:02:00Z",
                    "content": "Design the user interface."
                  }
                ]
              }
            ]"##,
        )
        .unwrap()
    }

    #[test]
    fn create_task_at_root() {
        let mut tree = sample_tree();
        let id = create_task(&mut tree, None).unwrap();
        assert_eq!(id, "5");
        let node = find_node(&tree, "5").unwrap();
        assert_eq!(node.name(), DEFAULT_TASK_NAME);
        assert!(node.is_task());
        assert_eq!(tree.last().unwrap().id(), "5");
    }

    #[test]
    fn create_task_in_folder_expands_it() {
        let mut tree = sample_tree();
        let id = create_task(&mut tree, Some("2")).unwrap();
        let folder = find_node(&tree, "2").unwrap();
        match folder {
            Node::Folder {
                expanded, children, ..
            } => {
                // The folder started collapsed; creating inside forces it open.
                assert!(expanded);
                assert_eq!(children.last().unwrap().id(), id);
            }
            Node::Task { .. } => panic!("expected folder"),
        }
    }

    #[test]
    fn create_under_task_is_rejected() {
        let mut tree = sample_tree();
        assert!(matches!(
            create_task(&mut tree, Some("1")),
            Err(NodeError::NotAFolder(_))
        ));
        assert!(matches!(
            create_folder(&mut tree, Some("3")),
            Err(NodeError::NotAFolder(_))
        ));
        assert_eq!(count_tasks(&tree), 3);
    }

    #[test]
    fn create_under_missing_parent_is_not_found() {
        let mut tree = sample_tree();
        assert!(matches!(
            create_task(&mut tree, Some("99")),
            Err(NodeError::NotFound(_))
        ));
    }

    #[test]
    fn next_id_skips_non_numeric() {
        let mut tree = sample_tree();
        tree.push(Node::folder("imported".into(), "Imported".into()));
        assert_eq!(next_id(&tree), "5");
        assert_eq!(next_id(&[]), "1");
    }

    #[test]
    fn rename_trims_and_sets() {
        let mut tree = sample_tree();
        assert!(rename(&mut tree, "3", "  Deep Research  "));
        assert_eq!(find_node(&tree, "3").unwrap().name(), "Deep Research");
    }

    #[test]
    fn rename_blank_is_noop() {
        let mut tree = sample_tree();
        assert!(!rename(&mut tree, "3", "   "));
        assert_eq!(find_node(&tree, "3").unwrap().name(), "Research");
    }

    #[test]
    fn rename_missing_is_noop() {
        let mut tree = sample_tree();
        assert!(!rename(&mut tree, "99", "Ghost"));
    }

    #[test]
    fn rename_task_refreshes_updated_at() {
        let mut tree = sample_tree();
        rename(&mut tree, "1", "Hello");
        if let Node::Task {
            created_at,
            updated_at,
            ..
        } = find_node(&tree, "1").unwrap()
        {
            assert!(updated_at > created_at);
        } else {
            panic!("expected task");
        }
    }

    #[test]
    fn delete_folder_removes_descendants() {
        let mut tree = sample_tree();
        assert!(delete(&mut tree, "2"));
        assert_eq!(flatten_ids(&tree), vec!["1"]);
        assert_eq!(count_tasks(&tree), 1);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut tree = sample_tree();
        assert!(!delete(&mut tree, "99"));
        assert_eq!(flatten_ids(&tree).len(), 4);
    }

    #[test]
    fn set_completed_marks_task() {
        let mut tree = sample_tree();
        assert!(set_completed(&mut tree, "3", true).unwrap());
        match find_node(&tree, "3").unwrap() {
            Node::Task {
                completed,
                created_at,
                updated_at,
                ..
            } => {
                assert!(completed);
                assert!(updated_at > created_at);
            }
            Node::Folder { .. } => panic!("expected task"),
        }
    }

    #[test]
    fn set_completed_on_folder_is_rejected() {
        let mut tree = sample_tree();
        assert!(matches!(
            set_completed(&mut tree, "2", true),
            Err(NodeError::NotATask(_))
        ));
        // And the folder is untouched.
        assert_eq!(find_node(&tree, "2").unwrap().name(), "Sample Project");
    }

    #[test]
    fn set_completed_missing_is_noop() {
        let mut tree = sample_tree();
        assert_eq!(set_completed(&mut tree, "99", true).unwrap(), false);
    }

    #[test]
    fn set_priority_on_task() {
        let mut tree = sample_tree();
        assert!(set_priority(&mut tree, "4", Priority::High).unwrap());
        match find_node(&tree, "4").unwrap() {
            Node::Task { priority, .. } => assert_eq!(*priority, Priority::High),
            Node::Folder { .. } => panic!("expected task"),
        }
    }

    #[test]
    fn set_priority_on_folder_is_rejected() {
        let mut tree = sample_tree();
        assert!(set_priority(&mut tree, "2", Priority::Low).is_err());
    }

    #[test]
    fn set_content_updates_text_and_stamp() {
        let mut tree = sample_tree();
        assert!(set_content(&mut tree, "1", "new body").unwrap());
        match find_node(&tree, "1").unwrap() {
            Node::Task {
                content,
                created_at,
                updated_at,
                ..
            } => {
                assert_eq!(content, "new body");
                assert!(updated_at >= created_at);
            }
            Node::Folder { .. } => panic!("expected task"),
        }
    }
}
