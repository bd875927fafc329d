use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority. Declaration order is the sort order: high before medium
/// before low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Parse a priority name as typed on the CLI.
    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// A node in the task tree. The snapshot format discriminates the two
/// variants with a `"type"` field; task timestamps serialize as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Folder {
        id: String,
        name: String,
        /// Whether the folder is shown expanded in the tree view.
        #[serde(default)]
        expanded: bool,
        /// Child nodes in display order. Order here is the only ordering
        /// authority; there is no separate index field.
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename_all = "camelCase")]
    Task {
        id: String,
        name: String,
        completed: bool,
        priority: Priority,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        /// Markdown body of the task.
        content: String,
    },
}

impl Node {
    /// Create a task with both timestamps set to `now`.
    pub fn task(id: String, name: String, content: String, now: DateTime<Utc>) -> Node {
        Node::Task {
            id,
            name,
            completed: false,
            priority: Priority::Medium,
            created_at: now,
            updated_at: now,
            content,
        }
    }

    /// Create an empty folder, expanded so new children are visible.
    pub fn folder(id: String, name: String) -> Node {
        Node::Folder {
            id,
            name,
            expanded: true,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Node::Folder { id, .. } | Node::Task { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder { name, .. } | Node::Task { name, .. } => name,
        }
    }

    pub fn set_name(&mut self, new_name: String) {
        match self {
            Node::Folder { name, .. } | Node::Task { name, .. } => *name = new_name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }

    pub fn is_task(&self) -> bool {
        matches!(self, Node::Task { .. })
    }

    /// Child list, if this is a folder.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Folder { children, .. } => Some(children),
            Node::Task { .. } => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Folder { children, .. } => Some(children),
            Node::Task { .. } => None,
        }
    }

    /// Refresh `updated_at` on a task. No-op for folders, which carry no
    /// timestamps.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if let Node::Task { updated_at, .. } = self {
            *updated_at = now;
        }
    }
}
