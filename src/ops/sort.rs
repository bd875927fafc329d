use std::cmp::Ordering;

use crate::model::node::Node;

/// Sort key for `sort_tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Created,
    Priority,
}

impl SortKey {
    /// Parse a sort key name as typed on the CLI or in config.
    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "name" => Some(SortKey::Name),
            "created" => Some(SortKey::Created),
            "priority" => Some(SortKey::Priority),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Created => "created",
            SortKey::Priority => "priority",
        }
    }
}

/// Sort every folder's children independently, at every depth: folders
/// first, then tasks, each group ascending by the key. The sort is stable,
/// so ties (and folders under keys they don't carry) keep their prior
/// relative order. This is a per-level sort, not a flatten-then-sort.
pub fn sort_tree(nodes: &mut [Node], key: SortKey) {
    nodes.sort_by(|a, b| compare(a, b, key));
    for node in nodes.iter_mut() {
        if let Node::Folder { children, .. } = node {
            sort_tree(children, key);
        }
    }
}

fn compare(a: &Node, b: &Node, key: SortKey) -> Ordering {
    match (a.is_folder(), b.is_folder()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    match key {
        SortKey::Name => a.name().cmp(b.name()),
        SortKey::Created => match (a, b) {
            (
                Node::Task {
                    created_at: left, ..
                },
                Node::Task {
                    created_at: right, ..
                },
            ) => left.cmp(right),
            // Folders carry no timestamp; leave their order alone.
            _ => Ordering::Equal,
        },
        SortKey::Priority => match (a, b) {
            (Node::Task { priority: left, .. }, Node::Task { priority: right, .. }) => {
                left.cmp(right)
            }
            _ => Ordering::Equal,
        },
    }
}
