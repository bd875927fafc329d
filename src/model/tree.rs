//! Traversal and query helpers over the task tree.
//!
//! The tree root is a plain `Vec<Node>` of top-level nodes, not a node
//! itself. All lookups match by id, never by reference identity, and walk
//! depth-first in pre-order.

use super::node::Node;

/// Find a node by id anywhere in the tree. Ids are unique, so the first
/// match is the only match.
pub fn find_node<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(children) = node.children()
            && let Some(found) = find_node(children, id)
        {
            return Some(found);
        }
    }
    None
}

/// Find a node by id, mutable.
pub fn find_node_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Folder { children, .. } = node
            && let Some(found) = find_node_mut(children, id)
        {
            return Some(found);
        }
    }
    None
}

/// All ids in depth-first pre-order: a folder's id comes before its
/// children's, regardless of the folder's `expanded` state. Range selection
/// math runs over this order, so collapsed folders must not hide entries.
pub fn flatten_ids(nodes: &[Node]) -> Vec<String> {
    let mut ids = Vec::new();
    collect_ids(nodes, &mut ids);
    ids
}

fn collect_ids(nodes: &[Node], ids: &mut Vec<String>) {
    for node in nodes {
        ids.push(node.id().to_string());
        if let Some(children) = node.children() {
            collect_ids(children, ids);
        }
    }
}

/// Count task nodes at all depths. Folders are not counted.
pub fn count_tasks(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Task { .. } => 1,
            Node::Folder { children, .. } => count_tasks(children),
        })
        .sum()
}

/// Detach the subtree rooted at `id` from whichever child list holds it.
/// Returns the removed node, or `None` if the id is not in the tree. The
/// search descends into every folder, even after a miss at the current
/// level.
pub fn remove_node(nodes: &mut Vec<Node>, id: &str) -> Option<Node> {
    if let Some(idx) = nodes.iter().position(|n| n.id() == id) {
        return Some(nodes.remove(idx));
    }
    for node in nodes.iter_mut() {
        if let Node::Folder { children, .. } = node
            && let Some(removed) = remove_node(children, id)
        {
            return Some(removed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The seed layout: a root task, then a folder holding two tasks.
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
                "expanded": true,
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
    fn find_node_at_root_and_nested() {
        let tree = sample_tree();
        assert_eq!(find_node(&tree, "1").unwrap().name(), "Welcome Task");
        assert_eq!(find_node(&tree, "4").unwrap().name(), "Design");
        assert!(find_node(&tree, "99").is_none());
    }

    #[test]
    fn find_node_mut_reaches_nested_tasks() {
        let mut tree = sample_tree();
        find_node_mut(&mut tree, "3")
            .unwrap()
            .set_name("Research v2".into());
        assert_eq!(find_node(&tree, "3").unwrap().name(), "Research v2");
    }

    #[test]
    fn flatten_is_preorder_with_folder_before_children() {
        let tree = sample_tree();
        assert_eq!(flatten_ids(&tree), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn flatten_ignores_expanded_state() {
        let mut tree = sample_tree();
        if let Node::Folder { expanded, .. } = &mut tree[1] {
            *expanded = false;
        }
        // Collapsed folders still contribute their children.
        assert_eq!(flatten_ids(&tree), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn find_matches_flatten_membership() {
        let tree = sample_tree();
        for id in flatten_ids(&tree) {
            assert!(find_node(&tree, &id).is_some());
        }
    }

    #[test]
    fn count_tasks_excludes_folders() {
        let tree = sample_tree();
        assert_eq!(count_tasks(&tree), 3);
        assert_eq!(
            count_tasks(&tree),
            flatten_ids(&tree)
                .iter()
                .filter(|id| find_node(&tree, id).unwrap().is_task())
                .count()
        );
    }

    #[test]
    fn count_tasks_empty_tree() {
        assert_eq!(count_tasks(&[]), 0);
    }

    #[test]
    fn remove_node_at_root() {
        let mut tree = sample_tree();
        let removed = remove_node(&mut tree, "1").unwrap();
        assert_eq!(removed.name(), "Welcome Task");
        assert!(find_node(&tree, "1").is_none());
        assert_eq!(flatten_ids(&tree), vec!["2", "3", "4"]);
    }

    #[test]
    fn remove_nested_node() {
        let mut tree = sample_tree();
        assert!(remove_node(&mut tree, "3").is_some());
        assert_eq!(flatten_ids(&tree), vec!["1", "2", "4"]);
    }

    #[test]
    fn remove_folder_takes_descendants() {
        let mut tree = sample_tree();
        let removed = remove_node(&mut tree, "2").unwrap();
        assert!(removed.is_folder());
        for id in ["2", "3", "4"] {
            assert!(find_node(&tree, id).is_none());
        }
        assert_eq!(flatten_ids(&tree), vec!["1"]);
    }

    #[test]
    fn remove_missing_id_is_none() {
        let mut tree = sample_tree();
        assert!(remove_node(&mut tree, "99").is_none());
        assert_eq!(flatten_ids(&tree).len(), 4);
    }
}
