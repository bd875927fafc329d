use serde::Serialize;

use crate::model::node::{Node, Priority};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct NodeJson {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeJson>,
}

pub fn node_json(node: &Node) -> NodeJson {
    match node {
        Node::Folder { id, name, children, .. } => NodeJson {
            id: id.clone(),
            name: name.clone(),
            kind: "folder",
            completed: None,
            priority: None,
            children: children.iter().map(node_json).collect(),
        },
        Node::Task {
            id,
            name,
            completed,
            priority,
            ..
        } => NodeJson {
            id: id.clone(),
            name: name.clone(),
            kind: "task",
            completed: Some(*completed),
            priority: Some(*priority),
            children: Vec::new(),
        },
    }
}

// ---------------------------------------------------------------------------
// Plain-text tree listing
// ---------------------------------------------------------------------------

/// Render the tree as indented text, one node per line. Folders get a
/// trailing slash; tasks show a checkbox and their priority.
pub fn render_tree(nodes: &[Node]) -> String {
    let mut out = String::new();
    render_level(nodes, 0, &mut out);
    out
}

fn render_level(nodes: &[Node], depth: usize, out: &mut String) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        match node {
            Node::Folder {
                id, name, children, ..
            } => {
                out.push_str(&format!("{}{}/ {}\n", indent, id, name));
                render_level(children, depth + 1, out);
            }
            Node::Task {
                id,
                name,
                completed,
                priority,
                ..
            } => {
                let check = if *completed { 'x' } else { ' ' };
                out.push_str(&format!(
                    "{}[{}] {} {} ({})\n",
                    indent,
                    check,
                    id,
                    name,
                    priority.label()
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::seed_tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_listing() {
        let tree = seed_tree();
        let listing = render_tree(&tree);
        assert_eq!(
            listing,
            "[ ] 1 Welcome Task (medium)\n\
             2/ Sample Project\n\
             \x20 [ ] 3 Research (high)\n\
             \x20 [ ] 4 Design (medium)\n"
        );
    }

    #[test]
    fn json_shape() {
        let tree = seed_tree();
        let json = serde_json::to_value(tree.iter().map(node_json).collect::<Vec<_>>()).unwrap();
        assert_eq!(json[0]["type"], "task");
        assert_eq!(json[1]["type"], "folder");
        assert_eq!(json[1]["children"][0]["name"], "Research");
        // Folders omit task-only fields entirely.
        assert!(json[1].get("completed").is_none());
    }
}
