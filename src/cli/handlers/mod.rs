use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::{node_json, render_tree};
use crate::io::config_io;
use crate::io::store::{EXPORT_FILE, TreeStore};
use crate::markdown;
use crate::model::node::{Node, Priority};
use crate::model::tree::{count_tasks, find_node};
use crate::ops::node_ops;
use crate::ops::sort::{SortKey, sort_tree};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let store = open_store(cli.data_dir.as_deref())?;

    match cli.command {
        None => {
            // main.rs routes the no-subcommand case to the TUI.
            Ok(())
        }
        Some(cmd) => match cmd {
            // Read commands
            Commands::List => cmd_list(&store, json),
            Commands::Show(args) => cmd_show(&store, args, json),
            Commands::Count => cmd_count(&store, json),

            // Write commands
            Commands::Add(args) => cmd_add(&store, args),
            Commands::Folder(args) => cmd_folder(&store, args),
            Commands::Rename(args) => cmd_rename(&store, args),
            Commands::Done(args) => cmd_set_completed(&store, args, true),
            Commands::Undone(args) => cmd_set_completed(&store, args, false),
            Commands::Priority(args) => cmd_priority(&store, args),
            Commands::Sort(args) => cmd_sort(&store, args),
            Commands::Delete(args) => cmd_delete(&store, args),
            Commands::Export(args) => cmd_export(&store, args),
        },
    }
}

/// Resolve the data directory: the -C flag, then $TASKTREE_DIR, then
/// ~/.tasktree. The config file is only read here to fail fast on a
/// malformed one; the CLI itself has no configurable behavior yet.
pub fn open_store(flag: Option<&str>) -> Result<TreeStore, Box<dyn std::error::Error>> {
    let dir = resolve_data_dir(flag);
    config_io::read_config(&dir)?;
    Ok(TreeStore::open(dir))
}

pub fn resolve_data_dir(flag: Option<&str>) -> PathBuf {
    if let Some(dir) = flag {
        return PathBuf::from(dir);
    }
    if let Some(dir) = std::env::var_os("TASKTREE_DIR") {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".tasktree"),
        None => PathBuf::from(".tasktree"),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &TreeStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = store.load()?;
    if json {
        let nodes: Vec<_> = tree.iter().map(node_json).collect();
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        print!("{}", render_tree(&tree));
    }
    Ok(())
}

fn cmd_show(store: &TreeStore, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = store.load()?;
    let node = find_node(&tree, &args.id).ok_or_else(|| format!("no such node: {}", args.id))?;
    match node {
        Node::Folder { name, children, .. } => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "id": args.id,
                        "name": name,
                        "type": "folder",
                        "children": children.len(),
                    })
                );
            } else {
                println!("{}/ {} ({} children)", args.id, name, children.len());
            }
        }
        Node::Task { name, content, .. } => {
            let body = if args.html {
                markdown::to_html(content)
            } else {
                content.clone()
            };
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "id": args.id,
                        "name": name,
                        "type": "task",
                        "content": body,
                    })
                );
            } else {
                println!("{}", body);
            }
        }
    }
    Ok(())
}

fn cmd_count(store: &TreeStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = store.load()?;
    let count = count_tasks(&tree);
    if json {
        println!("{}", serde_json::json!({ "tasks": count }));
    } else {
        println!("{} tasks", count);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(store: &TreeStore, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let priority = match &args.priority {
        Some(p) => {
            Some(Priority::parse(p).ok_or_else(|| format!("invalid priority: {}", p))?)
        }
        None => None,
    };

    let mut tree = store.load()?;
    let id = node_ops::create_task(&mut tree, args.parent.as_deref())?;
    node_ops::rename(&mut tree, &id, &args.name);
    if let Some(p) = priority {
        node_ops::set_priority(&mut tree, &id, p)?;
    }
    store.save(&tree)?;
    println!("Added task {}", id);
    Ok(())
}

fn cmd_folder(store: &TreeStore, args: FolderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut tree = store.load()?;
    let id = node_ops::create_folder(&mut tree, args.parent.as_deref())?;
    node_ops::rename(&mut tree, &id, &args.name);
    store.save(&tree)?;
    println!("Added folder {}", id);
    Ok(())
}

fn cmd_rename(store: &TreeStore, args: RenameArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut tree = store.load()?;
    if node_ops::rename(&mut tree, &args.id, &args.name) {
        store.save(&tree)?;
        println!("Renamed {}", args.id);
    } else {
        println!("No change");
    }
    Ok(())
}

fn cmd_set_completed(
    store: &TreeStore,
    args: IdArgs,
    done: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tree = store.load()?;
    if node_ops::set_completed(&mut tree, &args.id, done)? {
        store.save(&tree)?;
        println!("{} {}", if done { "Completed" } else { "Reopened" }, args.id);
    } else {
        println!("No such node: {}", args.id);
    }
    Ok(())
}

fn cmd_priority(store: &TreeStore, args: PriorityArgs) -> Result<(), Box<dyn std::error::Error>> {
    let priority = Priority::parse(&args.priority)
        .ok_or_else(|| format!("invalid priority: {}", args.priority))?;
    let mut tree = store.load()?;
    if node_ops::set_priority(&mut tree, &args.id, priority)? {
        store.save(&tree)?;
        println!("Set {} to {}", args.id, priority.label());
    } else {
        println!("No such node: {}", args.id);
    }
    Ok(())
}

fn cmd_sort(store: &TreeStore, args: SortArgs) -> Result<(), Box<dyn std::error::Error>> {
    let key = SortKey::parse(&args.key).ok_or_else(|| format!("invalid sort key: {}", args.key))?;
    let mut tree = store.load()?;
    sort_tree(&mut tree, key);
    store.save(&tree)?;
    println!("Sorted by {}", key.label());
    Ok(())
}

fn cmd_delete(store: &TreeStore, args: IdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut tree = store.load()?;
    if node_ops::delete(&mut tree, &args.id) {
        store.save(&tree)?;
        println!("Deleted {}", args.id);
    } else {
        println!("No such node: {}", args.id);
    }
    Ok(())
}

fn cmd_export(store: &TreeStore, args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tree = store.load()?;
    let path = PathBuf::from(args.path.as_deref().unwrap_or(EXPORT_FILE));
    store.export(&tree, &path)?;
    println!("Exported to {}", path.display());
    Ok(())
}
