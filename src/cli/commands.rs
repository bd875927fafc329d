use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tt", about = concat!("tasktree v", env!("CARGO_PKG_VERSION"), " - tasks in a tree"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the task tree
    List,
    /// Show a task's content
    Show(ShowArgs),
    /// Count tasks (folders excluded)
    Count,
    /// Add a task
    Add(AddArgs),
    /// Add a folder
    Folder(FolderArgs),
    /// Rename a task or folder
    Rename(RenameArgs),
    /// Mark a task complete
    Done(IdArgs),
    /// Mark a task incomplete
    Undone(IdArgs),
    /// Set a task's priority
    Priority(PriorityArgs),
    /// Sort every folder's children by a key
    Sort(SortArgs),
    /// Delete a task or folder (with its subtree)
    Delete(IdArgs),
    /// Export the tree as pretty-printed JSON
    Export(ExportArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ShowArgs {
    /// Node id to show
    pub id: String,
    /// Render the markdown content as HTML
    #[arg(long)]
    pub html: bool,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
    /// Parent folder id (default: root)
    #[arg(long)]
    pub parent: Option<String>,
    /// Priority: high, medium or low (default: medium)
    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct FolderArgs {
    /// Folder name
    pub name: String,
    /// Parent folder id (default: root)
    #[arg(long)]
    pub parent: Option<String>,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Node id
    pub id: String,
    /// New name (blank input leaves the name unchanged)
    pub name: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Node id
    pub id: String,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Task id
    pub id: String,
    /// high, medium or low
    pub priority: String,
}

#[derive(Args)]
pub struct SortArgs {
    /// Sort key: name, created or priority
    pub key: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output path (default: tasks-export.json)
    pub path: Option<String>,
}
