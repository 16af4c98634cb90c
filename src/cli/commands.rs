use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("[>] taskdeck v", env!("CARGO_PKG_VERSION"), " - terminal client for the ghist task server"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Server URL (default: config file, then http://127.0.0.1:4777)
    #[arg(short = 's', long = "server", global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Show task details
    Show(ShowArgs),
    /// Create a task
    Add(AddArgs),
    /// Update fields on a task
    Edit(EditArgs),
    /// Mark a task done (shortcut for edit <ID> --status done)
    Done(DoneArgs),
    /// Delete a task
    Delete(DeleteArgs),
    /// Show the activity feed, or one task's activity
    Events(EventsArgs),
    /// Record an activity event
    Log(LogArgs),
    /// Show the project status summary
    Status,
    /// Show or set the milestone order
    Order(OrderArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (todo, in_planning, in_progress, done, blocked)
    #[arg(long)]
    pub status: Option<String>,
    /// Filter by milestone name
    #[arg(long)]
    pub milestone: Option<String>,
    /// Filter by priority (urgent, high, medium, low)
    #[arg(long)]
    pub priority: Option<String>,
    /// Filter by type (bug, feature, improvement, chore)
    #[arg(long = "type")]
    pub kind: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task id
    pub id: i64,
}

#[derive(Args)]
pub struct EventsArgs {
    /// Limit to one task's activity
    #[arg(long)]
    pub task: Option<i64>,
    /// Maximum number of events to show
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Description text
    #[arg(long)]
    pub description: Option<String>,
    /// Initial status (default: todo)
    #[arg(long)]
    pub status: Option<String>,
    /// Milestone name
    #[arg(long)]
    pub milestone: Option<String>,
    /// Priority (urgent, high, medium, low)
    #[arg(long)]
    pub priority: Option<String>,
    /// Type (bug, feature, improvement, chore)
    #[arg(long = "type")]
    pub kind: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: i64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long)]
    pub description: Option<String>,
    /// New plan text
    #[arg(long)]
    pub plan: Option<String>,
    /// New status
    #[arg(long)]
    pub status: Option<String>,
    /// New milestone ("" clears it)
    #[arg(long)]
    pub milestone: Option<String>,
    /// New priority ("" clears it)
    #[arg(long)]
    pub priority: Option<String>,
    /// New type ("" clears it)
    #[arg(long = "type")]
    pub kind: Option<String>,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Task id
    pub id: i64,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task id
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct LogArgs {
    /// Event message
    pub message: String,
    /// Event kind (log, decision, note; default: log)
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Attach to a task
    #[arg(long)]
    pub task: Option<i64>,
}

#[derive(Args)]
pub struct OrderArgs {
    /// New order: milestone names first to last (empty: show current)
    pub milestones: Vec<String>,
}
