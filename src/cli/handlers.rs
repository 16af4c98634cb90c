use std::io::Write;

use crate::api::ApiClient;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::config;
use crate::model::{EventDraft, Priority, TaskDraft, TaskPatch, TaskStatus, TaskType};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let server = config::resolve_server_url(cli.server.as_deref());
    let api = ApiClient::new(&server);

    match cli.command {
        None => unreachable!("main launches the TUI when no subcommand is given"),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&api, args, json),
            Commands::Show(args) => cmd_show(&api, args, json),
            Commands::Events(args) => cmd_events(&api, args, json),
            Commands::Status => cmd_status(&api, json),

            // Write commands
            Commands::Add(args) => cmd_add(&api, args, json),
            Commands::Edit(args) => cmd_edit(&api, args, json),
            Commands::Done(args) => cmd_done(&api, args, json),
            Commands::Delete(args) => cmd_delete(&api, args),
            Commands::Log(args) => cmd_log(&api, args, json),
            Commands::Order(args) => cmd_order(&api, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(api: &ApiClient, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Validate filter values locally so typos fail before the request
    if let Some(s) = &args.status {
        parse_status(s)?;
    }
    if let Some(s) = &args.priority {
        parse_priority(s)?;
    }
    if let Some(s) = &args.kind {
        parse_kind(s)?;
    }

    let query = crate::api::TaskQuery {
        status: args.status,
        milestone: args.milestone,
        priority: args.priority,
        kind: args.kind,
    };
    let tasks = api.list_tasks(&query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else if tasks.is_empty() {
        println!("no tasks");
    } else {
        for task in &tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_show(api: &ApiClient, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let task = api.get_task(args.id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        for line in format_task_detail(&task) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_events(
    api: &ApiClient,
    args: EventsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = match args.task {
        Some(id) => api.list_task_events(id)?,
        None => api.list_events(Some(args.limit))?,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else if events.is_empty() {
        println!("no events");
    } else {
        for event in &events {
            println!("{}", format_event_line(event));
        }
    }
    Ok(())
}

fn cmd_status(api: &ApiClient, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let status = api.get_status()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        for line in format_status(&status) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(api: &ApiClient, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let draft = TaskDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        status: args.status.as_deref().map(parse_status).transpose()?.unwrap_or_default(),
        milestone: args.milestone.unwrap_or_default(),
        priority: args.priority.as_deref().map(parse_priority).transpose()?.unwrap_or_default(),
        kind: args.kind.as_deref().map(parse_kind).transpose()?.unwrap_or_default(),
        legacy_id: String::new(),
    };
    let task = api.create_task(&draft)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("created {}: {}", task.ref_id, task.title);
    }
    Ok(())
}

fn cmd_edit(api: &ApiClient, args: EditArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let patch = TaskPatch {
        title: args.title,
        description: args.description,
        plan: args.plan,
        status: args.status.as_deref().map(parse_status).transpose()?,
        milestone: args.milestone,
        commit_hash: None,
        priority: args.priority.as_deref().map(parse_priority).transpose()?,
        kind: args.kind.as_deref().map(parse_kind).transpose()?,
        legacy_id: None,
    };
    if patch == TaskPatch::default() {
        return Err("nothing to change (see `td edit --help`)".into());
    }
    let task = api.update_task(args.id, &patch)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("updated {}", task.ref_id);
    }
    Ok(())
}

fn cmd_done(api: &ApiClient, args: DoneArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let task = api.update_task(args.id, &TaskPatch::status(TaskStatus::Done))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("done {}: {}", task.ref_id, task.title);
    }
    Ok(())
}

fn cmd_delete(api: &ApiClient, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let task = api.get_task(args.id)?;
    if !args.force && !confirm(&format!("delete {} \"{}\"?", task.ref_id, task.title))? {
        println!("cancelled");
        return Ok(());
    }
    api.delete_task(args.id)?;
    println!("deleted {}", task.ref_id);
    Ok(())
}

fn cmd_log(api: &ApiClient, args: LogArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let kind = args.kind.unwrap_or_else(|| "log".to_string());
    if !crate::model::KNOWN_EVENT_KINDS.contains(&kind.as_str()) {
        return Err(format!(
            "invalid event type '{}' ({})",
            kind,
            crate::model::KNOWN_EVENT_KINDS.join(", ")
        )
        .into());
    }
    let draft = EventDraft {
        kind,
        message: args.message,
        task_id: args.task,
    };
    let event = api.create_event(&draft)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        println!("logged event {}", event.id);
    }
    Ok(())
}

fn cmd_order(
    api: &ApiClient,
    args: OrderArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let order = if args.milestones.is_empty() {
        api.get_milestone_order()?
    } else {
        api.set_milestone_order(&args.milestones)?
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
    } else if order.is_empty() {
        println!("no saved order");
    } else {
        for (i, name) in order.iter().enumerate() {
            let shown = if name.is_empty() { "unassigned" } else { name.as_str() };
            println!("{:>3}. {}", i + 1, shown);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s).ok_or_else(|| {
        format!("invalid status '{}' (todo, in_planning, in_progress, done, blocked)", s)
    })
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s)
        .ok_or_else(|| format!("invalid priority '{}' (urgent, high, medium, low, none)", s))
}

fn parse_kind(s: &str) -> Result<TaskType, String> {
    TaskType::parse(s)
        .ok_or_else(|| format!("invalid type '{}' (bug, feature, improvement, chore, none)", s))
}

fn confirm(prompt: &str) -> Result<bool, std::io::Error> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
