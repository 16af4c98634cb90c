use crate::model::{Event, MilestoneInfo, StatusSummary, Task};
use crate::util::time::short_timestamp;

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let milestone = if task.milestone.is_empty() {
        String::new()
    } else {
        format!(" @{}", task.milestone)
    };
    format!(
        "{:<8} {:<12} {:<7} {}{}",
        task.ref_id,
        task.status.label(),
        task.priority.as_str(),
        task.title,
        milestone,
    )
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("{} {}", task.ref_id, task.title));
    lines.push(format!("status:    {}", task.status.label()));
    lines.push(format!("priority:  {}", task.priority.label()));
    lines.push(format!("type:      {}", task.kind.label()));
    if !task.milestone.is_empty() {
        lines.push(format!("milestone: {}", task.milestone));
    }
    if !task.commit_hash.is_empty() {
        lines.push(format!("commit:    {}", task.commit_hash));
    }
    if !task.created_at.is_empty() {
        lines.push(format!("created:   {}", short_timestamp(&task.created_at)));
    }
    if !task.updated_at.is_empty() {
        lines.push(format!("updated:   {}", short_timestamp(&task.updated_at)));
    }
    if !task.description.is_empty() {
        lines.push(String::new());
        for text in task.description.lines() {
            lines.push(text.to_string());
        }
    }
    if !task.plan.is_empty() {
        lines.push(String::new());
        lines.push("plan:".to_string());
        for text in task.plan.lines() {
            lines.push(format!("  {}", text));
        }
    }
    lines
}

/// Format an event as a one-line summary
pub fn format_event_line(event: &Event) -> String {
    let scope = event
        .task_id
        .map(|id| format!(" (task {})", id))
        .unwrap_or_default();
    format!(
        "{:<17} {:<8} {}{}",
        short_timestamp(&event.created_at),
        event.kind_label(),
        event.message,
        scope,
    )
}

/// Format the project status summary
pub fn format_status(status: &StatusSummary) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("{} tasks", status.total_tasks));

    let mut by_status: Vec<(&String, &u64)> = status.tasks_by_status.iter().collect();
    by_status.sort_by(|a, b| a.0.cmp(b.0));
    for (name, count) in by_status {
        lines.push(format!("  {:<12} {}", name, count));
    }

    if !status.milestones.is_empty() {
        lines.push(String::new());
        lines.push("milestones:".to_string());
        for m in &status.milestones {
            lines.push(format_milestone_line(m));
        }
    }
    lines
}

fn format_milestone_line(m: &MilestoneInfo) -> String {
    format!("  {:<20} {}/{} done", m.name, m.done, m.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TaskStatus, TaskType};
    use pretty_assertions::assert_eq;

    fn sample_task() -> Task {
        Task {
            id: 7,
            title: "Ship export".to_string(),
            description: String::new(),
            plan: String::new(),
            status: TaskStatus::InProgress,
            milestone: "v1".to_string(),
            commit_hash: String::new(),
            priority: Priority::High,
            kind: TaskType::Feature,
            ref_id: "T-7".to_string(),
            legacy_id: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn task_line_includes_milestone() {
        let line = format_task_line(&sample_task());
        assert!(line.contains("T-7"));
        assert!(line.contains("Ship export"));
        assert!(line.contains("@v1"));
    }

    #[test]
    fn task_detail_skips_empty_fields() {
        let lines = format_task_detail(&sample_task());
        assert_eq!(lines[0], "T-7 Ship export");
        assert!(!lines.iter().any(|l| l.starts_with("commit:")));
        assert!(!lines.iter().any(|l| l == "plan:"));
    }

    #[test]
    fn event_line_marks_task_scope() {
        let event = Event {
            id: 1,
            kind: "decision".to_string(),
            message: "use sqlite".to_string(),
            metadata: String::new(),
            task_id: Some(7),
            created_at: "2026-01-02T03:04:05Z".to_string(),
        };
        let line = format_event_line(&event);
        assert!(line.contains("Decision"));
        assert!(line.contains("(task 7)"));
    }
}
