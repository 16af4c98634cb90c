use serde::{Deserialize, Serialize};

/// An activity log entry. Append-only from the client's point of view.
///
/// `kind` is open-ended: the server currently emits `log`, `decision`, and
/// `note`, but unknown values must still render (as the raw string), never
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub metadata: String,
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default)]
    pub created_at: String,
}

/// Event kinds the server is known to emit, for pickers and labels.
pub const KNOWN_EVENT_KINDS: [&str; 3] = ["log", "decision", "note"];

impl Event {
    /// Display label for the event kind; unknown kinds fall back to the raw string.
    pub fn kind_label(&self) -> &str {
        match self.kind.as_str() {
            "log" => "Log",
            "decision" => "Decision",
            "note" => "Note",
            other => other,
        }
    }
}

/// Body for POST /events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
}

/// Aggregate project summary from GET /status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total_tasks: u64,
    #[serde(default)]
    pub tasks_by_status: std::collections::HashMap<String, u64>,
    #[serde(default)]
    pub milestones: Vec<MilestoneInfo>,
    #[serde(default)]
    pub recent_events: Vec<Event>,
}

/// Per-milestone progress within the status summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneInfo {
    pub name: String,
    pub total: u64,
    pub done: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_kind_falls_back_to_raw_string() {
        let event: Event = serde_json::from_str(
            r#"{"id":1,"type":"deploy_hook","message":"m","metadata":"","task_id":null,"created_at":""}"#,
        )
        .unwrap();
        assert_eq!(event.kind_label(), "deploy_hook");
    }

    #[test]
    fn test_known_kind_label() {
        let event: Event = serde_json::from_str(
            r#"{"id":2,"type":"decision","message":"m","metadata":"","task_id":3,"created_at":""}"#,
        )
        .unwrap();
        assert_eq!(event.kind_label(), "Decision");
        assert_eq!(event.task_id, Some(3));
    }

    #[test]
    fn test_event_draft_omits_empty_kind() {
        let draft = EventDraft {
            kind: String::new(),
            message: "hello".into(),
            task_id: None,
        };
        assert_eq!(serde_json::to_string(&draft).unwrap(), "{\"message\":\"hello\"}");
    }
}
