use serde::{Deserialize, Serialize};

/// Workflow status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InPlanning,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    /// All statuses in board-column order
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Todo,
        TaskStatus::InPlanning,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Blocked,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InPlanning => "In Planning",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
            TaskStatus::Blocked => "Blocked",
        }
    }

    /// Wire value, as stored by the server
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InPlanning => "in_planning",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
        }
    }

    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in_planning" => Some(TaskStatus::InPlanning),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            "blocked" => Some(TaskStatus::Blocked),
            _ => None,
        }
    }

    /// Next status in the quick-cycle order
    pub fn next(self) -> TaskStatus {
        match self {
            TaskStatus::Todo => TaskStatus::InPlanning,
            TaskStatus::InPlanning => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Blocked,
            TaskStatus::Blocked => TaskStatus::Todo,
        }
    }
}

/// Task priority. The server stores "no priority" as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[serde(rename = "")]
    None,
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::None,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// Severity rank for sorting: urgent first, unset last
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::None => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::None => "None",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "" | "none" => Some(Priority::None),
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }
}

/// Task type/category. Unset is an empty string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    #[serde(rename = "")]
    None,
    Bug,
    Feature,
    Improvement,
    Chore,
}

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        TaskType::None,
        TaskType::Bug,
        TaskType::Feature,
        TaskType::Improvement,
        TaskType::Chore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskType::None => "None",
            TaskType::Bug => "Bug",
            TaskType::Feature => "Feature",
            TaskType::Improvement => "Improvement",
            TaskType::Chore => "Chore",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::None => "",
            TaskType::Bug => "bug",
            TaskType::Feature => "feature",
            TaskType::Improvement => "improvement",
            TaskType::Chore => "chore",
        }
    }

    pub fn parse(s: &str) -> Option<TaskType> {
        match s {
            "" | "none" => Some(TaskType::None),
            "bug" => Some(TaskType::Bug),
            "feature" => Some(TaskType::Feature),
            "improvement" => Some(TaskType::Improvement),
            "chore" => Some(TaskType::Chore),
            _ => None,
        }
    }
}

/// A task as returned by the server.
///
/// `ref_id` and the timestamps are server-assigned and never edited by the
/// client; they only change through a fresh fetch. Milestone is a free-text
/// label where the empty string means "unassigned". Timestamps are ISO-8601
/// strings, so lexicographic order matches chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub milestone: String,
    #[serde(default)]
    pub commit_hash: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "type", default)]
    pub kind: TaskType,
    #[serde(default)]
    pub ref_id: String,
    #[serde(default)]
    pub legacy_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A partial update: any subset of the client-editable fields.
///
/// Serializes to the PATCH request body (absent fields omitted) and doubles
/// as the local optimistic patch applied by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> TaskPatch {
        TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        }
    }

    pub fn milestone(milestone: impl Into<String>) -> TaskPatch {
        TaskPatch {
            milestone: Some(milestone.into()),
            ..TaskPatch::default()
        }
    }

    /// Merge this patch into a task, leaving absent fields untouched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(v) = &self.title {
            task.title = v.clone();
        }
        if let Some(v) = &self.description {
            task.description = v.clone();
        }
        if let Some(v) = &self.plan {
            task.plan = v.clone();
        }
        if let Some(v) = self.status {
            task.status = v;
        }
        if let Some(v) = &self.milestone {
            task.milestone = v.clone();
        }
        if let Some(v) = &self.commit_hash {
            task.commit_hash = v.clone();
        }
        if let Some(v) = self.priority {
            task.priority = v;
        }
        if let Some(v) = self.kind {
            task.kind = v;
        }
        if let Some(v) = &self.legacy_id {
            task.legacy_id = v.clone();
        }
    }
}

/// Fields for creating a new task. Only the title is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub milestone: String,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: TaskType,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub legacy_id: String,
}
