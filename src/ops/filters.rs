use std::collections::HashSet;

use crate::model::{Priority, Task, TaskType};
use crate::ops::milestones;

/// How the tasks view is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Board,
    Plan,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::List => "List",
            ViewMode::Board => "Board",
            ViewMode::Plan => "Plan",
        }
    }
}

/// Active sort option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Newest,
    Updated,
    Priority,
    /// Ascending `str` order; byte-wise, not locale-collated
    Title,
}

impl SortBy {
    pub fn label(self) -> &'static str {
        match self {
            SortBy::Newest => "Newest",
            SortBy::Updated => "Updated",
            SortBy::Priority => "Priority",
            SortBy::Title => "Title",
        }
    }

    /// Next option in the cycle order, for the toolbar key
    pub fn next(self) -> SortBy {
        match self {
            SortBy::Newest => SortBy::Updated,
            SortBy::Updated => SortBy::Priority,
            SortBy::Priority => SortBy::Title,
            SortBy::Title => SortBy::Newest,
        }
    }
}

/// Ephemeral filter/sort/grouping selections. Never persisted.
///
/// `priority` / `kind` of `None` mean "all"; an empty `milestones` set means
/// no milestone filter is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewPrefs {
    pub mode: ViewMode,
    pub priority: Option<Priority>,
    pub kind: Option<TaskType>,
    pub search: String,
    pub sort: SortBy,
    pub milestones: HashSet<String>,
}

impl ViewPrefs {
    /// Toggle a milestone in the filter set.
    pub fn toggle_milestone(&mut self, milestone: &str) {
        if !self.milestones.remove(milestone) {
            self.milestones.insert(milestone.to_string());
        }
    }
}

/// Derive the ordered, filtered task sequence for rendering.
///
/// Pure: no side effects, deterministic for identical inputs. The pipeline
/// order is part of the contract: priority filter, then type, then search,
/// then milestone membership, then a stable sort.
pub fn derive<'a>(tasks: impl IntoIterator<Item = &'a Task>, prefs: &ViewPrefs) -> Vec<&'a Task> {
    let mut result: Vec<&Task> = tasks.into_iter().collect();

    if let Some(p) = prefs.priority {
        result.retain(|t| t.priority == p);
    }
    if let Some(k) = prefs.kind {
        result.retain(|t| t.kind == k);
    }
    let query = prefs.search.trim().to_lowercase();
    if !query.is_empty() {
        result.retain(|t| {
            t.title.to_lowercase().contains(&query)
                || t.description.to_lowercase().contains(&query)
                || t.plan.to_lowercase().contains(&query)
        });
    }
    if !prefs.milestones.is_empty() {
        result.retain(|t| prefs.milestones.contains(t.milestone.as_str()));
    }

    // sort_by is stable: ties keep their fetch order, so re-renders don't jitter
    match prefs.sort {
        SortBy::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Updated => result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortBy::Priority => result.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank())),
        SortBy::Title => result.sort_by(|a, b| a.title.cmp(&b.title)),
    }

    result
}

/// Partition an already-derived sequence into (milestone, tasks) groups for
/// the plan view. Groups follow the reconciled milestone order; the
/// unassigned group ("") is always last.
pub fn group_by_milestone<'a>(
    tasks: &[&'a Task],
    saved_order: &[String],
) -> Vec<(String, Vec<&'a Task>)> {
    let present = milestones::observed(tasks.iter().copied());
    let order = milestones::order_milestones(&present, saved_order);

    order
        .into_iter()
        .map(|name| {
            let group: Vec<&Task> = tasks.iter().filter(|t| t.milestone == name).copied().collect();
            (name, group)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskStatus, TaskType};
    use pretty_assertions::assert_eq;

    fn task(id: i64, title: &str, priority: Priority, created_at: &str) -> Task {
        Task {
            id,
            title: title.into(),
            description: String::new(),
            plan: String::new(),
            status: TaskStatus::Todo,
            milestone: String::new(),
            commit_hash: String::new(),
            priority,
            kind: TaskType::None,
            ref_id: format!("TD-{id}"),
            legacy_id: String::new(),
            created_at: created_at.into(),
            updated_at: created_at.into(),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Fix login", Priority::High, "2024-01-01"),
            task(2, "Add export", Priority::Low, "2024-02-01"),
        ]
    }

    #[test]
    fn test_derive_is_deterministic() {
        let tasks = sample();
        let prefs = ViewPrefs {
            sort: SortBy::Priority,
            ..ViewPrefs::default()
        };
        let a: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        let b: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_priority_sort_scenario() {
        let tasks = sample();
        let prefs = ViewPrefs {
            sort: SortBy::Priority,
            ..ViewPrefs::default()
        };
        let ids: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_newest_sort_scenario() {
        let tasks = sample();
        let prefs = ViewPrefs {
            sort: SortBy::Newest,
            ..ViewPrefs::default()
        };
        let ids: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_search_matches_any_text_field() {
        let mut tasks = sample();
        tasks[0].plan = "ship the CSV Export path".into();
        let prefs = ViewPrefs {
            search: "export".into(),
            ..ViewPrefs::default()
        };
        // case-insensitive, matches title of 2 and plan of 1
        let ids: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);

        let prefs = ViewPrefs {
            search: "login".into(),
            ..ViewPrefs::default()
        };
        let ids: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_search_only_scenario() {
        let tasks = sample();
        let prefs = ViewPrefs {
            search: "export".into(),
            sort: SortBy::Newest,
            ..ViewPrefs::default()
        };
        let ids: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let mut tasks = sample();
        tasks[0].kind = TaskType::Bug;
        tasks[1].kind = TaskType::Bug;
        let prefs = ViewPrefs {
            kind: Some(TaskType::Bug),
            priority: Some(Priority::High),
            ..ViewPrefs::default()
        };
        let both = derive(&tasks, &prefs);
        let kind_only = derive(
            &tasks,
            &ViewPrefs {
                kind: Some(TaskType::Bug),
                ..ViewPrefs::default()
            },
        );
        assert!(both.iter().all(|t| kind_only.contains(t)));
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, 1);
    }

    #[test]
    fn test_milestone_filter_empty_set_shows_all() {
        let mut tasks = sample();
        tasks[0].milestone = "v1".into();
        let prefs = ViewPrefs::default();
        assert_eq!(derive(&tasks, &prefs).len(), 2);

        let mut prefs = ViewPrefs::default();
        prefs.toggle_milestone("v1");
        let ids: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);

        // the empty string selects the unassigned bucket
        let mut prefs = ViewPrefs::default();
        prefs.toggle_milestone("");
        let ids: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_title_sort_is_stable_for_equal_keys() {
        let mut tasks = sample();
        tasks[0].title = "Same".into();
        tasks[1].title = "Same".into();
        let prefs = ViewPrefs {
            sort: SortBy::Title,
            ..ViewPrefs::default()
        };
        let ids: Vec<i64> = derive(&tasks, &prefs).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_group_by_milestone_orders_groups() {
        let mut tasks = sample();
        tasks[0].milestone = "v2".into();
        tasks.push(task(3, "Polish", Priority::None, "2024-03-01"));
        tasks[2].milestone = "v3".into();

        let derived = derive(&tasks, &ViewPrefs::default());
        let saved = vec!["v1".to_string(), "v2".to_string()];
        let groups = group_by_milestone(&derived, &saved);
        let names: Vec<&str> = groups.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["v2", "v3", ""]);
        // the unassigned group holds task 2
        assert_eq!(groups[2].1[0].id, 2);
    }
}
