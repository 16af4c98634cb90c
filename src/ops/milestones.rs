use crate::model::Task;

/// Distinct milestone values across a task sequence, in first-seen order.
pub fn observed<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<String> {
    let mut seen = Vec::new();
    for task in tasks {
        if !seen.iter().any(|m| m == &task.milestone) {
            seen.push(task.milestone.clone());
        }
    }
    seen
}

/// Merge the persisted explicit order with the currently-observed milestone
/// set into a stable total order:
///
/// 1. saved entries that still occur, in saved order;
/// 2. observed-but-unsaved entries (excluding ""), alphabetical;
/// 3. the unassigned value ("") last, if observed.
///
/// Idempotent: reconciling an already-reconciled list changes nothing.
pub fn order_milestones(present: &[String], saved: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::with_capacity(present.len());
    for m in saved {
        // "" never takes a saved slot; it is pinned to the end below
        if !m.is_empty() && present.contains(m) && !ordered.contains(m) {
            ordered.push(m.clone());
        }
    }

    let mut remaining: Vec<String> = present
        .iter()
        .filter(|m| !saved.contains(m) && !m.is_empty())
        .cloned()
        .collect();
    remaining.sort();
    ordered.extend(remaining);

    if present.iter().any(|m| m.is_empty()) {
        ordered.push(String::new());
    }
    ordered
}

/// Move the element at `from` to position `to`, returning the new order.
///
/// This is the whole input contract for drag reordering: the UI reduces a
/// gesture to a discrete (from, to) pair. Out-of-range indices return the
/// input unchanged.
pub fn move_item(order: &[String], from: usize, to: usize) -> Vec<String> {
    let mut next = order.to_vec();
    if from >= next.len() || to >= next.len() {
        return next;
    }
    let item = next.remove(from);
    next.insert(to, item);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_scenario() {
        // saved ["v1","v2"], observed {"v2","v3",""} -> ["v2","v3",""]
        let present = strings(&["v2", "v3", ""]);
        let saved = strings(&["v1", "v2"]);
        assert_eq!(order_milestones(&present, &saved), strings(&["v2", "v3", ""]));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let present = strings(&["beta", "alpha", "", "v2"]);
        let saved = strings(&["v2", "zeta"]);
        let once = order_milestones(&present, &saved);
        let twice = order_milestones(&once, &saved);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unassigned_always_last() {
        // even when "" appears in the saved order, it stays last
        let present = strings(&["", "v1"]);
        let saved = strings(&["", "v1"]);
        let ordered = order_milestones(&present, &saved);
        assert_eq!(ordered.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_new_milestones_sort_alphabetically() {
        let present = strings(&["zebra", "apple", "v1"]);
        let saved = strings(&["v1"]);
        assert_eq!(
            order_milestones(&present, &saved),
            strings(&["v1", "apple", "zebra"])
        );
    }

    #[test]
    fn test_saved_entries_keep_relative_order() {
        let present = strings(&["a", "b", "c"]);
        let saved = strings(&["c", "a"]);
        assert_eq!(order_milestones(&present, &saved), strings(&["c", "a", "b"]));
    }

    #[test]
    fn test_observed_first_seen_order() {
        use crate::model::{Priority, TaskStatus, TaskType};
        let mk = |id: i64, milestone: &str| Task {
            id,
            title: String::new(),
            description: String::new(),
            plan: String::new(),
            status: TaskStatus::Todo,
            milestone: milestone.into(),
            commit_hash: String::new(),
            priority: Priority::None,
            kind: TaskType::None,
            ref_id: String::new(),
            legacy_id: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        let tasks = vec![mk(1, "v2"), mk(2, "v1"), mk(3, "v2"), mk(4, "")];
        assert_eq!(observed(&tasks), strings(&["v2", "v1", ""]));
    }

    #[test]
    fn test_move_item_splice() {
        let order = strings(&["a", "b", "c", "d"]);
        assert_eq!(move_item(&order, 0, 2), strings(&["b", "c", "a", "d"]));
        assert_eq!(move_item(&order, 3, 0), strings(&["d", "a", "b", "c"]));
        // out of range is a no-op
        assert_eq!(move_item(&order, 9, 0), order);
    }
}
