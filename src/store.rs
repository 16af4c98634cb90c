use indexmap::IndexMap;

use crate::model::{Task, TaskPatch};

/// The client-side cache of all tasks, keyed by id.
///
/// Holds the last-known-good snapshot from the server. Iteration order is
/// the server's fetch order, which view derivation relies on as the input
/// order for stable sorting. All operations are total: patching an absent
/// id is a silent no-op, since a stale edit racing a delete must not
/// resurrect the task or crash.
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: IndexMap<i64, Task>,
}

impl TaskStore {
    pub fn new() -> TaskStore {
        TaskStore::default()
    }

    /// Atomically replace the whole collection with a fresh fetch.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks.into_iter().map(|t| (t.id, t)).collect();
    }

    /// Merge a partial update into the task with the given id, if present.
    pub fn patch_one(&mut self, id: i64, patch: &TaskPatch) {
        if let Some(task) = self.tasks.get_mut(&id) {
            patch.apply_to(task);
        }
    }

    /// Replace a single task with its canonical server-returned row.
    /// No-op if the task is no longer in the store.
    pub fn put_one(&mut self, task: Task) {
        if let Some(slot) = self.tasks.get_mut(&task.id) {
            *slot = task;
        }
    }

    pub fn remove_one(&mut self, id: i64) {
        self.tasks.shift_remove(&id);
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.tasks.contains_key(&id)
    }

    /// All tasks in fetch order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use pretty_assertions::assert_eq;

    fn task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.into(),
            description: String::new(),
            plan: String::new(),
            status: TaskStatus::Todo,
            milestone: String::new(),
            commit_hash: String::new(),
            priority: Default::default(),
            kind: Default::default(),
            ref_id: format!("TD-{id}"),
            legacy_id: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_replace_all_keeps_fetch_order() {
        let mut store = TaskStore::new();
        store.replace_all(vec![task(3, "c"), task(1, "a"), task(2, "b")]);
        let ids: Vec<i64> = store.tasks().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_patch_one_merges() {
        let mut store = TaskStore::new();
        store.replace_all(vec![task(1, "a")]);
        store.patch_one(1, &TaskPatch::status(TaskStatus::Done));
        assert_eq!(store.get(1).unwrap().status, TaskStatus::Done);
        assert_eq!(store.get(1).unwrap().title, "a");
    }

    #[test]
    fn test_patch_absent_id_is_noop() {
        let mut store = TaskStore::new();
        store.replace_all(vec![task(1, "a")]);
        store.patch_one(99, &TaskPatch::status(TaskStatus::Done));
        assert_eq!(store.len(), 1);
        assert!(store.get(99).is_none());
    }

    #[test]
    fn test_put_one_does_not_resurrect() {
        let mut store = TaskStore::new();
        store.replace_all(vec![task(1, "a")]);
        store.put_one(task(2, "ghost"));
        assert!(store.get(2).is_none());

        let mut updated = task(1, "renamed");
        updated.status = TaskStatus::Blocked;
        store.put_one(updated);
        assert_eq!(store.get(1).unwrap().title, "renamed");
    }

    #[test]
    fn test_remove_one() {
        let mut store = TaskStore::new();
        store.replace_all(vec![task(1, "a"), task(2, "b")]);
        store.remove_one(1);
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
        // removing again is a no-op
        store.remove_one(1);
        assert_eq!(store.len(), 1);
    }
}
