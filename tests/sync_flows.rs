//! End-to-end flows through the sync layer.
//!
//! Each test drives a `Session` the way the TUI event loop does: call the
//! mutation methods, drain the queued commands, and feed back the outcomes
//! a worker would produce. No network involved.

use pretty_assertions::assert_eq;
use taskdeck::model::{EventDraft, Priority, Task, TaskDraft, TaskPatch, TaskStatus, TaskType};
use taskdeck::sync::{Command, Drawer, DrawerTab, Outcome, Session};

fn task(id: i64, title: &str, milestone: &str) -> Task {
    Task {
        id,
        title: title.into(),
        description: String::new(),
        plan: String::new(),
        status: TaskStatus::Todo,
        milestone: milestone.into(),
        commit_hash: String::new(),
        priority: Priority::None,
        kind: TaskType::None,
        ref_id: format!("TD-{id}"),
        legacy_id: String::new(),
        created_at: "2024-03-01T00:00:00Z".into(),
        updated_at: "2024-03-01T00:00:00Z".into(),
    }
}

fn seeded_session() -> Session {
    let mut session = Session::new();
    session.apply(Outcome::Refreshed {
        tasks: vec![task(1, "wire codec", "v1"), task(2, "docs pass", "v2")],
        order: Some(vec!["v1".into(), "v2".into()]),
    });
    session
}

// ---------------------------------------------------------------------------
// Quick update: confirm and revert
// ---------------------------------------------------------------------------

#[test]
fn quick_update_confirmed_by_refetch() {
    let mut session = seeded_session();
    session.set_status(1, TaskStatus::InProgress);

    // local state moved immediately
    assert_eq!(session.store.get(1).unwrap().status, TaskStatus::InProgress);

    let cmds = session.take_commands();
    assert_eq!(cmds.len(), 1);
    let Command::QuickUpdate { id, .. } = &cmds[0] else {
        panic!("expected QuickUpdate, got {:?}", cmds[0]);
    };
    assert_eq!(*id, 1);

    // worker succeeds and refetches the list; server agrees
    let mut confirmed = task(1, "wire codec", "v1");
    confirmed.status = TaskStatus::InProgress;
    session.apply(Outcome::Refreshed {
        tasks: vec![confirmed, task(2, "docs pass", "v2")],
        order: None,
    });
    assert_eq!(session.store.get(1).unwrap().status, TaskStatus::InProgress);
    assert!(session.last_error.is_none());
}

#[test]
fn quick_update_reverted_by_refetch_on_failure() {
    let mut session = seeded_session();
    session.set_milestone(2, "v1");
    assert_eq!(session.store.get(2).unwrap().milestone, "v1");

    // worker reports the rejection, then refetches authoritative state
    session.apply(Outcome::MutationFailed("task not found".into()));
    session.apply(Outcome::Refreshed {
        tasks: vec![task(1, "wire codec", "v1"), task(2, "docs pass", "v2")],
        order: None,
    });

    assert_eq!(session.store.get(2).unwrap().milestone, "v2");
    assert_eq!(session.last_error.as_deref(), Some("task not found"));
}

#[test]
fn quick_update_mirrors_into_open_drawer() {
    let mut session = seeded_session();
    session.open_task(1);
    session.set_status(1, TaskStatus::Blocked);

    let Drawer::Viewing { task, .. } = &session.drawer else {
        panic!("drawer should be open");
    };
    assert_eq!(task.status, TaskStatus::Blocked);
}

// ---------------------------------------------------------------------------
// Targeted save: echoed row, no list reload
// ---------------------------------------------------------------------------

#[test]
fn save_applies_echoed_row() {
    let mut session = seeded_session();
    session.open_task(1);
    session.save_fields(
        1,
        TaskPatch {
            title: Some("wire codec v2".into()),
            ..TaskPatch::default()
        },
    );
    assert_eq!(session.store.get(1).unwrap().title, "wire codec v2");

    let cmds = session.take_commands();
    assert!(matches!(cmds[0], Command::SaveFields { id: 1, .. }));

    // the echoed row carries server-side edits the patch never sent
    let mut echoed = task(1, "wire codec v2", "v1");
    echoed.updated_at = "2024-03-02T10:00:00Z".into();
    session.apply(Outcome::TaskSaved(echoed));

    assert_eq!(session.store.get(1).unwrap().updated_at, "2024-03-02T10:00:00Z");
    let Drawer::Viewing { task, .. } = &session.drawer else {
        panic!("drawer should still be open");
    };
    assert_eq!(task.updated_at, "2024-03-02T10:00:00Z");
}

#[test]
fn echoed_row_ignored_when_another_task_is_open() {
    let mut session = seeded_session();
    session.save_fields(
        1,
        TaskPatch {
            title: Some("renamed".into()),
            ..TaskPatch::default()
        },
    );
    session.open_task(2);
    session.apply(Outcome::TaskSaved(task(1, "renamed", "v1")));

    // store updated, drawer untouched
    assert_eq!(session.store.get(1).unwrap().title, "renamed");
    assert_eq!(session.drawer.viewing_id(), Some(2));
}

// ---------------------------------------------------------------------------
// Create and delete
// ---------------------------------------------------------------------------

#[test]
fn create_flow_opens_drawer_on_success() {
    let mut session = seeded_session();
    session.open_new();

    let draft = TaskDraft {
        title: "new thing".into(),
        ..TaskDraft::default()
    };
    session.create_task(draft.clone());

    // no optimistic insert: the id is server-assigned
    assert_eq!(session.store.len(), 2);
    let cmds = session.take_commands();
    assert_eq!(cmds, vec![Command::Create(draft)]);

    session.apply(Outcome::Created(task(3, "new thing", "")));
    assert_eq!(session.drawer.viewing_id(), Some(3));
}

#[test]
fn create_failure_keeps_drawer_open_with_error() {
    let mut session = seeded_session();
    session.open_new();
    session.create_task(TaskDraft::default());
    session.apply(Outcome::CreateFailed("title is required".into()));

    let Drawer::Creating { error, .. } = &session.drawer else {
        panic!("drawer should stay in create mode");
    };
    assert_eq!(error.as_deref(), Some("title is required"));

    // retrying clears the stale error
    session.create_task(TaskDraft {
        title: "ok".into(),
        ..TaskDraft::default()
    });
    let Drawer::Creating { error, .. } = &session.drawer else {
        panic!("drawer should stay in create mode");
    };
    assert!(error.is_none());
}

#[test]
fn delete_closes_drawer_before_network_resolves() {
    let mut session = seeded_session();
    session.open_task(2);
    session.delete_task(2);

    assert!(session.drawer.is_closed());
    assert_eq!(session.take_commands(), vec![Command::Delete(2)]);

    // failure surfaces as a transient error; refetch restores the row
    session.apply(Outcome::DeleteFailed("conflict".into()));
    assert_eq!(session.last_error.as_deref(), Some("conflict"));
    assert!(session.drawer.is_closed());
}

// ---------------------------------------------------------------------------
// Milestone reorder
// ---------------------------------------------------------------------------

#[test]
fn reorder_is_optimistic_and_reverts_on_failure() {
    let mut session = seeded_session();
    assert_eq!(session.milestone_order(), vec!["v1".to_string(), "v2".to_string()]);

    session.move_milestone(0, 1);
    assert_eq!(session.milestone_order(), vec!["v2".to_string(), "v1".to_string()]);
    assert_eq!(
        session.take_commands(),
        vec![Command::PersistOrder(vec!["v2".into(), "v1".into()])]
    );

    // persistence fails; the worker re-fetches the last saved order
    session.apply(Outcome::MutationFailed("write failed".into()));
    session.apply(Outcome::OrderReverted(vec!["v1".into(), "v2".into()]));
    assert_eq!(session.milestone_order(), vec!["v1".to_string(), "v2".to_string()]);
}

#[test]
fn reorder_out_of_range_is_a_no_op() {
    let mut session = seeded_session();
    session.move_milestone(5, 0);
    assert!(session.take_commands().is_empty());
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

#[test]
fn activity_tab_fetches_lazily_and_once() {
    let mut session = seeded_session();
    session.open_task(1);

    session.set_drawer_tab(DrawerTab::Activity);
    assert_eq!(session.take_commands(), vec![Command::FetchTaskEvents(1)]);

    session.apply(Outcome::TaskEvents {
        task_id: 1,
        events: Vec::new(),
    });

    // switching away and back does not refetch
    session.set_drawer_tab(DrawerTab::Details);
    session.set_drawer_tab(DrawerTab::Activity);
    assert!(session.take_commands().is_empty());
}

#[test]
fn logging_against_open_task_refetches_its_events() {
    let mut session = seeded_session();
    session.open_task(1);
    session.log_event(EventDraft {
        kind: "log".into(),
        message: "hello".into(),
        task_id: Some(1),
    });
    session.take_commands();

    session.apply(Outcome::EventLogged(taskdeck::model::Event {
        id: 9,
        kind: "log".into(),
        message: "hello".into(),
        metadata: String::new(),
        task_id: Some(1),
        created_at: "2024-03-02T00:00:00Z".into(),
    }));
    assert_eq!(session.take_commands(), vec![Command::FetchTaskEvents(1)]);
}
