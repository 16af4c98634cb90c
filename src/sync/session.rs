use crate::api::ServerConfig;
use crate::model::{Event, EventDraft, Task, TaskDraft, TaskPatch, TaskStatus};
use crate::ops::milestones;
use crate::store::TaskStore;

/// Tabs inside the task drawer. Always reset to Details on open/switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerTab {
    #[default]
    Details,
    Plan,
    Activity,
}

impl DrawerTab {
    pub fn next(self) -> DrawerTab {
        match self {
            DrawerTab::Details => DrawerTab::Plan,
            DrawerTab::Plan => DrawerTab::Activity,
            DrawerTab::Activity => DrawerTab::Details,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrawerTab::Details => "Details",
            DrawerTab::Plan => "Plan",
            DrawerTab::Activity => "Activity",
        }
    }
}

/// The drawer/selection state machine: closed, viewing one task, or
/// composing a new one. Purely local UI state; a consumer of
/// reconciliation, never a participant.
#[derive(Debug, Clone, Default)]
pub enum Drawer {
    #[default]
    Closed,
    Viewing {
        /// Working copy of the open task; optimistic patches mirror into it
        task: Task,
        tab: DrawerTab,
        /// Task-scoped activity, fetched lazily when the tab is opened
        events: Vec<Event>,
        events_loaded: bool,
    },
    Creating {
        draft: TaskDraft,
        /// Create failures propagate to the caller: shown here, drawer stays open
        error: Option<String>,
    },
}

impl Drawer {
    /// Id of the task currently open in view mode, if any.
    pub fn viewing_id(&self) -> Option<i64> {
        match self {
            Drawer::Viewing { task, .. } => Some(task.id),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Drawer::Closed)
    }
}

/// A network operation for the sync worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// The single reconciliation entry point: fetch tasks + milestone order
    Refresh,
    FetchConfig,
    /// PATCH then re-fetch the list regardless of outcome (confirm or revert)
    QuickUpdate { id: i64, patch: TaskPatch },
    /// PATCH whose success path applies the echoed row without a list reload
    SaveFields { id: i64, patch: TaskPatch },
    Create(TaskDraft),
    Delete(i64),
    PersistOrder(Vec<String>),
    FetchTaskEvents(i64),
    FetchFeed { limit: Option<u32> },
    LogEvent(EventDraft),
}

/// Result of a network operation, fed back into `Session::apply`.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Fresh authoritative state. `order` is None when only the task list
    /// could be fetched; the current order is kept in that case.
    Refreshed {
        tasks: Vec<Task>,
        order: Option<Vec<String>>,
    },
    RefreshFailed(String),
    Config(ServerConfig),
    /// A non-blocking mutation failure; state snaps back via refetch
    MutationFailed(String),
    /// Canonical row echoed by a successful targeted save
    TaskSaved(Task),
    Created(Task),
    CreateFailed(String),
    DeleteFailed(String),
    OrderPersisted(Vec<String>),
    /// The last-persisted order, re-fetched after a failed reorder
    OrderReverted(Vec<String>),
    TaskEvents { task_id: i64, events: Vec<Event> },
    Feed(Vec<Event>),
    EventLogged(Event),
}

/// Client-side state synchronization: the entity store, the persisted
/// milestone order, and the drawer, plus the optimistic mutation logic.
///
/// Session methods apply local changes immediately and queue commands for
/// the network worker; `apply` folds worker outcomes back in, confirming or
/// reverting. Everything here runs on the UI thread; the worker owns all
/// I/O, so the whole controller is testable by feeding outcomes by hand.
#[derive(Debug, Default)]
pub struct Session {
    pub store: TaskStore,
    /// The persisted explicit milestone order, as last fetched or
    /// optimistically applied
    pub saved_order: Vec<String>,
    pub drawer: Drawer,
    pub repo_url: String,
    /// Global activity feed (activity view)
    pub feed: Vec<Event>,
    /// Transient, non-blocking error for the status row
    pub last_error: Option<String>,
    pending: Vec<Command>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Drain queued commands for the worker. Called once per tick.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    // -----------------------------------------------------------------
    // Reconciliation
    // -----------------------------------------------------------------

    pub fn refresh(&mut self) {
        self.pending.push(Command::Refresh);
    }

    pub fn load_config(&mut self) {
        self.pending.push(Command::FetchConfig);
    }

    /// The milestone order as rendered: persisted order reconciled against
    /// the milestones currently observed across tasks.
    pub fn milestone_order(&self) -> Vec<String> {
        let present = milestones::observed(self.store.tasks());
        milestones::order_milestones(&present, &self.saved_order)
    }

    // -----------------------------------------------------------------
    // Optimistic mutations
    // -----------------------------------------------------------------

    /// Quick status change: local patch now, confirm-or-revert by refetch.
    pub fn set_status(&mut self, id: i64, status: TaskStatus) {
        self.quick_update(id, TaskPatch::status(status));
    }

    /// Quick milestone move (board/plan card drop).
    pub fn set_milestone(&mut self, id: i64, milestone: &str) {
        self.quick_update(id, TaskPatch::milestone(milestone));
    }

    fn quick_update(&mut self, id: i64, patch: TaskPatch) {
        self.store.patch_one(id, &patch);
        self.mirror_into_drawer(id, &patch);
        self.pending.push(Command::QuickUpdate { id, patch });
    }

    /// Field save from the drawer: optimistic patch; success applies the
    /// server-echoed row, failure reverts via full refetch.
    pub fn save_fields(&mut self, id: i64, patch: TaskPatch) {
        self.store.patch_one(id, &patch);
        self.mirror_into_drawer(id, &patch);
        self.pending.push(Command::SaveFields { id, patch });
    }

    /// No optimistic insert: the id is server-assigned. The drawer stays in
    /// create mode until the worker confirms.
    pub fn create_task(&mut self, draft: TaskDraft) {
        if let Drawer::Creating { error, .. } = &mut self.drawer {
            *error = None;
        }
        self.pending.push(Command::Create(draft));
    }

    /// Delete: the drawer closes at initiation, before the network resolves.
    pub fn delete_task(&mut self, id: i64) {
        if self.drawer.viewing_id() == Some(id) {
            self.drawer = Drawer::Closed;
        }
        self.pending.push(Command::Delete(id));
    }

    /// Apply a full explicit order optimistically and persist it.
    pub fn set_milestone_order(&mut self, order: Vec<String>) {
        self.saved_order = order.clone();
        self.pending.push(Command::PersistOrder(order));
    }

    /// Reorder the reconciled milestone order by moving index `from` to `to`.
    pub fn move_milestone(&mut self, from: usize, to: usize) {
        let order = self.milestone_order();
        let next = milestones::move_item(&order, from, to);
        if next != order {
            self.set_milestone_order(next);
        }
    }

    /// Reorder by name: move `name` into the slot currently held by
    /// `neighbor`. Views whose visible groups are a filtered subset of the
    /// full order must use this instead of raw indices, so a hidden
    /// milestone between the two can never make a key move the wrong one.
    /// Unknown names are a no-op.
    pub fn move_milestone_named(&mut self, name: &str, neighbor: &str) {
        let order = self.milestone_order();
        if let Some(from) = order.iter().position(|m| m == name)
            && let Some(to) = order.iter().position(|m| m == neighbor)
        {
            self.move_milestone(from, to);
        }
    }

    pub fn log_event(&mut self, draft: EventDraft) {
        self.pending.push(Command::LogEvent(draft));
    }

    pub fn load_feed(&mut self, limit: Option<u32>) {
        self.pending.push(Command::FetchFeed { limit });
    }

    // -----------------------------------------------------------------
    // Drawer transitions
    // -----------------------------------------------------------------

    /// Open a task in view mode. Tab resets to Details.
    pub fn open_task(&mut self, id: i64) {
        if let Some(task) = self.store.get(id) {
            self.drawer = Drawer::Viewing {
                task: task.clone(),
                tab: DrawerTab::default(),
                events: Vec::new(),
                events_loaded: false,
            };
        }
    }

    pub fn open_new(&mut self) {
        self.drawer = Drawer::Creating {
            draft: TaskDraft::default(),
            error: None,
        };
    }

    pub fn close_drawer(&mut self) {
        self.drawer = Drawer::Closed;
    }

    /// Switch drawer tab; entering Activity lazily fetches task events.
    pub fn set_drawer_tab(&mut self, new_tab: DrawerTab) {
        if let Drawer::Viewing {
            task,
            tab,
            events_loaded,
            ..
        } = &mut self.drawer
        {
            *tab = new_tab;
            if new_tab == DrawerTab::Activity && !*events_loaded {
                self.pending.push(Command::FetchTaskEvents(task.id));
            }
        }
    }

    // -----------------------------------------------------------------
    // Outcome application
    // -----------------------------------------------------------------

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Refreshed { tasks, order } => {
                self.store.replace_all(tasks);
                if let Some(order) = order {
                    self.saved_order = order;
                }
            }
            Outcome::RefreshFailed(msg) => {
                self.last_error = Some(msg);
            }
            Outcome::Config(cfg) => {
                self.repo_url = cfg.github_repo_url;
            }
            Outcome::MutationFailed(msg) => {
                self.last_error = Some(msg);
            }
            Outcome::TaskSaved(task) => {
                self.store.put_one(task.clone());
                // re-check: the open entity may have changed mid-flight
                if self.drawer.viewing_id() == Some(task.id)
                    && let Drawer::Viewing { task: open, .. } = &mut self.drawer
                {
                    *open = task;
                }
            }
            Outcome::Created(task) => {
                self.drawer = Drawer::Viewing {
                    task,
                    tab: DrawerTab::default(),
                    events: Vec::new(),
                    events_loaded: false,
                };
            }
            Outcome::CreateFailed(msg) => {
                if let Drawer::Creating { error, .. } = &mut self.drawer {
                    *error = Some(msg.clone());
                }
                self.last_error = Some(msg);
            }
            Outcome::DeleteFailed(msg) => {
                self.last_error = Some(msg);
            }
            Outcome::OrderPersisted(order) | Outcome::OrderReverted(order) => {
                self.saved_order = order;
            }
            Outcome::TaskEvents { task_id, events } => {
                if let Drawer::Viewing {
                    task,
                    events: slot,
                    events_loaded,
                    ..
                } = &mut self.drawer
                    && task.id == task_id
                {
                    *slot = events;
                    *events_loaded = true;
                }
            }
            Outcome::Feed(events) => {
                self.feed = events;
            }
            Outcome::EventLogged(event) => {
                // follow-up fetch so the visible log shows the new entry
                match event.task_id {
                    Some(id) if self.drawer.viewing_id() == Some(id) => {
                        self.pending.push(Command::FetchTaskEvents(id));
                    }
                    _ => self.pending.push(Command::FetchFeed { limit: None }),
                }
            }
        }
    }

    /// Mirror a patch into the drawer's working copy, but only if the
    /// patched task is still the open one.
    fn mirror_into_drawer(&mut self, id: i64, patch: &TaskPatch) {
        if let Drawer::Viewing { task, .. } = &mut self.drawer
            && task.id == id
        {
            patch.apply_to(task);
        }
    }
}
