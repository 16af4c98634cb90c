use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::api::{ApiClient, TaskQuery};
use crate::sync::session::{Command, Outcome};

/// Spawn the network worker: receives commands from the UI thread, performs
/// the gateway calls, and reports outcomes back over the channel.
///
/// The confirm/revert policy lives here: quick updates re-fetch the full
/// list on success *and* failure, targeted saves apply the echoed row and
/// only re-fetch on failure, and a failed reorder re-fetches the persisted
/// order. The worker exits when the command channel closes.
pub fn spawn(api: ApiClient, commands: Receiver<Command>, outcomes: Sender<Outcome>) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = commands.recv() {
            if run_command(&api, cmd, &outcomes).is_err() {
                return; // UI side hung up
            }
        }
    })
}

type SendResult = Result<(), std::sync::mpsc::SendError<Outcome>>;

fn run_command(api: &ApiClient, cmd: Command, out: &Sender<Outcome>) -> SendResult {
    match cmd {
        Command::Refresh => refresh(api, out),

        Command::FetchConfig => match api.get_config() {
            Ok(cfg) => out.send(Outcome::Config(cfg)),
            // cosmetic only (repo link); a failure is tolerated silently
            Err(_) => Ok(()),
        },

        Command::QuickUpdate { id, patch } => {
            if let Err(e) = api.update_task(id, &patch) {
                out.send(Outcome::MutationFailed(e.to_string()))?;
            }
            // success and failure both resolve against fresh truth
            refresh_tasks_only(api, out)
        }

        Command::SaveFields { id, patch } => match api.update_task(id, &patch) {
            Ok(task) => out.send(Outcome::TaskSaved(task)),
            Err(e) => {
                out.send(Outcome::MutationFailed(e.to_string()))?;
                refresh_tasks_only(api, out)
            }
        },

        Command::Create(draft) => match api.create_task(&draft) {
            Ok(task) => {
                refresh_tasks_only(api, out)?;
                out.send(Outcome::Created(task))
            }
            Err(e) => out.send(Outcome::CreateFailed(e.to_string())),
        },

        Command::Delete(id) => match api.delete_task(id) {
            Ok(()) => refresh_tasks_only(api, out),
            Err(e) => out.send(Outcome::DeleteFailed(e.to_string())),
        },

        Command::PersistOrder(order) => match api.set_milestone_order(&order) {
            Ok(stored) => out.send(Outcome::OrderPersisted(stored)),
            Err(e) => {
                out.send(Outcome::MutationFailed(e.to_string()))?;
                // discard the optimistic order by reloading the stored one
                match api.get_milestone_order() {
                    Ok(saved) => out.send(Outcome::OrderReverted(saved)),
                    Err(_) => Ok(()), // next full refresh will converge
                }
            }
        },

        Command::FetchTaskEvents(task_id) => match api.list_task_events(task_id) {
            Ok(events) => out.send(Outcome::TaskEvents { task_id, events }),
            Err(e) => out.send(Outcome::MutationFailed(e.to_string())),
        },

        Command::FetchFeed { limit } => match api.list_events(limit) {
            Ok(events) => out.send(Outcome::Feed(events)),
            Err(e) => out.send(Outcome::MutationFailed(e.to_string())),
        },

        Command::LogEvent(draft) => match api.create_event(&draft) {
            Ok(event) => out.send(Outcome::EventLogged(event)),
            Err(e) => out.send(Outcome::MutationFailed(e.to_string())),
        },
    }
}

/// Full reconciliation: tasks plus milestone order.
fn refresh(api: &ApiClient, out: &Sender<Outcome>) -> SendResult {
    match api.list_tasks(&TaskQuery::default()) {
        Ok(tasks) => {
            let order = api.get_milestone_order().ok();
            out.send(Outcome::Refreshed { tasks, order })
        }
        Err(e) => out.send(Outcome::RefreshFailed(e.to_string())),
    }
}

/// Task-list-only reconciliation (mutation confirm/revert path).
fn refresh_tasks_only(api: &ApiClient, out: &Sender<Outcome>) -> SendResult {
    match api.list_tasks(&TaskQuery::default()) {
        Ok(tasks) => out.send(Outcome::Refreshed { tasks, order: None }),
        Err(e) => out.send(Outcome::RefreshFailed(e.to_string())),
    }
}
