use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{Priority, TaskDraft, TaskPatch, TaskType};
use crate::model::EventDraft;
use crate::ops::filters::{SortBy, ViewMode};
use crate::sync::{Drawer, DrawerTab};

use super::app::{App, InputKind, Mode, Screen};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // transient error messages clear on the next keypress
    app.session.last_error = None;

    match app.mode.clone() {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Input { kind, buffer } => handle_input(app, key, kind, buffer),
        Mode::ConfirmDelete(id) => handle_confirm_delete(app, key, id),
    }
    app.clamp_cursor();
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Drawer intercepts its own keys when open
    if !app.session.drawer.is_closed() && handle_drawer_key(app, key) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('r') => app.session.refresh(),

        // Screens and view modes
        KeyCode::Char('a') => {
            app.screen = match app.screen {
                Screen::Tasks => {
                    app.session.load_feed(Some(100));
                    Screen::Activity
                }
                Screen::Activity => Screen::Tasks,
            };
        }
        KeyCode::Char('1') => set_view_mode(app, ViewMode::List),
        KeyCode::Char('2') => set_view_mode(app, ViewMode::Board),
        KeyCode::Char('3') => set_view_mode(app, ViewMode::Plan),

        // Cursor movement
        KeyCode::Char('j') | KeyCode::Down => {
            if app.screen == Screen::Activity {
                app.activity_cursor = app.activity_cursor.saturating_add(1);
            } else {
                app.cursor = app.cursor.saturating_add(1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.screen == Screen::Activity {
                app.activity_cursor = app.activity_cursor.saturating_sub(1);
            } else {
                app.cursor = app.cursor.saturating_sub(1);
            }
        }
        KeyCode::Char('h') | KeyCode::Left => move_horizontal(app, -1),
        KeyCode::Char('l') | KeyCode::Right => move_horizontal(app, 1),

        // Filters and sort
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
        }
        KeyCode::Char('p') => {
            app.prefs.priority = cycle_priority(app.prefs.priority);
            app.cursor = 0;
        }
        KeyCode::Char('t') => {
            app.prefs.kind = cycle_type(app.prefs.kind);
            app.cursor = 0;
        }
        KeyCode::Char('s') => {
            app.prefs.sort = app.prefs.sort.next();
        }
        KeyCode::Char('f') => {
            // toggle the selected plan group in the milestone filter
            if app.prefs.mode == ViewMode::Plan {
                let groups = app.plan_groups();
                if let Some((name, _)) = groups.get(app.plan_group) {
                    let name = name.clone();
                    app.prefs.toggle_milestone(&name);
                }
            }
        }
        KeyCode::Char('F') => {
            app.prefs.milestones.clear();
        }

        // Milestone reordering (plan view)
        KeyCode::Char('[') => reorder_plan_group(app, -1),
        KeyCode::Char(']') => reorder_plan_group(app, 1),

        // Task actions
        KeyCode::Enter => {
            if app.screen == Screen::Tasks
                && let Some(id) = app.selected_task_id()
            {
                app.session.open_task(id);
            }
        }
        KeyCode::Char(' ') => {
            if let Some(id) = app.selected_task_id()
                && let Some(task) = app.session.store.get(id)
            {
                let next = task.status.next();
                app.session.set_status(id, next);
            }
        }
        KeyCode::Char('n') => {
            app.session.open_new();
            app.mode = Mode::Input {
                kind: InputKind::CreateTitle,
                buffer: String::new(),
            };
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_task_id() {
                app.mode = Mode::ConfirmDelete(id);
            }
        }
        KeyCode::Char('L') => {
            app.mode = Mode::Input {
                kind: InputKind::LogMessage(None),
                buffer: String::new(),
            };
        }
        _ => {}
    }
}

/// Keys the open drawer consumes. Returns false to fall through to the
/// normal navigate handling.
fn handle_drawer_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.session.close_drawer();
            true
        }
        KeyCode::Tab => {
            if let Drawer::Viewing { tab, .. } = &app.session.drawer {
                let next = tab.next();
                app.session.set_drawer_tab(next);
            }
            true
        }
        KeyCode::Char('e') => {
            if let Drawer::Viewing { task, .. } = &app.session.drawer {
                app.mode = Mode::Input {
                    kind: InputKind::EditTitle(task.id),
                    buffer: task.title.clone(),
                };
            }
            true
        }
        KeyCode::Char(' ') => {
            if let Drawer::Viewing { task, .. } = &app.session.drawer {
                let (id, next) = (task.id, task.status.next());
                app.session.set_status(id, next);
            }
            true
        }
        KeyCode::Char('L') => {
            if let Drawer::Viewing { task, .. } = &app.session.drawer {
                app.mode = Mode::Input {
                    kind: InputKind::LogMessage(Some(task.id)),
                    buffer: String::new(),
                };
            }
            true
        }
        KeyCode::Char('d') => {
            if let Drawer::Viewing { task, .. } = &app.session.drawer {
                app.mode = Mode::ConfirmDelete(task.id);
            }
            true
        }
        _ => false,
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.prefs.search.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            app.prefs.search.pop();
        }
        KeyCode::Char(c) => {
            app.prefs.search.push(c);
            app.cursor = 0;
        }
        _ => {}
    }
}

fn handle_input(app: &mut App, key: KeyEvent, kind: InputKind, mut buffer: String) {
    match key.code {
        KeyCode::Esc => {
            if kind == InputKind::CreateTitle {
                app.session.close_drawer();
            }
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            submit_input(app, &kind, buffer.trim());
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            buffer.pop();
            app.mode = Mode::Input { kind, buffer };
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            app.mode = Mode::Input { kind, buffer };
        }
        _ => {
            app.mode = Mode::Input { kind, buffer };
        }
    }
}

fn submit_input(app: &mut App, kind: &InputKind, text: &str) {
    if text.is_empty() {
        if *kind == InputKind::CreateTitle {
            app.session.close_drawer();
        }
        return;
    }
    match kind {
        InputKind::CreateTitle => {
            app.session.create_task(TaskDraft {
                title: text.to_string(),
                ..TaskDraft::default()
            });
        }
        InputKind::EditTitle(id) => {
            app.session.save_fields(
                *id,
                TaskPatch {
                    title: Some(text.to_string()),
                    ..TaskPatch::default()
                },
            );
        }
        InputKind::LogMessage(task_id) => {
            app.session.log_event(EventDraft {
                kind: "log".into(),
                message: text.to_string(),
                task_id: *task_id,
            });
        }
    }
}

fn handle_confirm_delete(app: &mut App, key: KeyEvent, id: i64) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.session.delete_task(id);
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

/// Swap the selected plan group with its visible neighbor.
///
/// The groups on screen can be a filtered subset of the full milestone
/// order, so the swap is resolved by group name, never by index into the
/// full order.
fn reorder_plan_group(app: &mut App, delta: isize) {
    if app.prefs.mode != ViewMode::Plan {
        return;
    }
    let groups = app.plan_groups();
    let Some(target) = app.plan_group.checked_add_signed(delta) else {
        return;
    };
    if target >= groups.len() {
        return;
    }
    let Some((name, _)) = groups.get(app.plan_group) else {
        return;
    };
    let Some((neighbor, _)) = groups.get(target) else {
        return;
    };
    let (name, neighbor) = (name.clone(), neighbor.clone());
    drop(groups);
    app.session.move_milestone_named(&name, &neighbor);
    app.plan_group = target;
}

fn set_view_mode(app: &mut App, mode: ViewMode) {
    app.prefs.mode = mode;
    app.cursor = 0;
    app.scroll = 0;
}

fn move_horizontal(app: &mut App, delta: i32) {
    match app.prefs.mode {
        ViewMode::Board => {
            let cols = crate::model::TaskStatus::ALL.len() as i32;
            let next = (app.board_col as i32 + delta).clamp(0, cols - 1);
            app.board_col = next as usize;
            app.cursor = 0;
        }
        ViewMode::Plan => {
            let count = app.plan_groups().len() as i32;
            if count > 0 {
                let next = (app.plan_group as i32 + delta).clamp(0, count - 1);
                app.plan_group = next as usize;
                app.cursor = 0;
            }
        }
        ViewMode::List => {}
    }
}

// Filter cycles run through every value and back to "all"

fn cycle_priority(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Priority::ALL.first().copied(),
        Some(p) => {
            let idx = Priority::ALL.iter().position(|x| *x == p).unwrap_or(0);
            Priority::ALL.get(idx + 1).copied()
        }
    }
}

fn cycle_type(current: Option<TaskType>) -> Option<TaskType> {
    match current {
        None => TaskType::ALL.first().copied(),
        Some(k) => {
            let idx = TaskType::ALL.iter().position(|x| *x == k).unwrap_or(0);
            TaskType::ALL.get(idx + 1).copied()
        }
    }
}
