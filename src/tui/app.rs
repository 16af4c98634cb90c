use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::{ApiClient, UpdateStream};
use crate::model::{Task, TaskStatus};
use crate::ops::filters::{self, ViewMode, ViewPrefs};
use crate::sync::{Command, Outcome, Session, worker};

use super::input;
use super::render;
use super::theme::Theme;

/// Which top-level screen is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Tasks,
    Activity,
}

/// What a typed line of input is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Title for a new task (drawer in create mode)
    CreateTitle,
    /// New title for an existing task
    EditTitle(i64),
    /// Message for a new activity event, optionally task-scoped
    LogMessage(Option<i64>),
}

/// Current interaction mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Live search: keystrokes edit the filter query directly
    Search,
    /// Single-line input for a create/edit/log action
    Input { kind: InputKind, buffer: String },
    ConfirmDelete(i64),
}

/// Main application state
pub struct App {
    pub session: Session,
    pub prefs: ViewPrefs,
    pub screen: Screen,
    pub mode: Mode,
    pub theme: Theme,
    pub should_quit: bool,
    /// Cursor into the visible rows of the active view
    pub cursor: usize,
    /// Selected board column (index into TaskStatus::ALL)
    pub board_col: usize,
    /// Selected plan group (index into the reconciled milestone order)
    pub plan_group: usize,
    pub scroll: usize,
    pub activity_cursor: usize,
}

impl App {
    pub fn new() -> App {
        App {
            session: Session::new(),
            prefs: ViewPrefs::default(),
            screen: Screen::Tasks,
            mode: Mode::Navigate,
            theme: Theme::default(),
            should_quit: false,
            cursor: 0,
            board_col: 0,
            plan_group: 0,
            scroll: 0,
            activity_cursor: 0,
        }
    }

    /// The filtered/sorted sequence for the current preferences.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filters::derive(self.session.store.tasks(), &self.prefs)
    }

    /// Tasks in the selected board column.
    pub fn board_column_tasks(&self) -> Vec<&Task> {
        let status = TaskStatus::ALL[self.board_col.min(TaskStatus::ALL.len() - 1)];
        self.visible_tasks()
            .into_iter()
            .filter(|t| t.status == status)
            .collect()
    }

    /// (milestone, tasks) groups for the plan view.
    pub fn plan_groups(&self) -> Vec<(String, Vec<&Task>)> {
        let visible = self.visible_tasks();
        filters::group_by_milestone(&visible, &self.session.saved_order)
    }

    /// Id of the task under the cursor in the active view.
    pub fn selected_task_id(&self) -> Option<i64> {
        match self.prefs.mode {
            ViewMode::List => self.visible_tasks().get(self.cursor).map(|t| t.id),
            ViewMode::Board => self.board_column_tasks().get(self.cursor).map(|t| t.id),
            ViewMode::Plan => {
                let groups = self.plan_groups();
                let (_, tasks) = groups.get(self.plan_group)?;
                tasks.get(self.cursor).map(|t| t.id)
            }
        }
    }

    /// Number of rows the cursor can move through in the active view.
    pub fn row_count(&self) -> usize {
        match self.prefs.mode {
            ViewMode::List => self.visible_tasks().len(),
            ViewMode::Board => self.board_column_tasks().len(),
            ViewMode::Plan => {
                let groups = self.plan_groups();
                groups
                    .get(self.plan_group)
                    .map(|(_, tasks)| tasks.len())
                    .unwrap_or(0)
            }
        }
    }

    pub fn clamp_cursor(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }
        let groups = self.plan_groups().len();
        if groups > 0 && self.plan_group >= groups {
            self.plan_group = groups - 1;
        }
        let feed = self.session.feed.len();
        if feed == 0 {
            self.activity_cursor = 0;
        } else if self.activity_cursor >= feed {
            self.activity_cursor = feed - 1;
        }
    }
}

/// Run the TUI against the given server base URL.
pub fn run(server: &str) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiClient::new(server);
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let (out_tx, out_rx) = mpsc::channel::<Outcome>();
    worker::spawn(api, cmd_rx, out_tx);
    let stream = UpdateStream::start(server)?;

    let mut app = App::new();
    app.session.refresh();
    app.session.load_config();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &stream, &cmd_tx, &out_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    stream: &UpdateStream,
    cmd_tx: &mpsc::Sender<Command>,
    out_rx: &mpsc::Receiver<Outcome>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Any push signal means "re-fetch now"; it always routes to the
        // current reconciliation entry point
        if stream.poll() > 0 {
            app.session.refresh();
        }
        while let Ok(outcome) = out_rx.try_recv() {
            app.session.apply(outcome);
        }
        for cmd in app.session.take_commands() {
            cmd_tx.send(cmd)?;
        }
        app.clamp_cursor();

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
