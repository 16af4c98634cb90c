pub mod activity_view;
pub mod board_view;
pub mod drawer;
pub mod list_view;
pub mod plan_view;
pub mod status_row;
pub mod toolbar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Screen};
use crate::ops::filters::ViewMode;

/// Main render function, dispatches to the per-screen renderers.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: toolbar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    toolbar::render_toolbar(frame, app, chunks[0]);

    // Drawer splits the content area when open
    let content = if app.session.drawer.is_closed() {
        chunks[1]
    } else {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Percentage(42)])
            .split(chunks[1]);
        drawer::render_drawer(frame, app, split[1]);
        split[0]
    };

    render_content(frame, app, content);
    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.screen {
        Screen::Activity => activity_view::render_activity_view(frame, app, area),
        Screen::Tasks => match app.prefs.mode {
            ViewMode::List => list_view::render_list_view(frame, app, area),
            ViewMode::Board => board_view::render_board_view(frame, app, area),
            ViewMode::Plan => plan_view::render_plan_view(frame, app, area),
        },
    }
}
