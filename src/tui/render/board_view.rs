use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::TaskStatus;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Kanban board: one column per status, cards from the derived sequence.
pub fn render_board_view(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20); 5])
        .split(area);

    let visible = app.visible_tasks();
    for (col, status) in TaskStatus::ALL.iter().enumerate() {
        let tasks: Vec<_> = visible.iter().filter(|t| t.status == *status).collect();
        let selected_col = col == app.board_col;

        let border_style = if selected_col {
            Style::default().fg(app.theme.highlight)
        } else {
            Style::default().fg(app.theme.dim)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {} ({}) ", status.label(), tasks.len()),
                Style::default().fg(app.theme.status_color(*status)),
            ));
        let inner = block.inner(columns[col]);
        frame.render_widget(block, columns[col]);

        let width = inner.width as usize;
        let mut lines = Vec::new();
        for (row, task) in tasks.iter().enumerate().take(inner.height as usize) {
            let selected = selected_col && row == app.cursor;
            let style = if selected {
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text)
            };
            lines.push(Line::from(Span::styled(
                truncate_to_width(&task.title, width),
                style,
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
