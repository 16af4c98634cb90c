use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

/// Flat list of the derived task sequence, one row per task.
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;

    // keep the cursor on screen
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if app.cursor >= app.scroll + height {
        app.scroll = app.cursor + 1 - height;
    }

    let tasks = app.visible_tasks();
    let mut lines = Vec::with_capacity(height);
    for (i, task) in tasks.iter().enumerate().skip(app.scroll).take(height) {
        let selected = i == app.cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };

        let title_width = (area.width as usize).saturating_sub(42);
        let spans = vec![
            Span::styled(
                fit_to_width(&task.ref_id, 9),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ),
            Span::styled(
                fit_to_width(task.status.label(), 13),
                Style::default().fg(app.theme.status_color(task.status)).bg(row_bg),
            ),
            Span::styled(
                fit_to_width(task.priority.label(), 8),
                Style::default().fg(app.theme.priority_color(task.priority)).bg(row_bg),
            ),
            Span::styled(
                fit_to_width(&task.milestone, 12),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ),
            Span::styled(
                fit_to_width(&task.title, title_width),
                Style::default()
                    .fg(if selected { app.theme.text_bright } else { app.theme.text })
                    .bg(row_bg)
                    .add_modifier(if selected { Modifier::BOLD } else { Modifier::empty() }),
            ),
        ];
        lines.push(Line::from(spans));
    }

    if tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            "  no tasks match",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
