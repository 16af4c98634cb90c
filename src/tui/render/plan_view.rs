use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Plan view: the derived sequence grouped by milestone, groups in
/// reconciled order with the unassigned bucket last.
pub fn render_plan_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let groups = app.plan_groups();

    let mut lines = Vec::new();
    for (gi, (milestone, tasks)) in groups.iter().enumerate() {
        let selected_group = gi == app.plan_group;
        let name = if milestone.is_empty() { "unassigned" } else { milestone.as_str() };
        let header_style = if selected_group {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(
            format!("▸ {} ({})", name, tasks.len()),
            header_style,
        )));

        for (row, task) in tasks.iter().enumerate() {
            let selected = selected_group && row == app.cursor;
            let row_bg = if selected { app.theme.selection_bg } else { bg };
            lines.push(Line::from(vec![
                Span::styled("    ", Style::default().bg(row_bg)),
                Span::styled(
                    "● ",
                    Style::default().fg(app.theme.status_color(task.status)).bg(row_bg),
                ),
                Span::styled(
                    truncate_to_width(&task.title, width.saturating_sub(6)),
                    Style::default()
                        .fg(if selected { app.theme.text_bright } else { app.theme.text })
                        .bg(row_bg),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    if groups.is_empty() {
        lines.push(Line::from(Span::styled(
            "  no tasks match",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
