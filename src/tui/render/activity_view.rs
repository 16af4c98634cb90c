use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Global activity feed, newest first as the server returns it.
pub fn render_activity_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;
    let feed = &app.session.feed;

    if feed.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  no activity",
            Style::default().fg(theme.dim).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    let top = app.activity_cursor.saturating_sub(height.saturating_sub(1));

    let mut lines = Vec::new();
    for (row, event) in feed.iter().enumerate().skip(top).take(height) {
        let selected = row == app.activity_cursor;
        let row_bg = if selected { theme.selection_bg } else { bg };
        let task_ref = match event.task_id {
            Some(id) => {
                let title = app
                    .session
                    .store
                    .get(id)
                    .map(|t| t.title.as_str())
                    .unwrap_or("?");
                format!(" [{}]", truncate_to_width(title, 24))
            }
            None => String::new(),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<10}", event.kind_label()),
                Style::default().fg(theme.highlight).bg(row_bg),
            ),
            Span::styled(
                truncate_to_width(&event.message, width.saturating_sub(12 + task_ref.len())),
                Style::default()
                    .fg(if selected { theme.text_bright } else { theme.text })
                    .bg(row_bg),
            ),
            Span::styled(task_ref, Style::default().fg(theme.dim).bg(row_bg)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
