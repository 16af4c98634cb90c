use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::filters::ViewMode;
use crate::tui::app::{App, Screen};

/// Top bar: screen/view-mode tabs plus the active filter summary.
pub fn render_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(" td ", Style::default().fg(app.theme.highlight).bg(bg))];

    for mode in [ViewMode::List, ViewMode::Board, ViewMode::Plan] {
        let active = app.screen == Screen::Tasks && app.prefs.mode == mode;
        let style = if active {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
    }
    let activity_style = if app.screen == Screen::Activity {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    spans.push(Span::styled(" Activity ", activity_style));

    // Filter summary on the right
    let mut filters = Vec::new();
    if let Some(p) = app.prefs.priority {
        filters.push(format!("prio:{}", p.label()));
    }
    if let Some(k) = app.prefs.kind {
        filters.push(format!("type:{}", k.label()));
    }
    if !app.prefs.search.is_empty() {
        filters.push(format!("/{}", app.prefs.search));
    }
    if !app.prefs.milestones.is_empty() {
        filters.push(format!("{} milestones", app.prefs.milestones.len()));
    }
    filters.push(format!("sort:{}", app.prefs.sort.label()));
    spans.push(Span::styled(
        format!("   {}", filters.join("  ")),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let lines = vec![Line::from(spans), Line::from("")];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
