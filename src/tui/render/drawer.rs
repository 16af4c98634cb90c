use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::{Event, Task, TaskDraft};
use crate::sync::{Drawer, DrawerTab};
use crate::tui::app::App;
use crate::util::time::short_timestamp;

/// Side drawer: task view with tabs, or the create form.
pub fn render_drawer(frame: &mut Frame, app: &App, area: Rect) {
    match &app.session.drawer {
        Drawer::Closed => {}
        Drawer::Viewing { task, tab, events, events_loaded } => {
            render_viewing(frame, app, area, task, *tab, events, *events_loaded);
        }
        Drawer::Creating { draft, error } => {
            render_creating(frame, app, area, draft, error.as_deref());
        }
    }
}

fn render_viewing(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    task: &Task,
    tab: DrawerTab,
    events: &[Event],
    events_loaded: bool,
) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .title(Span::styled(
            format!(" {} ", task.ref_id),
            Style::default().fg(theme.text_bright).bg(theme.background),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        )),
        tab_row(theme, tab),
        Line::from(""),
    ];

    match tab {
        DrawerTab::Details => {
            lines.push(field_row(theme, "status", task.status.label(), theme.status_color(task.status)));
            lines.push(field_row(theme, "priority", task.priority.label(), theme.priority_color(task.priority)));
            lines.push(field_row(theme, "type", task.kind.label(), theme.type_color(task.kind)));
            let milestone =
                if task.milestone.is_empty() { "unassigned" } else { task.milestone.as_str() };
            lines.push(field_row(theme, "milestone", milestone, theme.text));
            if !task.commit_hash.is_empty() {
                let commit = if app.session.repo_url.is_empty() {
                    task.commit_hash.clone()
                } else {
                    format!(
                        "{}/commit/{}",
                        app.session.repo_url.trim_end_matches('/'),
                        task.commit_hash
                    )
                };
                lines.push(field_row(theme, "commit", &commit, theme.dim));
            }
            lines.push(Line::from(""));
            if task.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    "no description",
                    Style::default().fg(theme.dim).bg(theme.background),
                )));
            } else {
                for text in task.description.lines() {
                    lines.push(Line::from(Span::styled(
                        text.to_string(),
                        Style::default().fg(theme.text).bg(theme.background),
                    )));
                }
            }
        }
        DrawerTab::Plan => {
            if task.plan.is_empty() {
                lines.push(Line::from(Span::styled(
                    "no plan",
                    Style::default().fg(theme.dim).bg(theme.background),
                )));
            } else {
                for text in task.plan.lines() {
                    lines.push(Line::from(Span::styled(
                        text.to_string(),
                        Style::default().fg(theme.text).bg(theme.background),
                    )));
                }
            }
        }
        DrawerTab::Activity => {
            if !events_loaded {
                lines.push(Line::from(Span::styled(
                    "loading...",
                    Style::default().fg(theme.dim).bg(theme.background),
                )));
            } else if events.is_empty() {
                lines.push(Line::from(Span::styled(
                    "no activity",
                    Style::default().fg(theme.dim).bg(theme.background),
                )));
            } else {
                for event in events {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", event.kind_label()),
                            Style::default().fg(theme.highlight).bg(theme.background),
                        ),
                        Span::styled(
                            event.message.clone(),
                            Style::default().fg(theme.text).bg(theme.background),
                        ),
                    ]));
                    lines.push(Line::from(Span::styled(
                        format!("  {}", short_timestamp(&event.created_at)),
                        Style::default().fg(theme.dim).bg(theme.background),
                    )));
                }
            }
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .wrap(Wrap { trim: false }),
        inner,
    );
}

fn render_creating(frame: &mut Frame, app: &App, area: Rect, draft: &TaskDraft, error: Option<&str>) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(theme.background))
        .title(Span::styled(
            " new task ",
            Style::default().fg(theme.text_bright).bg(theme.background),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = if draft.title.is_empty() { "(untitled)" } else { draft.title.as_str() };
    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_row(theme, "status", draft.status.label(), theme.status_color(draft.status)),
        field_row(theme, "priority", draft.priority.label(), theme.priority_color(draft.priority)),
        field_row(theme, "type", draft.kind.label(), theme.type_color(draft.kind)),
        Line::from(""),
        Line::from(Span::styled(
            "enter title to create, esc to cancel",
            Style::default().fg(theme.dim).bg(theme.background),
        )),
    ];

    if let Some(message) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.error).bg(theme.background),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .wrap(Wrap { trim: false }),
        inner,
    );
}

fn tab_row(theme: &crate::tui::theme::Theme, active: DrawerTab) -> Line<'static> {
    let mut spans = Vec::new();
    for tab in [DrawerTab::Details, DrawerTab::Plan, DrawerTab::Activity] {
        let style = if tab == active {
            Style::default()
                .fg(theme.highlight)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.dim).bg(theme.background)
        };
        spans.push(Span::styled(tab.label().to_string(), style));
        spans.push(Span::styled("  ", Style::default().bg(theme.background)));
    }
    Line::from(spans)
}

fn field_row(
    theme: &crate::tui::theme::Theme,
    name: &str,
    value: &str,
    color: ratatui::style::Color,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{name:<10} "),
            Style::default().fg(theme.dim).bg(theme.background),
        ),
        Span::styled(value.to_string(), Style::default().fg(color).bg(theme.background)),
    ])
}
