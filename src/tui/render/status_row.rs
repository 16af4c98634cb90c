use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, InputKind, Mode, Screen};

/// Bottom status row: input prompts, transient errors, or key hints.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;

    let line = match &app.mode {
        Mode::Search => Line::from(vec![
            Span::styled(" /", Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(
                format!("{}▌", app.prefs.search),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
        ]),
        Mode::Input { kind, buffer } => {
            let prompt = match kind {
                InputKind::CreateTitle => "title",
                InputKind::EditTitle(_) => "title",
                InputKind::LogMessage(_) => "log",
            };
            Line::from(vec![
                Span::styled(format!(" {prompt}: "), Style::default().fg(theme.highlight).bg(bg)),
                Span::styled(format!("{buffer}▌"), Style::default().fg(theme.text_bright).bg(bg)),
            ])
        }
        Mode::ConfirmDelete(_) => Line::from(Span::styled(
            " delete task? y/n",
            Style::default().fg(theme.error).bg(bg),
        )),
        Mode::Navigate => {
            if let Some(message) = &app.session.last_error {
                Line::from(Span::styled(
                    format!(" {message}"),
                    Style::default().fg(theme.error).bg(bg),
                ))
            } else {
                Line::from(Span::styled(hints(app), Style::default().fg(theme.dim).bg(bg)))
            }
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn hints(app: &App) -> &'static str {
    if !app.session.drawer.is_closed() {
        return " esc close  tab switch  space status  e edit  L log  d delete";
    }
    match app.screen {
        Screen::Activity => " j/k move  a back  r refresh  q quit",
        Screen::Tasks => {
            " j/k move  enter open  n new  space status  / search  1/2/3 view  s sort  q quit"
        }
    }
}
