use ratatui::style::Color;

use crate::model::{Priority, TaskStatus, TaskType};

/// Fixed color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0D, 0x11, 0x17),
            text: Color::Rgb(0xC9, 0xD1, 0xD9),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x76, 0x83, 0x90),
            highlight: Color::Rgb(0x58, 0xA6, 0xFF),
            selection_bg: Color::Rgb(0x1F, 0x2A, 0x3A),
            error: Color::Rgb(0xF8, 0x51, 0x49),
        }
    }
}

impl Theme {
    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Todo => Color::Rgb(0x76, 0x83, 0x90),
            TaskStatus::InPlanning => Color::Rgb(0xA3, 0x71, 0xF7),
            TaskStatus::InProgress => Color::Rgb(0xD2, 0x99, 0x22),
            TaskStatus::Done => Color::Rgb(0x23, 0x86, 0x36),
            TaskStatus::Blocked => Color::Rgb(0xF8, 0x51, 0x49),
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::None => Color::Rgb(0x48, 0x4F, 0x58),
            Priority::Low => Color::Rgb(0x3F, 0xB9, 0x50),
            Priority::Medium => Color::Rgb(0xD2, 0x99, 0x22),
            Priority::High => Color::Rgb(0xF8, 0x51, 0x49),
            Priority::Urgent => Color::Rgb(0xDA, 0x36, 0x33),
        }
    }

    pub fn type_color(&self, kind: TaskType) -> Color {
        match kind {
            TaskType::None => Color::Rgb(0x48, 0x4F, 0x58),
            TaskType::Bug => Color::Rgb(0xF8, 0x51, 0x49),
            TaskType::Feature => Color::Rgb(0xA3, 0x71, 0xF7),
            TaskType::Improvement => Color::Rgb(0x58, 0xA6, 0xFF),
            TaskType::Chore => Color::Rgb(0x76, 0x83, 0x90),
        }
    }
}
