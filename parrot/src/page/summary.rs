use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::{Alignment, Constraint},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
};

use crate::{
    app::Message,
    config::Config,
    utils::{KeyEventHelper, center, centered_padding},
};

/// Page: Course completed
pub struct Summary {
    course_name: String,
    statements: usize,
}

impl Summary {
    pub fn new(course_name: String, statements: usize) -> Self {
        Self {
            course_name,
            statements,
        }
    }
}

// Rendering logic
impl Summary {
    pub fn render(
        &self,
        frame: &mut ratatui::Frame,
        area: ratatui::prelude::Rect,
        config: &Config,
    ) {
        let theme = &config.settings.theme;

        let lines = vec![
            Line::styled(
                format!("Course '{}' complete!", self.course_name),
                Style::new().fg(theme.text.success).bold(),
            ),
            Line::default(),
            Line::raw(format!("{} sentences typed", self.statements)),
            Line::default(),
            Line::styled(
                "Press Enter to return to the menu",
                Style::new().fg(theme.text.dimmed),
            ),
        ];

        let center = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let padding = centered_padding(center, Some(lines.len() as u16));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::new().padding(padding)),
            center,
        );
    }
}

// Event handlers
impl Summary {
    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Enter
        {
            return Some(Message::Reset);
        }

        None
    }
}
