use crossterm::event::Event;
use ratatui::{
    layout::Constraint,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};

use crate::{app::Message, config::Config, utils::center};

/// Page: Error
///
/// Displays an error
pub struct Error(String);

impl Error {
    pub fn new(message: String) -> Self {
        Self(message)
    }
}

// Rendering logic
impl Error {
    pub fn render(
        &self,
        frame: &mut ratatui::Frame,
        area: ratatui::prelude::Rect,
        config: &Config,
    ) {
        let center = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let text = Paragraph::new(Line::from(vec![
            Span::styled(
                "Error: ",
                Style::new().bold().fg(config.settings.theme.text.error),
            ),
            Span::raw(&self.0),
        ]))
        .block(Block::new().padding(Padding::new(0, 0, center.height / 2, 0)));

        frame.render_widget(text, center);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw("ERROR"))
    }

    pub fn handle_events(&mut self, _event: &Event, _config: &Config) -> Option<Message> {
        None
    }
}
