use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Constraint,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List},
};

use crate::{
    app::Message,
    config::Config,
    page::session::Session,
    utils::{KeyEventHelper, center, centered_padding},
};

/// Page: Main menu
pub struct Menu {
    courses: Vec<String>,
    index: usize,
}

impl Menu {
    /// Creates a new menu
    pub fn new(config: &Config) -> Self {
        Self {
            courses: config
                .courses
                .iter()
                .map(|course| course.name.clone())
                .collect(),
            index: 0,
        }
    }
}

// Rendering logic
impl Menu {
    pub fn render(
        &self,
        frame: &mut ratatui::Frame,
        area: ratatui::prelude::Rect,
        config: &Config,
    ) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let items = self.courses.iter().enumerate().map(|(i, course)| {
            let mut selector = "  ";
            let style = if i == self.index {
                selector = "> ";
                Style::new()
                    .fg(config.settings.theme.text.highlight)
                    .reversed()
            } else {
                Style::new()
            };
            Line::from(Span::styled(format!("{selector}{course}"), style))
        });

        let list = List::new(items);
        let padding = centered_padding(area, Some(list.len() as u16 + 1));
        let area = Block::new().padding(padding).inner(area);

        frame.render_widget(list.block(Block::new().title("Select Course")), area);
    }
}

// Event handlers
impl Menu {
    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return self.handle_key(key, config);
        }

        None
    }

    fn handle_key(&mut self, key: &KeyEvent, config: &Config) -> Option<Message> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                increment_index(&mut self.index, self.courses.len());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                decrement_index(&mut self.index, self.courses.len());
            }
            KeyCode::Enter => {
                // SAFETY: The index is always within range of the `courses` Vec
                let course = config.courses[self.index].clone();
                return Some(Message::Show(Session::new(course).into()));
            }
            _ => (),
        };

        None
    }
}

const fn increment_index(index: &mut usize, len: usize) {
    *index = if *index == 0 { len - 1 } else { *index - 1 }
}

const fn decrement_index(index: &mut usize, len: usize) {
    *index = (*index + 1) % len
}
