use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use stylus::{Caret, Exercise, Key, KeyboardOptions, Mode, SpaceSubmit, Word};

use crate::{
    app::Message,
    config::{Config, Course, Statement},
    page::summary::Summary,
    utils::{KeyEventHelper, center, centered_padding},
};

/// The host side of the engine's caret bridge: a plain text field owning the
/// flat input string and a character-offset cursor.
///
/// The terminal is redrawn every loop cycle after events are handled, so the
/// engine's write-text-then-move-cursor ordering holds without a real render
/// barrier.
#[derive(Debug, Default)]
struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    fn insert(&mut self, character: char) {
        let byte = self
            .value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(byte, _)| byte);
        self.value.insert(byte, character);
        self.cursor += 1;
    }

    fn delete(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        if let Some((byte, _)) = self.value.char_indices().nth(self.cursor) {
            self.value.remove(byte);
        }
    }

    fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

impl Caret for InputField {
    fn offset(&self) -> usize {
        self.cursor
    }

    fn set_offset(&mut self, offset: usize) {
        self.cursor = offset;
    }
}

/// Page: A typing exercise over one course
pub struct Session {
    course: Course,
    index: usize,
    exercise: Exercise,
    field: InputField,
}

impl Session {
    /// Creates a new `Session` starting at the course's first statement
    pub fn new(course: Course) -> Self {
        let mut exercise = Exercise::new(&course.statements[0].text);
        exercise.update_active_word(0);

        Self {
            course,
            index: 0,
            exercise,
            field: InputField::default(),
        }
    }

    fn statement(&self) -> &Statement {
        &self.course.statements[self.index]
    }

    /// Moves to the next statement, or finishes the course.
    fn advance(&mut self) -> Option<Message> {
        self.field.reset();
        self.index += 1;

        if let Some(next) = self.course.statements.get(self.index) {
            self.exercise.load_sentence(&next.text);
            self.exercise.update_active_word(0);
            return None;
        }

        Some(Message::Show(
            Summary::new(self.course.name.clone(), self.course.statements.len()).into(),
        ))
    }
}

// Event handlers
impl Session {
    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return match key.code {
                KeyCode::Enter => self.submit(),
                code => map_key(code).and_then(|key| self.dispatch(key, config)),
            };
        }

        None
    }

    /// Dispatches one key through the engine and performs the host's side of
    /// the contract: apply allowed edits at the caret and push the new value
    /// back, or mirror the engine's rewritten input after suppressed keys.
    fn dispatch(&mut self, key: Key, config: &Config) -> Option<Message> {
        let mut completed = false;
        let mut on_correct = || completed = true;
        let options = KeyboardOptions {
            space_submit: Some(SpaceSubmit {
                enable: config.settings.space_submits,
                on_correct: &mut on_correct,
            }),
        };

        let verdict = self
            .exercise
            .handle_keyboard_input(key, &mut self.field, options);

        if verdict.is_allowed() {
            match key {
                Key::Char(character) => self.field.insert(character),
                Key::Space => self.field.insert(' '),
                Key::Backspace => self.field.delete(),
                _ => (),
            }
            self.exercise.set_input_value(&self.field.value, &self.field);
        } else {
            self.field.value = self.exercise.input().to_string();
        }

        completed.then(|| self.advance()).flatten()
    }

    /// Explicit submit, independent of the space-submit setting.
    fn submit(&mut self) -> Option<Message> {
        let mut completed = false;
        self.exercise.submit_answer(|| completed = true);

        if completed {
            return self.advance();
        }

        None
    }
}

// Rendering logic
impl Session {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme;

        let mut lines = Vec::new();

        if let Some(prompt) = &self.statement().prompt {
            lines.push(Line::styled(
                prompt.clone(),
                Style::new().fg(theme.text.highlight).italic(),
            ));
            lines.push(Line::default());
        }

        lines.push(self.render_words(config));
        lines.push(Line::default());
        lines.push(self.render_input(config));

        if let Some(hint) = self.render_hint() {
            lines.push(Line::default());
            lines.push(Line::styled(hint, Style::new().fg(theme.text.dimmed)));
        }

        let center = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let padding = centered_padding(center, Some(lines.len() as u16));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::new().padding(padding));

        frame.render_widget(paragraph, center);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw(format!(
            "{} [{}] {}/{}",
            self.course.name,
            self.exercise.mode(),
            self.index + 1,
            self.course.statements.len()
        )))
    }

    /// The target sentence, one span per word: incorrect words in the error
    /// color, the active word underlined.
    fn render_words(&self, config: &Config) -> Line<'_> {
        let theme = &config.settings.theme;

        let mut spans = Vec::new();
        for (index, word) in self.exercise.words().iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" "));
            }

            let mut style = Style::new();
            if word.is_incorrect() {
                style = style.fg(theme.text.error).bold();
            }
            if word.is_active() {
                style = style.underlined();
            }

            spans.push(Span::styled(word.text(), style));
        }

        Line::from(spans)
    }

    /// The flat input with a block cursor at the caret cell.
    fn render_input(&self, config: &Config) -> Line<'_> {
        let cursor = &config.settings.theme.cursor;
        let cursor_style = Style::new().bg(cursor.color).fg(cursor.text);

        let mut spans: Vec<Span> = self
            .field
            .value
            .chars()
            .enumerate()
            .map(|(index, character)| {
                let style = if index == self.field.cursor {
                    cursor_style
                } else {
                    Style::new()
                };
                Span::styled(character.to_string(), style)
            })
            .collect();

        if self.field.cursor >= self.field.value.chars().count() {
            spans.push(Span::styled(" ", cursor_style));
        }

        Line::from(spans)
    }

    fn render_hint(&self) -> Option<&'static str> {
        match self.exercise.mode() {
            Mode::Input => None,
            Mode::Fix => Some("Errors found - press Backspace to fix the first one"),
            Mode::FixInput => self
                .exercise
                .words()
                .iter()
                .any(Word::is_incorrect)
                .then_some("Retype the underlined word, then press Space"),
        }
    }
}

const fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(character) => Some(Key::Char(character)),
        _ => None,
    }
}
