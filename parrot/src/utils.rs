use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType, Padding},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Padding that vertically centers `height` lines of content within `area`.
pub fn centered_padding(area: Rect, height: Option<u16>) -> Padding {
    let height = height.unwrap_or(1);
    let top = (area.height.saturating_sub(height)) / 2;
    Padding::new(0, 0, top, 0)
}

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }
}
