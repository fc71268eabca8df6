use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// General theme
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub cursor: CursorTheme,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorTheme {
    pub color: Color,
    pub text: Color,
}

impl Default for CursorTheme {
    fn default() -> Self {
        Self {
            color: Color::White,
            text: Color::Black,
        }
    }
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    pub success: Color,
    pub error: Color,
    pub highlight: Color,
    pub dimmed: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            highlight: Color::Blue,
            dimmed: Color::DarkGray,
        }
    }
}
