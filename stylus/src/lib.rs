mod exercise;
mod keyboard;
mod word;

pub use exercise::*;
pub use keyboard::*;
pub use word::*;

/// Words are delimited by single spaces, both in the target sentence and in
/// the flat input string.
pub(crate) const SEPARATOR: char = ' ';
