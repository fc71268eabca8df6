use crate::SEPARATOR;

/// One slot of the target sentence.
///
/// A word pairs the immutable target text with whatever the user has typed
/// into the matching slot of the flat input, plus the character offsets of
/// that slot. All fields are read-only from the outside; only the
/// [`Exercise`](crate::Exercise) mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    id: usize,
    text: String,
    user_input: String,
    start: usize,
    end: usize,
    is_active: bool,
    incorrect: bool,
}

impl Word {
    pub(crate) fn new(text: &str, id: usize) -> Self {
        Self {
            id,
            text: text.to_string(),
            user_input: String::new(),
            start: 0,
            end: 0,
            is_active: false,
            incorrect: false,
        }
    }

    /// Segmentation order of this word, 0-based. Stable across input syncs,
    /// reassigned when the target sentence changes.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The target text of this word.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// What the user has typed into this word's slot so far.
    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    /// Start of this word's slot within the flat input, in characters.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End of this word's slot within the flat input (exclusive), in
    /// characters. `end - start` always equals the character length of
    /// [`Self::user_input`].
    pub fn end(&self) -> usize {
        self.end
    }

    /// True for the word containing the caret. At most one word is active at
    /// a time.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// True if the last submit attempt flagged this word as wrong. Only
    /// recomputed on submit, never mid-entry.
    pub fn is_incorrect(&self) -> bool {
        self.incorrect
    }

    pub(crate) fn set_user_input(&mut self, input: &str) {
        self.user_input.clear();
        self.user_input.push_str(input);
    }

    pub(crate) fn clear_user_input(&mut self) {
        self.user_input.clear();
    }

    pub(crate) fn set_slot(&mut self, start: usize, end: usize) {
        self.start = start;
        self.end = end;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Case-insensitive comparison of the typed slot against the target.
    pub(crate) fn evaluate(&mut self) {
        self.incorrect = self.user_input.to_lowercase() != self.text.to_lowercase();
    }

    /// Character length of the typed slot.
    pub(crate) fn input_len(&self) -> usize {
        self.user_input.chars().count()
    }
}

/// Split a target sentence into words on single spaces.
///
/// Matches the flat-input separator rules exactly: consecutive separators
/// produce empty-text words, which are kept as-is.
pub(crate) fn segment(sentence: &str) -> Vec<Word> {
    sentence
        .split(SEPARATOR)
        .enumerate()
        .map(|(id, text)| Word::new(text, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segmentation() {
        let words = segment("I love you");
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text(), "I");
        assert_eq!(words[1].text(), "love");
        assert_eq!(words[2].text(), "you");

        for (id, word) in words.iter().enumerate() {
            assert_eq!(word.id(), id);
            assert_eq!(word.user_input(), "");
            assert_eq!((word.start(), word.end()), (0, 0));
            assert!(!word.is_active());
            assert!(!word.is_incorrect());
        }
    }

    #[test]
    fn test_segmentation_keeps_empty_words() {
        // Consecutive separators are accepted as-is, not collapsed
        let words = segment("a  b");
        assert_eq!(words.len(), 3);
        assert_eq!(words[1].text(), "");

        let words = segment("");
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text(), "");
    }

    #[test]
    fn test_evaluate_is_case_insensitive() {
        let mut word = Word::new("Love", 0);
        word.set_user_input("lOVE");
        word.evaluate();
        assert!(!word.is_incorrect());

        word.set_user_input("loev");
        word.evaluate();
        assert!(word.is_incorrect());

        // An empty-text word matched by an empty slot is correct
        let mut empty = Word::new("", 0);
        empty.evaluate();
        assert!(!empty.is_incorrect());
    }
}
