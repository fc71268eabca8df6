use strum::Display;

use crate::word::{Word, segment};
use crate::SEPARATOR;

/// The editing discipline currently in force.
///
/// Starts as [`Mode::Input`]. There is no terminal state; the machine cycles
/// for the lifetime of one sentence and resets when a new one is loaded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    /// Free typing.
    #[default]
    Input,
    /// A submit found errors; no word is selected for repair yet. Only Space
    /// and Backspace are accepted.
    Fix,
    /// A specific erroneous word is being retyped.
    FixInput,
}

/// The host's text-input cursor, as seen by the engine.
///
/// This is the only bridge between the engine and wherever the flat input is
/// actually edited. The engine always calls [`Caret::sync`] after it has
/// changed the flat input and before it repositions the cursor, so a UI-bound
/// host can flush the new value to the screen first. `sync` defaults to a
/// no-op, which is all a headless host needs.
pub trait Caret {
    /// Current cursor offset within the flat input, in characters.
    fn offset(&self) -> usize;

    /// Move the cursor to `offset`.
    fn set_offset(&mut self, offset: usize);

    /// Ordering barrier between a flat-input write and the next cursor move.
    fn sync(&mut self) {}
}

/// One typing exercise: a target sentence, the flat input being typed against
/// it, and the correction state machine.
///
/// The word list is wholesale rebuilt whenever the sentence changes; hosts
/// read it through [`Exercise::words`] and never mutate it directly. The flat
/// input is written only through [`Exercise::set_input_value`] and the fix
/// transitions.
#[derive(Debug, Default)]
pub struct Exercise {
    words: Vec<Word>,
    input: String,
    mode: Mode,
    /// Index of the word currently targeted by fix navigation. An index, not
    /// a copy: the list is rebuilt on sentence change and a standalone
    /// reference would dangle.
    current_edit: Option<usize>,
}

impl Exercise {
    /// Creates an exercise for `sentence`.
    pub fn new(sentence: &str) -> Self {
        let mut exercise = Self::default();
        exercise.load_sentence(sentence);
        exercise
    }

    /// Replaces the target sentence and starts over.
    ///
    /// Any in-progress input is discarded and all word state is reset:
    /// changing the sentence means starting a new exercise.
    pub fn load_sentence(&mut self, sentence: &str) {
        self.words = segment(sentence);
        self.input.clear();
        self.mode = Mode::Input;
        self.current_edit = None;
    }

    /// The ordered word list, for rendering per-word feedback.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The flat input string as the engine last saw it.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The current mode of the correction state machine.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The word currently targeted by fix navigation, if any.
    pub fn current_edit_word(&self) -> Option<&Word> {
        self.current_edit.and_then(|index| self.words.get(index))
    }

    /// Replaces the flat input and resynchronizes the word list.
    ///
    /// Must be called after every host-side mutation of the input field. All
    /// `user_input` slots are bulk-reset before re-deriving, so no characters
    /// linger from words that no longer receive a fragment.
    pub fn set_input_value<C: Caret>(&mut self, value: &str, caret: &C) {
        self.input.clear();
        self.input.push_str(value);
        self.reset_all_user_input();
        self.sync_input_to_words();
        self.update_active_word(caret.offset());
    }

    /// Input -> Words: split the flat input on single spaces, assign fragment
    /// i to word i, and recompute the slot offsets by accumulating fragment
    /// length plus one separator.
    fn sync_input_to_words(&mut self) {
        let Self { words, input, .. } = self;

        let mut position = 0;
        for (index, fragment) in input.split(SEPARATOR).enumerate() {
            let Some(word) = words.get_mut(index) else {
                break;
            };

            let len = fragment.chars().count();
            word.set_user_input(fragment);
            word.set_slot(position, position + len);

            position += len + 1;
        }
    }

    /// Words -> Input: join all `user_input` slots with single spaces.
    ///
    /// Slot offsets are not recomputed here; the next
    /// [`Self::set_input_value`] does that.
    fn sync_words_to_input(&mut self) {
        self.input.clear();
        for (index, word) in self.words.iter().enumerate() {
            if index > 0 {
                self.input.push(SEPARATOR);
            }
            self.input.push_str(word.user_input());
        }
    }

    fn reset_all_user_input(&mut self) {
        for word in &mut self.words {
            word.clear_user_input();
        }
    }

    fn reset_all_active(&mut self) {
        for word in &mut self.words {
            word.set_active(false);
        }
    }

    /// Marks the word whose slot contains `offset` as the active word.
    ///
    /// Slot ranges are inclusive on both ends here, so a boundary offset is
    /// claimed by the earlier of two adjacent words.
    pub fn update_active_word(&mut self, offset: usize) {
        self.reset_all_active();

        for word in &mut self.words {
            if offset >= word.start() && offset <= word.end() {
                word.set_active(true);
                break;
            }
        }
    }

    /// True if no word is flagged incorrect.
    pub fn check_all_correct(&self) -> bool {
        self.words.iter().all(|word| !word.is_incorrect())
    }

    /// Re-evaluates every word's `incorrect` flag against its slot.
    ///
    /// This is the only place the flag is written, and it only runs on submit
    /// attempts, so partial typing is never flagged mid-entry.
    fn mark_incorrect(&mut self) {
        for word in &mut self.words {
            word.evaluate();
        }
    }

    pub(crate) fn last_word_is_active(&self) -> bool {
        self.words.last().is_some_and(Word::is_active)
    }

    /// Nearest incorrect word after the current edit word, in list order.
    fn find_next_incorrect(&self) -> Option<usize> {
        let current = self.current_edit?;

        self.words
            .iter()
            .enumerate()
            .skip(current + 1)
            .find(|(_, word)| word.is_incorrect())
            .map(|(index, _)| index)
    }

    /// Nearest incorrect word before the current edit word, in list order.
    fn find_previous_incorrect(&self) -> Option<usize> {
        let current = self.current_edit?;

        self.words[..current]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, word)| word.is_incorrect())
            .map(|(index, _)| index)
    }

    fn first_incorrect(&self) -> Option<usize> {
        self.words.iter().position(Word::is_incorrect)
    }

    /// True if no incorrect word exists after the current edit word.
    pub(crate) fn is_last_incorrect_word(&self) -> bool {
        self.find_next_incorrect().is_none()
    }

    pub(crate) fn current_edit_is_empty(&self) -> bool {
        self.current_edit
            .and_then(|index| self.words.get(index))
            .is_some_and(|word| word.input_len() == 0)
    }

    /// Selects the next pending incorrect word for repair: clears its slot,
    /// resyncs the flat input, and repositions the caret to the slot start.
    ///
    /// Falls back to the first incorrect word overall when no selection has
    /// been made yet. Silent no-op if nothing is incorrect.
    fn clear_next_incorrect<C: Caret>(&mut self, caret: &mut C) {
        let Some(index) = self.find_next_incorrect().or_else(|| self.first_incorrect()) else {
            return;
        };

        self.words[index].clear_user_input();
        self.current_edit = Some(index);
        self.sync_words_to_input();

        // Write the input first, then move the cursor
        caret.sync();

        let start = self.words[index].start();
        caret.set_offset(start);
        self.update_active_word(start);
    }

    /// Runs a submit attempt.
    ///
    /// Evaluates every word; if all are correct the callback fires exactly
    /// once, the flat input is cleared and the mode returns to [`Mode::Input`].
    /// Otherwise the incorrect words stay flagged and the mode becomes
    /// [`Mode::Fix`]. No-op while in `Fix` (the pending batch of errors must
    /// be entered first).
    pub fn submit_answer<F: FnMut()>(&mut self, mut on_correct: F) {
        if self.mode == Mode::Fix {
            return;
        }

        self.reset_all_active();
        self.mark_incorrect();

        if self.check_all_correct() {
            self.mode = Mode::Input;
            on_correct();
            self.input.clear();
        } else {
            self.mode = Mode::Fix;
        }
    }

    /// Enters fix-input mode on the first pending incorrect word.
    ///
    /// Only meaningful in [`Mode::Fix`]; no-op otherwise.
    pub fn fix_first_incorrect_word<C: Caret>(&mut self, caret: &mut C) {
        if self.mode == Mode::Fix {
            self.mode = Mode::FixInput;
            self.clear_next_incorrect(caret);
        }
    }

    /// Advances the repair selection to the next incorrect word.
    ///
    /// Only meaningful in [`Mode::FixInput`]; no-op otherwise.
    pub fn fix_next_incorrect_word<C: Caret>(&mut self, caret: &mut C) {
        if self.mode == Mode::FixInput {
            self.clear_next_incorrect(caret);
        }
    }

    /// Fix-mode advance: enter repair on the first error, or move on to the
    /// next one, depending on the current mode.
    pub fn fix_incorrect_word<C: Caret>(&mut self, caret: &mut C) {
        match self.mode {
            Mode::Fix => self.fix_first_incorrect_word(caret),
            Mode::FixInput => self.fix_next_incorrect_word(caret),
            Mode::Input => (),
        }
    }

    /// Moves the repair selection back to the nearest incorrect word before
    /// the current one, repositioning the caret to that word's end offset.
    ///
    /// The word's text is not cleared. Silent no-op when no earlier incorrect
    /// word exists.
    pub fn active_previous_incorrect_word<C: Caret>(&mut self, caret: &mut C) {
        let Some(index) = self.find_previous_incorrect() else {
            return;
        };

        self.current_edit = Some(index);

        caret.sync();

        let end = self.words[index].end();
        self.update_active_word(end);
        caret.set_offset(end);
    }
}
