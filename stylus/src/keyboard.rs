use crate::exercise::{Caret, Exercise, Mode};

/// An engine-level key event.
///
/// Hosts map their raw keyboard events into this before dispatching; anything
/// without special meaning to the state machine is [`Key::Char`] or
/// [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Backspace,
    Char(char),
    Other,
}

impl Key {
    const fn is_space_or_backspace(self) -> bool {
        matches!(self, Self::Space | Self::Backspace)
    }
}

/// What the host should do with the key event it just dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The event proceeds as ordinary text editing; the host applies the edit
    /// to its input field and then calls [`Exercise::set_input_value`].
    Allow,
    /// The event is consumed. The engine may have rewritten the flat input
    /// and moved the caret, so the host refreshes its field from
    /// [`Exercise::input`].
    Suppress,
}

impl Verdict {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Space-triggered submit configuration: whether a space on the final word
/// runs a submit, and the callback to fire when the submit finds everything
/// correct.
pub struct SpaceSubmit<'a> {
    pub enable: bool,
    pub on_correct: &'a mut dyn FnMut(),
}

/// Per-dispatch options for [`Exercise::handle_keyboard_input`].
#[derive(Default)]
pub struct KeyboardOptions<'a> {
    pub space_submit: Option<SpaceSubmit<'a>>,
}

impl Exercise {
    /// Translates one raw key event into a state-machine transition.
    ///
    /// The policy is evaluated strictly in precedence order; the first rule
    /// that applies wins:
    ///
    /// 1. Arrow keys never move the cursor.
    /// 2. In `Fix`, only Space and Backspace are accepted.
    /// 3. Space on the last word of the sentence is the submit action.
    /// 4. Space in `FixInput` on the last remaining incorrect word re-submits.
    /// 5. Backspace in `FixInput` on an emptied word steps back to the
    ///    previous incorrect word.
    /// 6. Space outside `Input` advances the fix selection.
    /// 7. Backspace in `Fix` enters `FixInput` on the first incorrect word.
    /// 8. Anything else is ordinary text editing.
    pub fn handle_keyboard_input<C: Caret>(
        &mut self,
        key: Key,
        caret: &mut C,
        options: KeyboardOptions,
    ) -> Verdict {
        if matches!(key, Key::ArrowLeft | Key::ArrowRight) {
            return Verdict::Suppress;
        }

        if !key.is_space_or_backspace() && self.mode() == Mode::Fix {
            return Verdict::Suppress;
        }

        if key == Key::Space && self.last_word_is_active() {
            return self.space_submit(options);
        }

        if key == Key::Space && self.mode() == Mode::FixInput && self.is_last_incorrect_word() {
            return self.space_submit(options);
        }

        if key == Key::Backspace && self.mode() == Mode::FixInput && self.current_edit_is_empty() {
            self.active_previous_incorrect_word(caret);
            return Verdict::Suppress;
        }

        if key == Key::Space && self.mode() != Mode::Input {
            self.fix_incorrect_word(caret);
            return Verdict::Suppress;
        }

        if key == Key::Backspace && self.mode() == Mode::Fix {
            self.fix_first_incorrect_word(caret);
            return Verdict::Suppress;
        }

        Verdict::Allow
    }

    fn space_submit(&mut self, options: KeyboardOptions) -> Verdict {
        if let Some(submit) = options.space_submit
            && submit.enable
        {
            self.submit_answer(submit.on_correct);
        }

        Verdict::Suppress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::tests::TestCaret;

    /// A host text field driving the engine the way a UI would: apply allowed
    /// edits at the caret, push the new value back, and mirror the engine's
    /// input after suppressed keys.
    #[derive(Debug, Default)]
    struct Field {
        value: String,
        caret: TestCaret,
    }

    impl Field {
        fn insert(&mut self, character: char) {
            let byte = self
                .value
                .char_indices()
                .nth(self.caret.offset)
                .map_or(self.value.len(), |(byte, _)| byte);
            self.value.insert(byte, character);
            self.caret.offset += 1;
        }

        fn delete(&mut self) {
            if self.caret.offset == 0 {
                return;
            }
            self.caret.offset -= 1;
            if let Some((byte, _)) = self.value.char_indices().nth(self.caret.offset) {
                self.value.remove(byte);
            }
        }
    }

    /// Dispatches one key and performs the host's side of the contract.
    /// Returns true if the sentence was submitted successfully.
    fn press(exercise: &mut Exercise, field: &mut Field, key: Key) -> bool {
        let mut completed = false;
        let mut on_correct = || completed = true;
        let options = KeyboardOptions {
            space_submit: Some(SpaceSubmit {
                enable: true,
                on_correct: &mut on_correct,
            }),
        };

        let verdict = exercise.handle_keyboard_input(key, &mut field.caret, options);

        if verdict.is_allowed() {
            match key {
                Key::Char(character) => field.insert(character),
                Key::Space => field.insert(' '),
                Key::Backspace => field.delete(),
                _ => (),
            }
            let value = field.value.clone();
            exercise.set_input_value(&value, &field.caret);
        } else {
            // The engine may have rewritten the input and moved the caret
            field.value.clear();
            field.value.push_str(exercise.input());
            if completed {
                field.caret.offset = 0;
            }
        }

        completed
    }

    fn type_str(exercise: &mut Exercise, field: &mut Field, text: &str) -> bool {
        let mut completed = false;
        for character in text.chars() {
            let key = if character == ' ' {
                Key::Space
            } else {
                Key::Char(character)
            };
            completed |= press(exercise, field, key);
        }
        completed
    }

    #[test]
    fn test_arrow_keys_are_always_suppressed() {
        let mut exercise = Exercise::new("a b");
        let mut field = Field::default();

        for key in [Key::ArrowLeft, Key::ArrowRight] {
            let before = field.caret.offset;
            let verdict =
                exercise.handle_keyboard_input(key, &mut field.caret, KeyboardOptions::default());
            assert_eq!(verdict, Verdict::Suppress);
            assert_eq!(field.caret.offset, before);
        }

        // Still suppressed in the fix modes
        type_str(&mut exercise, &mut field, "x b ");
        assert_eq!(exercise.mode(), Mode::Fix);
        let verdict = exercise.handle_keyboard_input(
            Key::ArrowLeft,
            &mut field.caret,
            KeyboardOptions::default(),
        );
        assert_eq!(verdict, Verdict::Suppress);
    }

    #[test]
    fn test_free_typing_is_blocked_in_fix_mode() {
        let mut exercise = Exercise::new("a b");
        let mut field = Field::default();
        type_str(&mut exercise, &mut field, "x b ");
        assert_eq!(exercise.mode(), Mode::Fix);

        let verdict = exercise.handle_keyboard_input(
            Key::Char('q'),
            &mut field.caret,
            KeyboardOptions::default(),
        );
        assert_eq!(verdict, Verdict::Suppress);
        assert_eq!(exercise.input(), "x b");
    }

    #[test]
    fn test_scenario_correct_submit() {
        let mut exercise = Exercise::new("I love you");
        let mut field = Field::default();

        // Trailing space on the final word submits
        let completed = type_str(&mut exercise, &mut field, "I love you ");

        assert!(completed);
        assert_eq!(exercise.input(), "");
        assert_eq!(field.value, "");
        assert_eq!(exercise.mode(), Mode::Input);
    }

    #[test]
    fn test_space_submit_disabled_still_suppresses() {
        let mut exercise = Exercise::new("hi");
        let mut field = Field::default();
        type_str(&mut exercise, &mut field, "hi");

        let verdict = exercise.handle_keyboard_input(
            Key::Space,
            &mut field.caret,
            KeyboardOptions {
                space_submit: Some(SpaceSubmit {
                    enable: false,
                    on_correct: &mut || panic!("must not submit"),
                }),
            },
        );

        assert_eq!(verdict, Verdict::Suppress);
        assert_eq!(exercise.mode(), Mode::Input);
        assert_eq!(exercise.input(), "hi");
    }

    #[test]
    fn test_scenario_incorrect_then_fix() {
        let mut exercise = Exercise::new("I love you");
        let mut field = Field::default();

        let completed = type_str(&mut exercise, &mut field, "I loev you ");
        assert!(!completed);
        assert_eq!(exercise.mode(), Mode::Fix);
        assert!(exercise.words()[1].is_incorrect());

        // Backspace selects word 1 for repair
        assert!(!press(&mut exercise, &mut field, Key::Backspace));
        assert_eq!(exercise.mode(), Mode::FixInput);
        assert_eq!(exercise.current_edit_word().unwrap().id(), 1);
        assert_eq!(field.value, "I  you");
        assert_eq!(field.caret.offset, 2);

        // Retype the word; Space on the last incorrect word re-submits
        let completed = type_str(&mut exercise, &mut field, "love ");
        assert!(completed);
        assert_eq!(exercise.mode(), Mode::Input);
        assert_eq!(exercise.input(), "");
    }

    #[test]
    fn test_scenario_multi_error_backward_navigation() {
        let mut exercise = Exercise::new("a b c");
        let mut field = Field::default();

        type_str(&mut exercise, &mut field, "x b y ");
        assert_eq!(exercise.mode(), Mode::Fix);
        assert!(exercise.words()[0].is_incorrect());
        assert!(exercise.words()[2].is_incorrect());

        press(&mut exercise, &mut field, Key::Backspace);
        assert_eq!(exercise.mode(), Mode::FixInput);
        assert_eq!(exercise.current_edit_word().unwrap().id(), 0);
        assert_eq!(field.caret.offset, 0);

        // Word 0's slot is empty and no earlier incorrect word exists, so
        // another Backspace is a suppressed no-op
        let completed = press(&mut exercise, &mut field, Key::Backspace);
        assert!(!completed);
        assert_eq!(exercise.mode(), Mode::FixInput);
        assert_eq!(exercise.current_edit_word().unwrap().id(), 0);
        assert_eq!(field.caret.offset, 0);
    }

    #[test]
    fn test_space_advances_between_incorrect_words() {
        let mut exercise = Exercise::new("a b c");
        let mut field = Field::default();

        type_str(&mut exercise, &mut field, "x b y ");
        press(&mut exercise, &mut field, Key::Backspace);
        assert_eq!(exercise.current_edit_word().unwrap().id(), 0);

        // Fill in word 0, then Space advances the selection to word 2
        type_str(&mut exercise, &mut field, "a");
        assert!(!press(&mut exercise, &mut field, Key::Space));
        assert_eq!(exercise.current_edit_word().unwrap().id(), 2);
        assert_eq!(field.caret.offset, exercise.words()[2].start());

        // Word 2 is the last incorrect word; fixing it and pressing Space
        // runs the submit
        let completed = type_str(&mut exercise, &mut field, "c ");
        assert!(completed);
        assert_eq!(exercise.mode(), Mode::Input);
    }

    #[test]
    fn test_backspace_steps_back_to_previous_incorrect_word() {
        let mut exercise = Exercise::new("a b c");
        let mut field = Field::default();

        type_str(&mut exercise, &mut field, "x b y ");
        press(&mut exercise, &mut field, Key::Backspace);
        type_str(&mut exercise, &mut field, "a");
        press(&mut exercise, &mut field, Key::Space);
        assert_eq!(exercise.current_edit_word().unwrap().id(), 2);

        // Word 2's slot was cleared on selection; Backspace steps back to
        // word 0 without clearing its text
        press(&mut exercise, &mut field, Key::Backspace);
        let word = exercise.current_edit_word().unwrap();
        assert_eq!(word.id(), 0);
        assert_eq!(word.user_input(), "a");
        assert_eq!(field.caret.offset, word.end());
    }

    #[test]
    fn test_backspace_is_ordinary_editing_in_input_mode() {
        let mut exercise = Exercise::new("ab");
        let mut field = Field::default();
        type_str(&mut exercise, &mut field, "ax");

        let completed = press(&mut exercise, &mut field, Key::Backspace);
        assert!(!completed);
        assert_eq!(exercise.input(), "a");
        assert_eq!(field.caret.offset, 1);
    }
}
