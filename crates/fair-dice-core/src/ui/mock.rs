//! Scripted user interface for testing.

use super::traits::{UserInput, UserInterface};
use std::collections::VecDeque;

/// A prompt the scripted interface answered
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Number { prompt: String, min: i32, max: i32 },
    Menu { prompt: String, options: Vec<String> },
}

/// In-memory interface that replays queued answers and records output
#[derive(Clone, Debug, Default)]
pub struct ScriptedInterface {
    answers: VecDeque<UserInput>,
    /// Every displayed line, in order
    pub displayed: Vec<String>,
    /// Every error line, in order
    pub errors: Vec<String>,
    /// Every prompt that was asked, in order
    pub prompts: Vec<Prompt>,
}

impl ScriptedInterface {
    /// Create an interface that answers with `answers`, then exits
    pub fn new(answers: impl IntoIterator<Item = UserInput>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// All displayed text joined by newlines
    pub fn transcript(&self) -> String {
        self.displayed.join("\n")
    }

    /// Next answer accepted by `in_range`; out-of-range or invalid answers
    /// are reported and skipped the way a console re-prompts
    fn next_answer(&mut self, in_range: impl Fn(i32) -> bool) -> UserInput {
        loop {
            match self.answers.pop_front() {
                None => return UserInput::Exit,
                Some(UserInput::Success(v)) if !in_range(v) => {
                    self.errors.push(format!("Invalid selection: {}", v));
                }
                Some(UserInput::Invalid) => {
                    self.errors.push("Invalid selection".to_string());
                }
                Some(answer) => return answer,
            }
        }
    }
}

impl UserInterface for ScriptedInterface {
    fn display(&mut self, text: &str) {
        self.displayed.push(text.to_string());
    }

    fn display_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn request_number(&mut self, prompt: &str, min: i32, max: i32) -> UserInput {
        self.prompts.push(Prompt::Number {
            prompt: prompt.to_string(),
            min,
            max,
        });
        self.next_answer(|v| (min..=max).contains(&v))
    }

    fn request_menu_choice(&mut self, prompt: &str, options: &[String]) -> UserInput {
        self.prompts.push(Prompt::Menu {
            prompt: prompt.to_string(),
            options: options.to_vec(),
        });
        let count = options.len();
        self.next_answer(|v| usize::try_from(v).map_or(false, |i| i < count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_answers_in_order() {
        let mut ui = ScriptedInterface::new([UserInput::Help, UserInput::Success(1)]);

        assert_eq!(ui.request_number("a", 0, 1), UserInput::Help);
        assert_eq!(ui.request_number("b", 0, 1), UserInput::Success(1));
        assert_eq!(ui.prompts.len(), 2);
    }

    #[test]
    fn test_exhausted_script_exits() {
        let mut ui = ScriptedInterface::default();
        assert_eq!(ui.request_number("a", 0, 5), UserInput::Exit);
    }

    #[test]
    fn test_out_of_range_is_skipped() {
        let mut ui = ScriptedInterface::new([
            UserInput::Success(9),
            UserInput::Invalid,
            UserInput::Success(2),
        ]);

        assert_eq!(ui.request_number("a", 0, 5), UserInput::Success(2));
        assert_eq!(ui.errors.len(), 2);
    }

    #[test]
    fn test_menu_index_bounds() {
        let options = vec!["a".to_string(), "b".to_string()];
        let mut ui = ScriptedInterface::new([UserInput::Success(2), UserInput::Success(0)]);

        assert_eq!(ui.request_menu_choice("pick", &options), UserInput::Success(0));
    }

    #[test]
    fn test_records_display() {
        let mut ui = ScriptedInterface::default();
        ui.display("one");
        ui.display("two");

        assert_eq!(ui.transcript(), "one\ntwo");
    }
}
