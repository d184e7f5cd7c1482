//! Line-oriented console implementation of [`UserInterface`].

use super::traits::{UserInput, UserInterface};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Keyword that leaves the game
pub const EXIT_OPTION: &str = "X";

/// Keyword that asks for help
pub const HELP_OPTION: &str = "?";

/// Console interface over any reader and writers.
///
/// Menus list every choice plus `X - exit` and `? - help`. Anything that
/// does not parse into a listed choice prints an error and re-prompts.
/// End of input is treated as exit.
pub struct ConsoleInterface<R, W, E> {
    input: R,
    output: W,
    errors: E,
}

impl ConsoleInterface<io::StdinLock<'static>, io::Stdout, io::Stderr> {
    /// Interface bound to the process stdin, stdout and stderr
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> ConsoleInterface<R, W, E> {
    pub fn new(input: R, output: W, errors: E) -> Self {
        Self {
            input,
            output,
            errors,
        }
    }

    /// Consume the interface, returning the writers
    pub fn into_writers(self) -> (W, E) {
        (self.output, self.errors)
    }

    /// Read one trimmed, uppercased line; `None` on end of input
    fn read_selection(&mut self) -> Option<String> {
        let _ = write!(self.output, "Your selection: ");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_uppercase()),
            Err(e) => {
                warn!("Failed to read input: {}", e);
                None
            }
        }
    }

    /// Show a menu and loop until a listed value, exit or help is entered
    fn prompt_loop(
        &mut self,
        header: &str,
        lines: &[String],
        accept: impl Fn(i32) -> bool,
        error: &str,
    ) -> UserInput {
        loop {
            self.display(&format!("\n{}:", header));
            for line in lines {
                self.display(line);
            }
            self.display(&format!("{} - exit", EXIT_OPTION));
            self.display(&format!("{} - help", HELP_OPTION));

            let Some(input) = self.read_selection() else {
                return UserInput::Exit;
            };

            if input == EXIT_OPTION {
                return UserInput::Exit;
            }
            if input == HELP_OPTION {
                return UserInput::Help;
            }

            match input.parse::<i32>() {
                Ok(value) if accept(value) => return UserInput::Success(value),
                _ => self.display_error(error),
            }
        }
    }
}

impl<R: BufRead, W: Write, E: Write> UserInterface for ConsoleInterface<R, W, E> {
    fn display(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    fn display_error(&mut self, text: &str) {
        let _ = writeln!(self.errors, "ERROR: {}", text);
    }

    fn request_number(&mut self, prompt: &str, min: i32, max: i32) -> UserInput {
        let lines: Vec<String> = (min..=max).map(|i| format!("{} - {}", i, i)).collect();
        let error = format!(
            "Invalid selection. Please choose a number between {} and {}, '{}' to exit, or '{}' for help.",
            min, max, EXIT_OPTION, HELP_OPTION
        );
        self.prompt_loop(
            &format!("{} (range {}..{})", prompt, min, max),
            &lines,
            |v| (min..=max).contains(&v),
            &error,
        )
    }

    fn request_menu_choice(&mut self, prompt: &str, options: &[String]) -> UserInput {
        let lines: Vec<String> = options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{} - {}", i, option))
            .collect();
        let error = format!(
            "Invalid selection. Please choose a number from the list, '{}' to exit, or '{}' for help.",
            EXIT_OPTION, HELP_OPTION
        );
        let count = options.len();
        self.prompt_loop(
            prompt,
            &lines,
            |v| usize::try_from(v).map_or(false, |i| i < count),
            &error,
        )
    }
}
