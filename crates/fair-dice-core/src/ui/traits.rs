//! User interface trait definition.

/// Result of a single prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserInput {
    /// A value inside the requested range (or a valid menu index)
    Success(i32),
    /// The user asked to leave the game
    Exit,
    /// The user asked for guidance
    Help,
    /// Malformed input; never returned by a conforming implementation
    Invalid,
}

/// Trait for the interactive collaborator the protocol talks to
///
/// Implementations can be:
/// - ConsoleInterface for a terminal session
/// - ScriptedInterface for tests
///
/// Both request methods re-prompt on malformed input and never return a
/// `Success` value outside the requested range.
pub trait UserInterface {
    /// Show a line of text
    fn display(&mut self, text: &str);

    /// Show an error line
    fn display_error(&mut self, text: &str);

    /// Ask for a number in `[min, max]`
    fn request_number(&mut self, prompt: &str, min: i32, max: i32) -> UserInput;

    /// Ask the user to pick one of `options` by index
    fn request_menu_choice(&mut self, prompt: &str, options: &[String]) -> UserInput;
}
