//! User interface abstraction and implementations.

mod console;
mod mock;
mod traits;

pub use console::{ConsoleInterface, EXIT_OPTION, HELP_OPTION};
pub use mock::{Prompt, ScriptedInterface};
pub use traits::{UserInput, UserInterface};
