//! Presentation layer for rollcall
//!
//! This crate contains CLI definitions, console formatters and the
//! interactive confirmation prompt.

pub mod cli;
pub mod confirmation;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use confirmation::InteractiveConfirmation;
pub use output::console::ConsoleFormatter;
