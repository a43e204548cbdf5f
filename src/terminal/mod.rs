//! The shell running on top of the virtual filesystem.
//!
//! Input arrives one line at a time. Depending on the current mode a line is
//! a shell command, a line for the `nano` buffer, or a move in a game.

mod command;
mod editor;
mod interpreter;
mod response;

pub use interpreter::Interpreter;
pub use response::{LineStyle, Response};
