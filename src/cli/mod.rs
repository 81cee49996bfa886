//! CLI argument parsing and command handling.

mod args;
mod split;
mod validators;

pub use args::{Cli, Command, ConfigAction, MarksArgs};
pub use split::SplitArgs;
