//! External process execution.

pub mod command;
pub mod platform;

pub use command::{CommandResult, CommandRunner, SystemRunner};
pub use platform::is_ci;
