mod command;
pub mod exit;

pub use command::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};
pub use exit::normalize_exit;
