pub mod args;
pub mod commands;

pub use args::{Cli, DecoderKind};
pub use commands::handle_command;
