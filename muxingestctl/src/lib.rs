//! Library side of `muxingestctl`: fixture loading, logging setup and the
//! subcommand implementations behind the binary.

pub mod cli;
pub mod fixtures;
pub mod logging;

pub use cli::{Cli, Command, ConfigArgs};
pub use fixtures::Fixtures;
