//! CLI commands module.

mod app;
mod config;
mod exec;
mod parse;
mod serve;
mod tools;
mod util;

pub use config::ConfigCommand;
pub use exec::ExecCommand;
pub use parse::ParseCommand;
pub use serve::ServeCommand;
pub use tools::ToolsCommand;

pub(crate) use app::App;
pub(crate) use util::*;
