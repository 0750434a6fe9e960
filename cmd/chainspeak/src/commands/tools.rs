use clap::Args;

use chainspeak_server::tool_specs;

use super::output;
use crate::Cli;

/// Print the tool list with input schemas.
#[derive(Args)]
pub struct ToolsCommand {
    /// Names only
    #[arg(long)]
    names: bool,
}

impl ToolsCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let specs = tool_specs();
        if self.names {
            for spec in &specs {
                println!("{:<20} {}", spec.name, spec.description);
            }
            return Ok(());
        }
        output(cli).write(&specs)
    }
}
