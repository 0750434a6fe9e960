//! One-shot command execution.

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};

use super::{App, output, resolve_context};
use crate::Cli;

/// Run natural-language commands against the configured chain.
///
/// With no arguments, commands are read from stdin one per line and share
/// one wallet store, so "create a new wallet" followed by "check my balance"
/// works in a single session.
#[derive(Args)]
pub struct ExecCommand {
    /// The command, e.g. "send 0.1 ETH to 0x..."
    words: Vec<String>,
}

impl ExecCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let app = App::build(&resolve_context(cli)?)?;
        let out = output(cli);

        if !self.words.is_empty() {
            let result = app.dispatcher.process_command(&self.words.join(" ")).await;
            out.write(&result)?;
            if !result.success {
                std::process::exit(1);
            }
            return Ok(());
        }

        let mut results = Vec::new();
        let mut lines = BufReader::new(stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            results.push(app.dispatcher.process_command(line).await);
        }
        out.write(&results)
    }
}
