//! Command parsing preview.

use clap::Args;
use serde::Serialize;

use chainspeak_intent::{ParsedCommand, describe, parse};

use super::output;
use crate::Cli;

/// Show the intent and parameters a command resolves to.
#[derive(Args)]
pub struct ParseCommand {
    /// The command text
    #[arg(required = true)]
    words: Vec<String>,
}

#[derive(Serialize)]
struct Parsed<'a> {
    #[serde(flatten)]
    command: &'a ParsedCommand,
    description: String,
}

impl ParseCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let command = parse(&self.words.join(" "))?;
        output(cli).write(&Parsed {
            description: describe(&command),
            command: &command,
        })
    }
}
