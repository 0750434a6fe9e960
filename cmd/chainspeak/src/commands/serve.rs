//! JSON-RPC tool server on stdin/stdout.

use clap::Args;
use tokio::io::{BufReader, stdin, stdout};

use chainspeak_server::{ServerInfo, ToolServer};

use super::{App, resolve_context};
use crate::Cli;

/// Serve wallet tools over newline-delimited JSON-RPC.
///
/// Requests are read from stdin and answered on stdout, one JSON object per
/// line. Logs go to stderr.
#[derive(Args)]
pub struct ServeCommand {
    /// Server name reported by initialize
    #[arg(long, default_value = "chainspeak")]
    name: String,
}

impl ServeCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let app = App::build(&resolve_context(cli)?)?;
        app.check_connection().await;

        let info = ServerInfo {
            name: self.name.clone(),
            ..Default::default()
        };
        ToolServer::new(app.dispatcher)
            .with_info(info)
            .serve(BufReader::new(stdin()), stdout())
            .await?;
        Ok(())
    }
}
