//! chainspeak - wallet commands in plain English.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ConfigCommand, ExecCommand, ParseCommand, ServeCommand, ToolsCommand};

/// chainspeak - wallet commands in plain English.
///
/// Understands commands such as "send 0.1 ETH to 0x...", "check my balance"
/// and "create a new wallet named savings", and serves them as tools over
/// JSON-RPC on stdin/stdout.
///
/// Configuration is stored in ~/.chainspeak/chainspeak/ and supports multiple
/// contexts, similar to kubectl's context management.
#[derive(Parser)]
#[command(name = "chainspeak")]
#[command(about = "Natural-language wallet commands for Base")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.chainspeak/chainspeak/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Context name to use
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the wallet tools over JSON-RPC on stdin/stdout
    Serve(ServeCommand),
    /// Run natural-language commands and print the results
    Exec(ExecCommand),
    /// Show how a command is understood, without running it
    Parse(ParseCommand),
    /// List the tools the server exposes
    Tools(ToolsCommand),
    /// Manage CLI configuration
    Config(ConfigCommand),
}

/// Logs go to stderr; stdout carries protocol and command output.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Serve(cmd) => cmd.run(&cli).await,
        Commands::Exec(cmd) => cmd.run(&cli).await,
        Commands::Parse(cmd) => cmd.run(&cli),
        Commands::Tools(cmd) => cmd.run(&cli),
        Commands::Config(cmd) => cmd.run(&cli),
    }
}
