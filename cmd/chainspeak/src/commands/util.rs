//! Utility functions for CLI commands.

use chainspeak_cli::config::{Config, Context, ResolvedContext, load_config};
use chainspeak_cli::{Output, OutputFormat};

use crate::Cli;

const APP_NAME: &str = "chainspeak";

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(APP_NAME, cli.config.as_deref())
}

/// Gets the context to use: the one named with `-c`, else the current one,
/// else one derived from the environment.
pub fn get_context(cli: &Cli) -> anyhow::Result<Context> {
    let cfg = get_config(cli)?;
    match (cfg.resolve_context(cli.context.as_deref()), cli.context.as_deref()) {
        (Some(ctx), _) => Ok(ctx.clone()),
        (None, Some(name)) => anyhow::bail!("context '{name}' not found"),
        (None, None) => Ok(Context::ambient()),
    }
}

pub fn resolve_context(cli: &Cli) -> anyhow::Result<ResolvedContext> {
    Ok(get_context(cli)?.resolve()?)
}

/// Output destination selected by `--json` and `-o`.
pub fn output(cli: &Cli) -> Output {
    Output::new(OutputFormat::from_json_flag(cli.json), cli.output.clone())
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {msg}");
}
