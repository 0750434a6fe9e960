//! Configuration management commands.

use clap::{Args, Subcommand, ValueEnum};

use chainspeak_cli::config::{Backend, Context as CliContext, mask_secret};

use super::{get_config, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Contexts select the chain backend, endpoint and key, similar to kubectl's
/// context management.
///
/// Configuration is stored in ~/.chainspeak/chainspeak/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Mock,
    Rpc,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Mock => Backend::Mock,
            BackendArg::Rpc => Backend::Rpc,
        }
    }
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Add or replace a context
    #[command(name = "add-context")]
    AddContext {
        /// Context name
        name: String,
        /// Chain backend
        #[arg(long, value_enum, default_value = "mock")]
        backend: BackendArg,
        /// JSON-RPC endpoint (falls back to $BASE_PROVIDER_URL)
        #[arg(long)]
        rpc_url: Option<String>,
        /// Chain id (derived from the endpoint if omitted)
        #[arg(long)]
        chain_id: Option<u64>,
        /// Private key, or a reference such as '$WALLET_PRIVATE_KEY'
        #[arg(long)]
        private_key: Option<String>,
        /// Fallback gas price in wei
        #[arg(long)]
        gas_price: Option<String>,
        /// Starting balance of mock accounts in ETH
        #[arg(long)]
        mock_balance: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Delete a context
    #[command(name = "delete-context")]
    DeleteContext {
        /// Context name
        name: String,
    },
    /// Set the current context
    #[command(name = "use-context")]
    UseContext {
        /// Context name
        name: String,
    },
    /// List all contexts
    #[command(name = "list", alias = "list-contexts")]
    List,
    /// View the current configuration
    View,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::AddContext {
                name,
                backend,
                rpc_url,
                chain_id,
                private_key,
                gas_price,
                mock_balance,
                timeout,
            } => {
                let mut cfg = get_config(cli)?;
                let ctx = CliContext {
                    backend: (*backend).into(),
                    rpc_url: rpc_url.clone().unwrap_or_default(),
                    chain_id: chain_id.unwrap_or(0),
                    private_key: private_key.clone().unwrap_or_default(),
                    gas_price: gas_price.clone().unwrap_or_default(),
                    mock_balance: mock_balance.clone().unwrap_or_default(),
                    timeout: timeout.unwrap_or(0),
                    ..Default::default()
                };
                if !ctx.gas_price.is_empty()
                    && !ctx.gas_price.starts_with('$')
                    && ctx.gas_price.parse::<u128>().is_err()
                {
                    anyhow::bail!("invalid gas price: {}", ctx.gas_price);
                }
                cfg.add_context(name, ctx)?;
                print_success(&format!("Context \"{name}\" added successfully"));
                Ok(())
            }

            ConfigSubcommand::DeleteContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.delete_context(name)?;
                print_success(&format!("Context \"{name}\" deleted"));
                Ok(())
            }

            ConfigSubcommand::UseContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.use_context(name)?;
                print_success(&format!("Switched to context \"{name}\""));
                Ok(())
            }

            ConfigSubcommand::List => {
                let cfg = get_config(cli)?;
                if cfg.contexts.is_empty() {
                    println!("No contexts configured");
                    return Ok(());
                }

                println!("{:<8} {:<20} {:<8} RPC_URL", "CURRENT", "NAME", "BACKEND");
                for name in cfg.list_contexts() {
                    let Some(ctx) = cfg.get_context(name) else {
                        continue;
                    };
                    let current = if name == cfg.current_context { "*" } else { "" };
                    let rpc_url = if ctx.rpc_url.is_empty() {
                        "(default)"
                    } else {
                        &ctx.rpc_url
                    };
                    println!("{current:<8} {name:<20} {:<8} {rpc_url}", ctx.backend.to_string());
                }
                Ok(())
            }

            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;

                println!("Config file: {}", cfg.path().display());
                println!("Current context: {}", cfg.current_context);
                println!("Contexts: {}", cfg.contexts.len());

                for name in cfg.list_contexts() {
                    let Some(ctx) = cfg.get_context(name) else {
                        continue;
                    };
                    println!("\n  {name}:");
                    println!("    Backend: {}", ctx.backend);
                    if !ctx.rpc_url.is_empty() {
                        println!("    RPC URL: {}", ctx.rpc_url);
                    }
                    if ctx.chain_id != 0 {
                        println!("    Chain ID: {}", ctx.chain_id);
                    }
                    if !ctx.private_key.is_empty() {
                        // Environment references are shown as written.
                        let shown = if ctx.private_key.starts_with('$') {
                            ctx.private_key.clone()
                        } else {
                            mask_secret(&ctx.private_key)
                        };
                        println!("    Private Key: {shown}");
                    }
                    if !ctx.gas_price.is_empty() {
                        println!("    Gas Price: {} wei", ctx.gas_price);
                    }
                    if !ctx.mock_balance.is_empty() {
                        println!("    Mock Balance: {} ETH", ctx.mock_balance);
                    }
                    if ctx.timeout > 0 {
                        println!("    Timeout: {}s", ctx.timeout);
                    }
                }
                Ok(())
            }
        }
    }
}
