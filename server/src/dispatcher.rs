//! Routes parsed commands and tool calls to the wallet registry and
//! transaction submitter.

use std::sync::Arc;

use chainspeak_chain::{ChainError, SendRequest, TransactionRecord, TransactionSubmitter, WalletRegistry};
use chainspeak_intent::parser::{is_valid_amount, is_valid_wallet_name};
use chainspeak_intent::{DEFAULT_ASSET, Intent, ParseError, ParsedCommand, describe, parse};
use chainspeak_wallet::WalletInfo;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::DispatchError;
use crate::tools::SendTransactionArgs;

pub const UNKNOWN_COMMAND_MESSAGE: &str = "I couldn't understand that command. Try something like \"Send 0.1 ETH to 0x123...\" or \"Create a new wallet\".";

/// Outcome of a command or tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_command: Option<String>,
}

/// Data attached to a successful result.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Transaction { transaction: TransactionRecord },
    Balance { balance: String, wallet: String },
    Wallet { wallet: WalletInfo },
    Wallets { wallets: Vec<WalletInfo> },
}

impl CommandResult {
    pub fn ok(message: impl Into<String>, payload: Payload) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
            original_command: None,
        }
    }

    pub fn failure(err: &DispatchError) -> Self {
        Self {
            success: false,
            message: format!("Error processing command: {err}"),
            payload: None,
            original_command: None,
        }
    }

    pub fn unknown(original: &str) -> Self {
        Self {
            success: false,
            message: UNKNOWN_COMMAND_MESSAGE.to_string(),
            payload: None,
            original_command: Some(original.to_string()),
        }
    }

    fn with_original(mut self, original: &str) -> Self {
        self.original_command = Some(original.to_string());
        self
    }
}

/// Maps intents to collaborator calls.
///
/// Holds no state between calls; every failure is returned as a value.
pub struct Dispatcher {
    registry: Arc<dyn WalletRegistry>,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl Dispatcher {
    pub fn new(registry: Arc<dyn WalletRegistry>, submitter: Arc<dyn TransactionSubmitter>) -> Self {
        Self {
            registry,
            submitter,
        }
    }

    /// Parses `text` and runs the resolved intent.
    ///
    /// Never fails: validation and collaborator errors become a result with
    /// `success: false` carrying the original text.
    pub async fn process_command(&self, text: &str) -> CommandResult {
        let cmd = match parse(text) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!(error = %e, "command rejected");
                return CommandResult::failure(&DispatchError::from(e)).with_original(text);
            }
        };
        debug!(intent = %cmd.intent(), parameters = ?cmd.parameters(), "parsed command");
        info!(description = %describe(&cmd), "processing command");

        if cmd.intent() == Intent::Unknown {
            return CommandResult::unknown(text);
        }
        match self.dispatch(&cmd).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "command failed");
                CommandResult::failure(&e).with_original(text)
            }
        }
    }

    async fn dispatch(&self, cmd: &ParsedCommand) -> Result<CommandResult, DispatchError> {
        match cmd.intent() {
            Intent::SendTransaction => {
                let to = cmd
                    .param("to")
                    .ok_or(ParseError::MissingParameter("to"))?;
                let amount = cmd
                    .param("amount")
                    .ok_or(ParseError::MissingParameter("amount"))?;
                self.send_transaction(SendTransactionArgs {
                    to: to.to_string(),
                    amount: amount.to_string(),
                    from: cmd.param("from").map(str::to_string),
                    asset: cmd.param("asset").map(str::to_string),
                    gas_limit: None,
                    gas_price: None,
                })
                .await
            }
            Intent::CheckBalance => self.check_balance(cmd.param("wallet")).await,
            Intent::CreateWallet => self.create_wallet(cmd.param("name")).await,
            Intent::Unknown => Ok(CommandResult::unknown(cmd.original_text())),
        }
    }

    pub async fn send_transaction(
        &self,
        args: SendTransactionArgs,
    ) -> Result<CommandResult, DispatchError> {
        if !is_valid_amount(&args.amount) {
            return Err(ParseError::InvalidAmount(args.amount).into());
        }
        if let Some(asset) = &args.asset {
            if !asset.eq_ignore_ascii_case(DEFAULT_ASSET) {
                return Err(DispatchError::Validation(format!("unsupported asset: {asset}")));
            }
        }
        let gas_price = args
            .gas_price
            .as_deref()
            .map(|p| {
                p.parse::<u128>()
                    .map_err(|_| DispatchError::Validation(format!("invalid gas price: {p}")))
            })
            .transpose()?;

        let record = self
            .submitter
            .send(SendRequest {
                from: args.from,
                to: args.to,
                amount: args.amount,
                gas_limit: args.gas_limit,
                gas_price,
            })
            .await?;
        Ok(CommandResult::ok(
            format!("Transaction sent successfully! Hash: {}", record.hash),
            Payload::Transaction {
                transaction: record,
            },
        ))
    }

    /// Balance of `wallet`, or of the default wallet when `None`.
    pub async fn check_balance(&self, wallet: Option<&str>) -> Result<CommandResult, DispatchError> {
        let name = match wallet {
            Some(w) => w.to_string(),
            None => {
                self.registry
                    .default_wallet()
                    .await
                    .ok_or(ChainError::NoWallet)?
                    .name
            }
        };
        let balance = self.registry.balance(&name).await?;
        Ok(CommandResult::ok(
            format!("Balance of wallet \"{name}\": {balance} ETH"),
            Payload::Balance {
                balance,
                wallet: name,
            },
        ))
    }

    pub async fn create_wallet(&self, name: Option<&str>) -> Result<CommandResult, DispatchError> {
        if let Some(name) = name {
            if !is_valid_wallet_name(name) {
                return Err(ParseError::InvalidWalletName(name.to_string()).into());
            }
        }
        let wallet = self.registry.create_wallet(name).await?;
        Ok(CommandResult::ok(
            format!(
                "Created new wallet \"{}\" with address {}",
                wallet.name, wallet.address
            ),
            Payload::Wallet { wallet },
        ))
    }

    pub async fn list_wallets(&self) -> Result<CommandResult, DispatchError> {
        let wallets = self.registry.list_wallets().await;
        Ok(CommandResult::ok(
            format!("Found {} wallet(s)", wallets.len()),
            Payload::Wallets { wallets },
        ))
    }

    pub async fn get_transaction(&self, hash: &str) -> Result<CommandResult, DispatchError> {
        let record = self
            .submitter
            .get_transaction(hash)
            .await?
            .ok_or_else(|| DispatchError::NotFound(format!("transaction not found: {hash}")))?;
        Ok(CommandResult::ok(
            format!("Transaction {} is {}", record.hash, record.status),
            Payload::Transaction {
                transaction: record,
            },
        ))
    }
}
