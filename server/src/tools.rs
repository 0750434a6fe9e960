//! Tool definitions and argument types exposed over the tool protocol.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dispatcher::{CommandResult, Dispatcher};
use crate::error::DispatchError;

pub const PROCESS_COMMAND: &str = "process_command";
pub const CREATE_WALLET: &str = "create_wallet";
pub const CHECK_BALANCE: &str = "check_balance";
pub const LIST_WALLETS: &str = "list_wallets";
pub const SEND_TRANSACTION: &str = "send_transaction";
pub const GET_TRANSACTION: &str = "get_transaction";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProcessCommandArgs {
    /// Natural language command (e.g., "Send 0.1 ETH to 0x123...")
    pub command: String,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CreateWalletArgs {
    /// Optional name for the wallet
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CheckBalanceArgs {
    /// Wallet name or address (defaults to primary wallet)
    #[serde(default)]
    pub wallet: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListWalletsArgs {}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionArgs {
    /// Recipient address
    pub to: String,
    /// Amount in ETH
    pub amount: String,
    /// Sender wallet name or address (defaults to primary wallet)
    #[serde(default)]
    pub from: Option<String>,
    /// Asset to send; only ETH is supported
    #[serde(default)]
    pub asset: Option<String>,
    /// Gas limit override
    #[serde(default)]
    pub gas_limit: Option<u64>,
    /// Gas price override in wei, as a decimal string
    #[serde(default)]
    pub gas_price: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTransactionArgs {
    /// Transaction hash
    pub hash: String,
}

/// A tool as listed by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolSpec {
    /// Builds a spec whose input schema is generated from `T`.
    pub fn new<T: JsonSchema>(name: &str, description: &str) -> Self {
        let schema = schemars::schema_for!(T);
        let mut input_schema = serde_json::to_value(&schema).unwrap_or_default();
        if let Some(obj) = input_schema.as_object_mut() {
            obj.remove("$schema");
            obj.remove("title");
            obj.entry("properties")
                .or_insert_with(|| Value::Object(Default::default()));
        }
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// All tools in listing order.
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new::<ProcessCommandArgs>(
            PROCESS_COMMAND,
            "Process a natural language command for Base network operations",
        ),
        ToolSpec::new::<CreateWalletArgs>(CREATE_WALLET, "Create a new wallet"),
        ToolSpec::new::<CheckBalanceArgs>(CHECK_BALANCE, "Check wallet balance"),
        ToolSpec::new::<ListWalletsArgs>(LIST_WALLETS, "List all available wallets"),
        ToolSpec::new::<SendTransactionArgs>(SEND_TRANSACTION, "Send ETH to an address"),
        ToolSpec::new::<GetTransactionArgs>(GET_TRANSACTION, "Look up a transaction by hash"),
    ]
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error(transparent)]
    Failed(#[from] DispatchError),
}

fn arguments<T: serde::de::DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    // Clients may omit arguments or send null for tools without parameters.
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Runs the tool `name` with JSON `args`.
pub async fn call_tool(
    dispatcher: &Dispatcher,
    name: &str,
    args: Value,
) -> Result<CommandResult, ToolError> {
    let result = match name {
        PROCESS_COMMAND => {
            let args: ProcessCommandArgs = arguments(name, args)?;
            if args.command.trim().is_empty() {
                return Err(ToolError::InvalidArguments {
                    tool: name.to_string(),
                    message: "Command is required and must be a string".into(),
                });
            }
            return Ok(dispatcher.process_command(&args.command).await);
        }
        CREATE_WALLET => {
            let args: CreateWalletArgs = arguments(name, args)?;
            dispatcher.create_wallet(args.name.as_deref()).await
        }
        CHECK_BALANCE => {
            let args: CheckBalanceArgs = arguments(name, args)?;
            dispatcher.check_balance(args.wallet.as_deref()).await
        }
        LIST_WALLETS => {
            let _: ListWalletsArgs = arguments(name, args)?;
            dispatcher.list_wallets().await
        }
        SEND_TRANSACTION => {
            let args: SendTransactionArgs = arguments(name, args)?;
            dispatcher.send_transaction(args).await
        }
        GET_TRANSACTION => {
            let args: GetTransactionArgs = arguments(name, args)?;
            dispatcher.get_transaction(&args.hash).await
        }
        other => return Err(ToolError::UnknownTool(other.to_string())),
    };
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_and_order() {
        let names: Vec<String> = tool_specs().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                PROCESS_COMMAND,
                CREATE_WALLET,
                CHECK_BALANCE,
                LIST_WALLETS,
                SEND_TRANSACTION,
                GET_TRANSACTION
            ]
        );
    }

    #[test]
    fn test_process_command_schema() {
        let spec = ToolSpec::new::<ProcessCommandArgs>(PROCESS_COMMAND, "x");
        let schema = &spec.input_schema;
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["command"]["type"], "string");
        assert_eq!(schema["required"], serde_json::json!(["command"]));
        assert!(schema.get("$schema").is_none());
    }

    #[test]
    fn test_send_schema_uses_camel_case() {
        let spec = ToolSpec::new::<SendTransactionArgs>(SEND_TRANSACTION, "x");
        let props = spec.input_schema["properties"].as_object().unwrap();
        assert!(props.contains_key("gasLimit"));
        assert!(props.contains_key("gasPrice"));
        let required: Vec<&str> = spec.input_schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"to"));
        assert!(required.contains(&"amount"));
        assert!(!required.contains(&"from"));
    }

    #[test]
    fn test_list_wallets_schema_has_properties() {
        let spec = ToolSpec::new::<ListWalletsArgs>(LIST_WALLETS, "x");
        assert!(spec.input_schema["properties"].is_object());
        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("inputSchema").is_some());
    }

    #[test]
    fn test_arguments_accept_null() {
        let args: CreateWalletArgs = arguments(CREATE_WALLET, Value::Null).unwrap();
        assert!(args.name.is_none());
        let err = arguments::<ProcessCommandArgs>(PROCESS_COMMAND, Value::Null).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }
}
