//! Intent dispatcher and JSON-RPC tool server.
//!
//! [`Dispatcher`] turns free text (via `chainspeak-intent`) or direct tool
//! arguments into calls on a [`WalletRegistry`](chainspeak_chain::WalletRegistry)
//! and [`TransactionSubmitter`](chainspeak_chain::TransactionSubmitter).
//! [`ToolServer`] exposes those operations as tools over newline-delimited
//! JSON-RPC 2.0.
//!
//! # Protocol
//!
//! | Method        | Result                                  |
//! |---------------|-----------------------------------------|
//! | `initialize`  | protocol version, capabilities, info    |
//! | `ping`        | `{}`                                    |
//! | `tools/list`  | tool specs with JSON Schema inputs      |
//! | `tools/call`  | `{content:[{type:"text",text}]}`        |
//! | `listTools`   | same as `tools/list`                    |
//! | `callTool`    | same as `tools/call`; errors are -32000 |

pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use dispatcher::{CommandResult, Dispatcher, Payload, UNKNOWN_COMMAND_MESSAGE};
pub use error::{DispatchError, ErrorKind};
pub use protocol::{JsonRpcRequest, JsonRpcResponse, ServerInfo};
pub use server::ToolServer;
pub use tools::{ToolError, ToolSpec, call_tool, tool_specs};
