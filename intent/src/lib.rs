//! Natural-language command parsing for wallet operations.
//!
//! This crate turns free text such as `"send 0.1 eth to 0xabc..."` into a
//! [`ParsedCommand`]: a classified [`Intent`] plus validated parameters.
//!
//! # Example
//!
//! ```
//! use chainspeak_intent::{describe, parse, Intent};
//!
//! let cmd = parse("Send 0.5 ETH to 0x1234abcd").unwrap();
//! assert_eq!(cmd.intent(), Intent::SendTransaction);
//! assert_eq!(cmd.param("amount"), Some("0.5"));
//! assert_eq!(describe(&cmd), "Send 0.5 ETH to 0x1234abcd");
//! ```
//!
//! # Modules
//!
//! - [`types`]: intent tag and parsed command
//! - [`pattern`]: the ordered rule table
//! - [`parser`]: normalization, matching and validation
//! - [`describe`]: human-readable rendering
//! - [`error`]: validation failures

pub mod describe;
pub mod error;
pub mod parser;
pub mod pattern;
pub mod types;

pub use describe::describe;
pub use error::ParseError;
pub use parser::{normalize, parse, parse_with};
pub use pattern::{PatternTable, RuleMatch};
pub use types::{DEFAULT_ASSET, Intent, ParsedCommand};
