//! Intent tag and parsed command types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Asset assumed when a command does not name one.
pub const DEFAULT_ASSET: &str = "ETH";

/// The classified purpose of a natural-language command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Transfer value to an address.
    SendTransaction,
    /// Query a wallet balance.
    CheckBalance,
    /// Generate a new wallet.
    CreateWallet,
    /// Nothing in the pattern table matched.
    Unknown,
}

impl Intent {
    /// Every intent, in pattern-table order, `Unknown` last.
    pub const ALL: [Intent; 4] = [
        Intent::SendTransaction,
        Intent::CheckBalance,
        Intent::CreateWallet,
        Intent::Unknown,
    ];

    /// Wire name of the intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SendTransaction => "send_transaction",
            Intent::CheckBalance => "check_balance",
            Intent::CreateWallet => "create_wallet",
            Intent::Unknown => "unknown",
        }
    }

    /// Returns true for every intent except [`Intent::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Intent::Unknown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing one command.
///
/// Built once by the parser and never mutated afterwards; fields are only
/// reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCommand {
    intent: Intent,
    parameters: BTreeMap<String, String>,
    original_text: String,
}

impl ParsedCommand {
    pub(crate) fn new(
        intent: Intent,
        parameters: BTreeMap<String, String>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            intent,
            parameters,
            original_text: original_text.into(),
        }
    }

    /// A command nothing matched. Parameters are always empty.
    pub fn unknown(original_text: impl Into<String>) -> Self {
        Self::new(Intent::Unknown, BTreeMap::new(), original_text)
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Looks up a single parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// The input exactly as the caller supplied it.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::describe::describe(self))
    }
}
