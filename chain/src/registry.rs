//! Collaborator interfaces used by the command dispatcher.

use std::fmt;

use async_trait::async_trait;
use chainspeak_wallet::{Address, WalletInfo};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;

/// Named wallets and their balances.
#[async_trait]
pub trait WalletRegistry: Send + Sync {
    /// Creates a wallet; an auto-generated name is used when `name` is `None`.
    async fn create_wallet(&self, name: Option<&str>) -> Result<WalletInfo>;

    /// Looks up by exact name first, then by address ignoring case.
    async fn get_wallet(&self, name_or_address: &str) -> Option<WalletInfo>;

    /// The wallet named `default`, else the first registered one.
    async fn default_wallet(&self) -> Option<WalletInfo>;

    async fn list_wallets(&self) -> Vec<WalletInfo>;

    /// Balance in ether as a decimal string.
    async fn balance(&self, name_or_address: &str) -> Result<String>;
}

/// A value transfer to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendRequest {
    /// Sender name or address; the default wallet when `None`.
    pub from: Option<String>,
    pub to: String,
    /// Amount in ether as a decimal string.
    pub amount: String,
    pub gas_limit: Option<u64>,
    /// Gas price in wei.
    pub gas_price: Option<u128>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted or looked-up transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: String,
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Value in ether as a decimal string.
    pub value: String,
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Set only for transactions submitted by this process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Signs and submits transfers.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn send(&self, request: SendRequest) -> Result<TransactionRecord>;

    /// `None` when the chain does not know the hash.
    async fn get_transaction(&self, hash: &str) -> Result<Option<TransactionRecord>>;

    /// Gas estimate with a 10% buffer.
    async fn estimate_gas(&self, request: SendRequest) -> Result<u64>;
}
