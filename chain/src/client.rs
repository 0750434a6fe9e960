//! The chain backend abstraction.

use async_trait::async_trait;
use chainspeak_wallet::{Address, SignedTransaction};
use serde::Serialize;

use crate::error::{ChainError, Result};

/// Parameters for gas estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub from: Address,
    pub to: Address,
    /// Value in wei.
    pub value: u128,
}

/// A transaction as reported by the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTransaction {
    pub hash: String,
    pub from: Address,
    pub to: Option<Address>,
    /// Value in wei.
    pub value: u128,
    /// `None` while pending.
    pub block_number: Option<u64>,
}

/// Execution outcome of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub block_number: u64,
    pub success: bool,
}

/// Snapshot returned by [`check_connection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStatus {
    pub chain_id: u64,
    pub block_number: u64,
}

/// A node that can be queried and accept signed transactions.
///
/// Implementations must be safe for concurrent use (Send + Sync).
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64>;

    async fn block_number(&self) -> Result<u64>;

    /// Current gas price in wei.
    async fn gas_price(&self) -> Result<u128>;

    /// Balance in wei.
    async fn balance(&self, address: Address) -> Result<u128>;

    /// Next nonce for `address`, counting pending transactions.
    async fn nonce(&self, address: Address) -> Result<u64>;

    async fn estimate_gas(&self, call: &CallRequest) -> Result<u64>;

    /// Submits the transaction and returns its hash.
    async fn send_raw_transaction(&self, tx: &SignedTransaction) -> Result<String>;

    async fn transaction(&self, hash: &str) -> Result<Option<ChainTransaction>>;

    async fn receipt(&self, hash: &str) -> Result<Option<TransactionReceipt>>;
}

/// Queries chain id and head block to confirm the backend is reachable.
pub async fn check_connection(chain: &dyn ChainClient) -> Result<ChainStatus> {
    let chain_id = chain.chain_id().await?;
    let block_number = chain.block_number().await?;
    Ok(ChainStatus {
        chain_id,
        block_number,
    })
}

/// Parses a `0x`-prefixed hex quantity.
pub fn parse_quantity(s: &str) -> Result<u128> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::Decode(format!("quantity without 0x prefix: {s}")))?;
    if digits.is_empty() {
        return Err(ChainError::Decode("empty quantity".into()));
    }
    u128::from_str_radix(digits, 16).map_err(|e| ChainError::Decode(format!("{s}: {e}")))
}

pub fn parse_quantity_u64(s: &str) -> Result<u64> {
    let v = parse_quantity(s)?;
    u64::try_from(v).map_err(|_| ChainError::Decode(format!("quantity overflows u64: {s}")))
}

/// Formats a value as a minimal `0x` hex quantity.
pub fn to_quantity(v: u128) -> String {
    format!("0x{v:x}")
}
