//! In-memory chain for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chainspeak_wallet::{Address, SignedTransaction, TRANSFER_GAS};
use parking_lot::Mutex;
use tracing::debug;

use crate::client::{CallRequest, ChainClient, ChainTransaction, TransactionReceipt};
use crate::error::{ChainError, Result};

/// Balance of an account the mock has not seen before: 1 ether.
pub const DEFAULT_MOCK_BALANCE: u128 = 1_000_000_000_000_000_000;

/// Gas price reported by the mock: 5 gwei.
pub const DEFAULT_MOCK_GAS_PRICE: u128 = 5_000_000_000;

/// Head block of a fresh mock chain.
pub const MOCK_GENESIS_BLOCK: u64 = 1_000_000;

/// A single-node ledger that mines every accepted transaction into its
/// own block.
pub struct MockChain {
    chain_id: u64,
    gas_price: u128,
    default_balance: u128,
    state: Mutex<MockState>,
}

struct MockState {
    block_number: u64,
    balances: HashMap<Address, u128>,
    nonces: HashMap<Address, u64>,
    transactions: HashMap<String, (ChainTransaction, TransactionReceipt)>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            gas_price: DEFAULT_MOCK_GAS_PRICE,
            default_balance: DEFAULT_MOCK_BALANCE,
            state: Mutex::new(MockState {
                block_number: MOCK_GENESIS_BLOCK,
                balances: HashMap::new(),
                nonces: HashMap::new(),
                transactions: HashMap::new(),
            }),
        }
    }

    pub fn with_gas_price(mut self, wei: u128) -> Self {
        self.gas_price = wei;
        self
    }

    /// Balance credited to accounts on first sight.
    pub fn with_default_balance(mut self, wei: u128) -> Self {
        self.default_balance = wei;
        self
    }

    pub fn set_balance(&self, address: Address, wei: u128) {
        self.state.lock().balances.insert(address, wei);
    }

    fn balance_of(&self, state: &MockState, address: &Address) -> u128 {
        state
            .balances
            .get(address)
            .copied()
            .unwrap_or(self.default_balance)
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.chain_id)
    }

    async fn block_number(&self) -> Result<u64> {
        Ok(self.state.lock().block_number)
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(self.gas_price)
    }

    async fn balance(&self, address: Address) -> Result<u128> {
        let state = self.state.lock();
        Ok(self.balance_of(&state, &address))
    }

    async fn nonce(&self, address: Address) -> Result<u64> {
        Ok(self.state.lock().nonces.get(&address).copied().unwrap_or(0))
    }

    async fn estimate_gas(&self, _call: &CallRequest) -> Result<u64> {
        Ok(TRANSFER_GAS)
    }

    async fn send_raw_transaction(&self, signed: &SignedTransaction) -> Result<String> {
        let tx = &signed.tx;
        if tx.chain_id != self.chain_id {
            return Err(ChainError::Rpc {
                code: -32000,
                message: format!(
                    "invalid chain id: expected {}, got {}",
                    self.chain_id, tx.chain_id
                ),
            });
        }

        let mut state = self.state.lock();
        let expected_nonce = state.nonces.get(&signed.from).copied().unwrap_or(0);
        if tx.nonce != expected_nonce {
            return Err(ChainError::Rpc {
                code: -32000,
                message: format!("invalid nonce: expected {expected_nonce}, got {}", tx.nonce),
            });
        }

        let have = self.balance_of(&state, &signed.from);
        let need = u128::from(tx.gas_limit)
            .checked_mul(tx.gas_price)
            .and_then(|fee| fee.checked_add(tx.value))
            .ok_or_else(|| ChainError::InvalidAmount("transaction cost overflows".into()))?;
        if have < need {
            return Err(ChainError::InsufficientFunds { have, need });
        }

        // Plain transfers always burn exactly the intrinsic gas.
        let fee = u128::from(TRANSFER_GAS.min(tx.gas_limit)) * tx.gas_price;
        state.balances.insert(signed.from, have - tx.value - fee);
        let to_balance = self.balance_of(&state, &tx.to);
        state.balances.insert(tx.to, to_balance.saturating_add(tx.value));
        state.nonces.insert(signed.from, expected_nonce + 1);
        state.block_number += 1;

        let hash = signed.hash_hex();
        let block_number = state.block_number;
        state.transactions.insert(
            hash.clone(),
            (
                ChainTransaction {
                    hash: hash.clone(),
                    from: signed.from,
                    to: Some(tx.to),
                    value: tx.value,
                    block_number: Some(block_number),
                },
                TransactionReceipt {
                    block_number,
                    success: true,
                },
            ),
        );
        debug!(%hash, block_number, "mock chain mined transaction");
        Ok(hash)
    }

    async fn transaction(&self, hash: &str) -> Result<Option<ChainTransaction>> {
        let state = self.state.lock();
        Ok(state
            .transactions
            .get(&hash.to_ascii_lowercase())
            .map(|(tx, _)| tx.clone()))
    }

    async fn receipt(&self, hash: &str) -> Result<Option<TransactionReceipt>> {
        let state = self.state.lock();
        Ok(state
            .transactions
            .get(&hash.to_ascii_lowercase())
            .map(|(_, receipt)| *receipt))
    }
}
