//! Wallet registry and transaction submitter over a [`ChainClient`].

use std::sync::Arc;

use async_trait::async_trait;
use chainspeak_wallet::{
    Address, LegacyTransaction, TRANSFER_GAS, Wallet, WalletInfo, WalletStore, format_ether,
    parse_ether,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::client::{CallRequest, ChainClient};
use crate::error::{ChainError, Result};
use crate::registry::{
    SendRequest, TransactionRecord, TransactionStatus, TransactionSubmitter, WalletRegistry,
};

/// Gas price used when the node cannot report one: 5 gwei.
pub const FALLBACK_GAS_PRICE: u128 = 5_000_000_000;

/// Binds the wallet store to a chain backend.
pub struct Ledger {
    store: Arc<WalletStore>,
    chain: Arc<dyn ChainClient>,
    fallback_gas_price: u128,
}

impl Ledger {
    pub fn new(store: Arc<WalletStore>, chain: Arc<dyn ChainClient>) -> Self {
        Self {
            store,
            chain,
            fallback_gas_price: FALLBACK_GAS_PRICE,
        }
    }

    pub fn with_fallback_gas_price(mut self, wei: u128) -> Self {
        self.fallback_gas_price = wei;
        self
    }

    pub fn store(&self) -> &Arc<WalletStore> {
        &self.store
    }

    pub fn chain(&self) -> &Arc<dyn ChainClient> {
        &self.chain
    }

    /// Current gas price, or the fallback if the node fails to answer.
    pub async fn current_gas_price(&self) -> u128 {
        match self.chain.gas_price().await {
            Ok(price) => price,
            Err(e) => {
                warn!(error = %e, fallback = self.fallback_gas_price, "gas price lookup failed");
                self.fallback_gas_price
            }
        }
    }

    fn sender(&self, from: Option<&str>) -> Result<Wallet> {
        let name = match from {
            Some(name) => name.to_string(),
            None => self.store.default_wallet().ok_or(ChainError::NoWallet)?.name,
        };
        self.store
            .signer(&name)
            .ok_or(ChainError::NotFound(name))
    }

    fn parse_transfer(request: &SendRequest) -> Result<(Address, u128)> {
        let to: Address = request
            .to
            .parse()
            .map_err(|_| ChainError::InvalidAddress(request.to.clone()))?;
        let value = parse_ether(&request.amount)
            .map_err(|_| ChainError::InvalidAmount(request.amount.clone()))?;
        if value == 0 {
            return Err(ChainError::InvalidAmount(request.amount.clone()));
        }
        Ok((to, value))
    }
}

#[async_trait]
impl WalletRegistry for Ledger {
    async fn create_wallet(&self, name: Option<&str>) -> Result<WalletInfo> {
        Ok(self.store.create(name)?)
    }

    async fn get_wallet(&self, name_or_address: &str) -> Option<WalletInfo> {
        self.store.get(name_or_address)
    }

    async fn default_wallet(&self) -> Option<WalletInfo> {
        self.store.default_wallet()
    }

    async fn list_wallets(&self) -> Vec<WalletInfo> {
        self.store.list()
    }

    async fn balance(&self, name_or_address: &str) -> Result<String> {
        let wallet = self
            .store
            .get(name_or_address)
            .ok_or_else(|| ChainError::NotFound(name_or_address.to_string()))?;
        let wei = self.chain.balance(wallet.address).await?;
        Ok(format_ether(wei))
    }
}

#[async_trait]
impl TransactionSubmitter for Ledger {
    async fn send(&self, request: SendRequest) -> Result<TransactionRecord> {
        let (to, value) = Self::parse_transfer(&request)?;
        let wallet = self.sender(request.from.as_deref())?;
        let from = wallet.address();

        let gas_price = match request.gas_price {
            Some(price) => price,
            None => self.current_gas_price().await,
        };
        let chain_id = self.chain.chain_id().await?;
        let nonce = self.chain.nonce(from).await?;

        let signed = LegacyTransaction::transfer(to, value, nonce, gas_price, chain_id)
            .with_gas_limit(request.gas_limit.unwrap_or(TRANSFER_GAS))
            .sign(wallet.key())?;

        info!(
            from = %from,
            to = %to,
            amount = %request.amount,
            nonce,
            gas_price,
            "sending transaction"
        );
        let hash = self.chain.send_raw_transaction(&signed).await?;
        info!(%hash, "transaction sent");

        Ok(TransactionRecord {
            hash,
            from,
            to: Some(to),
            value: format_ether(value),
            status: TransactionStatus::Pending,
            block_number: None,
            submitted_at: Some(Utc::now()),
        })
    }

    async fn get_transaction(&self, hash: &str) -> Result<Option<TransactionRecord>> {
        let Some(tx) = self.chain.transaction(hash).await? else {
            return Ok(None);
        };
        let receipt = self.chain.receipt(hash).await?;
        let (status, block_number) = match receipt {
            Some(r) if r.success => (TransactionStatus::Confirmed, Some(r.block_number)),
            Some(r) => (TransactionStatus::Failed, Some(r.block_number)),
            None => (TransactionStatus::Pending, tx.block_number),
        };
        Ok(Some(TransactionRecord {
            hash: tx.hash,
            from: tx.from,
            to: tx.to,
            value: format_ether(tx.value),
            status,
            block_number,
            submitted_at: None,
        }))
    }

    async fn estimate_gas(&self, request: SendRequest) -> Result<u64> {
        let (to, value) = Self::parse_transfer(&request)?;
        let wallet = self.sender(request.from.as_deref())?;
        let estimate = self
            .chain
            .estimate_gas(&CallRequest {
                from: wallet.address(),
                to,
                value,
            })
            .await?;
        Ok(estimate.saturating_mul(110) / 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ChainTransaction, TransactionReceipt};
    use crate::mock::{DEFAULT_MOCK_BALANCE, MockChain};
    use chainspeak_wallet::{DEFAULT_WALLET_NAME, PrivateKey, SignedTransaction};

    const RECIPIENT: &str = "0x00000000000000000000000000000000000000cc";

    fn ledger() -> Ledger {
        Ledger::new(Arc::new(WalletStore::new()), Arc::new(MockChain::new(8453)))
    }

    fn send(to: &str, amount: &str) -> SendRequest {
        SendRequest {
            to: to.into(),
            amount: amount.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_balance_of_unknown_wallet() {
        let err = ledger().balance("mywallet").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "wallet not found: mywallet");
    }

    #[tokio::test]
    async fn test_balance_by_name_and_address() {
        let ledger = ledger();
        let info = ledger.create_wallet(Some("alice")).await.unwrap();
        assert_eq!(ledger.balance("alice").await.unwrap(), "1.0");
        assert_eq!(
            ledger.balance(&info.address.to_lower_hex()).await.unwrap(),
            "1.0"
        );
    }

    #[tokio::test]
    async fn test_send_without_wallet() {
        let err = ledger().send(send(RECIPIENT, "0.1")).await.unwrap_err();
        assert!(matches!(err, ChainError::NoWallet));
    }

    #[tokio::test]
    async fn test_send_validates_before_lookup() {
        let ledger = ledger();
        ledger.create_wallet(None).await.unwrap();
        assert!(matches!(
            ledger.send(send("0x1234", "0.1")).await,
            Err(ChainError::InvalidAddress(_))
        ));
        assert!(matches!(
            ledger.send(send(RECIPIENT, "0")).await,
            Err(ChainError::InvalidAmount(_))
        ));
        assert!(matches!(
            ledger.send(send(RECIPIENT, "abc")).await,
            Err(ChainError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn test_send_from_default_and_lookup() {
        let ledger = ledger();
        ledger.create_wallet(Some("first")).await.unwrap();
        let default = ledger
            .store()
            .import(DEFAULT_WALLET_NAME, PrivateKey::random().unwrap())
            .unwrap();

        let record = ledger.send(send(RECIPIENT, "0.25")).await.unwrap();
        assert_eq!(record.from, default.address);
        assert_eq!(record.value, "0.25");
        assert_eq!(record.status, TransactionStatus::Pending);
        assert!(record.submitted_at.is_some());

        let fetched = ledger.get_transaction(&record.hash).await.unwrap().unwrap();
        assert_eq!(fetched.status, TransactionStatus::Confirmed);
        assert_eq!(fetched.value, "0.25");
        assert_eq!(fetched.to, Some(RECIPIENT.parse().unwrap()));
        assert!(fetched.submitted_at.is_none());

        assert_eq!(
            ledger.balance(RECIPIENT).await.unwrap_err().to_string(),
            format!("wallet not found: {RECIPIENT}")
        );
        let recipient_wei = ledger.chain().balance(RECIPIENT.parse().unwrap()).await.unwrap();
        assert_eq!(recipient_wei, DEFAULT_MOCK_BALANCE + DEFAULT_MOCK_BALANCE / 4);
    }

    #[tokio::test]
    async fn test_send_from_named_sender() {
        let ledger = ledger();
        let bob = ledger.create_wallet(Some("bob")).await.unwrap();
        let mut request = send(RECIPIENT, "0.1");
        request.from = Some("bob".into());
        let record = ledger.send(request).await.unwrap();
        assert_eq!(record.from, bob.address);

        let mut request = send(RECIPIENT, "0.1");
        request.from = Some("carol".into());
        assert!(ledger.send(request).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_transaction() {
        assert!(ledger().get_transaction("0xabc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_estimate_gas_buffer() {
        let ledger = ledger();
        ledger.create_wallet(None).await.unwrap();
        assert_eq!(ledger.estimate_gas(send(RECIPIENT, "1")).await.unwrap(), 23_100);
    }

    struct FlakyChain {
        inner: MockChain,
    }

    #[async_trait]
    impl ChainClient for FlakyChain {
        async fn chain_id(&self) -> Result<u64> {
            self.inner.chain_id().await
        }
        async fn block_number(&self) -> Result<u64> {
            self.inner.block_number().await
        }
        async fn gas_price(&self) -> Result<u128> {
            Err(ChainError::Rpc {
                code: -32603,
                message: "internal error".into(),
            })
        }
        async fn balance(&self, address: Address) -> Result<u128> {
            self.inner.balance(address).await
        }
        async fn nonce(&self, address: Address) -> Result<u64> {
            self.inner.nonce(address).await
        }
        async fn estimate_gas(&self, call: &CallRequest) -> Result<u64> {
            self.inner.estimate_gas(call).await
        }
        async fn send_raw_transaction(&self, tx: &SignedTransaction) -> Result<String> {
            assert_eq!(tx.tx.gas_price, FALLBACK_GAS_PRICE);
            self.inner.send_raw_transaction(tx).await
        }
        async fn transaction(&self, hash: &str) -> Result<Option<ChainTransaction>> {
            self.inner.transaction(hash).await
        }
        async fn receipt(&self, _hash: &str) -> Result<Option<TransactionReceipt>> {
            Ok(Some(TransactionReceipt {
                block_number: 7,
                success: false,
            }))
        }
    }

    #[tokio::test]
    async fn test_gas_price_fallback_and_failed_receipt() {
        let chain = FlakyChain {
            inner: MockChain::new(8453),
        };
        let ledger = Ledger::new(Arc::new(WalletStore::new()), Arc::new(chain));
        assert_eq!(ledger.current_gas_price().await, FALLBACK_GAS_PRICE);

        ledger.create_wallet(None).await.unwrap();
        let record = ledger.send(send(RECIPIENT, "0.01")).await.unwrap();
        let fetched = ledger.get_transaction(&record.hash).await.unwrap().unwrap();
        assert_eq!(fetched.status, TransactionStatus::Failed);
        assert_eq!(fetched.block_number, Some(7));
    }
}
