//! Wiring of wallet store, chain client and dispatcher from a context.

use std::sync::Arc;

use anyhow::Context as _;
use chainspeak_chain::{
    ChainClient, DEFAULT_RPC_URL, Ledger, MockChain, Network, RpcChain, check_connection,
};
use chainspeak_cli::config::{Backend, ResolvedContext};
use chainspeak_server::Dispatcher;
use chainspeak_wallet::{DEFAULT_WALLET_NAME, PrivateKey, WalletStore, parse_ether};
use tracing::{info, warn};

/// A fully wired process root.
pub struct App {
    pub dispatcher: Arc<Dispatcher>,
    pub network: Network,
    backend: Backend,
    ledger: Arc<Ledger>,
}

impl App {
    pub fn build(ctx: &ResolvedContext) -> anyhow::Result<Self> {
        let rpc_url = ctx.rpc_url.as_deref().unwrap_or(DEFAULT_RPC_URL);
        let network = match ctx.chain_id {
            Some(id) => Network::from_chain_id(id),
            None => Network::from_rpc_url(rpc_url),
        };

        let chain: Arc<dyn ChainClient> = match ctx.backend {
            Backend::Mock => {
                let mut mock = MockChain::new(network.chain_id);
                if let Some(balance) = &ctx.mock_balance {
                    let wei = parse_ether(balance)
                        .with_context(|| format!("invalid mock_balance: {balance}"))?;
                    mock = mock.with_default_balance(wei);
                }
                Arc::new(mock)
            }
            Backend::Rpc => {
                let client = match ctx.timeout {
                    Some(timeout) => RpcChain::with_timeout(rpc_url, timeout)?,
                    None => RpcChain::new(rpc_url)?,
                };
                Arc::new(client)
            }
        };

        let store = Arc::new(WalletStore::new());
        if let Some(key) = &ctx.private_key {
            let key = PrivateKey::from_hex(key).context("invalid private key")?;
            let wallet = store.import(DEFAULT_WALLET_NAME, key)?;
            info!(name = %wallet.name, address = %wallet.address, "imported wallet");
        }

        let mut ledger = Ledger::new(store, chain);
        if let Some(wei) = ctx.gas_price {
            ledger = ledger.with_fallback_gas_price(wei);
        }
        let ledger = Arc::new(ledger);

        Ok(Self {
            dispatcher: Arc::new(Dispatcher::new(ledger.clone(), ledger.clone())),
            network,
            backend: ctx.backend,
            ledger,
        })
    }

    /// Logs whether the chain answers. Failures are logged, not returned.
    pub async fn check_connection(&self) {
        match check_connection(self.ledger.chain().as_ref()).await {
            Ok(status) => {
                info!(
                    backend = %self.backend,
                    network = %self.network,
                    chain_id = status.chain_id,
                    block = status.block_number,
                    "connected to chain"
                );
                if status.chain_id != self.network.chain_id {
                    warn!(
                        expected = self.network.chain_id,
                        actual = status.chain_id,
                        "node reports a different chain id"
                    );
                }
            }
            Err(e) => warn!(
                backend = %self.backend,
                network = %self.network,
                error = %e,
                "chain unreachable"
            ),
        }
    }
}
