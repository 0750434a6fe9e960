//! Chain access for chainspeak.
//!
//! [`ChainClient`] abstracts the node. [`MockChain`] keeps an in-memory
//! ledger and [`RpcChain`] speaks JSON-RPC over HTTP. [`Ledger`] binds a
//! [`WalletStore`](chainspeak_wallet::WalletStore) to a client and
//! implements the [`WalletRegistry`] and [`TransactionSubmitter`]
//! interfaces the command dispatcher depends on.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chainspeak_chain::{Ledger, MockChain, WalletRegistry};
//! use chainspeak_wallet::WalletStore;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let ledger = Ledger::new(Arc::new(WalletStore::new()), Arc::new(MockChain::new(8453)));
//!     let wallet = ledger.create_wallet(Some("savings")).await.unwrap();
//!     assert_eq!(wallet.name, "savings");
//!     assert_eq!(ledger.balance("savings").await.unwrap(), "1.0");
//! });
//! ```

pub mod client;
pub mod error;
pub mod ledger;
pub mod mock;
pub mod network;
pub mod registry;
pub mod rpc;

pub use client::{
    CallRequest, ChainClient, ChainStatus, ChainTransaction, TransactionReceipt, check_connection,
};
pub use error::{ChainError, Result};
pub use ledger::{FALLBACK_GAS_PRICE, Ledger};
pub use mock::{DEFAULT_MOCK_BALANCE, DEFAULT_MOCK_GAS_PRICE, MockChain};
pub use network::{DEFAULT_RPC_URL, Network};
pub use registry::{
    SendRequest, TransactionRecord, TransactionStatus, TransactionSubmitter, WalletRegistry,
};
pub use rpc::RpcChain;
