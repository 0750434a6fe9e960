//! Wallet keys, addresses, units and the in-memory wallet store.
//!
//! # Modules
//!
//! - [`address`]: 20-byte account addresses with EIP-55 display
//! - [`key`]: secp256k1 private keys and recoverable signatures
//! - [`units`]: exact ether/wei conversion
//! - [`transaction`]: EIP-155 legacy transfers
//! - [`store`]: named wallets held in memory

pub mod address;
pub mod error;
pub mod hash;
pub mod key;
pub mod store;
pub mod transaction;
pub mod units;

pub use address::Address;
pub use error::{Result, WalletError};
pub use hash::keccak256;
pub use key::{PrivateKey, RecoverableSignature};
pub use store::{DEFAULT_WALLET_NAME, Wallet, WalletInfo, WalletStore};
pub use transaction::{LegacyTransaction, SignedTransaction, TRANSFER_GAS};
pub use units::{ETHER_DECIMALS, GWEI_DECIMALS, format_ether, format_units, parse_ether, parse_units};
