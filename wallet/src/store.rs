//! In-memory wallet store.

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::address::Address;
use crate::error::{Result, WalletError};
use crate::key::PrivateKey;

/// Name of the wallet bootstrapped from a configured private key.
pub const DEFAULT_WALLET_NAME: &str = "default";

/// A named wallet holding its signing key.
#[derive(Debug, Clone)]
pub struct Wallet {
    name: String,
    address: Address,
    key: PrivateKey,
}

impl Wallet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn key(&self) -> &PrivateKey {
        &self.key
    }

    /// Public view of the wallet, without key material.
    pub fn info(&self) -> WalletInfo {
        WalletInfo {
            name: self.name.clone(),
            address: self.address,
        }
    }
}

/// Name and address of a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletInfo {
    pub name: String,
    pub address: Address,
}

/// Named wallets in insertion order.
///
/// Names are unique. Lookups try the exact name first, then the address
/// ignoring case.
#[derive(Debug, Default)]
pub struct WalletStore {
    wallets: RwLock<Vec<Wallet>>,
}

impl WalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wallet with a fresh random key.
    ///
    /// Without a name the first free `wallet_{n}` is used, counting from
    /// the number of stored wallets plus one.
    pub fn create(&self, name: Option<&str>) -> Result<WalletInfo> {
        let key = PrivateKey::random()?;
        let mut wallets = self.wallets.write();

        let name = match name {
            Some(name) => {
                if wallets.iter().any(|w| w.name == name) {
                    return Err(WalletError::AlreadyExists(name.to_string()));
                }
                name.to_string()
            }
            None => {
                let mut n = wallets.len() + 1;
                loop {
                    let candidate = format!("wallet_{n}");
                    if !wallets.iter().any(|w| w.name == candidate) {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };

        let wallet = Wallet {
            address: key.address(),
            name,
            key,
        };
        info!(name = %wallet.name, address = %wallet.address, "created wallet");
        let info = wallet.info();
        wallets.push(wallet);
        Ok(info)
    }

    /// Stores an existing key under `name`.
    pub fn import(&self, name: &str, key: PrivateKey) -> Result<WalletInfo> {
        let mut wallets = self.wallets.write();
        if wallets.iter().any(|w| w.name == name) {
            return Err(WalletError::AlreadyExists(name.to_string()));
        }
        let wallet = Wallet {
            name: name.to_string(),
            address: key.address(),
            key,
        };
        info!(name = %wallet.name, address = %wallet.address, "imported wallet");
        let info = wallet.info();
        wallets.push(wallet);
        Ok(info)
    }

    /// Looks up a wallet by name, then by address (case-insensitive).
    pub fn get(&self, name_or_address: &str) -> Option<WalletInfo> {
        self.find(name_or_address).map(|w| w.info())
    }

    /// Like [`get`](Self::get) but includes the signing key.
    pub fn signer(&self, name_or_address: &str) -> Option<Wallet> {
        self.find(name_or_address)
    }

    fn find(&self, name_or_address: &str) -> Option<Wallet> {
        let wallets = self.wallets.read();
        if let Some(w) = wallets.iter().find(|w| w.name == name_or_address) {
            return Some(w.clone());
        }
        wallets
            .iter()
            .find(|w| w.address.to_lower_hex().eq_ignore_ascii_case(name_or_address))
            .cloned()
    }

    /// The wallet named `default`, else the first one stored.
    pub fn default_wallet(&self) -> Option<WalletInfo> {
        let wallets = self.wallets.read();
        wallets
            .iter()
            .find(|w| w.name == DEFAULT_WALLET_NAME)
            .or_else(|| wallets.first())
            .map(Wallet::info)
    }

    pub fn list(&self) -> Vec<WalletInfo> {
        self.wallets.read().iter().map(Wallet::info).collect()
    }

    pub fn len(&self) -> usize {
        self.wallets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_one() -> PrivateKey {
        PrivateKey::from_hex(&format!("{:0>64}", "1")).unwrap()
    }

    #[test]
    fn test_auto_names() {
        let store = WalletStore::new();
        assert_eq!(store.create(None).unwrap().name, "wallet_1");
        assert_eq!(store.create(Some("alice")).unwrap().name, "alice");
        assert_eq!(store.create(None).unwrap().name, "wallet_3");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_auto_name_skips_taken() {
        let store = WalletStore::new();
        store.create(Some("wallet_2")).unwrap();
        assert_eq!(store.create(None).unwrap().name, "wallet_3");
    }

    #[test]
    fn test_name_collision() {
        let store = WalletStore::new();
        store.create(Some("bob")).unwrap();
        assert_eq!(
            store.create(Some("bob")),
            Err(WalletError::AlreadyExists("bob".into()))
        );
        assert!(store.import("bob", key_one()).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookup_by_name_and_address() {
        let store = WalletStore::new();
        let info = store.import("main", key_one()).unwrap();

        assert_eq!(store.get("main"), Some(info.clone()));
        assert_eq!(
            store.get("0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"),
            Some(info.clone())
        );
        assert_eq!(
            store.get("0x7E5F4552091A69125D5DFCB7B8C2659029395BDF"),
            Some(info)
        );
        assert!(store.get("MAIN").is_none());
        assert!(store.get("nobody").is_none());
    }

    #[test]
    fn test_name_wins_over_address() {
        let store = WalletStore::new();
        let first = store.import("a", key_one()).unwrap();
        let addr = first.address.to_lower_hex();
        let named = store.create(Some(&addr)).unwrap();
        assert_eq!(store.get(&addr).unwrap().name, named.name);
    }

    #[test]
    fn test_default_wallet() {
        let store = WalletStore::new();
        assert!(store.default_wallet().is_none());

        store.create(Some("first")).unwrap();
        assert_eq!(store.default_wallet().unwrap().name, "first");

        store.import(DEFAULT_WALLET_NAME, key_one()).unwrap();
        assert_eq!(store.default_wallet().unwrap().name, DEFAULT_WALLET_NAME);
    }

    #[test]
    fn test_signer_carries_key() {
        let store = WalletStore::new();
        let info = store.create(None).unwrap();
        let wallet = store.signer(&info.name).unwrap();
        assert_eq!(wallet.key().address(), info.address);
    }

    #[test]
    fn test_info_serializes_without_key() {
        let store = WalletStore::new();
        let info = store.import("k", key_one()).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["name"], "k");
        assert_eq!(json["address"], "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
