//! Known networks.

use std::fmt;

use serde::Serialize;

/// Endpoint used when no RPC URL is configured.
pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";

/// A named chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: String,
    pub chain_id: u64,
}

impl Network {
    pub fn base_mainnet() -> Self {
        Self {
            name: "Base Mainnet".into(),
            chain_id: 8453,
        }
    }

    pub fn base_sepolia() -> Self {
        Self {
            name: "Base Sepolia".into(),
            chain_id: 84532,
        }
    }

    /// Infers the network from an RPC URL: any URL mentioning `sepolia`
    /// is Base Sepolia, everything else Base Mainnet.
    pub fn from_rpc_url(url: &str) -> Self {
        if url.to_ascii_lowercase().contains("sepolia") {
            Self::base_sepolia()
        } else {
            Self::base_mainnet()
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Self {
        match chain_id {
            8453 => Self::base_mainnet(),
            84532 => Self::base_sepolia(),
            id => Self {
                name: format!("Chain {id}"),
                chain_id: id,
            },
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rpc_url() {
        assert_eq!(Network::from_rpc_url(DEFAULT_RPC_URL).chain_id, 8453);
        assert_eq!(
            Network::from_rpc_url("https://sepolia.base.org").chain_id,
            84532
        );
        assert_eq!(
            Network::from_rpc_url("https://base-SEPOLIA.example.com/v2/key").name,
            "Base Sepolia"
        );
    }

    #[test]
    fn test_from_chain_id() {
        assert_eq!(Network::from_chain_id(84532), Network::base_sepolia());
        let custom = Network::from_chain_id(31337);
        assert_eq!(custom.to_string(), "Chain 31337 (31337)");
    }
}
