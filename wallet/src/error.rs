//! Error types for wallet operations.

use thiserror::Error;

/// Result alias for wallet operations.
pub type Result<T> = std::result::Result<T, WalletError>;

/// Error type for wallet operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("wallet already exists: {0}")]
    AlreadyExists(String),

    #[error("wallet not found: {0}")]
    NotFound(String),

    #[error("entropy source failed: {0}")]
    Entropy(String),

    #[error("signing failed: {0}")]
    Signing(String),
}
