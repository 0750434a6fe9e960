use chainspeak_wallet::WalletError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChainError>;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("wallet not found: {0}")]
    NotFound(String),

    #[error("no wallet available")]
    NoWallet,

    #[error("wallet already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("insufficient funds: have {have} wei, need {need} wei")]
    InsufficientFunds { have: u128, need: u128 },

    #[error("invalid rpc url: {0}")]
    InvalidUrl(String),

    /// Error object returned by the node.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("signing failed: {0}")]
    Signing(String),
}

impl ChainError {
    /// The referenced wallet does not exist or none is configured.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChainError::NotFound(_) | ChainError::NoWallet)
    }

    /// The caller supplied a malformed value.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ChainError::InvalidAddress(_) | ChainError::InvalidAmount(_)
        )
    }
}

impl From<WalletError> for ChainError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::NotFound(name) => ChainError::NotFound(name),
            WalletError::AlreadyExists(name) => ChainError::AlreadyExists(name),
            WalletError::InvalidAddress(s) => ChainError::InvalidAddress(s),
            WalletError::InvalidAmount(s) => ChainError::InvalidAmount(s),
            WalletError::InvalidPrivateKey(s)
            | WalletError::Entropy(s)
            | WalletError::Signing(s) => ChainError::Signing(s),
        }
    }
}
