//! Validation failures raised while parsing.

use thiserror::Error;

/// A command matched a rule but its parameters are malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Amount is not a positive decimal number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Wallet name contains characters outside `[A-Za-z0-9_]`.
    #[error("Invalid wallet name: {0}. Use only letters, numbers, and underscores.")]
    InvalidWalletName(String),

    /// A rule matched without producing a parameter its intent requires.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParseError::InvalidAmount("1.2.3".into()).to_string(),
            "Invalid amount: 1.2.3"
        );
        assert!(
            ParseError::InvalidWalletName("foo!".into())
                .to_string()
                .starts_with("Invalid wallet name: foo!")
        );
        assert_eq!(
            ParseError::MissingParameter("to").to_string(),
            "missing required parameter: to"
        );
    }
}
