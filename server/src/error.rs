use chainspeak_chain::ChainError;
use chainspeak_intent::ParseError;
use thiserror::Error;

/// Broad class of a dispatch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input was rejected before any side effect.
    Validation,
    /// A referenced wallet or transaction does not exist.
    NotFound,
    /// A wallet or chain operation failed.
    Collaborator,
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Collaborator(String),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Validation(_) => ErrorKind::Validation,
            DispatchError::NotFound(_) => ErrorKind::NotFound,
            DispatchError::Collaborator(_) => ErrorKind::Collaborator,
        }
    }
}

impl From<ParseError> for DispatchError {
    fn from(err: ParseError) -> Self {
        DispatchError::Validation(err.to_string())
    }
}

impl From<ChainError> for DispatchError {
    fn from(err: ChainError) -> Self {
        if err.is_not_found() {
            DispatchError::NotFound(err.to_string())
        } else if err.is_invalid_input() {
            DispatchError::Validation(err.to_string())
        } else {
            DispatchError::Collaborator(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err: DispatchError = ParseError::InvalidAmount("0".into()).into();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: DispatchError = ChainError::NotFound("bob".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "wallet not found: bob");

        let err: DispatchError = ChainError::InvalidAddress("0x1".into()).into();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: DispatchError = ChainError::Decode("bad".into()).into();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
    }
}
