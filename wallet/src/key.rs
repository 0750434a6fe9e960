//! secp256k1 private keys.

use std::fmt;

use k256::ecdsa::SigningKey;

use crate::address::Address;
use crate::error::{Result, WalletError};

/// A recoverable ECDSA signature over a 32-byte prehash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// Recovery id, 0 or 1.
    pub recovery_id: u8,
}

/// A secp256k1 signing key. Debug output never shows the secret.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generates a fresh key from the operating system entropy source.
    pub fn random() -> Result<Self> {
        loop {
            let mut bytes = [0u8; 32];
            getrandom::fill(&mut bytes).map_err(|e| WalletError::Entropy(e.to_string()))?;
            // Zero and scalars >= n are rejected; draw again.
            if let Ok(inner) = SigningKey::from_slice(&bytes) {
                return Ok(Self { inner });
            }
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(WalletError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|_| WalletError::InvalidPrivateKey("scalar out of range".into()))?;
        Ok(Self { inner })
    }

    /// Parses a hex-encoded key, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|_| WalletError::InvalidPrivateKey("not valid hex".into()))?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Uncompressed SEC1 public key (`0x04 || x || y`).
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        let point = self.inner.verifying_key().to_encoded_point(false);
        let mut out = [0u8; 65];
        out.copy_from_slice(point.as_bytes());
        out
    }

    pub fn address(&self) -> Address {
        Address::from_uncompressed_public_key(&self.public_key_uncompressed())
    }

    pub fn sign_prehash(&self, hash: &[u8; 32]) -> Result<RecoverableSignature> {
        let (sig, recid) = self
            .inner
            .sign_prehash_recoverable(hash)
            .map_err(|e| WalletError::Signing(e.to_string()))?;

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            recovery_id: recid.to_byte(),
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::keccak256;
    use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_known_address() {
        let key = PrivateKey::from_hex(KEY_ONE).unwrap();
        assert_eq!(
            key.address().to_string(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn test_from_hex_without_prefix() {
        let key = PrivateKey::from_hex(&KEY_ONE[2..]).unwrap();
        assert_eq!(key.to_bytes()[31], 1);
    }

    #[test]
    fn test_rejects_invalid_keys() {
        assert!(matches!(
            PrivateKey::from_hex("0x1234"),
            Err(WalletError::InvalidPrivateKey(_))
        ));
        assert!(PrivateKey::from_hex("not hex at all").is_err());
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_random_keys_differ() {
        let a = PrivateKey::random().unwrap();
        let b = PrivateKey::random().unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = PrivateKey::from_hex(KEY_ONE).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"));
        assert!(!debug.contains(&KEY_ONE[2..]));
    }

    #[test]
    fn test_signature_recovers_signer() {
        let key = PrivateKey::random().unwrap();
        let hash = keccak256(b"chainspeak");
        let sig = key.sign_prehash(&hash).unwrap();
        assert!(sig.recovery_id <= 1);

        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&sig.r);
        bytes[32..].copy_from_slice(&sig.s);
        let signature = Signature::from_slice(&bytes).unwrap();
        let recid = RecoveryId::from_byte(sig.recovery_id).unwrap();
        let recovered = VerifyingKey::recover_from_prehash(&hash, &signature, recid).unwrap();

        let point = recovered.to_encoded_point(false);
        let mut uncompressed = [0u8; 65];
        uncompressed.copy_from_slice(point.as_bytes());
        assert_eq!(Address::from_uncompressed_public_key(&uncompressed), key.address());
    }
}
