//! EIP-155 legacy value transfers.

use crate::address::Address;
use crate::error::Result;
use crate::hash::keccak256;
use crate::key::PrivateKey;

/// Gas used by a plain value transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// An unsigned legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub nonce: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Address,
    /// Value in wei.
    pub value: u128,
    pub data: Vec<u8>,
    pub chain_id: u64,
}

/// A signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx: LegacyTransaction,
    /// Address of the signing key.
    pub from: Address,
    pub v: u64,
    pub r: [u8; 32],
    pub s: [u8; 32],
    raw: Vec<u8>,
    hash: [u8; 32],
}

impl LegacyTransaction {
    /// A plain transfer with the standard 21000 gas limit.
    pub fn transfer(to: Address, value: u128, nonce: u64, gas_price: u128, chain_id: u64) -> Self {
        Self {
            nonce,
            gas_price,
            gas_limit: TRANSFER_GAS,
            to,
            value,
            data: Vec::new(),
            chain_id,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    fn base_fields(&self) -> Vec<Vec<u8>> {
        vec![
            rlp::encode_u64(self.nonce),
            rlp::encode_u128(self.gas_price),
            rlp::encode_u64(self.gas_limit),
            rlp::encode_bytes(self.to.as_bytes()),
            rlp::encode_u128(self.value),
            rlp::encode_bytes(&self.data),
        ]
    }

    /// keccak256(rlp([nonce, gasPrice, gas, to, value, data, chainId, 0, 0])).
    pub fn signing_hash(&self) -> [u8; 32] {
        let mut items = self.base_fields();
        items.push(rlp::encode_u64(self.chain_id));
        items.push(rlp::encode_u64(0));
        items.push(rlp::encode_u64(0));
        keccak256(&rlp::encode_list(&items))
    }

    pub fn sign(self, key: &PrivateKey) -> Result<SignedTransaction> {
        let sig = key.sign_prehash(&self.signing_hash())?;
        let v = self.chain_id * 2 + 35 + u64::from(sig.recovery_id);

        let mut items = self.base_fields();
        items.push(rlp::encode_u64(v));
        items.push(rlp::encode_bytes(rlp::trim_leading_zeros(&sig.r)));
        items.push(rlp::encode_bytes(rlp::trim_leading_zeros(&sig.s)));
        let raw = rlp::encode_list(&items);
        let hash = keccak256(&raw);

        Ok(SignedTransaction {
            tx: self,
            from: key.address(),
            v,
            r: sig.r,
            s: sig.s,
            raw,
            hash,
        })
    }
}

impl SignedTransaction {
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Raw encoding as `0x`-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }

    pub fn hash(&self) -> [u8; 32] {
        self.hash
    }

    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }

    /// Recovery id encoded in `v`.
    pub fn recovery_id(&self) -> u8 {
        ((self.v - 35 - self.tx.chain_id * 2) & 1) as u8
    }
}

/// Minimal RLP encoding for the transaction fields.
mod rlp {
    pub fn encode_u64(value: u64) -> Vec<u8> {
        encode_bytes(trim_leading_zeros(&value.to_be_bytes()))
    }

    pub fn encode_u128(value: u128) -> Vec<u8> {
        encode_bytes(trim_leading_zeros(&value.to_be_bytes()))
    }

    pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
        if bytes.len() == 1 && bytes[0] < 0x80 {
            return bytes.to_vec();
        }
        let mut out = encode_length(bytes.len(), 0x80);
        out.extend_from_slice(bytes);
        out
    }

    pub fn encode_list(items: &[Vec<u8>]) -> Vec<u8> {
        let payload: Vec<u8> = items.concat();
        let mut out = encode_length(payload.len(), 0xc0);
        out.extend(payload);
        out
    }

    fn encode_length(len: usize, offset: u8) -> Vec<u8> {
        if len < 56 {
            vec![offset + len as u8]
        } else {
            let len_bytes = trim_leading_zeros(&len.to_be_bytes()).to_vec();
            let mut out = vec![offset + 55 + len_bytes.len() as u8];
            out.extend(len_bytes);
            out
        }
    }

    pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        &bytes[start..]
    }

}
