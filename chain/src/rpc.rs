//! JSON-RPC chain client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chainspeak_wallet::{Address, SignedTransaction};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::client::{
    CallRequest, ChainClient, ChainTransaction, TransactionReceipt, parse_quantity,
    parse_quantity_u64, to_quantity,
};
use crate::error::{ChainError, Result};

/// Default HTTP timeout for node requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    hash: String,
    from: String,
    #[serde(default)]
    to: Option<String>,
    value: String,
    #[serde(default)]
    block_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    block_number: String,
    #[serde(default)]
    status: Option<String>,
}

/// Talks to an Ethereum-compatible node over HTTP JSON-RPC 2.0.
pub struct RpcChain {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

impl RpcChain {
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| ChainError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChainError::InvalidUrl(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Performs one call. A `null` result deserializes as `None`.
    async fn call<R>(&self, method: &str, params: Value) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(method, id, "rpc call");

        let resp = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ChainError::Rpc {
                code: i64::from(status.as_u16()),
                message: format!("HTTP {status}: {body}"),
            });
        }

        let body: RpcResponse = resp.json().await?;
        if let Some(err) = body.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        match body.result {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ChainError::Decode(format!("{method}: {e}"))),
        }
    }

    async fn call_required<R>(&self, method: &str, params: Value) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.call(method, params)
            .await?
            .ok_or_else(|| ChainError::Decode(format!("{method}: missing result")))
    }

    async fn quantity(&self, method: &str, params: Value) -> Result<u128> {
        let s: String = self.call_required(method, params).await?;
        parse_quantity(&s)
    }
}

fn parse_address(s: &str) -> Result<Address> {
    s.parse()
        .map_err(|_| ChainError::Decode(format!("invalid address in response: {s}")))
}

#[async_trait]
impl ChainClient for RpcChain {
    async fn chain_id(&self) -> Result<u64> {
        let s: String = self.call_required("eth_chainId", json!([])).await?;
        parse_quantity_u64(&s)
    }

    async fn block_number(&self) -> Result<u64> {
        let s: String = self.call_required("eth_blockNumber", json!([])).await?;
        parse_quantity_u64(&s)
    }

    async fn gas_price(&self) -> Result<u128> {
        self.quantity("eth_gasPrice", json!([])).await
    }

    async fn balance(&self, address: Address) -> Result<u128> {
        self.quantity("eth_getBalance", json!([address.to_lower_hex(), "latest"]))
            .await
    }

    async fn nonce(&self, address: Address) -> Result<u64> {
        let s: String = self
            .call_required(
                "eth_getTransactionCount",
                json!([address.to_lower_hex(), "pending"]),
            )
            .await?;
        parse_quantity_u64(&s)
    }

    async fn estimate_gas(&self, call: &CallRequest) -> Result<u64> {
        let params = json!([{
            "from": call.from.to_lower_hex(),
            "to": call.to.to_lower_hex(),
            "value": to_quantity(call.value),
        }]);
        let s: String = self.call_required("eth_estimateGas", params).await?;
        parse_quantity_u64(&s)
    }

    async fn send_raw_transaction(&self, tx: &SignedTransaction) -> Result<String> {
        self.call_required("eth_sendRawTransaction", json!([tx.to_hex()]))
            .await
    }

    async fn transaction(&self, hash: &str) -> Result<Option<ChainTransaction>> {
        let raw: Option<RawTransaction> = self
            .call("eth_getTransactionByHash", json!([hash]))
            .await?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        Ok(Some(ChainTransaction {
            hash: raw.hash,
            from: parse_address(&raw.from)?,
            to: raw.to.as_deref().map(parse_address).transpose()?,
            value: parse_quantity(&raw.value)?,
            block_number: raw
                .block_number
                .as_deref()
                .map(parse_quantity_u64)
                .transpose()?,
        }))
    }

    async fn receipt(&self, hash: &str) -> Result<Option<TransactionReceipt>> {
        let raw: Option<RawReceipt> = self
            .call("eth_getTransactionReceipt", json!([hash]))
            .await?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        // Pre-Byzantium receipts carry no status; treat them as successful.
        let success = match raw.status.as_deref() {
            Some(s) => parse_quantity(s)? == 1,
            None => true,
        };
        Ok(Some(TransactionReceipt {
            block_number: parse_quantity_u64(&raw.block_number)?,
            success,
        }))
    }
}
