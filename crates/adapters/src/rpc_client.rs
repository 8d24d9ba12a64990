//! Ethereum JSON-RPC chain client
//!
//! Talks to a node (or a wallet-backed RPC endpoint) over HTTP. Reads go
//! through `eth_call`, writes through `eth_sendTransaction`, and receipts are
//! polled with `eth_getTransactionReceipt` until the node returns one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Bytes, TxHash};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};
use tsender_types::{
	ChainClient, ChainClientError, ChainResult, ContractCall, SecretString, TransactionReceipt,
};
use url::Url;

use crate::rpc_models::{JsonRpcRequest, JsonRpcResponse, RpcReceipt, TransactionRequest};

/// Connection and polling settings for [`JsonRpcChainClient`]
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
	pub url: SecretString,
	pub request_timeout: Duration,
	pub poll_interval: Duration,
	pub receipt_timeout: Duration,
}

impl RpcClientConfig {
	pub fn new(url: impl Into<SecretString>) -> Self {
		Self {
			url: url.into(),
			request_timeout: Duration::from_secs(10),
			poll_interval: Duration::from_secs(1),
			receipt_timeout: Duration::from_secs(120),
		}
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	pub fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
		self.receipt_timeout = timeout;
		self
	}
}

/// [`ChainClient`] backed by an HTTP JSON-RPC endpoint
#[derive(Debug)]
pub struct JsonRpcChainClient {
	client: Client,
	endpoint: Url,
	poll_interval: Duration,
	receipt_timeout: Duration,
	next_id: AtomicU64,
}

impl JsonRpcChainClient {
	pub fn new(config: RpcClientConfig) -> ChainResult<Self> {
		let endpoint =
			Url::parse(config.url.expose_secret()).map_err(|e| ChainClientError::ConfigError {
				reason: format!("Invalid RPC URL: {}", e),
			})?;

		if !matches!(endpoint.scheme(), "http" | "https") {
			return Err(ChainClientError::ConfigError {
				reason: format!("Unsupported RPC URL scheme '{}'", endpoint.scheme()),
			});
		}

		if config.poll_interval.is_zero() {
			return Err(ChainClientError::ConfigError {
				reason: "Receipt poll interval must be greater than zero".to_string(),
			});
		}

		let client = Client::builder()
			.timeout(config.request_timeout)
			.build()
			.map_err(ChainClientError::HttpError)?;

		Ok(Self {
			client,
			endpoint,
			poll_interval: config.poll_interval,
			receipt_timeout: config.receipt_timeout,
			next_id: AtomicU64::new(1),
		})
	}

	/// Send a single JSON-RPC request and return its raw `result`
	async fn request(
		&self,
		method: &str,
		params: serde_json::Value,
	) -> ChainResult<Option<serde_json::Value>> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let request = JsonRpcRequest::new(id, method, params);

		debug!("Sending JSON-RPC request {} ({})", method, id);

		let response = self
			.client
			.post(self.endpoint.clone())
			.json(&request)
			.send()
			.await
			.map_err(ChainClientError::HttpError)?;

		let status = response.status();
		if !status.is_success() {
			return Err(ChainClientError::HttpStatusError {
				status_code: status.as_u16(),
				reason: format!("JSON-RPC endpoint returned status {} for {}", status, method),
			});
		}

		let body = response.text().await.map_err(ChainClientError::HttpError)?;
		debug!("JSON-RPC {} ({}) responded with {} bytes", method, id, body.len());

		let envelope: JsonRpcResponse =
			serde_json::from_str(&body).map_err(|e| ChainClientError::InvalidResponse {
				reason: format!("Failed to parse JSON-RPC response for {}: {}", method, e),
			})?;

		envelope.into_result()
	}

	/// Like [`Self::request`] but requires a non-null result of type `T`
	async fn request_value<T: DeserializeOwned>(
		&self,
		method: &str,
		params: serde_json::Value,
	) -> ChainResult<T> {
		let value = self
			.request(method, params)
			.await?
			.ok_or_else(|| ChainClientError::InvalidResponse {
				reason: format!("{} returned no result", method),
			})?;

		serde_json::from_value(value).map_err(|e| ChainClientError::InvalidResponse {
			reason: format!("Unexpected {} result: {}", method, e),
		})
	}

	async fn fetch_receipt(&self, hash: TxHash) -> ChainResult<Option<TransactionReceipt>> {
		let Some(value) = self
			.request("eth_getTransactionReceipt", json!([hash]))
			.await?
		else {
			return Ok(None);
		};

		let receipt: RpcReceipt =
			serde_json::from_value(value).map_err(|e| ChainClientError::InvalidResponse {
				reason: format!("Malformed receipt for {}: {}", hash, e),
			})?;

		Ok(Some(receipt.into()))
	}
}

#[async_trait]
impl ChainClient for JsonRpcChainClient {
	async fn read_contract(&self, call: &ContractCall) -> ChainResult<Bytes> {
		debug!("eth_call {} on {}", call.function_name(), call.to);
		self.request_value(
			"eth_call",
			json!([TransactionRequest::from(call), "latest"]),
		)
		.await
	}

	async fn write_contract(&self, call: &ContractCall) -> ChainResult<TxHash> {
		if call.from.is_none() {
			return Err(ChainClientError::ConfigError {
				reason: format!("{} requires a sending account", call.function_name()),
			});
		}

		debug!("eth_sendTransaction {} on {}", call.function_name(), call.to);
		let hash: TxHash = self
			.request_value(
				"eth_sendTransaction",
				json!([TransactionRequest::from(call)]),
			)
			.await?;

		debug!("{} submitted as {}", call.function_name(), hash);
		Ok(hash)
	}

	async fn wait_for_transaction_receipt(&self, hash: TxHash) -> ChainResult<TransactionReceipt> {
		let poll = async {
			loop {
				if let Some(receipt) = self.fetch_receipt(hash).await? {
					return Ok::<_, ChainClientError>(receipt);
				}
				tokio::time::sleep(self.poll_interval).await;
			}
		};

		match tokio::time::timeout(self.receipt_timeout, poll).await {
			Ok(result) => result,
			Err(_) => {
				warn!(
					"No receipt for {} after {}ms",
					hash,
					self.receipt_timeout.as_millis()
				);
				Err(ChainClientError::ReceiptTimeout {
					hash,
					timeout_ms: self.receipt_timeout.as_millis() as u64,
				})
			},
		}
	}
}
