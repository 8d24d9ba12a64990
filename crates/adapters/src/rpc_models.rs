//! Ethereum JSON-RPC wire models

use alloy_primitives::{Address, Bytes, TxHash, U64};
use serde::{Deserialize, Serialize};
use tsender_types::{ChainClientError, ChainResult, ContractCall, TransactionReceipt};

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request envelope
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
	pub jsonrpc: &'static str,
	pub id: u64,
	pub method: &'a str,
	pub params: serde_json::Value,
}

impl<'a> JsonRpcRequest<'a> {
	pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
		Self {
			jsonrpc: JSONRPC_VERSION,
			id,
			method,
			params,
		}
	}
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
	pub code: i64,
	pub message: String,
}

/// JSON-RPC response envelope
///
/// `result` is `None` both when absent and when explicitly `null`; the
/// latter is how a node reports a receipt that is not available yet.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
	#[serde(default)]
	pub result: Option<serde_json::Value>,
	#[serde(default)]
	pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
	/// Turn the envelope into its result value, mapping error objects
	pub fn into_result(self) -> ChainResult<Option<serde_json::Value>> {
		if let Some(error) = self.error {
			return Err(ChainClientError::from_rpc(error.code, error.message));
		}
		Ok(self.result)
	}
}

/// Transaction object used by `eth_call` and `eth_sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from: Option<Address>,
	pub to: Address,
	pub data: Bytes,
}

impl From<&ContractCall> for TransactionRequest {
	fn from(call: &ContractCall) -> Self {
		Self {
			from: call.from,
			to: call.to,
			data: call.input.clone(),
		}
	}
}

/// Subset of the receipt object returned by `eth_getTransactionReceipt`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
	pub transaction_hash: TxHash,
	pub block_number: Option<U64>,
	/// Missing on pre-Byzantium receipts, which cannot report a revert
	pub status: Option<U64>,
	pub gas_used: Option<U64>,
}

impl From<RpcReceipt> for TransactionReceipt {
	fn from(receipt: RpcReceipt) -> Self {
		Self {
			transaction_hash: receipt.transaction_hash,
			block_number: receipt.block_number.map(|n| n.to::<u64>()),
			success: receipt.status.map_or(true, |status| status == U64::from(1)),
			gas_used: receipt.gas_used.map(|gas| gas.to::<u64>()),
		}
	}
}
