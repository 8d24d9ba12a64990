//! Fake Ethereum JSON-RPC node
//!
//! Serves `eth_call`, `eth_sendTransaction` and `eth_getTransactionReceipt`
//! over HTTP by delegating to a `MockTokenChain`, so the JSON-RPC client can
//! be exercised end to end without a real node.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tsender::mocks::MockTokenChain;
use tsender::{Address, Bytes, ChainClient, ChainClientError, ContractCall, TxHash};

struct NodeState {
	chain: Arc<MockTokenChain>,
	/// `null` receipts served before the real one
	pending_polls: AtomicUsize,
	polls: Mutex<HashMap<TxHash, usize>>,
	/// Non-zero forces every response to this HTTP status
	forced_status: AtomicU16,
	methods: Mutex<Vec<String>>,
}

pub struct FakeNode {
	pub url: String,
	state: Arc<NodeState>,
	handle: JoinHandle<()>,
}

impl FakeNode {
	pub async fn spawn(chain: Arc<MockTokenChain>) -> Self {
		let state = Arc::new(NodeState {
			chain,
			pending_polls: AtomicUsize::new(0),
			polls: Mutex::new(HashMap::new()),
			forced_status: AtomicU16::new(0),
			methods: Mutex::new(Vec::new()),
		});

		let app = Router::new()
			.route("/", post(handle_rpc))
			.with_state(Arc::clone(&state));

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind test port");
		let addr = listener.local_addr().unwrap();
		let url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Self { url, state, handle }
	}

	/// Answer `null` this many times per transaction before returning its receipt
	pub fn with_pending_polls(self, polls: usize) -> Self {
		self.state.pending_polls.store(polls, Ordering::SeqCst);
		self
	}

	pub fn force_status(&self, status: StatusCode) {
		self.state
			.forced_status
			.store(status.as_u16(), Ordering::SeqCst);
	}

	/// JSON-RPC methods received so far, in order
	pub fn methods(&self) -> Vec<String> {
		self.state.methods.lock().unwrap().clone()
	}

	pub fn count(&self, method: &str) -> usize {
		self.methods().iter().filter(|m| *m == method).count()
	}
}

impl Drop for FakeNode {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn handle_rpc(State(node): State<Arc<NodeState>>, Json(request): Json<Value>) -> Response {
	let forced = node.forced_status.load(Ordering::SeqCst);
	if forced != 0 {
		let status = StatusCode::from_u16(forced).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		return (status, "forced failure").into_response();
	}

	let id = request["id"].clone();
	let method = request["method"].as_str().unwrap_or_default().to_string();
	node.methods.lock().unwrap().push(method.clone());

	let result = dispatch(&node, &method, &request["params"]).await;
	let body = match result {
		Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
		Err((code, message)) => json!({
			"jsonrpc": "2.0",
			"id": id,
			"error": { "code": code, "message": message }
		}),
	};

	Json(body).into_response()
}

async fn dispatch(node: &NodeState, method: &str, params: &Value) -> Result<Value, (i64, String)> {
	match method {
		"eth_call" => {
			let call = contract_call(&params[0])?;
			let data = node.chain.read_contract(&call).await.map_err(rpc_error)?;
			Ok(json!(data))
		},
		"eth_sendTransaction" => {
			let call = contract_call(&params[0])?;
			if call.from.is_none() {
				return Err((-32602, "missing from".to_string()));
			}
			let hash = node.chain.write_contract(&call).await.map_err(rpc_error)?;
			Ok(json!(hash))
		},
		"eth_getTransactionReceipt" => {
			let hash: TxHash = serde_json::from_value(params[0].clone())
				.map_err(|e| (-32602, e.to_string()))?;

			let served = {
				let mut polls = node.polls.lock().unwrap();
				let served = polls.entry(hash).or_insert(0);
				*served += 1;
				*served
			};
			if served <= node.pending_polls.load(Ordering::SeqCst) {
				return Ok(Value::Null);
			}

			let receipt = node
				.chain
				.wait_for_transaction_receipt(hash)
				.await
				.map_err(rpc_error)?;
			Ok(json!({
				"transactionHash": receipt.transaction_hash,
				"blockNumber": format!("{:#x}", receipt.block_number.unwrap_or_default()),
				"status": if receipt.success { "0x1" } else { "0x0" },
				"gasUsed": "0x5208",
				"logs": []
			}))
		},
		other => Err((-32601, format!("method {} not found", other))),
	}
}

fn contract_call(tx: &Value) -> Result<ContractCall, (i64, String)> {
	let invalid = |e: serde_json::Error| (-32602, e.to_string());
	let to: Address = serde_json::from_value(tx["to"].clone()).map_err(invalid)?;
	let input: Bytes = serde_json::from_value(tx["data"].clone()).map_err(invalid)?;
	let from: Option<Address> = match tx.get("from") {
		Some(from) => Some(serde_json::from_value(from.clone()).map_err(invalid)?),
		None => None,
	};

	Ok(ContractCall {
		to,
		from,
		signature: "eth_call",
		input,
	})
}

fn rpc_error(error: ChainClientError) -> (i64, String) {
	match error {
		ChainClientError::UserRejected { message } => (4001, message),
		ChainClientError::Rpc { code, message } => (code, message),
		other => (-32603, other.to_string()),
	}
}
