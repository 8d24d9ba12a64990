//! Mock chain for demos and testing
//!
//! `MockTokenChain` simulates one ERC-20 token and a TSender contract in
//! memory. It answers metadata and allowance reads, applies approvals, checks
//! the allowance on `airdropERC20` and records every call it receives, so
//! tests can assert on exactly what reached the chain.

use std::collections::HashSet;
use std::sync::Mutex;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_sol_types::{sol_data, SolType, SolValue};
use async_trait::async_trait;
use tracing::debug;
use tsender_types::{
	ChainClient, ChainClientError, ChainResult, ContractCall, TokenDetails, TransactionReceipt,
	TransactionStep, IERC20, ITSender,
};

/// A call observed by [`MockTokenChain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
	Read(ContractCall),
	Write(ContractCall),
	Wait(TxHash),
}

#[derive(Debug)]
struct ChainState {
	token: TokenDetails,
	allowance: U256,
	rejected: HashSet<TransactionStep>,
	reverting: HashSet<TransactionStep>,
	failing_reads: bool,
	mined: Vec<(TxHash, bool)>,
	calls: Vec<RecordedCall>,
	block_number: u64,
}

/// In-memory ERC-20 + TSender chain
#[derive(Debug)]
pub struct MockTokenChain {
	state: Mutex<ChainState>,
}

impl Default for MockTokenChain {
	fn default() -> Self {
		Self::new()
	}
}

impl MockTokenChain {
	/// An 18-decimal "Mock Token (MOCK)" with zero allowance
	pub fn new() -> Self {
		Self {
			state: Mutex::new(ChainState {
				token: TokenDetails::new("Mock Token", "MOCK", 18),
				allowance: U256::ZERO,
				rejected: HashSet::new(),
				reverting: HashSet::new(),
				failing_reads: false,
				mined: Vec::new(),
				calls: Vec::new(),
				block_number: 1,
			}),
		}
	}

	pub fn with_token(self, token: TokenDetails) -> Self {
		self.update(|state| state.token = token);
		self
	}

	pub fn with_allowance(self, allowance: u64) -> Self {
		self.update(|state| state.allowance = U256::from(allowance));
		self
	}

	/// The wallet declines the given step
	pub fn rejecting(self, step: TransactionStep) -> Self {
		self.update(|state| {
			state.rejected.insert(step);
		});
		self
	}

	/// The given step is mined but reverts
	pub fn reverting(self, step: TransactionStep) -> Self {
		self.update(|state| {
			state.reverting.insert(step);
		});
		self
	}

	/// Every read fails with an RPC error
	pub fn failing_reads(self) -> Self {
		self.update(|state| state.failing_reads = true);
		self
	}

	/// Stop declining the given step
	pub fn accept(&self, step: TransactionStep) {
		self.update(|state| {
			state.rejected.remove(&step);
		});
	}

	pub fn allowance(&self) -> U256 {
		self.update(|state| state.allowance)
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.update(|state| state.calls.clone())
	}

	pub fn reads(&self) -> Vec<ContractCall> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				RecordedCall::Read(call) => Some(call),
				_ => None,
			})
			.collect()
	}

	pub fn writes(&self) -> Vec<ContractCall> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				RecordedCall::Write(call) => Some(call),
				_ => None,
			})
			.collect()
	}

	pub fn clear_calls(&self) {
		self.update(|state| state.calls.clear());
	}

	fn update<T>(&self, f: impl FnOnce(&mut ChainState) -> T) -> T {
		let mut state = self
			.state
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner());
		f(&mut state)
	}
}

fn reverted(reason: &str) -> ChainClientError {
	ChainClientError::Rpc {
		code: 3,
		message: format!("execution reverted: {}", reason),
	}
}

impl ChainState {
	fn next_hash(&self) -> TxHash {
		TxHash::left_padding_from(&(self.mined.len() as u64 + 1).to_be_bytes())
	}

	fn read(&self, call: &ContractCall) -> ChainResult<Bytes> {
		if self.failing_reads {
			return Err(ChainClientError::Rpc {
				code: -32000,
				message: "header not found".to_string(),
			});
		}

		let data = if call.is::<IERC20::nameCall>() {
			self.token.name.clone().abi_encode()
		} else if call.is::<IERC20::symbolCall>() {
			self.token.symbol.clone().abi_encode()
		} else if call.is::<IERC20::decimalsCall>() {
			sol_data::Uint::<8>::abi_encode(&self.token.decimals)
		} else if call.is::<IERC20::allowanceCall>() {
			self.allowance.abi_encode()
		} else {
			return Err(reverted("unknown selector"));
		};

		Ok(Bytes::from(data))
	}

	fn write(&mut self, call: &ContractCall) -> ChainResult<TxHash> {
		let step = if call.is::<IERC20::approveCall>() {
			TransactionStep::Approval
		} else if call.is::<ITSender::airdropERC20Call>() {
			TransactionStep::Transfer
		} else {
			return Err(reverted("unknown selector"));
		};

		if self.rejected.contains(&step) {
			return Err(ChainClientError::from_rpc(
				4001,
				"User denied transaction signature.",
			));
		}

		let mut success = !self.reverting.contains(&step);
		match step {
			TransactionStep::Approval => {
				let approve = call.decode::<IERC20::approveCall>()?;
				if success {
					self.allowance = approve.amount;
				}
			},
			TransactionStep::Transfer => {
				let airdrop = call.decode::<ITSender::airdropERC20Call>()?;
				success &= airdrop.totalAmount <= self.allowance;
				if success {
					self.allowance -= airdrop.totalAmount;
				}
			},
		}

		let hash = self.next_hash();
		self.mined.push((hash, success));
		Ok(hash)
	}

	fn receipt(&mut self, hash: TxHash) -> ChainResult<TransactionReceipt> {
		let (_, success) = self
			.mined
			.iter()
			.find(|(mined, _)| *mined == hash)
			.copied()
			.ok_or_else(|| ChainClientError::InvalidResponse {
				reason: format!("unknown transaction {}", hash),
			})?;

		self.block_number += 1;
		Ok(if success {
			TransactionReceipt::confirmed(hash, self.block_number)
		} else {
			TransactionReceipt::reverted(hash, self.block_number)
		})
	}
}

#[async_trait]
impl ChainClient for MockTokenChain {
	async fn read_contract(&self, call: &ContractCall) -> ChainResult<Bytes> {
		debug!("Mock chain read {}", call.function_name());
		self.update(|state| {
			state.calls.push(RecordedCall::Read(call.clone()));
			state.read(call)
		})
	}

	async fn write_contract(&self, call: &ContractCall) -> ChainResult<TxHash> {
		debug!("Mock chain write {}", call.function_name());
		self.update(|state| {
			state.calls.push(RecordedCall::Write(call.clone()));
			state.write(call)
		})
	}

	async fn wait_for_transaction_receipt(&self, hash: TxHash) -> ChainResult<TransactionReceipt> {
		self.update(|state| {
			state.calls.push(RecordedCall::Wait(hash));
			state.receipt(hash)
		})
	}
}

/// Recipient list text for `addresses`, one per line
pub fn recipients_text(addresses: &[Address]) -> String {
	addresses
		.iter()
		.map(Address::to_string)
		.collect::<Vec<_>>()
		.join("\n")
}
