//! Contract bindings and the generic contract call envelope
//!
//! `ContractCall` is the Rust counterpart of an `(abi, address, functionName, args)`
//! request: the ABI and arguments are folded into typed `SolCall` values and
//! encoded to calldata before they reach a `ChainClient`.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{sol, SolCall};
use serde::Serialize;

use crate::client::{ChainClientError, ChainResult};

sol! {
	/// Subset of the ERC-20 interface used by the airdrop flow
	#[sol(all_derives)]
	interface IERC20 {
		function name() external view returns (string);
		function symbol() external view returns (string);
		function decimals() external view returns (uint8);
		function allowance(address owner, address spender) external view returns (uint256);
		function approve(address spender, uint256 amount) external returns (bool);
	}

	/// Batching airdrop contract
	#[sol(all_derives)]
	interface ITSender {
		function airdropERC20(
			address tokenAddress,
			address[] calldata recipients,
			uint256[] calldata amounts,
			uint256 totalAmount
		) external;
	}
}

/// An encoded call against a single contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractCall {
	/// Contract being called
	pub to: Address,
	/// Account the call is issued from, required for writes
	pub from: Option<Address>,
	/// Solidity signature, e.g. `approve(address,uint256)`
	pub signature: &'static str,
	/// ABI-encoded calldata including the selector
	pub input: Bytes,
}

impl ContractCall {
	/// Encode a typed call against `to`
	pub fn new<C: SolCall>(to: Address, call: &C) -> Self {
		Self {
			to,
			from: None,
			signature: C::SIGNATURE,
			input: Bytes::from(call.abi_encode()),
		}
	}

	/// Issue the call from the given account
	pub fn from_account(mut self, from: Address) -> Self {
		self.from = Some(from);
		self
	}

	/// Function name without the parameter list
	pub fn function_name(&self) -> &'static str {
		self.signature
			.split_once('(')
			.map(|(name, _)| name)
			.unwrap_or(self.signature)
	}

	/// Whether this call targets the given typed function
	pub fn is<C: SolCall>(&self) -> bool {
		self.input.len() >= 4 && self.input[..4] == C::SELECTOR
	}

	/// Decode the calldata back into the typed call
	pub fn decode<C: SolCall>(&self) -> ChainResult<C> {
		C::abi_decode(&self.input).map_err(|e| ChainClientError::Decode {
			function: C::SIGNATURE.to_string(),
			reason: e.to_string(),
		})
	}

	/// Decode raw return data produced by this call
	pub fn decode_returns<C: SolCall>(data: &[u8]) -> ChainResult<C::Return> {
		C::abi_decode_returns(data).map_err(|e| ChainClientError::Decode {
			function: C::SIGNATURE.to_string(),
			reason: e.to_string(),
		})
	}
}
