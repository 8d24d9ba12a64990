//! Static chain -> TSender contract routing table

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAINNET_CHAIN_ID: u64 = 1;
pub const ZKSYNC_CHAIN_ID: u64 = 324;
pub const ANVIL_CHAIN_ID: u64 = 31337;
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// Contracts deployed on a single chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainContracts {
	/// Batching airdrop contract
	pub tsender: Address,
	/// Variant of the batching contract that skips the total-amount check
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub no_check: Option<Address>,
}

impl ChainContracts {
	pub fn new(tsender: Address) -> Self {
		Self {
			tsender,
			no_check: None,
		}
	}

	pub fn with_no_check(mut self, no_check: Address) -> Self {
		self.no_check = Some(no_check);
		self
	}
}

/// Read-only mapping from chain id to its deployed contracts
///
/// Built once at startup; lookups never touch the network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainRoutes {
	routes: HashMap<u64, ChainContracts>,
}

impl ChainRoutes {
	/// Empty table, every lookup misses
	pub fn empty() -> Self {
		Self::default()
	}

	/// Routes for the chains the TSender contract is deployed on
	pub fn builtin() -> Self {
		let mut routes = HashMap::new();
		routes.insert(
			MAINNET_CHAIN_ID,
			ChainContracts::new(address!("3aD9F29AB266E4828450B33df7a9B9D7355Cd821")),
		);
		routes.insert(
			ZKSYNC_CHAIN_ID,
			ChainContracts::new(address!("7e645Ea4386deb2E9e510D805461aA12db83fb5E")),
		);
		routes.insert(
			ANVIL_CHAIN_ID,
			ChainContracts::new(address!("5FbDB2315678afecb367f032d93F642f64180aa3")),
		);
		routes.insert(
			SEPOLIA_CHAIN_ID,
			ChainContracts::new(address!("a27c5C77DA713f410F9b15d4B0c52CAe597a973a")),
		);
		Self { routes }
	}

	/// Add or replace the route for a chain
	pub fn with_route(mut self, chain_id: u64, contracts: ChainContracts) -> Self {
		self.routes.insert(chain_id, contracts);
		self
	}

	/// Contracts for the given chain, `None` if the chain is unsupported
	pub fn get(&self, chain_id: u64) -> Option<&ChainContracts> {
		self.routes.get(&chain_id)
	}

	/// TSender contract address for the given chain
	pub fn tsender(&self, chain_id: u64) -> Option<Address> {
		self.get(chain_id).map(|contracts| contracts.tsender)
	}

	pub fn is_supported(&self, chain_id: u64) -> bool {
		self.routes.contains_key(&chain_id)
	}

	/// Supported chain ids in ascending order
	pub fn chain_ids(&self) -> Vec<u64> {
		let mut ids: Vec<u64> = self.routes.keys().copied().collect();
		ids.sort_unstable();
		ids
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

impl FromIterator<(u64, ChainContracts)> for ChainRoutes {
	fn from_iter<I: IntoIterator<Item = (u64, ChainContracts)>>(iter: I) -> Self {
		Self {
			routes: iter.into_iter().collect(),
		}
	}
}
