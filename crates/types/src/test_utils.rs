//! Test utilities for creating common test objects
//!
//! Well-known anvil accounts and a builder for `AirdropRequest`s with
//! sensible defaults.

use alloy_primitives::{address, Address, U256};

use crate::{AirdropRequest, WalletContext};

/// First anvil dev account, used as the connected wallet
pub const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const ALICE: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
pub const BOB: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
pub const CAROL: Address = address!("90F79bf6EB2c4f870365E785982E1f101E93b906");

/// Mock ERC-20 deployed second on a fresh anvil node
pub const TOKEN: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");

/// Chain id of a local anvil node
pub const ANVIL: u64 = crate::chains::ANVIL_CHAIN_ID;

/// Wallet context with `OWNER` connected to anvil
pub fn anvil_context() -> WalletContext {
	WalletContext::connected(OWNER, ANVIL)
}

/// Builder for creating test `AirdropRequest` objects
#[derive(Debug, Clone)]
pub struct AirdropRequestBuilder {
	token: Address,
	entries: Vec<(Address, U256)>,
}

impl Default for AirdropRequestBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl AirdropRequestBuilder {
	/// Start from `TOKEN` with no recipients
	pub fn new() -> Self {
		Self {
			token: TOKEN,
			entries: Vec::new(),
		}
	}

	pub fn token(mut self, token: Address) -> Self {
		self.token = token;
		self
	}

	pub fn recipient(mut self, recipient: Address, amount: u64) -> Self {
		self.entries.push((recipient, U256::from(amount)));
		self
	}

	/// Split `total` evenly between ALICE and BOB (remainder to BOB)
	pub fn total(self, total: u64) -> Self {
		let half = total / 2;
		self.recipient(ALICE, half).recipient(BOB, total - half)
	}

	pub fn build(self) -> AirdropRequest {
		let (recipients, amounts) = self.entries.into_iter().unzip();
		AirdropRequest::new(self.token, recipients, amounts).expect("Valid test airdrop request")
	}
}
