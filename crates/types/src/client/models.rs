//! Transaction receipts and the connected wallet context

use alloy_primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// Finality state of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionOutcome {
	Pending,
	Confirmed,
	Failed,
}

/// Receipt returned once a transaction has been observed on chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
	pub transaction_hash: TxHash,
	/// Block the transaction was included in, `None` while still pending
	pub block_number: Option<u64>,
	/// Execution status, `false` when the transaction reverted
	pub success: bool,
	pub gas_used: Option<u64>,
}

impl TransactionReceipt {
	/// Receipt for a transaction mined successfully in `block_number`
	pub fn confirmed(transaction_hash: TxHash, block_number: u64) -> Self {
		Self {
			transaction_hash,
			block_number: Some(block_number),
			success: true,
			gas_used: None,
		}
	}

	/// Receipt for a transaction that was mined but reverted
	pub fn reverted(transaction_hash: TxHash, block_number: u64) -> Self {
		Self {
			transaction_hash,
			block_number: Some(block_number),
			success: false,
			gas_used: None,
		}
	}

	pub fn outcome(&self) -> TransactionOutcome {
		match (self.success, self.block_number) {
			(false, _) => TransactionOutcome::Failed,
			(true, None) => TransactionOutcome::Pending,
			(true, Some(_)) => TransactionOutcome::Confirmed,
		}
	}
}

/// Account and chain currently selected in the wallet
///
/// Passed explicitly into the orchestrator instead of being read from
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletContext {
	pub account: Option<Address>,
	pub chain_id: u64,
}

impl WalletContext {
	pub fn new(account: Option<Address>, chain_id: u64) -> Self {
		Self { account, chain_id }
	}

	/// Context for a connected account on `chain_id`
	pub fn connected(account: Address, chain_id: u64) -> Self {
		Self::new(Some(account), chain_id)
	}

	/// Context with no connected account
	pub fn disconnected(chain_id: u64) -> Self {
		Self::new(None, chain_id)
	}

	pub fn is_connected(&self) -> bool {
		self.account.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_receipt_outcome() {
		let hash = TxHash::repeat_byte(0x11);
		assert_eq!(
			TransactionReceipt::confirmed(hash, 10).outcome(),
			TransactionOutcome::Confirmed
		);
		assert_eq!(
			TransactionReceipt::reverted(hash, 10).outcome(),
			TransactionOutcome::Failed
		);

		let pending = TransactionReceipt {
			transaction_hash: hash,
			block_number: None,
			success: true,
			gas_used: None,
		};
		assert_eq!(pending.outcome(), TransactionOutcome::Pending);
	}

	#[test]
	fn test_wallet_context() {
		let account = Address::repeat_byte(0x42);
		assert!(WalletContext::connected(account, 1).is_connected());
		assert!(!WalletContext::disconnected(1).is_connected());
	}
}
