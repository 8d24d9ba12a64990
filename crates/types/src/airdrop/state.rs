//! Airdrop orchestration states, failures and outcomes

use alloy_primitives::TxHash;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Which of the two transactions a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStep {
	Approval,
	Transfer,
}

impl fmt::Display for TransactionStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransactionStep::Approval => f.write_str("Approval"),
			TransactionStep::Transfer => f.write_str("Airdrop"),
		}
	}
}

/// Reason an airdrop ended in `Failed`
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AirdropFailure {
	#[error("No TSender contract found for chain {chain_id}, please use a supported chain")]
	UnsupportedChain { chain_id: u64 },

	#[error("No wallet account connected")]
	WalletNotConnected,

	#[error("{step} request rejected in wallet")]
	UserRejected { step: TransactionStep },

	#[error("Failed to read token allowance: {reason}")]
	ReadFailed { reason: String },

	#[error("{step} transaction could not be submitted: {reason}")]
	WriteFailed { step: TransactionStep, reason: String },

	#[error("{step} transaction {hash} was not confirmed: {reason}")]
	ConfirmationFailed {
		step: TransactionStep,
		hash: TxHash,
		reason: String,
	},

	#[error("{step} transaction {hash} reverted")]
	Reverted { step: TransactionStep, hash: TxHash },
}

impl AirdropFailure {
	/// Whether the flow ended because the user declined a wallet prompt
	pub fn is_user_rejection(&self) -> bool {
		matches!(self, AirdropFailure::UserRejected { .. })
	}

	/// Whether the failure happened before any chain call was made
	pub fn is_configuration_error(&self) -> bool {
		matches!(
			self,
			AirdropFailure::UnsupportedChain { .. } | AirdropFailure::WalletNotConnected
		)
	}
}

/// State of a single airdrop submission
///
/// ```text
/// Idle -> FetchingAllowance -> (ApprovalPending -> ApprovalConfirming)?
///      -> TransferPending -> TransferConfirming -> Succeeded
/// ```
/// `Failed` is reachable from every non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AirdropState {
	Idle,
	FetchingAllowance,
	ApprovalPending,
	ApprovalConfirming {
		hash: TxHash,
	},
	TransferPending {
		after_approval: bool,
	},
	TransferConfirming {
		hash: TxHash,
		after_approval: bool,
	},
	Succeeded {
		hash: TxHash,
	},
	Failed(AirdropFailure),
}

impl AirdropState {
	pub fn is_terminal(&self) -> bool {
		matches!(self, AirdropState::Succeeded { .. } | AirdropState::Failed(_))
	}

	/// Short machine-friendly name of the state
	pub fn name(&self) -> &'static str {
		match self {
			AirdropState::Idle => "idle",
			AirdropState::FetchingAllowance => "fetching_allowance",
			AirdropState::ApprovalPending => "approval_pending",
			AirdropState::ApprovalConfirming { .. } => "approval_confirming",
			AirdropState::TransferPending { .. } => "transfer_pending",
			AirdropState::TransferConfirming { .. } => "transfer_confirming",
			AirdropState::Succeeded { .. } => "succeeded",
			AirdropState::Failed(_) => "failed",
		}
	}

	/// Progress label shown to the user while in this state
	pub fn label(&self) -> Cow<'static, str> {
		match self {
			AirdropState::Idle => Cow::Borrowed(""),
			AirdropState::FetchingAllowance => Cow::Borrowed("Checking token allowance..."),
			AirdropState::ApprovalPending => Cow::Borrowed("Waiting for approval in wallet..."),
			AirdropState::ApprovalConfirming { .. } => {
				Cow::Borrowed("Processing approval transaction...")
			},
			AirdropState::TransferPending {
				after_approval: true,
			} => Cow::Borrowed("Waiting for airdrop confirmation in wallet..."),
			AirdropState::TransferPending {
				after_approval: false,
			} => Cow::Borrowed("Waiting for confirmation in wallet..."),
			AirdropState::TransferConfirming {
				after_approval: true,
				..
			} => Cow::Borrowed("Processing airdrop transaction..."),
			AirdropState::TransferConfirming {
				after_approval: false,
				..
			} => Cow::Borrowed("Processing transaction..."),
			AirdropState::Succeeded { .. } => Cow::Borrowed("Airdrop successful!"),
			AirdropState::Failed(failure) => Cow::Owned(failure.to_string()),
		}
	}
}

impl fmt::Display for AirdropState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Terminal result of running one submission through the state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirdropOutcome {
	/// `Succeeded` or `Failed`
	pub state: AirdropState,
	pub approval_hash: Option<TxHash>,
	pub transfer_hash: Option<TxHash>,
	/// Every state entered after `Idle`, ending with the terminal state
	pub transitions: Vec<AirdropState>,
}

impl AirdropOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self.state, AirdropState::Succeeded { .. })
	}

	pub fn failure(&self) -> Option<&AirdropFailure> {
		match &self.state {
			AirdropState::Failed(failure) => Some(failure),
			_ => None,
		}
	}

	/// Whether the approval branch was taken
	pub fn approved(&self) -> bool {
		self.transitions
			.iter()
			.any(|state| matches!(state, AirdropState::ApprovalPending))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_terminal_states() {
		let hash = TxHash::repeat_byte(0xab);
		assert!(AirdropState::Succeeded { hash }.is_terminal());
		assert!(AirdropState::Failed(AirdropFailure::WalletNotConnected).is_terminal());
		assert!(!AirdropState::FetchingAllowance.is_terminal());
		assert!(!AirdropState::TransferConfirming {
			hash,
			after_approval: false
		}
		.is_terminal());
	}

	#[test]
	fn test_labels_depend_on_approval_branch() {
		assert_eq!(
			AirdropState::TransferPending {
				after_approval: true
			}
			.label(),
			"Waiting for airdrop confirmation in wallet..."
		);
		assert_eq!(
			AirdropState::TransferPending {
				after_approval: false
			}
			.label(),
			"Waiting for confirmation in wallet..."
		);
	}

	#[test]
	fn test_failure_label_and_classification() {
		let failure = AirdropFailure::UnsupportedChain { chain_id: 56 };
		assert!(failure.is_configuration_error());
		assert_eq!(
			AirdropState::Failed(failure).label(),
			"No TSender contract found for chain 56, please use a supported chain"
		);

		let rejected = AirdropFailure::UserRejected {
			step: TransactionStep::Approval,
		};
		assert!(rejected.is_user_rejection());
		assert_eq!(rejected.to_string(), "Approval request rejected in wallet");
	}
}
