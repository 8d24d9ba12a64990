//! Validation errors raised before an airdrop is submitted

use thiserror::Error;

use crate::models::AddressError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AirdropValidationError {
	#[error("Invalid token address: {0}")]
	InvalidToken(AddressError),

	#[error("Invalid recipient #{index}: {source}")]
	InvalidRecipient {
		index: usize,
		#[source]
		source: AddressError,
	},

	#[error("Invalid amount #{index}: '{value}' is not a non-negative integer")]
	InvalidAmount { index: usize, value: String },

	#[error("No recipients provided")]
	NoRecipients,

	#[error("{recipients} recipients but {amounts} amounts")]
	LengthMismatch { recipients: usize, amounts: usize },

	#[error("Total amount must be greater than zero")]
	ZeroTotal,

	#[error("Total amount exceeds the largest uint256 value")]
	TotalOverflow,
}

pub type AirdropValidationResult<T> = Result<T, AirdropValidationError>;
