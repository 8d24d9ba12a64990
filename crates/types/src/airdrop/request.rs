//! Parsing free-form recipient and amount text into a validated request

use alloy_primitives::{Address, U256};
use serde::Serialize;

use super::{AirdropValidationError, AirdropValidationResult};
use crate::models::parse_address;

/// Split text on commas and newlines, trimming entries and dropping empty ones
///
/// Carriage returns are treated as whitespace so pasted CRLF text behaves the
/// same as LF text.
pub fn split_entries(text: &str) -> Vec<&str> {
	text.split([',', '\n'])
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
		.collect()
}

/// Parse recipient text into addresses, preserving order
pub fn parse_recipients(text: &str) -> AirdropValidationResult<Vec<Address>> {
	split_entries(text)
		.into_iter()
		.enumerate()
		.map(|(index, entry)| {
			parse_address(entry)
				.map_err(|source| AirdropValidationError::InvalidRecipient { index, source })
		})
		.collect()
}

/// Parse amount text into base-unit quantities, preserving order
///
/// Unlike the display total, every entry must be a valid decimal integer.
pub fn parse_amounts(text: &str) -> AirdropValidationResult<Vec<U256>> {
	split_entries(text)
		.into_iter()
		.enumerate()
		.map(|(index, entry)| {
			U256::from_str_radix(entry, 10).map_err(|_| AirdropValidationError::InvalidAmount {
				index,
				value: entry.to_string(),
			})
		})
		.collect()
}

/// A validated airdrop, ready for the orchestrator
///
/// Recipients and amounts are zipped positionally by the contract, so the two
/// lists always have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirdropRequest {
	token: Address,
	recipients: Vec<Address>,
	amounts: Vec<U256>,
	total: U256,
}

impl AirdropRequest {
	/// Build a request from already-typed parts
	pub fn new(
		token: Address,
		recipients: Vec<Address>,
		amounts: Vec<U256>,
	) -> AirdropValidationResult<Self> {
		if recipients.is_empty() {
			return Err(AirdropValidationError::NoRecipients);
		}
		if recipients.len() != amounts.len() {
			return Err(AirdropValidationError::LengthMismatch {
				recipients: recipients.len(),
				amounts: amounts.len(),
			});
		}

		let total = amounts
			.iter()
			.try_fold(U256::ZERO, |acc, amount| acc.checked_add(*amount))
			.ok_or(AirdropValidationError::TotalOverflow)?;
		if total.is_zero() {
			return Err(AirdropValidationError::ZeroTotal);
		}

		Ok(Self {
			token,
			recipients,
			amounts,
			total,
		})
	}

	/// Build a request from the three raw form inputs
	pub fn from_text(
		token: &str,
		recipients: &str,
		amounts: &str,
	) -> AirdropValidationResult<Self> {
		let token = parse_address(token).map_err(AirdropValidationError::InvalidToken)?;
		let recipients = parse_recipients(recipients)?;
		let amounts = parse_amounts(amounts)?;
		Self::new(token, recipients, amounts)
	}

	pub fn token(&self) -> Address {
		self.token
	}

	pub fn recipients(&self) -> &[Address] {
		&self.recipients
	}

	pub fn amounts(&self) -> &[U256] {
		&self.amounts
	}

	/// Sum of all amounts, the quantity that must be approved
	pub fn total(&self) -> U256 {
		self.total
	}

	pub fn len(&self) -> usize {
		self.recipients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.recipients.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::AddressError;

	const TOKEN: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";
	const ALICE: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
	const BOB: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";

	#[test]
	fn test_split_entries_mixed_delimiters() {
		assert_eq!(split_entries("1, 2\n3,\n\n 4 ,"), vec!["1", "2", "3", "4"]);
		assert_eq!(split_entries("1\r\n2\r\n"), vec!["1", "2"]);
		assert!(split_entries("").is_empty());
		assert!(split_entries(" , \n ,").is_empty());
	}

	#[test]
	fn test_from_text_builds_request() {
		let request = AirdropRequest::from_text(
			TOKEN,
			&format!("{ALICE},\n{BOB}"),
			"100\n200",
		)
		.unwrap();

		assert_eq!(request.len(), 2);
		assert_eq!(request.recipients()[1].to_string(), BOB);
		assert_eq!(
			request.amounts(),
			&[U256::from(100u64), U256::from(200u64)]
		);
		assert_eq!(request.total(), U256::from(300u64));
	}

	#[test]
	fn test_length_mismatch_rejected() {
		let result = AirdropRequest::from_text(TOKEN, &format!("{ALICE},{BOB}"), "100");
		assert_eq!(
			result,
			Err(AirdropValidationError::LengthMismatch {
				recipients: 2,
				amounts: 1
			})
		);
	}

	#[test]
	fn test_unparsable_amount_rejected() {
		let result = AirdropRequest::from_text(TOKEN, &format!("{ALICE},{BOB}"), "abc, 50");
		assert_eq!(
			result,
			Err(AirdropValidationError::InvalidAmount {
				index: 0,
				value: "abc".to_string()
			})
		);
		assert!(parse_amounts("-5").is_err());
		assert!(parse_amounts("1.5").is_err());
	}

	#[test]
	fn test_invalid_addresses_rejected() {
		assert!(matches!(
			AirdropRequest::from_text("0x1234", ALICE, "1"),
			Err(AirdropValidationError::InvalidToken(AddressError::InvalidLength { .. }))
		));
		assert!(matches!(
			AirdropRequest::from_text(TOKEN, &format!("{ALICE}, nope"), "1, 2"),
			Err(AirdropValidationError::InvalidRecipient { index: 1, .. })
		));
	}

	#[test]
	fn test_empty_and_zero_rejected() {
		assert_eq!(
			AirdropRequest::from_text(TOKEN, "", ""),
			Err(AirdropValidationError::NoRecipients)
		);
		assert_eq!(
			AirdropRequest::from_text(TOKEN, ALICE, "0"),
			Err(AirdropValidationError::ZeroTotal)
		);
	}

	#[test]
	fn test_total_overflow_rejected() {
		let alice = parse_address(ALICE).unwrap();
		let token = parse_address(TOKEN).unwrap();

		let result = AirdropRequest::new(
			token,
			vec![alice, alice],
			vec![U256::MAX, U256::from(5u8)],
		);
		assert_eq!(result, Err(AirdropValidationError::TotalOverflow));

		let at_limit = AirdropRequest::new(
			token,
			vec![alice, alice],
			vec![U256::MAX - U256::from(5u8), U256::from(5u8)],
		)
		.unwrap();
		assert_eq!(at_limit.total(), U256::MAX);
	}
}
