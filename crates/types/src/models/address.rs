//! Textual address parsing
//!
//! Addresses typed by users must be `0x` followed by exactly 40 hex characters.
//! Case is ignored; checksum casing is accepted but not enforced.

use alloy_primitives::Address;
use std::str::FromStr;
use thiserror::Error;

/// Length of the hex body of an address, without the `0x` prefix
pub const ADDRESS_HEX_LEN: usize = 40;

/// Errors produced while parsing a textual address
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
	#[error("address is empty")]
	Empty,
	#[error("address '{input}' is missing the 0x prefix")]
	MissingPrefix { input: String },
	#[error("address '{input}' must have 40 hex characters, found {found}")]
	InvalidLength { input: String, found: usize },
	#[error("address '{input}' contains non-hex characters")]
	InvalidHex { input: String },
}

/// Parse a `0x`-prefixed 40 hex character address
///
/// Surrounding whitespace is trimmed before validation.
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		return Err(AddressError::Empty);
	}

	let body = trimmed
		.strip_prefix("0x")
		.or_else(|| trimmed.strip_prefix("0X"))
		.ok_or_else(|| AddressError::MissingPrefix {
			input: trimmed.to_string(),
		})?;

	if body.len() != ADDRESS_HEX_LEN {
		return Err(AddressError::InvalidLength {
			input: trimmed.to_string(),
			found: body.len(),
		});
	}

	if !body.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(AddressError::InvalidHex {
			input: trimmed.to_string(),
		});
	}

	Address::from_str(body).map_err(|_| AddressError::InvalidHex {
		input: trimmed.to_string(),
	})
}

/// Cheap shape check used before issuing token metadata reads
pub fn looks_like_address(input: &str) -> bool {
	input.len() == ADDRESS_HEX_LEN + 2 && input.starts_with("0x")
}
