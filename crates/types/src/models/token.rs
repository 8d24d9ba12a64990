//! ERC-20 token metadata and amount formatting

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Placeholder rendered when a derived value is unknown
pub const PLACEHOLDER: &str = "-";

/// Metadata read from an ERC-20 token contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
}

impl TokenDetails {
	pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
		Self {
			name: name.into(),
			symbol: symbol.into(),
			decimals,
		}
	}

	/// Display label in the form `Name (SYMBOL)`
	pub fn label(&self) -> String {
		format!("{} ({})", self.name, self.symbol)
	}

	/// Render a base-unit amount in whole tokens using this token's decimals
	pub fn format_amount(&self, amount: U256) -> String {
		format_token_amount(amount, self.decimals)
	}
}

/// Render `amount / 10^decimals` with exactly two fractional digits
///
/// The fractional part is rounded half-up on the third digit. Integer math is
/// used throughout so values beyond `f64` precision stay exact.
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
	let Some(scale) = U256::from(10u8).checked_pow(U256::from(decimals)) else {
		// 10^decimals exceeds U256, so every amount rounds to zero
		return "0.00".to_string();
	};
	// Amount expressed in hundredths of a token, rounded half-up
	let hundredths = if decimals >= 2 {
		let divisor = scale / U256::from(100u8);
		let half = divisor / U256::from(2u8);
		amount.saturating_add(half) / divisor
	} else {
		amount.saturating_mul(U256::from(100u8) / scale)
	};

	let whole = hundredths / U256::from(100u8);
	let frac = hundredths % U256::from(100u8);
	format!("{}.{:0>2}", whole, frac.to_string())
}
