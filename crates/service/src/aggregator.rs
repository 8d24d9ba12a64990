//! Amount aggregation for the airdrop form

use alloy_primitives::U256;
use tsender_types::split_entries;

/// Sum a comma/newline separated list of integer amounts
///
/// Entries that are not plain non-negative decimal integers contribute zero,
/// so a half-typed list still shows a running total. The sum saturates at
/// `U256::MAX`.
pub fn calculate_total(text: &str) -> U256 {
	split_entries(text)
		.into_iter()
		.filter_map(|entry| U256::from_str_radix(entry, 10).ok())
		.fold(U256::ZERO, |total, amount| total.saturating_add(amount))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn total(text: &str) -> u64 {
		calculate_total(text).to::<u64>()
	}

	#[test]
	fn test_mixed_separators() {
		assert_eq!(total("100, 200\n300"), 600);
		assert_eq!(total("1,2,3"), 6);
		assert_eq!(total("1\n2\n3"), 6);
		assert_eq!(total("1,2\n3"), 6);
		assert_eq!(total("1\r\n2\r\n3"), 6);
	}

	#[test]
	fn test_empty_and_blank_entries() {
		assert_eq!(total(""), 0);
		assert_eq!(total("   "), 0);
		assert_eq!(total("100,,200"), 300);
		assert_eq!(total("100,200,"), 300);
		assert_eq!(total(" ,\n , "), 0);
	}

	#[test]
	fn test_unparsable_entries_count_as_zero() {
		assert_eq!(total("abc, 50"), 50);
		assert_eq!(total("-5, 10"), 10);
		assert_eq!(total("1.5, 2"), 2);
		assert_eq!(total("0x10, 1"), 1);
	}

	#[test]
	fn test_large_amounts() {
		let wei = "1000000000000000000000000";
		assert_eq!(
			calculate_total(&format!("{wei},{wei}")),
			U256::from_str_radix("2000000000000000000000000", 10).unwrap()
		);

		let max = U256::MAX.to_string();
		assert_eq!(calculate_total(&format!("{max}\n1")), U256::MAX);
	}

	#[test]
	fn test_order_independent() {
		assert_eq!(calculate_total("5,10,15"), calculate_total("15\n5,10"));
	}
}
