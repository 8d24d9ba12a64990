//! Typed contract reads over a `ChainClient`

use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use tsender_types::{ChainClient, ChainResult, ContractCall};

/// Run a read-only call against `to` and decode its return value
pub async fn read_call<C: SolCall>(
	client: &dyn ChainClient,
	to: Address,
	call: &C,
) -> ChainResult<C::Return> {
	let call = ContractCall::new(to, call);
	let data = client.read_contract(&call).await?;
	ContractCall::decode_returns::<C>(&data)
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::Bytes;
	use alloy_sol_types::{sol_data, SolType};
	use tsender_types::test_utils::{OWNER, TOKEN};
	use tsender_types::{ChainClientError, MockChainClient, IERC20};

	#[tokio::test]
	async fn test_read_call_decodes_return() {
		let mut client = MockChainClient::new();
		client
			.expect_read_contract()
			.withf(|call| call.to == TOKEN && call.is::<IERC20::decimalsCall>())
			.times(1)
			.returning(|_| Ok(Bytes::from(sol_data::Uint::<8>::abi_encode(&18u8))));

		let decimals = read_call(&client, TOKEN, &IERC20::decimalsCall {})
			.await
			.unwrap();
		assert_eq!(decimals, 18);
	}

	#[tokio::test]
	async fn test_read_call_surfaces_decode_errors() {
		let mut client = MockChainClient::new();
		client
			.expect_read_contract()
			.returning(|_| Ok(Bytes::new()));

		let result = read_call(
			&client,
			TOKEN,
			&IERC20::allowanceCall {
				owner: OWNER,
				spender: OWNER,
			},
		)
		.await;
		assert!(matches!(result, Err(ChainClientError::Decode { .. })));
	}
}
