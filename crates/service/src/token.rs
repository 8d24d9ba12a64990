//! Token metadata lookup

use std::sync::Arc;

use tracing::{debug, warn};
use tsender_types::{looks_like_address, parse_address, ChainClient, TokenDetails, IERC20};

use crate::calls::read_call;

/// Reads ERC-20 metadata for the token entered in the form
#[derive(Debug, Clone)]
pub struct TokenService {
	client: Arc<dyn ChainClient>,
}

impl TokenService {
	pub fn new(client: Arc<dyn ChainClient>) -> Self {
		Self { client }
	}

	/// Fetch name, symbol and decimals for `token`
	///
	/// Returns `None` without touching the chain unless the input has the
	/// shape of an address. Read failures are logged and also yield `None`.
	pub async fn fetch_details(&self, token: &str) -> Option<TokenDetails> {
		let token = token.trim();
		if !looks_like_address(token) {
			return None;
		}

		let address = match parse_address(token) {
			Ok(address) => address,
			Err(e) => {
				debug!("Skipping token details lookup: {}", e);
				return None;
			},
		};

		let client = self.client.as_ref();
		let result = futures::try_join!(
			read_call(client, address, &IERC20::nameCall {}),
			read_call(client, address, &IERC20::symbolCall {}),
			read_call(client, address, &IERC20::decimalsCall {}),
		);

		match result {
			Ok((name, symbol, decimals)) => {
				debug!("Token {} is {} ({}), {} decimals", address, name, symbol, decimals);
				Some(TokenDetails::new(name, symbol, decimals))
			},
			Err(e) => {
				warn!("Failed to read token details for {}: {}", address, e);
				None
			},
		}
	}
}
